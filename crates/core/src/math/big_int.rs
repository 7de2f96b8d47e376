//! Big integer operations for high-precision math
//!
//! This module provides U256 operations, mul_div, and multiply-shift
//! functionality needed for Q-format fixed-point calculations. Q64.96
//! square-root prices occupy up to 160 bits and the tick converter works in
//! Q128.128, so the multiply and divide paths support the full 256-bit width
//! with a 512-bit intermediate.

use crate::errors::{CoreResult, SurgeCoreError};
use serde::{Deserialize, Serialize};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// 256-bit unsigned integer for fixed-point values and intermediates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct U256 {
    /// Low 128 bits
    pub lo: u128,
    /// High 128 bits
    pub hi: u128,
}

impl U256 {
    /// The value zero
    pub const ZERO: U256 = U256::new(0, 0);

    /// The maximum representable value (2^256 - 1)
    pub const MAX: U256 = U256::new(u128::MAX, u128::MAX);

    /// Create a new U256 from low and high parts
    pub const fn new(lo: u128, hi: u128) -> Self {
        Self { lo, hi }
    }

    /// Create from a single u128 value
    pub const fn from_u128(value: u128) -> Self {
        Self { lo: value, hi: 0 }
    }

    /// Create from a single u64 value
    pub const fn from_u64(value: u64) -> Self {
        Self { lo: value as u128, hi: 0 }
    }

    /// Check if the value is zero
    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Convert to u128, returning None if overflow
    pub fn to_u128(&self) -> Option<u128> {
        if self.hi == 0 {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Convert to u64, returning None if overflow
    pub fn to_u64(&self) -> Option<u64> {
        if self.hi == 0 && self.lo <= u64::MAX as u128 {
            Some(self.lo as u64)
        } else {
            None
        }
    }

    /// Number of leading zero bits
    pub fn leading_zeros(&self) -> u32 {
        if self.hi != 0 {
            self.hi.leading_zeros()
        } else {
            128 + self.lo.leading_zeros()
        }
    }

    /// Add two U256 values
    pub fn add(&self, other: &U256) -> Option<U256> {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        let hi = self.hi.checked_add(other.hi)?.checked_add(carry as u128)?;
        Some(U256::new(lo, hi))
    }

    /// Subtract two U256 values
    pub fn sub(&self, other: &U256) -> Option<U256> {
        let (lo, borrow) = self.lo.overflowing_sub(other.lo);
        let hi = self.hi.checked_sub(other.hi)?.checked_sub(borrow as u128)?;
        Some(U256::new(lo, hi))
    }

    /// Multiply two U256 values, returning None on 256-bit overflow
    pub fn mul(&self, other: &U256) -> Option<U256> {
        let p = self.full_mul(other);
        if p[4..].iter().any(|&w| w != 0) {
            return None;
        }
        Some(U256::from_limbs([p[0], p[1], p[2], p[3]]))
    }

    /// Compute (self * other) >> shift, returning None if the result does
    /// not fit in 256 bits. The full 512-bit product is kept internally, so
    /// Q64 and Q128 multiply-shifts are exact.
    pub fn mul_shift(&self, other: &U256, shift: u32) -> Option<U256> {
        debug_assert!(shift < 512);
        let p = self.full_mul(other);

        // The shifted value fits in 256 bits iff the product has no set bits
        // at positions >= 256 + shift.
        let mut product_bits = 0u32;
        for idx in (0..8).rev() {
            if p[idx] != 0 {
                product_bits = idx as u32 * 64 + (64 - p[idx].leading_zeros());
                break;
            }
        }
        if product_bits > 256 + shift {
            return None;
        }

        let word = (shift / 64) as usize;
        let bit = shift % 64;
        let mut out = [0u64; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            let idx = i + word;
            if idx >= 8 {
                break;
            }
            let mut v = p[idx] >> bit;
            if bit != 0 && idx + 1 < 8 {
                v |= p[idx + 1] << (64 - bit);
            }
            *slot = v;
        }
        Some(U256::from_limbs(out))
    }

    /// Divide by another U256, returning the quotient
    pub fn div(&self, other: &U256) -> Option<U256> {
        self.div_rem(other).map(|(q, _)| q)
    }

    /// Divide by another U256, returning quotient and remainder
    pub fn div_rem(&self, divisor: &U256) -> Option<(U256, U256)> {
        if divisor.is_zero() {
            return None;
        }
        if self < divisor {
            return Some((U256::ZERO, *self));
        }
        if self.hi == 0 {
            // divisor <= self, so it also fits in 128 bits
            return Some((
                U256::from_u128(self.lo / divisor.lo),
                U256::from_u128(self.lo % divisor.lo),
            ));
        }

        // Shift-subtract long division, aligning the divisor's top bit with
        // the dividend's.
        let shift = divisor.leading_zeros() - self.leading_zeros();
        let mut shifted = divisor.wrapping_shl(shift);
        let mut remainder = *self;
        let mut quotient = U256::ZERO;
        for i in (0..=shift).rev() {
            if remainder >= shifted {
                remainder = remainder.sub(&shifted)?;
                quotient = quotient.set_bit(i);
            }
            shifted = shifted.wrapping_shr(1);
        }
        Some((quotient, remainder))
    }

    /// Left shift, returning None if any set bit is shifted out
    pub fn shl(&self, n: u32) -> Option<U256> {
        if self.is_zero() {
            return Some(U256::ZERO);
        }
        if n >= 256 || self.leading_zeros() < n {
            return None;
        }
        Some(self.wrapping_shl(n))
    }

    /// Right shift (truncating)
    pub fn shr(&self, n: u32) -> U256 {
        if n >= 256 {
            return U256::ZERO;
        }
        self.wrapping_shr(n)
    }

    fn wrapping_shl(&self, n: u32) -> U256 {
        if n == 0 {
            *self
        } else if n < 128 {
            U256::new(self.lo << n, (self.hi << n) | (self.lo >> (128 - n)))
        } else {
            U256::new(0, self.lo << (n - 128))
        }
    }

    fn wrapping_shr(&self, n: u32) -> U256 {
        if n == 0 {
            *self
        } else if n < 128 {
            U256::new((self.lo >> n) | (self.hi << (128 - n)), self.hi >> n)
        } else {
            U256::new(self.hi >> (n - 128), 0)
        }
    }

    fn set_bit(&self, i: u32) -> U256 {
        if i < 128 {
            U256::new(self.lo | (1u128 << i), self.hi)
        } else {
            U256::new(self.lo, self.hi | (1u128 << (i - 128)))
        }
    }

    fn limbs(&self) -> [u64; 4] {
        [
            self.lo as u64,
            (self.lo >> 64) as u64,
            self.hi as u64,
            (self.hi >> 64) as u64,
        ]
    }

    fn from_limbs(l: [u64; 4]) -> U256 {
        U256::new(
            (l[0] as u128) | ((l[1] as u128) << 64),
            (l[2] as u128) | ((l[3] as u128) << 64),
        )
    }

    /// Schoolbook 256x256 -> 512 multiplication over u64 limbs
    fn full_mul(&self, other: &U256) -> [u64; 8] {
        let a = self.limbs();
        let b = other.limbs();
        let mut out = [0u64; 8];
        for i in 0..4 {
            let mut carry = 0u128;
            for j in 0..4 {
                let idx = i + j;
                let cur = out[idx] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
                out[idx] = cur as u64;
                carry = cur >> 64;
            }
            out[i + 4] = carry as u64;
        }
        out
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.hi.cmp(&other.hi) {
            std::cmp::Ordering::Equal => self.lo.cmp(&other.lo),
            ordering => ordering,
        }
    }
}

/// Multiply two values and divide by a third with specified rounding.
/// result = (a * b) / denominator; the product must fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> CoreResult<U256> {
    if denominator.is_zero() {
        return Err(SurgeCoreError::DivisionByZero);
    }

    let product = a.mul(&b).ok_or(SurgeCoreError::MulDivOverflow)?;
    let (quotient, remainder) = product
        .div_rem(&denominator)
        .ok_or(SurgeCoreError::MulDivOverflow)?;

    if rounding == Rounding::Up && !remainder.is_zero() {
        return quotient
            .add(&U256::from_u64(1))
            .ok_or(SurgeCoreError::MulDivOverflow);
    }

    Ok(quotient)
}

/// Multiply two u64 values and divide by a third with specified rounding
pub fn mul_div_u64(a: u64, b: u64, denominator: u64, rounding: Rounding) -> CoreResult<u64> {
    if denominator == 0 {
        return Err(SurgeCoreError::DivisionByZero);
    }

    let product = (a as u128) * (b as u128);
    let quotient = product / (denominator as u128);
    let remainder = product % (denominator as u128);

    let mut result = quotient;
    if rounding == Rounding::Up && remainder > 0 {
        result = result.checked_add(1).ok_or(SurgeCoreError::MulDivOverflow)?;
    }

    result
        .try_into()
        .map_err(|_| SurgeCoreError::MulDivOverflow)
}

/// Multiply two u128 values and divide by a third with specified rounding
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    let result = mul_div(
        U256::from_u128(a),
        U256::from_u128(b),
        U256::from_u128(denominator),
        rounding,
    )?;

    result.to_u128().ok_or(SurgeCoreError::MulDivOverflow)
}
