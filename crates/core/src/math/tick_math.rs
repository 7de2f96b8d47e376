//! # Tick Math
//!
//! Conversion from discrete price ticks to Q64.96 square-root prices.
//! Works in Q128.128 internally and narrows to Q64.96 at the end, so the
//! full tick range stays exact without any platform-dependent arithmetic.

use crate::constants::{MAX_TICK, MIN_TICK};
use crate::errors::{CoreResult, SurgeCoreError};
use crate::math::big_int::U256;

/// 1.0 in Q128.128
const ONE_X128: U256 = U256::new(0, 1);

/// Pre-computed values of sqrt(1.0001)^(2^k) in Q128 fixed point, one per
/// bit position 0..19 of the absolute tick. These are exact integer parts of
/// 2^128 * sqrt(1.0001)^(2^k) and must never be re-derived at runtime.
const SQRT_RATIO_POWERS_X128: [U256; 20] = [
    U256::new(0x000346d6ff11672ae55ad00f5c38565c, 0x1), // sqrt(1.0001)^1
    U256::new(0x00068db8bac710cb295e9e1b089a0275, 0x1), // sqrt(1.0001)^2
    U256::new(0x000d1b9c68abe5f76b30fb7581b74fb7, 0x1), // sqrt(1.0001)^4
    U256::new(0x001a37e4a234cb0830516e519450a145, 0x1), // sqrt(1.0001)^8
    U256::new(0x00347278ab0e92ada25ab46019279f8f, 0x1), // sqrt(1.0001)^16
    U256::new(0x0068efb00a525480a5d7fdc2ccf5998f, 0x1), // sqrt(1.0001)^32
    U256::new(0x00d20a63b4173839df9daaa568442ce5, 0x1), // sqrt(1.0001)^64
    U256::new(0x01a4c11c742dd7729738df5e966396f0, 0x1), // sqrt(1.0001)^128
    U256::new(0x034c35c31f64cfa6dc0d6de43d0881d3, 0x1), // sqrt(1.0001)^256
    U256::new(0x06a34b78c8aaffbf81bed5a32b0fce74, 0x1), // sqrt(1.0001)^512
    U256::new(0x0d72a6a46ccd8bce9ae771b16294a7ea, 0x1), // sqrt(1.0001)^1024
    U256::new(0x1b9a258e63928596dc757faa33154df6, 0x1), // sqrt(1.0001)^2048
    U256::new(0x3a2e2bda04f8379f3cd17be5c343d452, 0x1), // sqrt(1.0001)^4096
    U256::new(0x81954be69e0da8fe77f2ab42e87cf511, 0x1), // sqrt(1.0001)^8192
    U256::new(0x44c2655d185a02908025287709061f74, 0x2), // sqrt(1.0001)^16384
    U256::new(0x25816eeb9f935b1c616779e807e264b2, 0x5), // sqrt(1.0001)^32768
    U256::new(0x7c8d00b551684ff4d31ae06501b81fa7, 0x1a), // sqrt(1.0001)^65536
    U256::new(0x893d0b2df7c97884590c66cde3d18ca0, 0x2bd), // sqrt(1.0001)^131072
    U256::new(0xe1e19e448cf8b95d2152dccf4128f29d, 0x78278), // sqrt(1.0001)^262144
    U256::new(0x57501416feade3193a21b785e9f303f7, 0x38651b58d4), // sqrt(1.0001)^524288
];

/// Get the Q64.96 square-root price for a tick.
///
/// Binary-decomposes the absolute tick and accumulates the product of the
/// matching per-bit powers via multiply-and-shift-right-by-128; negative
/// ticks invert the accumulated Q128.128 ratio as `U256::MAX / ratio`. The
/// final right shift by 32 rounds up when any remainder is truncated.
/// Strictly monotonic in `tick`; `tick == 0` yields exactly `1 << 96`.
pub fn sqrt_price_x96_at_tick(tick: i32) -> CoreResult<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(SurgeCoreError::TickOutOfRange);
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio = ONE_X128;
    for (k, power) in SQRT_RATIO_POWERS_X128.iter().enumerate() {
        if abs_tick & (1 << k) != 0 {
            // Cannot overflow: the accumulated ratio stays below 2^193 for
            // any in-range tick.
            ratio = ratio
                .mul_shift(power, 128)
                .ok_or(SurgeCoreError::MathOverflow)?;
        }
    }

    if tick < 0 {
        ratio = U256::MAX
            .div(&ratio)
            .ok_or(SurgeCoreError::DivisionByZero)?;
    }

    // Q128.128 -> Q64.96, rounding up if any truncated bit was set
    let truncated = ratio.shr(32);
    if ratio.lo & 0xFFFF_FFFF != 0 {
        truncated
            .add(&U256::from_u64(1))
            .ok_or(SurgeCoreError::MathOverflow)
    } else {
        Ok(truncated)
    }
}

/// Check if a tick is within the supported range
pub fn is_tick_valid(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}
