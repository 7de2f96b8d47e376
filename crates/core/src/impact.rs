//! # Impact Estimator
//!
//! Linear basis-point estimate of a trade's price impact against the pool's
//! calibrated depth proxy. Only exact-input trades produce a signal: an
//! output-denominated size is not comparable to the token-in depth proxy, so
//! exact-output trades estimate to zero rather than guessing.

use crate::constants::BPS_DENOMINATOR;
use crate::math::big_int::{mul_div_u128, Rounding};

/// Estimate price impact in basis points.
///
/// `floor(amount_in * 10_000 / depth)` for exact-input trades
/// (`signed_amount < 0`). Truncating division keeps the estimate
/// conservative. Uncalibrated depth (0) yields 0, and a quotient beyond
/// `u64` saturates.
pub fn estimate_impact_bps(signed_amount: i128, depth: u64) -> u64 {
    if signed_amount >= 0 || depth == 0 {
        return 0;
    }
    let amount_in = signed_amount.unsigned_abs();
    match mul_div_u128(
        amount_in,
        BPS_DENOMINATOR as u128,
        depth as u128,
        Rounding::Down,
    ) {
        Ok(bps) => u64::try_from(bps).unwrap_or(u64::MAX),
        Err(_) => u64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_output_has_no_impact() {
        assert_eq!(estimate_impact_bps(1, 200), 0);
        assert_eq!(estimate_impact_bps(i128::MAX, 1), 0);
        assert_eq!(estimate_impact_bps(0, 200), 0);
    }

    #[test]
    fn test_uncalibrated_depth_has_no_impact() {
        assert_eq!(estimate_impact_bps(-1_000_000, 0), 0);
    }

    #[test]
    fn test_linear_impact() {
        // 1 unit against depth 200 = 0.5% = 50 bps
        assert_eq!(estimate_impact_bps(-1, 200), 50);
        assert_eq!(estimate_impact_bps(-3, 200), 150);
        assert_eq!(estimate_impact_bps(-200, 200), 10_000);
    }

    #[test]
    fn test_truncating_division() {
        // 1 * 10_000 / 10_001 = 0.9999 truncates to 0
        assert_eq!(estimate_impact_bps(-1, 10_001), 0);
        // 3 * 10_000 / 20_000 = 1.5 truncates to 1
        assert_eq!(estimate_impact_bps(-3, 20_000), 1);
    }

    #[test]
    fn test_saturates_on_extreme_size() {
        assert_eq!(estimate_impact_bps(i128::MIN, 1), u64::MAX);
        assert_eq!(estimate_impact_bps(-(1i128 << 120), 1), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_monotonic_in_amount(amount in 1u64..u64::MAX, depth in 1u64..u64::MAX) {
            let smaller = estimate_impact_bps(-(amount as i128 - 1), depth);
            let larger = estimate_impact_bps(-(amount as i128), depth);
            prop_assert!(larger >= smaller);
        }

        #[test]
        fn prop_antitone_in_depth(amount in 1u64..u64::MAX, depth in 1u64..u64::MAX - 1) {
            let shallow = estimate_impact_bps(-(amount as i128), depth);
            let deep = estimate_impact_bps(-(amount as i128), depth + 1);
            prop_assert!(deep <= shallow);
        }

        #[test]
        fn prop_exact_output_always_zero(amount in 0i128..i128::MAX, depth in 0u64..u64::MAX) {
            prop_assert_eq!(estimate_impact_bps(amount, depth), 0);
        }
    }
}
