//! # Deviation Evaluator
//!
//! Measures how far the current price sits from the time-weighted reference
//! price, in basis points, and gates the result on trade direction: only a
//! trade pushing the price further away from the reference contributes. The
//! gate is a hard cutoff — a trade moving toward the reference scores zero
//! no matter how large the standing deviation is.

use crate::constants::{BPS_DENOMINATOR, Q64};
use crate::errors::{CoreResult, SurgeCoreError};
use crate::math::big_int::{mul_div, Rounding, U256};
use crate::pool::TradeDirection;

/// Away-from-reference deviation in basis points.
///
/// The sqrt-price ratio is taken in Q64.64 and squared to recover the price
/// ratio (`price = sqrt_price^2`), then compared against parity:
/// `|r^2 - 1| * 10_000` in fixed point. Either price unset (0) yields 0.
/// A ratio too large for Q64.64 saturates the magnitude — the direction
/// classification still decides whether it counts.
pub fn deviation_away_bps(
    reference_sqrt_price_x96: U256,
    current_sqrt_price_x96: U256,
    direction: TradeDirection,
) -> CoreResult<u64> {
    if reference_sqrt_price_x96.is_zero() || current_sqrt_price_x96.is_zero() {
        return Ok(0);
    }

    // r = current / reference in Q64.64
    let scaled = current_sqrt_price_x96
        .shl(64)
        .ok_or(SurgeCoreError::MathOverflow)?;
    let ratio_x64 = scaled
        .div(&reference_sqrt_price_x96)
        .ok_or(SurgeCoreError::DivisionByZero)?;

    let one_x64 = U256::from_u128(Q64);
    if ratio_x64 == one_x64 {
        // At parity there is no deviation and no meaningful away direction
        return Ok(0);
    }

    // Away iff the trade pushes the price further from the reference:
    // current above and pushing up, or current below and pushing down.
    let current_above = ratio_x64 > one_x64;
    if current_above != direction.pushes_price_up() {
        return Ok(0);
    }

    let Some(r) = ratio_x64.to_u128() else {
        // Sqrt-price ratio of 2^64 or more; any threshold is exceeded
        return Ok(u64::MAX);
    };

    // Square the sqrt-price ratio to get the price ratio, still Q64.64
    let r = U256::from_u128(r);
    let price_ratio_x64 = r
        .mul_shift(&r, 64)
        .ok_or(SurgeCoreError::MathOverflow)?;

    let distance = if price_ratio_x64 >= one_x64 {
        price_ratio_x64.sub(&one_x64)
    } else {
        one_x64.sub(&price_ratio_x64)
    }
    .ok_or(SurgeCoreError::MathUnderflow)?;

    let bps = mul_div(
        distance,
        U256::from_u64(BPS_DENOMINATOR),
        one_x64,
        Rounding::Down,
    )?;
    Ok(bps.to_u64().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_SQRT_PRICE_X96, MIN_SQRT_PRICE_X96, SQRT_PRICE_ONE_X96};
    use proptest::prelude::*;

    const ONE_X96: u128 = 1u128 << 96;
    // sqrt_price_x96_at_tick(100): price ~1.01, sqrt price ~0.499% above parity
    const TICK_100_X96: u128 = 79625275426524748796330556128;
    // sqrt_price_x96_at_tick(-100)
    const TICK_NEG_100_X96: u128 = 78833030112140176575862854579;

    fn dev(reference: u128, current: u128, direction: TradeDirection) -> u64 {
        deviation_away_bps(
            U256::from_u128(reference),
            U256::from_u128(current),
            direction,
        )
        .unwrap()
    }

    #[test]
    fn test_unset_prices_yield_zero() {
        assert_eq!(dev(0, ONE_X96, TradeDirection::ZeroForOne), 0);
        assert_eq!(dev(ONE_X96, 0, TradeDirection::OneForZero), 0);
        assert_eq!(dev(0, 0, TradeDirection::ZeroForOne), 0);
    }

    #[test]
    fn test_parity_yields_zero_both_directions() {
        assert_eq!(dev(ONE_X96, ONE_X96, TradeDirection::ZeroForOne), 0);
        assert_eq!(dev(ONE_X96, ONE_X96, TradeDirection::OneForZero), 0);
        assert_eq!(
            dev(TICK_100_X96, TICK_100_X96, TradeDirection::OneForZero),
            0
        );
    }

    #[test]
    fn test_above_reference_away_is_up() {
        // Current ~1.005x reference in sqrt terms, ~1.01x in price terms
        assert_eq!(dev(ONE_X96, TICK_100_X96, TradeDirection::OneForZero), 100);
        assert_eq!(dev(ONE_X96, TICK_100_X96, TradeDirection::ZeroForOne), 0);
    }

    #[test]
    fn test_below_reference_away_is_down() {
        assert_eq!(
            dev(ONE_X96, TICK_NEG_100_X96, TradeDirection::ZeroForOne),
            99
        );
        assert_eq!(
            dev(ONE_X96, TICK_NEG_100_X96, TradeDirection::OneForZero),
            0
        );
    }

    #[test]
    fn test_boundary_extreme_ratios() {
        // Largest representable ratio: saturates rather than overflowing
        let up = deviation_away_bps(
            MIN_SQRT_PRICE_X96,
            MAX_SQRT_PRICE_X96,
            TradeDirection::OneForZero,
        )
        .unwrap();
        assert_eq!(up, u64::MAX);
        let toward = deviation_away_bps(
            MIN_SQRT_PRICE_X96,
            MAX_SQRT_PRICE_X96,
            TradeDirection::ZeroForOne,
        )
        .unwrap();
        assert_eq!(toward, 0);

        // Smallest representable ratio rounds to a zero price ratio, i.e.
        // the full 100% below parity
        let down = deviation_away_bps(
            MAX_SQRT_PRICE_X96,
            MIN_SQRT_PRICE_X96,
            TradeDirection::ZeroForOne,
        )
        .unwrap();
        assert_eq!(down, 10_000);

        // Parity at the extremes still scores zero
        for price in [MIN_SQRT_PRICE_X96, MAX_SQRT_PRICE_X96, SQRT_PRICE_ONE_X96] {
            assert_eq!(
                deviation_away_bps(price, price, TradeDirection::OneForZero).unwrap(),
                0
            );
        }
    }

    proptest! {
        #[test]
        fn prop_exactly_one_direction_away(
            reference in (1u128 << 90)..(1u128 << 110),
            offset_bps in 1u128..5_000,
            above in proptest::bool::ANY,
        ) {
            // Build a current price a known number of sqrt-bps off reference
            let delta = reference * offset_bps / 10_000;
            prop_assume!(delta > 0);
            let current = if above { reference + delta } else { reference - delta };

            let up = dev(reference, current, TradeDirection::OneForZero);
            let down = dev(reference, current, TradeDirection::ZeroForOne);
            // One direction is away with a visible magnitude, the other is
            // hard-gated to zero
            if above {
                prop_assert!(up > 0);
                prop_assert_eq!(down, 0);
            } else {
                prop_assert!(down > 0);
                prop_assert_eq!(up, 0);
            }
        }

        #[test]
        fn prop_magnitude_grows_with_distance(
            reference in (1u128 << 90)..(1u128 << 110),
            offset_bps in 1u128..2_500,
        ) {
            let near = reference + reference * offset_bps / 10_000;
            let far = reference + reference * (offset_bps * 2) / 10_000;
            let near_dev = dev(reference, near, TradeDirection::OneForZero);
            let far_dev = dev(reference, far, TradeDirection::OneForZero);
            prop_assert!(far_dev >= near_dev);
        }
    }
}
