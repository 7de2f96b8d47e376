//! # Engine Constants
//!
//! Fixed-point scales, tick and price bounds, and the pinned fee-policy
//! parameters that form part of the engine's external contract.

use crate::math::big_int::U256;

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Q64 fixed-point scale factor: 2^64
pub const Q64: u128 = 1u128 << 64;

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fee unit denominator (1,000,000 = 100%); pools quote fees in millionths
pub const FEE_UNITS_DENOMINATOR: u32 = 1_000_000;

/// Fee units per basis point
pub const FEE_UNITS_PER_BP: u32 = 100;

// ============================================================================
// Tick and Price Bounds
// ============================================================================

/// Minimum supported price tick
pub const MIN_TICK: i32 = -887_272;

/// Maximum supported price tick
pub const MAX_TICK: i32 = 887_272;

/// Q64.96 square-root price at tick 0 (exactly 1.0)
pub const SQRT_PRICE_ONE_X96: U256 = U256::new(1u128 << 96, 0);

/// Q64.96 square-root price at MIN_TICK
pub const MIN_SQRT_PRICE_X96: U256 = U256::new(4_295_128_739, 0);

/// Q64.96 square-root price at MAX_TICK
pub const MAX_SQRT_PRICE_X96: U256 =
    U256::new(0xefd1_fc69_c6be_6872_35b5_38c3_5394_5bcc, 0xfffd_8963);

// ============================================================================
// Fee Policy Defaults (external contract, must match exactly)
// ============================================================================

/// Piecewise policy: minimum price impact before an override is considered
pub const PIECEWISE_IMPACT_THRESHOLD_BPS: u64 = 50;

/// Piecewise policy: minimum away-from-reference deviation before an
/// override is considered
pub const PIECEWISE_DEVIATION_THRESHOLD_BPS: u64 = 50;

/// Piecewise policy: fee-unit bps added per 10 impact-bps over threshold
pub const PIECEWISE_SLOPE_PER_TEN_BPS_OVER: u32 = 1;

/// Piecewise policy: fee ceiling in fee units (2.00%)
pub const PIECEWISE_FEE_CAP: u32 = 20_000;

/// Multiplicative policy: minimum price impact before the override fires
pub const MULTIPLICATIVE_IMPACT_THRESHOLD_BPS: u64 = 100;

/// Multiplicative policy: factor applied to the base fee when triggered
pub const MULTIPLICATIVE_FEE_FACTOR: u32 = 4;
