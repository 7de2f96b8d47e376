//! # Math Module
//!
//! Fixed-point arithmetic for the fee engine: U256 intermediates, mul_div
//! helpers, and tick-to-price conversion.

pub mod big_int;
pub mod tick_math;

pub use big_int::{mul_div, mul_div_u128, mul_div_u64, Rounding, U256};
pub use tick_math::{is_tick_valid, sqrt_price_x96_at_tick};
