//! # Surge Core - Dynamic Fee Decision Logic
//!
//! This crate contains the pure decision logic for per-trade dynamic fees,
//! shared between the hosting dispatcher integration and the off-chain
//! keeper. It provides:
//!
//! - Fixed-point square-root price math (Q64.96) over a 256-bit integer
//! - Per-pool calibration state written by a keeper
//! - Trade impact and price deviation signals in basis points
//! - Fee override policies and the dispatcher-facing engine entry point
//!
//! Everything here is deterministic and allocation-light; the only state is
//! the calibration store inside [`FeeEngine`].

pub mod constants;
pub mod deviation;
pub mod engine;
pub mod errors;
pub mod impact;
pub mod math;
pub mod policy;
pub mod pool;
pub mod store;

// Re-export commonly used items
pub use constants::*;
pub use deviation::deviation_away_bps;
pub use engine::{BeforeTradeOutcome, FeeEngine, BEFORE_TRADE_SELECTOR, NO_BALANCE_ADJUSTMENT};
pub use errors::{CoreResult, SurgeCoreError};
pub use impact::estimate_impact_bps;
pub use math::{is_tick_valid, mul_div, sqrt_price_x96_at_tick, Rounding, U256};
pub use policy::{FeeDecision, FeePolicy, MultiplicativePolicy, PiecewisePolicy};
pub use pool::{Address, PoolDescriptor, PoolId, TradeDirection, TradeRequest};
pub use store::{Calibration, CalibrationStore};
