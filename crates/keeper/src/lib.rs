//! # Surge Keeper
//!
//! Off-chain service that keeps per-pool calibration fresh: it derives the
//! time-weighted reference price and the spot price from oracle
//! observations and writes them, along with a configured depth proxy, into
//! the fee engine's calibration store.

pub mod config;
pub mod error;
pub mod keeper;
pub mod oracle;

pub use config::{KeeperConfig, PolicyKind, PoolEntry};
pub use error::{KeeperError, KeeperResult};
pub use keeper::Keeper;
pub use oracle::{time_weighted_tick, FileOracleSource, OracleSource, TickObservation};
