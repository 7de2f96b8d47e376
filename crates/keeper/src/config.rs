//! Keeper configuration loaded from a TOML file.
//!
//! Addresses are given as human-readable seed strings and derived
//! deterministically, so a config file fully pins the pool identities the
//! keeper writes calibration for.

use crate::error::{KeeperError, KeeperResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use surge_core::{Address, FeePolicy, MultiplicativePolicy, PiecewisePolicy, PoolDescriptor};

/// Keeper configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeeperConfig {
    /// Seed of the dispatcher authorized to call the engine
    pub dispatcher: String,

    /// Seed of the fee engine identity pools are wired to
    pub engine: String,

    /// Fee policy the engine runs with
    #[serde(default)]
    pub policy: PolicyKind,

    /// Default update interval in seconds
    pub update_interval_secs: u64,

    /// Time-weighted reference window in seconds
    pub twap_window_secs: u64,

    /// List of pools to calibrate
    pub pools: Vec<PoolEntry>,
}

/// Which fee policy variant to instantiate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Piecewise,
    Multiplicative,
}

impl PolicyKind {
    pub fn to_policy(self) -> FeePolicy {
        match self {
            PolicyKind::Piecewise => FeePolicy::Piecewise(PiecewisePolicy::default()),
            PolicyKind::Multiplicative => {
                FeePolicy::Multiplicative(MultiplicativePolicy::default())
            }
        }
    }
}

/// Configuration for one pool
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolEntry {
    /// Pool name for logging
    pub name: String,

    /// Asset seeds, in pool order
    pub asset_0: String,
    pub asset_1: String,

    /// Base fee tier in fee units (millionths)
    pub base_fee: u32,

    pub tick_spacing: i32,

    /// Liquidity-depth proxy in token-in units
    pub depth: u64,
}

impl PoolEntry {
    /// Build the descriptor this entry calibrates, bound to the given engine
    pub fn descriptor(&self, engine: Address) -> PoolDescriptor {
        PoolDescriptor {
            asset_0: Address::from_seed(&self.asset_0),
            asset_1: Address::from_seed(&self.asset_1),
            base_fee: self.base_fee,
            tick_spacing: self.tick_spacing,
            engine,
        }
    }
}

impl KeeperConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> KeeperResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: KeeperConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> KeeperResult<()> {
        if self.twap_window_secs == 0 {
            return Err(KeeperError::InvalidConfig(
                "twap_window_secs must be positive".to_string(),
            ));
        }
        if self.pools.is_empty() {
            return Err(KeeperError::InvalidConfig(
                "at least one pool is required".to_string(),
            ));
        }
        for pool in &self.pools {
            if pool.tick_spacing <= 0 {
                return Err(KeeperError::InvalidConfig(format!(
                    "pool {}: tick_spacing must be positive",
                    pool.name
                )));
            }
            if pool.base_fee >= surge_core::FEE_UNITS_DENOMINATOR {
                return Err(KeeperError::InvalidConfig(format!(
                    "pool {}: base_fee {} is not below 100%",
                    pool.name, pool.base_fee
                )));
            }
        }
        Ok(())
    }

    pub fn dispatcher_address(&self) -> Address {
        Address::from_seed(&self.dispatcher)
    }

    pub fn engine_address(&self) -> Address {
        Address::from_seed(&self.engine)
    }
}
