//! Price observation sources.
//!
//! The keeper derives the time-weighted reference tick from cumulative tick
//! observations, the same accumulator shape AMM oracles expose: the mean
//! tick over a window is the cumulative difference divided by the elapsed
//! seconds, floored toward negative infinity.

use crate::error::{KeeperError, KeeperResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use surge_core::PoolId;

/// One cumulative-tick observation pair over a window
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TickObservation {
    /// Cumulative tick at the start of the window
    pub tick_cumulative_start: i64,
    /// Cumulative tick now
    pub tick_cumulative_end: i64,
    /// Spot tick at observation time
    pub spot_tick: i32,
}

/// Source of per-pool tick observations
pub trait OracleSource {
    fn observe(&self, pool: &PoolId, window_secs: u64) -> KeeperResult<TickObservation>;
}

/// Mean tick over the window, floored toward negative infinity so that
/// e.g. a cumulative delta of -1 over 2 seconds lands on tick -1, not 0.
pub fn time_weighted_tick(observation: &TickObservation, window_secs: u64) -> KeeperResult<i32> {
    if window_secs == 0 {
        return Err(KeeperError::OracleError(
            "zero observation window".to_string(),
        ));
    }
    let delta = observation.tick_cumulative_end - observation.tick_cumulative_start;
    let mean = delta.div_euclid(window_secs as i64);
    i32::try_from(mean)
        .map_err(|_| KeeperError::OracleError(format!("mean tick {mean} out of range")))
}

/// Oracle source backed by a JSON snapshot file keyed by hex pool id.
/// Stands in for a live accumulator feed in tests and offline runs.
#[derive(Debug, Default)]
pub struct FileOracleSource {
    observations: HashMap<String, TickObservation>,
}

impl FileOracleSource {
    pub fn load(path: impl AsRef<Path>) -> KeeperResult<Self> {
        let raw = fs::read_to_string(path)?;
        let observations: HashMap<String, TickObservation> = serde_json::from_str(&raw)?;
        Ok(Self { observations })
    }
}

impl OracleSource for FileOracleSource {
    fn observe(&self, pool: &PoolId, _window_secs: u64) -> KeeperResult<TickObservation> {
        self.observations
            .get(&pool.to_hex())
            .copied()
            .ok_or_else(|| {
                KeeperError::OracleError(format!("no observation for pool {}", pool.to_hex()))
            })
    }
}
