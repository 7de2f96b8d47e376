//! Main keeper service: reads oracle observations and writes per-pool
//! calibration into the fee engine. One pool failing to refresh never
//! blocks the others.

use crate::config::{KeeperConfig, PoolEntry};
use crate::error::KeeperResult;
use crate::oracle::{time_weighted_tick, OracleSource};
use surge_core::{sqrt_price_x96_at_tick, FeeEngine, PoolDescriptor};
use tracing::{debug, info, warn};

pub struct Keeper<O: OracleSource> {
    config: KeeperConfig,
    engine: FeeEngine,
    oracle: O,
}

impl<O: OracleSource> Keeper<O> {
    pub fn new(config: KeeperConfig, oracle: O) -> Self {
        let engine = FeeEngine::new(config.dispatcher_address(), config.policy.to_policy());
        Self {
            config,
            engine,
            oracle,
        }
    }

    pub fn engine(&self) -> &FeeEngine {
        &self.engine
    }

    /// Swap in a fresh observation source, keeping engine state
    pub fn set_oracle(&mut self, oracle: O) {
        self.oracle = oracle;
    }

    /// Refresh calibration for every configured pool. Returns how many
    /// pools were updated.
    pub fn refresh_all(&mut self) -> usize {
        let engine_address = self.config.engine_address();
        let window = self.config.twap_window_secs;
        let pools = self.config.pools.clone();

        let mut updated = 0;
        for entry in &pools {
            let descriptor = entry.descriptor(engine_address);
            match self.refresh_pool(entry, &descriptor, window) {
                Ok(()) => updated += 1,
                Err(err) => {
                    warn!(pool = %entry.name, error = %err, "calibration refresh failed");
                }
            }
        }
        info!(updated, total = pools.len(), "calibration pass complete");
        updated
    }

    fn refresh_pool(
        &mut self,
        entry: &PoolEntry,
        descriptor: &PoolDescriptor,
        window_secs: u64,
    ) -> KeeperResult<()> {
        let pool = descriptor.pool_id();
        let observation = self.oracle.observe(&pool, window_secs)?;

        let reference_tick = time_weighted_tick(&observation, window_secs)?;
        let reference = sqrt_price_x96_at_tick(reference_tick)?;
        let current = sqrt_price_x96_at_tick(observation.spot_tick)?;

        self.engine.set_prices(pool, reference, current);
        self.engine.set_depth(pool, entry.depth);

        debug!(
            pool = %entry.name,
            reference_tick,
            spot_tick = observation.spot_tick,
            depth = entry.depth,
            "calibration written"
        );
        Ok(())
    }
}
