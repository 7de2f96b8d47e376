//! # Pool Calibration Store
//!
//! Per-pool calibration written by an external keeper and read by the
//! decision path. Entries are created lazily and default to the zero state,
//! which every downstream signal treats as "uncalibrated, no override".
//! The host serializes invocations, so no locking is needed here.

use crate::math::big_int::U256;
use crate::pool::PoolId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Calibration state for one pool. Zero means unset for every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calibration {
    /// Liquidity-depth proxy in token-in units (0 = unset)
    pub depth: u64,
    /// Time-weighted reference square-root price, Q64.96 (0 = unset)
    pub reference_sqrt_price_x96: U256,
    /// Current square-root price, Q64.96 (0 = unset)
    pub current_sqrt_price_x96: U256,
}

/// Key-value calibration state keyed by pool identity
#[derive(Debug, Default, Clone)]
pub struct CalibrationStore {
    entries: HashMap<PoolId, Calibration>,
}

impl CalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read calibration for a pool, zero-state if never written
    pub fn get(&self, pool: &PoolId) -> Calibration {
        self.entries.get(pool).copied().unwrap_or_default()
    }

    /// Set the liquidity-depth proxy for a pool
    pub fn set_depth(&mut self, pool: PoolId, depth: u64) {
        self.entries.entry(pool).or_default().depth = depth;
    }

    /// Set the reference and current square-root prices for a pool
    pub fn set_prices(
        &mut self,
        pool: PoolId,
        reference_sqrt_price_x96: U256,
        current_sqrt_price_x96: U256,
    ) {
        let entry = self.entries.entry(pool).or_default();
        entry.reference_sqrt_price_x96 = reference_sqrt_price_x96;
        entry.current_sqrt_price_x96 = current_sqrt_price_x96;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Address, PoolDescriptor};

    fn pool_id(tag: u32) -> PoolId {
        PoolDescriptor {
            asset_0: Address::from_seed("a"),
            asset_1: Address::from_seed("b"),
            base_fee: tag,
            tick_spacing: 1,
            engine: Address::from_seed("engine"),
        }
        .pool_id()
    }

    #[test]
    fn test_absent_pool_reads_zero_state() {
        let store = CalibrationStore::new();
        assert_eq!(store.get(&pool_id(1)), Calibration::default());
    }

    #[test]
    fn test_partial_writes_keep_other_fields() {
        let mut store = CalibrationStore::new();
        let id = pool_id(1);

        store.set_depth(id, 200);
        assert_eq!(store.get(&id).depth, 200);
        assert!(store.get(&id).reference_sqrt_price_x96.is_zero());

        let reference = U256::from_u128(1u128 << 96);
        let current = U256::from_u128(2u128 << 96);
        store.set_prices(id, reference, current);
        let calibration = store.get(&id);
        assert_eq!(calibration.depth, 200);
        assert_eq!(calibration.reference_sqrt_price_x96, reference);
        assert_eq!(calibration.current_sqrt_price_x96, current);
    }

    #[test]
    fn test_pools_are_independent() {
        let mut store = CalibrationStore::new();
        store.set_depth(pool_id(1), 100);
        assert_eq!(store.get(&pool_id(2)), Calibration::default());
    }
}
