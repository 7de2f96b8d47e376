//! # Pool Identities and Trade Requests
//!
//! A pool is identified by the hash of its immutable descriptor, so any two
//! hosts that agree on the descriptor agree on the calibration key without
//! coordination.

use crate::math::big_int::U256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Domain separator for pool identity derivation
const POOL_ID_SEED: &[u8] = b"surge:pool:v1";

/// Domain separator for seed-derived addresses
const ADDRESS_SEED: &[u8] = b"surge:address:v1";

/// Opaque 32-byte identity for assets, engines, and callers
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Derive a deterministic address from a human-readable seed.
    /// Convenience for configuration files and tests.
    pub fn from_seed(seed: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(ADDRESS_SEED);
        hasher.update(seed.as_bytes());
        Self(hasher.finalize().into())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

/// Lookup key into per-pool calibration state, derived from the descriptor
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolId(pub [u8; 32]);

impl PoolId {
    /// Hex rendering, used as the key form in external snapshots
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolId({})", self.to_hex())
    }
}

/// Immutable descriptor of a pool: asset pair, base fee tier, tick spacing,
/// and the fee engine the pool is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDescriptor {
    pub asset_0: Address,
    pub asset_1: Address,
    /// Base fee tier in fee units (millionths)
    pub base_fee: u32,
    pub tick_spacing: i32,
    /// Identity of the decision engine attached to this pool
    pub engine: Address,
}

impl PoolDescriptor {
    /// Derive the pool identity. Fixed-width field encoding under a domain
    /// separator, so identical descriptors always collide and distinct ones
    /// never do (up to SHA-256 collision resistance).
    pub fn pool_id(&self) -> PoolId {
        let mut hasher = Sha256::new();
        hasher.update(POOL_ID_SEED);
        hasher.update(self.asset_0.0);
        hasher.update(self.asset_1.0);
        hasher.update(self.base_fee.to_be_bytes());
        hasher.update(self.tick_spacing.to_be_bytes());
        hasher.update(self.engine.0);
        PoolId(hasher.finalize().into())
    }
}

/// Trade direction through the pool. `ZeroForOne` sells asset 0 for asset 1
/// and moves the pool price down; `OneForZero` moves it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    ZeroForOne,
    OneForZero,
}

impl TradeDirection {
    /// Whether a trade in this direction pushes the pool price up
    pub fn pushes_price_up(self) -> bool {
        matches!(self, TradeDirection::OneForZero)
    }
}

/// A proposed trade, as forwarded by the hosting dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub direction: TradeDirection,
    /// Negative = exact input amount, positive = exact output amount
    pub signed_amount: i128,
    /// Price limit supplied by the trader; not consulted by the engine
    pub price_limit_x96: U256,
    /// Opaque host metadata; not consulted by the engine
    pub metadata: Vec<u8>,
}

impl TradeRequest {
    /// Exact-input trade of `amount` token-in units
    pub fn exact_input(direction: TradeDirection, amount: u128) -> Self {
        Self {
            direction,
            signed_amount: -(amount as i128),
            price_limit_x96: U256::ZERO,
            metadata: Vec::new(),
        }
    }

    /// Exact-output trade of `amount` token-out units
    pub fn exact_output(direction: TradeDirection, amount: u128) -> Self {
        Self {
            direction,
            signed_amount: amount as i128,
            price_limit_x96: U256::ZERO,
            metadata: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> PoolDescriptor {
        PoolDescriptor {
            asset_0: Address::from_seed("asset-a"),
            asset_1: Address::from_seed("asset-b"),
            base_fee: 3000,
            tick_spacing: 60,
            engine: Address::from_seed("engine"),
        }
    }

    #[test]
    fn test_pool_id_deterministic() {
        assert_eq!(descriptor().pool_id(), descriptor().pool_id());
    }

    #[test]
    fn test_pool_id_sensitive_to_every_field() {
        let base = descriptor();
        let variants = [
            PoolDescriptor {
                asset_0: Address::from_seed("asset-c"),
                ..base
            },
            PoolDescriptor {
                asset_1: Address::from_seed("asset-c"),
                ..base
            },
            PoolDescriptor {
                base_fee: 500,
                ..base
            },
            PoolDescriptor {
                tick_spacing: 10,
                ..base
            },
            PoolDescriptor {
                engine: Address::from_seed("other-engine"),
            ..base
            },
        ];
        for variant in variants {
            assert_ne!(base.pool_id(), variant.pool_id(), "{:?}", variant);
        }
    }

    #[test]
    fn test_asset_order_matters() {
        let base = descriptor();
        let swapped = PoolDescriptor {
            asset_0: base.asset_1,
            asset_1: base.asset_0,
            ..base
        };
        assert_ne!(base.pool_id(), swapped.pool_id());
    }

    #[test]
    fn test_trade_request_sign_convention() {
        let exact_in = TradeRequest::exact_input(TradeDirection::ZeroForOne, 100);
        assert_eq!(exact_in.signed_amount, -100);
        let exact_out = TradeRequest::exact_output(TradeDirection::OneForZero, 100);
        assert_eq!(exact_out.signed_amount, 100);
        assert!(exact_out.direction.pushes_price_up());
        assert!(!exact_in.direction.pushes_price_up());
    }
}
