//! # Fee Decision Engine
//!
//! The entry point the hosting dispatcher calls before executing a trade.
//! The engine never touches trade execution: it reads calibration, scores
//! the trade, and hands back a fee decision alongside the acknowledgement
//! selector and a zero balance adjustment.

use crate::deviation::deviation_away_bps;
use crate::errors::{CoreResult, SurgeCoreError};
use crate::impact::estimate_impact_bps;
use crate::math::big_int::U256;
use crate::policy::{FeeDecision, FeePolicy};
use crate::pool::{Address, PoolDescriptor, PoolId, TradeRequest};
use crate::store::{Calibration, CalibrationStore};
use serde::{Deserialize, Serialize};

/// Acknowledgement selector returned from the pre-trade entry point:
/// the first four bytes of `sha256("on_before_trade")`
pub const BEFORE_TRADE_SELECTOR: [u8; 4] = [0x98, 0x90, 0x4c, 0x15];

/// The engine never adjusts trade balances
pub const NO_BALANCE_ADJUSTMENT: i128 = 0;

/// What the dispatcher gets back from the pre-trade call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeTradeOutcome {
    /// Always [`BEFORE_TRADE_SELECTOR`]; lets the dispatcher verify the
    /// callee implements the expected entry point
    pub selector: [u8; 4],
    /// Always [`NO_BALANCE_ADJUSTMENT`]
    pub balance_adjustment: i128,
    pub fee: FeeDecision,
}

/// A fee engine bound to one authorized dispatcher. Calibration writes come
/// from the keeper through the host; reads happen on the trade path.
#[derive(Debug, Clone)]
pub struct FeeEngine {
    dispatcher: Address,
    policy: FeePolicy,
    store: CalibrationStore,
}

impl FeeEngine {
    pub fn new(dispatcher: Address, policy: FeePolicy) -> Self {
        Self {
            dispatcher,
            policy,
            store: CalibrationStore::new(),
        }
    }

    /// Update the liquidity-depth proxy for a pool
    pub fn set_depth(&mut self, pool: PoolId, depth: u64) {
        self.store.set_depth(pool, depth);
    }

    /// Update the reference and current square-root prices for a pool
    pub fn set_prices(
        &mut self,
        pool: PoolId,
        reference_sqrt_price_x96: U256,
        current_sqrt_price_x96: U256,
    ) {
        self.store.set_prices(pool, reference_sqrt_price_x96, current_sqrt_price_x96);
    }

    /// Read the current calibration for a pool
    pub fn calibration(&self, pool: &PoolId) -> Calibration {
        self.store.get(pool)
    }

    /// Pre-trade decision. Fails for any caller other than the bound
    /// dispatcher; a successful call never rejects the trade itself.
    pub fn on_before_trade(
        &self,
        caller: Address,
        descriptor: &PoolDescriptor,
        request: &TradeRequest,
    ) -> CoreResult<BeforeTradeOutcome> {
        if caller != self.dispatcher {
            return Err(SurgeCoreError::UnauthorizedCaller);
        }

        let calibration = self.store.get(&descriptor.pool_id());
        let impact_bps = estimate_impact_bps(request.signed_amount, calibration.depth);
        let deviation_bps = deviation_away_bps(
            calibration.reference_sqrt_price_x96,
            calibration.current_sqrt_price_x96,
            request.direction,
        )?;
        let fee = self
            .policy
            .decide(impact_bps, deviation_bps, descriptor.base_fee);

        Ok(BeforeTradeOutcome {
            selector: BEFORE_TRADE_SELECTOR,
            balance_adjustment: NO_BALANCE_ADJUSTMENT,
            fee,
        })
    }
}
