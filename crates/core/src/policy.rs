//! # Fee Policy
//!
//! Combines the impact and deviation signals into a fee override decision.
//! The piecewise policy requires both gates and grows the fee linearly with
//! impact over its threshold, up to a cap. The multiplicative policy is the
//! impact-only degenerate case: deviation gate forced open, fixed factor on
//! the base fee, no cap.

use crate::constants::{
    FEE_UNITS_PER_BP, MULTIPLICATIVE_FEE_FACTOR, MULTIPLICATIVE_IMPACT_THRESHOLD_BPS,
    PIECEWISE_DEVIATION_THRESHOLD_BPS, PIECEWISE_FEE_CAP, PIECEWISE_IMPACT_THRESHOLD_BPS,
    PIECEWISE_SLOPE_PER_TEN_BPS_OVER,
};
use serde::{Deserialize, Serialize};

/// Outcome of a fee policy evaluation. An inactive decision means "use the
/// pool's own base fee"; the zero fee value is a flag, not a fee of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDecision {
    pub override_active: bool,
    /// Fee in the pool's fee units (millionths); 0 when inactive
    pub fee: u32,
}

impl FeeDecision {
    /// No override; the pool keeps its base fee
    pub const fn no_override() -> Self {
        Self {
            override_active: false,
            fee: 0,
        }
    }

    /// Active override at the given fee
    pub const fn with_fee(fee: u32) -> Self {
        Self {
            override_active: true,
            fee,
        }
    }
}

/// Capped piecewise-linear policy gated on both signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecewisePolicy {
    pub impact_threshold_bps: u64,
    pub deviation_threshold_bps: u64,
    /// Fee-unit bps added per 10 impact-bps over the threshold
    pub slope_per_ten_bps_over: u32,
    /// Fee ceiling in fee units
    pub fee_cap: u32,
}

impl Default for PiecewisePolicy {
    fn default() -> Self {
        Self {
            impact_threshold_bps: PIECEWISE_IMPACT_THRESHOLD_BPS,
            deviation_threshold_bps: PIECEWISE_DEVIATION_THRESHOLD_BPS,
            slope_per_ten_bps_over: PIECEWISE_SLOPE_PER_TEN_BPS_OVER,
            fee_cap: PIECEWISE_FEE_CAP,
        }
    }
}

impl PiecewisePolicy {
    /// Both gates must pass; neither signal alone triggers an override.
    pub fn decide(&self, impact_bps: u64, deviation_away_bps: u64, base_fee: u32) -> FeeDecision {
        if impact_bps < self.impact_threshold_bps
            || deviation_away_bps < self.deviation_threshold_bps
        {
            return FeeDecision::no_override();
        }

        let over = impact_bps - self.impact_threshold_bps;
        let add_bps = (over / 10).saturating_mul(self.slope_per_ten_bps_over as u64);
        let fee = (base_fee as u64)
            .saturating_add(add_bps.saturating_mul(FEE_UNITS_PER_BP as u64))
            .min(self.fee_cap as u64) as u32;
        FeeDecision::with_fee(fee)
    }
}

/// Impact-only policy applying a fixed factor to the base fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplicativePolicy {
    pub impact_threshold_bps: u64,
    pub fee_factor: u32,
}

impl Default for MultiplicativePolicy {
    fn default() -> Self {
        Self {
            impact_threshold_bps: MULTIPLICATIVE_IMPACT_THRESHOLD_BPS,
            fee_factor: MULTIPLICATIVE_FEE_FACTOR,
        }
    }
}

impl MultiplicativePolicy {
    pub fn decide(&self, impact_bps: u64, base_fee: u32) -> FeeDecision {
        if impact_bps < self.impact_threshold_bps {
            return FeeDecision::no_override();
        }
        FeeDecision::with_fee(base_fee.saturating_mul(self.fee_factor))
    }
}

/// Policy variant an engine runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeePolicy {
    Piecewise(PiecewisePolicy),
    Multiplicative(MultiplicativePolicy),
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy::Piecewise(PiecewisePolicy::default())
    }
}

impl FeePolicy {
    pub fn decide(&self, impact_bps: u64, deviation_away_bps: u64, base_fee: u32) -> FeeDecision {
        match self {
            FeePolicy::Piecewise(policy) => policy.decide(impact_bps, deviation_away_bps, base_fee),
            FeePolicy::Multiplicative(policy) => policy.decide(impact_bps, base_fee),
        }
    }
}
