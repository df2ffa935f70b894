//! Liquid staking parameters
use odra::prelude::*;
use crate::math::Dec;

/// Default unlock waiting period: 7 eras (~16 hours), in milliseconds
pub const DEFAULT_UNBONDING_PERIOD: u64 = 57_600_000;

/// Caps and timing knobs of the liquid staking module.
///
/// A cap of 1 disables the corresponding check (no delegation can exceed
/// 100% of the stake); a cap of 0 forbids any liquid stake. The validator
/// bond factor is optional: `None` disables validator bond enforcement
/// entirely.
#[odra::odra_type]
pub struct LiquidStakingParams {
    /// Maximum fraction of all bonded tokens that may be liquid
    pub global_liquid_staking_cap: Dec,
    /// Maximum fraction of a validator's shares that may be liquid
    pub validator_liquid_staking_cap: Dec,
    /// Multiplier on a validator's bond shares bounding its liquid shares;
    /// `None` disables the check
    pub validator_bond_factor: Option<Dec>,
    /// How long an unlocking tokenize share lock waits in the queue, in ms
    pub unbonding_period: u64,
}

impl LiquidStakingParams {
    /// Permissive defaults: both caps at 100%, bond factor disabled
    pub fn default_params() -> Self {
        LiquidStakingParams {
            global_liquid_staking_cap: Dec::one(),
            validator_liquid_staking_cap: Dec::one(),
            validator_bond_factor: None,
            unbonding_period: DEFAULT_UNBONDING_PERIOD,
        }
    }

    /// Both caps must sit in [0, 1] and the unlock period must be positive.
    /// A present bond factor is unsigned by construction, so any value is
    /// accepted there.
    pub fn is_valid(&self) -> bool {
        self.global_liquid_staking_cap.le(&Dec::one())
            && self.validator_liquid_staking_cap.le(&Dec::one())
            && self.unbonding_period > 0
    }
}
