//! Liquid staking cap policy
//!
//! Pure predicates over a parameter snapshot, the current aggregates and a
//! proposed delta. Each returns `true` when applying the delta would push
//! the relevant ratio strictly past its cap; a ratio exactly equal to the
//! cap is allowed. The callers guarantee positive denominators; the
//! unreachable degenerate cases evaluate as exceeded rather than dividing.
use odra::casper_types::U256;
use crate::math::Dec;
use super::validator::Validator;

/// Whether adding `tokens` of liquid stake would exceed the global cap.
///
/// `tokenizing_shares` distinguishes the two delegation kinds: tokenized
/// stake is already counted in the bonded pool, while a fresh delegation
/// from a liquid staking provider still has to be added to the total.
pub fn exceeds_global_liquid_staking_cap(
    cap: &Dec,
    total_liquid_staked: U256,
    bonded_pool_tokens: U256,
    tokens: U256,
    tokenizing_shares: bool,
) -> bool {
    let total_staked = if tokenizing_shares {
        bonded_pool_tokens
    } else {
        match bonded_pool_tokens.checked_add(tokens) {
            Some(total) => total,
            None => return true,
        }
    };
    if total_staked.is_zero() {
        return true;
    }

    let updated_liquid = match total_liquid_staked.checked_add(tokens) {
        Some(liquid) => liquid,
        None => return true,
    };
    match Dec::from_ratio(updated_liquid, total_staked) {
        Ok(liquid_stake_ratio) => liquid_stake_ratio.gt(cap),
        Err(_) => true,
    }
}

/// Whether adding `shares` of liquid stake would exceed the validator's
/// bond capacity. A disabled bond factor never rejects.
pub fn exceeds_validator_bond_cap(
    bond_factor: &Option<Dec>,
    validator: &Validator,
    shares: &Dec,
) -> bool {
    let factor = match bond_factor {
        Some(factor) => factor,
        None => return false,
    };
    let max_liquid_shares = match validator.total_validator_bond_shares.mul(factor) {
        Ok(max) => max,
        Err(_) => return true,
    };
    match validator.total_liquid_shares.checked_add(shares) {
        Ok(updated) => updated.gt(&max_liquid_shares),
        Err(_) => true,
    }
}

/// Whether adding `shares` of liquid stake would exceed the per-validator
/// liquid staking cap.
///
/// The delta lands in both the liquid shares and the delegator shares once
/// the delegation commits, so it is added to both sides here to keep the
/// check consistent with the post state.
pub fn exceeds_validator_liquid_staking_cap(
    cap: &Dec,
    validator: &Validator,
    shares: &Dec,
) -> bool {
    let updated_liquid_shares = match validator.total_liquid_shares.checked_add(shares) {
        Ok(updated) => updated,
        Err(_) => return true,
    };
    let updated_total_shares = match validator.delegator_shares.checked_add(shares) {
        Ok(updated) => updated,
        Err(_) => return true,
    };
    if updated_total_shares.is_zero() {
        return true;
    }
    match updated_liquid_shares.quo(&updated_total_shares) {
        Ok(liquid_stake_ratio) => liquid_stake_ratio.gt(cap),
        Err(_) => true,
    }
}
