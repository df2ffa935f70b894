//! Liquid Staking Hub - accounting and policy core of the module
//!
//! Owns the staking ledger (validators, delegations, bonded pool) together
//! with the liquid staking state built on top of it: the global liquid
//! total, per-validator liquid and bond share aggregates, tokenize share
//! records, and the tokenize share lock store with its time-indexed unlock
//! queue. Receipt custody lives in the separate token contract.

use odra::prelude::*;
use odra::casper_types::account::AccountHash;
use odra::casper_types::U256;
use odra::ContractRef;
use odra::prelude::UnwrapOrRevert;
use crate::math::{Dec, SafeMath};
use super::caps;
use super::errors::LiquidStakingError;
use super::events::*;
use super::params::LiquidStakingParams;
use super::share_token::TokenizeShareTokenContractRef;
use super::validator::Validator;

/// Observable tokenize share lock states
#[odra::odra_type]
pub enum LockStatus {
    /// No lock, tokenization allowed
    Unlocked = 0,
    /// Locked indefinitely
    Locked = 1,
    /// Queued to unlock at a scheduled time
    LockExpiring = 2,
}

/// Lock state of an account, with the unlock time when one is scheduled
#[odra::odra_type]
pub struct TokenizeShareLock {
    /// Current lock status
    pub status: LockStatus,
    /// Scheduled unlock time; zero unless the lock is expiring
    pub unlock_time: u64,
}

/// A delegation of shares to a validator
#[odra::odra_type]
pub struct Delegation {
    /// Shares held against the validator
    pub shares: Dec,
    /// Whether this delegation is a validator self bond
    pub validator_bond: bool,
}

/// Bookkeeping for one tokenized delegation
#[odra::odra_type]
pub struct TokenizeShareRecord {
    /// Record id, also the receipt denomination
    pub id: u64,
    /// Receipt owner at tokenization time
    pub owner: Address,
    /// Module account holding the underlying delegation
    pub module_address: Address,
    /// Validator backing the stake
    pub validator: Address,
    /// Cleared once the receipt supply is fully redeemed
    pub active: bool,
}

/// Lock entry value for accounts with no lock
const LOCK_ABSENT: u64 = 0;

/// Lock entry value marking an indefinite lock
const LOCK_INDEFINITE: u64 = u64::MAX;

/// Liquid Staking Hub contract
#[odra::module]
pub struct LiquidStakingHub {
    /// Module parameters: the three caps and the unlock waiting period
    params: Var<LiquidStakingParams>,

    /// Global total of liquid staked tokens
    total_liquid_staked: Var<U256>,

    /// Balance of the bonded pool
    total_bonded_tokens: Var<U256>,

    /// Validator records by operator address
    validators: Mapping<Address, Validator>,

    /// Validator list (for iteration) - stored as mapping
    validator_list: Mapping<u32, Address>,

    /// Number of validators
    validator_count: Var<u32>,

    /// Delegations: (delegator, validator) -> delegation
    delegations: Mapping<(Address, Address), Delegation>,

    /// Delegation list (for iteration) - stored as mapping
    delegation_list: Mapping<u64, (Address, Address)>,

    /// Number of delegation entries ever created
    delegation_count: Var<u64>,

    /// Accounts owned by subsystems rather than user keypairs
    module_accounts: Mapping<Address, bool>,

    /// Tokenize share records by id
    tokenize_share_records: Mapping<u64, TokenizeShareRecord>,

    /// Last assigned tokenize share record id
    last_record_id: Var<u64>,

    /// Tokenize share locks: account -> lock entry
    share_locks: Mapping<Address, u64>,

    /// Pending unlock completion times, kept sorted ascending
    unlock_times: Var<Vec<u64>>,

    /// Pending unlock queue: completion time -> accounts in insertion order
    unlock_queue: Mapping<u64, Vec<Address>>,

    /// Receipt token contract address
    share_token: Var<Address>,

    /// Contract admin
    admin: Var<Address>,

    /// Whether the contract is paused
    paused: Var<bool>,
}

#[odra::module]
impl LiquidStakingHub {
    /// Initialize the hub
    pub fn init(&mut self, share_token: Address) {
        let caller = self.env().caller();
        self.share_token.set(share_token);
        self.params.set(LiquidStakingParams::default_params());
        self.total_liquid_staked.set(U256::zero());
        self.total_bonded_tokens.set(U256::zero());
        self.validator_count.set(0);
        self.delegation_count.set(0);
        self.last_record_id.set(0);
        self.unlock_times.set(Vec::new());
        self.admin.set(caller);
        self.paused.set(false);
    }

    // ========================================
    // Administration
    // ========================================

    /// Replace the module parameters (admin only)
    pub fn set_params(&mut self, params: LiquidStakingParams) {
        self.only_admin();
        if !params.is_valid() {
            self.env().revert(LiquidStakingError::InvalidParams);
        }
        self.params.set(params);
        self.env().emit_event(ParamsUpdated {
            updated_by: self.env().caller(),
        });
    }

    /// Register a validator with no stake (admin only)
    pub fn add_validator(&mut self, validator_address: Address) {
        self.only_admin();
        if self.validators.get(&validator_address).is_some() {
            self.env().revert(LiquidStakingError::ValidatorAlreadyExists);
        }
        let index = self.validator_count.get_or_default();
        self.validator_list.set(&index, validator_address);
        self.validator_count.set(index + 1);
        self.validators
            .set(&validator_address, Validator::new(validator_address));
    }

    /// Mark an account as subsystem-owned (admin only). Delegations from
    /// such accounts are classified as liquid stake.
    pub fn register_module_account(&mut self, account: Address) {
        self.only_admin();
        self.module_accounts.set(&account, true);
    }

    /// Burn a fraction of a validator's tokens (admin only). Stands in for
    /// the slashing subsystem; the liquid portion of the burn is removed
    /// from the global liquid total.
    pub fn slash(&mut self, validator_address: Address, slash_factor: Dec) {
        self.only_admin();
        if slash_factor.gt(&Dec::one()) {
            self.env().revert(LiquidStakingError::InvalidAmount);
        }
        let mut validator = self.load_validator(validator_address);
        let slashed_tokens = slash_factor
            .mul_int(validator.tokens)
            .unwrap_or_revert(&self.env())
            .truncate();

        let mut liquid_tokens = U256::zero();
        if !validator.delegator_shares.is_zero() && !validator.total_liquid_shares.is_zero() {
            let liquid_portion = validator
                .total_liquid_shares
                .quo(&validator.delegator_shares)
                .unwrap_or_revert(&self.env());
            liquid_tokens = liquid_portion
                .mul_int(slashed_tokens)
                .unwrap_or_revert(&self.env())
                .truncate();
            self.decrease_total_liquid_staked(liquid_tokens);
        }

        validator.tokens = SafeMath::sub(validator.tokens, slashed_tokens)
            .unwrap_or_revert(&self.env());
        self.validators.set(&validator_address, validator);

        let bonded = self.total_bonded_tokens.get_or_default();
        self.total_bonded_tokens
            .set(SafeMath::sub(bonded, slashed_tokens).unwrap_or_revert(&self.env()));

        self.env().emit_event(ValidatorSlashed {
            validator: validator_address,
            slashed_tokens,
            liquid_tokens,
        });
    }

    /// Pause user-facing operations (admin only)
    pub fn pause(&mut self) {
        self.only_admin();
        self.paused.set(true);
    }

    /// Resume user-facing operations (admin only)
    pub fn unpause(&mut self) {
        self.only_admin();
        self.paused.set(false);
    }

    /// Transfer admin rights (admin only)
    pub fn transfer_admin(&mut self, new_admin: Address) {
        self.only_admin();
        self.admin.set(new_admin);
    }

    // ========================================
    // Staking operations
    // ========================================

    /// Delegate tokens to a validator. Shares are issued at the current
    /// exchange rate; the first bond is 1:1.
    pub fn delegate(&mut self, validator_address: Address, amount: U256) {
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(LiquidStakingError::InvalidAmount);
        }
        let caller = self.env().caller();
        let mut validator = self.load_validator(validator_address);

        let shares = validator
            .shares_for_deposit(amount)
            .unwrap_or_revert(&self.env());

        // A delegation from a liquid staking provider is liquid stake and
        // must clear the caps; the tokens are not yet in the bonded pool
        if self.is_liquid_staking_provider(caller) {
            self.safely_increase_total_liquid_staked(amount, false);
            self.safely_increase_validator_liquid_shares(&mut validator, &shares);
        }

        validator
            .apply_deposit(amount, &shares)
            .unwrap_or_revert(&self.env());

        // Topping up a validator bond delegation extends the bond
        let key = (caller, validator_address);
        let bonded_delegation = self
            .delegations
            .get(&key)
            .map(|delegation| delegation.validator_bond)
            .unwrap_or(false);
        if bonded_delegation {
            validator.total_validator_bond_shares = validator
                .total_validator_bond_shares
                .checked_add(&shares)
                .unwrap_or_revert(&self.env());
        }
        self.credit_delegation(caller, validator_address, &shares);

        self.validators.set(&validator_address, validator);
        let bonded = self.total_bonded_tokens.get_or_default();
        self.total_bonded_tokens
            .set(SafeMath::add(bonded, amount).unwrap_or_revert(&self.env()));

        self.env().emit_event(Delegated {
            delegator: caller,
            validator: validator_address,
            amount,
            shares,
        });
    }

    /// Unbond tokens from a delegation. Validator bond delegations may only
    /// shrink as far as the remaining bond can still back the validator's
    /// liquid shares.
    pub fn undelegate(&mut self, validator_address: Address, amount: U256) {
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(LiquidStakingError::InvalidAmount);
        }
        let caller = self.env().caller();
        let mut validator = self.load_validator(validator_address);
        let key = (caller, validator_address);
        let mut delegation = self.load_delegation(caller, validator_address);

        let shares = validator
            .shares_from_tokens(amount)
            .unwrap_or_revert(&self.env());
        if shares.gt(&delegation.shares) {
            self.env().revert(LiquidStakingError::InsufficientDelegationShares);
        }

        if delegation.validator_bond {
            self.safely_decrease_validator_bond(&mut validator, &shares);
        }
        if self.is_liquid_staking_provider(caller) {
            let liquid_tokens = validator
                .tokens_from_shares(&shares)
                .unwrap_or_revert(&self.env())
                .truncate();
            self.decrease_total_liquid_staked(liquid_tokens);
            self.decrease_validator_liquid_shares(&mut validator, &shares);
        }

        let released = validator
            .remove_shares(&shares)
            .unwrap_or_revert(&self.env());
        delegation.shares = delegation
            .shares
            .checked_sub(&shares)
            .unwrap_or_revert(&self.env());
        self.delegations.set(&key, delegation);
        self.validators.set(&validator_address, validator);

        let bonded = self.total_bonded_tokens.get_or_default();
        self.total_bonded_tokens
            .set(SafeMath::sub(bonded, released).unwrap_or_revert(&self.env()));

        let completion_time =
            self.env().get_block_time() + self.get_params().unbonding_period;
        self.env().emit_event(Undelegated {
            delegator: caller,
            validator: validator_address,
            amount: released,
            shares,
            completion_time,
        });
    }

    /// Flag the caller's delegation as a validator self bond, adding its
    /// shares to the validator's bond capacity. Idempotent for an already
    /// bonded delegation.
    pub fn validator_bond(&mut self, validator_address: Address) {
        self.ensure_not_paused();
        let caller = self.env().caller();
        if self.is_liquid_staking_provider(caller) {
            self.env()
                .revert(LiquidStakingError::ValidatorBondNotAllowedFromModuleAccount);
        }
        let mut validator = self.load_validator(validator_address);
        let key = (caller, validator_address);
        let mut delegation = self.load_delegation(caller, validator_address);

        if !delegation.validator_bond {
            delegation.validator_bond = true;
            validator.total_validator_bond_shares = validator
                .total_validator_bond_shares
                .checked_add(&delegation.shares)
                .unwrap_or_revert(&self.env());
            let shares = delegation.shares.clone();
            self.delegations.set(&key, delegation);
            self.validators.set(&validator_address, validator);
            self.env().emit_event(ValidatorBonded {
                delegator: caller,
                validator: validator_address,
                shares,
            });
        }
    }

    // ========================================
    // Tokenize / redeem
    // ========================================

    /// Convert part of the caller's delegation into fungible receipts held
    /// by `owner`. The underlying shares move to the record's module
    /// account; validator tokens and delegator shares are unchanged.
    ///
    /// # Returns
    /// The id of the tokenize share record that was created
    pub fn tokenize_shares(
        &mut self,
        validator_address: Address,
        amount: U256,
        owner: Address,
    ) -> u64 {
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(LiquidStakingError::InvalidAmount);
        }
        let caller = self.env().caller();

        let lock = self.tokenize_share_lock_info(caller);
        if !matches!(lock.status, LockStatus::Unlocked) {
            self.env()
                .revert(LiquidStakingError::TokenizeSharesDisabledForAccount);
        }

        let mut validator = self.load_validator(validator_address);
        let key = (caller, validator_address);
        let mut delegation = self.load_delegation(caller, validator_address);
        if delegation.validator_bond {
            self.env()
                .revert(LiquidStakingError::ValidatorBondNotAllowedForTokenizeShare);
        }

        let shares = validator
            .shares_from_tokens(amount)
            .unwrap_or_revert(&self.env());
        if shares.gt(&delegation.shares) {
            self.env().revert(LiquidStakingError::InsufficientDelegationShares);
        }

        // The tokens are already counted in the bonded pool, the shares are
        // about to become liquid
        if !self.is_liquid_staking_provider(caller) {
            self.safely_increase_total_liquid_staked(amount, true);
            self.safely_increase_validator_liquid_shares(&mut validator, &shares);
        }

        let record_id = self.last_record_id.get_or_default() + 1;
        self.last_record_id.set(record_id);
        let module_address = record_module_address(record_id);
        self.module_accounts.set(&module_address, true);
        self.tokenize_share_records.set(
            &record_id,
            TokenizeShareRecord {
                id: record_id,
                owner,
                module_address,
                validator: validator_address,
                active: true,
            },
        );

        delegation.shares = delegation
            .shares
            .checked_sub(&shares)
            .unwrap_or_revert(&self.env());
        self.delegations.set(&key, delegation);
        self.credit_delegation(module_address, validator_address, &shares);
        self.validators.set(&validator_address, validator);

        let mut token = self.share_token_ref();
        token.mint(record_id, owner, amount);

        self.env().emit_event(SharesTokenized {
            record_id,
            delegator: caller,
            validator: validator_address,
            owner,
            amount,
            shares,
        });
        record_id
    }

    /// Burn receipt tokens and take back the matching slice of the record's
    /// delegation. A full redemption retires the record.
    pub fn redeem_tokens(&mut self, record_id: u64, amount: U256) {
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(LiquidStakingError::InvalidAmount);
        }
        let caller = self.env().caller();

        let mut record = self
            .tokenize_share_records
            .get(&record_id)
            .filter(|record| record.active)
            .unwrap_or_else(|| {
                self.env()
                    .revert(LiquidStakingError::TokenizeShareRecordNotFound)
            });
        let validator_address = record.validator;
        let module_address = record.module_address;

        let mut token = self.share_token_ref();
        if token.balance_of(record_id, caller) < amount {
            self.env()
                .revert(LiquidStakingError::InsufficientShareTokenBalance);
        }
        let total_supply = token.total_supply(record_id);

        let mut validator = self.load_validator(validator_address);
        let record_key = (module_address, validator_address);
        let mut record_delegation = self.load_delegation(module_address, validator_address);

        // The caller's cut of the record delegation, proportional to the
        // receipts being burned
        let redeemed_shares = record_delegation
            .shares
            .mul_int(amount)
            .unwrap_or_revert(&self.env())
            .quo_int(total_supply)
            .unwrap_or_revert(&self.env());
        let redeemed_tokens = validator
            .tokens_from_shares(&redeemed_shares)
            .unwrap_or_revert(&self.env())
            .truncate();

        if !self.is_liquid_staking_provider(caller) {
            self.decrease_total_liquid_staked(redeemed_tokens);
            self.decrease_validator_liquid_shares(&mut validator, &redeemed_shares);
        }

        token.burn(record_id, caller, amount);

        record_delegation.shares = record_delegation
            .shares
            .checked_sub(&redeemed_shares)
            .unwrap_or_revert(&self.env());
        self.delegations.set(&record_key, record_delegation);
        self.credit_delegation(caller, validator_address, &redeemed_shares);
        self.validators.set(&validator_address, validator);

        if total_supply == amount {
            record.active = false;
            self.tokenize_share_records.set(&record_id, record);
        }

        self.env().emit_event(SharesRedeemed {
            record_id,
            redeemer: caller,
            validator: validator_address,
            amount,
            shares: redeemed_shares,
            tokens: redeemed_tokens,
        });
    }

    // ========================================
    // Tokenize share lock
    // ========================================

    /// Lock tokenization for the caller. Cancels a pending unlock if one is
    /// in flight.
    pub fn disable_tokenize_shares(&mut self) {
        self.ensure_not_paused();
        let caller = self.env().caller();
        let lock = self.tokenize_share_lock_info(caller);
        match lock.status {
            LockStatus::Locked => self
                .env()
                .revert(LiquidStakingError::TokenizeSharesAlreadyDisabledForAccount),
            LockStatus::LockExpiring => self.cancel_pending_unlock(caller, lock.unlock_time),
            LockStatus::Unlocked => {}
        }
        self.share_locks.set(&caller, LOCK_INDEFINITE);
        self.env()
            .emit_event(TokenizeSharesDisabled { account: caller });
    }

    /// Start the unlock countdown for the caller's lock. The lock is
    /// removed by the queue drain once one unbonding period has passed.
    ///
    /// # Returns
    /// The timestamp at which the lock is removed
    pub fn enable_tokenize_shares(&mut self) -> u64 {
        self.ensure_not_paused();
        let caller = self.env().caller();
        let lock = self.tokenize_share_lock_info(caller);
        if !matches!(lock.status, LockStatus::Locked) {
            self.env()
                .revert(LiquidStakingError::TokenizeSharesAlreadyEnabledForAccount);
        }

        let completion_time =
            self.env().get_block_time() + self.get_params().unbonding_period;
        self.queue_pending_unlock(caller, completion_time);
        self.share_locks.set(&caller, completion_time);

        self.env().emit_event(TokenizeSharesEnabled {
            account: caller,
            completion_time,
        });
        completion_time
    }

    /// Remove every lock whose unlock time has matured. Called once per
    /// block by a keeper, before user operations; safe for anyone to call.
    ///
    /// # Returns
    /// The unlocked accounts, in (time ascending, insertion) order
    pub fn remove_expired_share_locks(&mut self) -> Vec<Address> {
        let now = self.env().get_block_time();
        let mut times = self.unlock_times.get_or_default();
        let mut unlocked = Vec::new();
        let mut matured = 0usize;

        for completion_time in times.iter() {
            if *completion_time > now {
                break;
            }
            let slot = self.unlock_queue.get(completion_time).unwrap_or_default();
            for account in slot {
                self.share_locks.set(&account, LOCK_ABSENT);
                self.env().emit_event(TokenizeSharesUnlocked { account });
                unlocked.push(account);
            }
            self.unlock_queue.set(completion_time, Vec::new());
            matured += 1;
        }

        if matured > 0 {
            let remaining = times.split_off(matured);
            self.unlock_times.set(remaining);
        }
        unlocked
    }

    // ========================================
    // Refresh
    // ========================================

    /// Rebuild the liquid aggregates from the delegation records (admin
    /// only). Run when onboarding the module and whenever a cap is
    /// re-enabled. Locks and the unlock queue are untouched.
    pub fn refresh_total_liquid_staked(&mut self) {
        self.only_admin();

        let validator_count = self.validator_count.get_or_default();
        for index in 0..validator_count {
            if let Some(address) = self.validator_list.get(&index) {
                if let Some(mut validator) = self.validators.get(&address) {
                    validator.total_liquid_shares = Dec::zero();
                    self.validators.set(&address, validator);
                }
            }
        }

        let mut total_liquid_staked = U256::zero();
        let delegation_count = self.delegation_count.get_or_default();
        for index in 0..delegation_count {
            let (delegator, validator_address) = match self.delegation_list.get(&index) {
                Some(key) => key,
                None => continue,
            };
            let delegation = match self.delegations.get(&(delegator, validator_address)) {
                Some(delegation) if !delegation.shares.is_zero() => delegation,
                _ => continue,
            };
            let mut validator = self
                .validators
                .get(&validator_address)
                .unwrap_or_else(|| self.env().revert(LiquidStakingError::NoValidatorFound));

            if self.is_liquid_staking_provider(delegator) {
                let liquid_shares = delegation.shares;
                let liquid_tokens = validator
                    .tokens_from_shares(&liquid_shares)
                    .unwrap_or_revert(&self.env())
                    .truncate();
                validator.total_liquid_shares = validator
                    .total_liquid_shares
                    .checked_add(&liquid_shares)
                    .unwrap_or_revert(&self.env());
                self.validators.set(&validator_address, validator);
                total_liquid_staked = SafeMath::add(total_liquid_staked, liquid_tokens)
                    .unwrap_or_revert(&self.env());
            }
        }

        self.total_liquid_staked.set(total_liquid_staked);
        self.env()
            .emit_event(TotalLiquidStakeRefreshed { total_liquid_staked });
    }

    // ========================================
    // View functions
    // ========================================

    /// Get the module parameters
    pub fn get_params(&self) -> LiquidStakingParams {
        self.params
            .get()
            .unwrap_or_else(LiquidStakingParams::default_params)
    }

    /// Get the global total of liquid staked tokens
    pub fn get_total_liquid_staked(&self) -> U256 {
        self.total_liquid_staked.get_or_default()
    }

    /// Get the balance of the bonded pool
    pub fn get_total_bonded_tokens(&self) -> U256 {
        self.total_bonded_tokens.get_or_default()
    }

    /// Get a validator record
    pub fn get_validator(&self, validator_address: Address) -> Option<Validator> {
        self.validators.get(&validator_address)
    }

    /// Get all registered validators
    pub fn get_validators(&self) -> Vec<Address> {
        let count = self.validator_count.get_or_default();
        let mut validators = Vec::new();
        for index in 0..count {
            if let Some(address) = self.validator_list.get(&index) {
                validators.push(address);
            }
        }
        validators
    }

    /// Get a delegation, if one with a positive share balance exists
    pub fn get_delegation(
        &self,
        delegator: Address,
        validator_address: Address,
    ) -> Option<Delegation> {
        self.delegations
            .get(&(delegator, validator_address))
            .filter(|delegation| !delegation.shares.is_zero())
    }

    /// Get a tokenize share record that has not been fully redeemed
    pub fn get_tokenize_share_record(&self, record_id: u64) -> Option<TokenizeShareRecord> {
        self.tokenize_share_records
            .get(&record_id)
            .filter(|record| record.active)
    }

    /// Get the last assigned tokenize share record id
    pub fn last_tokenize_share_record_id(&self) -> u64 {
        self.last_record_id.get_or_default()
    }

    /// Whether an account is classified as a liquid staking provider
    pub fn is_liquid_staking_provider(&self, account: Address) -> bool {
        self.module_accounts.get(&account).unwrap_or(false)
    }

    /// Get the tokenize share lock state of an account
    pub fn tokenize_share_lock_info(&self, account: Address) -> TokenizeShareLock {
        match self.share_locks.get(&account).unwrap_or(LOCK_ABSENT) {
            LOCK_ABSENT => TokenizeShareLock {
                status: LockStatus::Unlocked,
                unlock_time: 0,
            },
            LOCK_INDEFINITE => TokenizeShareLock {
                status: LockStatus::Locked,
                unlock_time: 0,
            },
            unlock_time => TokenizeShareLock {
                status: LockStatus::LockExpiring,
                unlock_time,
            },
        }
    }

    /// Earliest timestamp at which the account could tokenize. Now for an
    /// unlocked account; for a locked one, the time an unlock started now
    /// would complete.
    pub fn tokenize_shares_allowed_at(&self, account: Address) -> u64 {
        let lock = self.tokenize_share_lock_info(account);
        match lock.status {
            LockStatus::Unlocked => self.env().get_block_time(),
            LockStatus::Locked => {
                self.env().get_block_time() + self.get_params().unbonding_period
            }
            LockStatus::LockExpiring => lock.unlock_time,
        }
    }

    /// Get the accounts queued to unlock at a completion time
    pub fn pending_share_unlocks(&self, completion_time: u64) -> Vec<Address> {
        self.unlock_queue.get(&completion_time).unwrap_or_default()
    }

    /// Get the admin address
    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(LiquidStakingError::Unauthorized)
    }

    /// Check if the contract is paused
    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    // ========================================
    // Safe mutators
    // ========================================

    /// Add to the global liquid total after checking the global cap
    fn safely_increase_total_liquid_staked(&mut self, tokens: U256, tokenizing_shares: bool) {
        let params = self.get_params();
        let total_liquid_staked = self.get_total_liquid_staked();
        let bonded_pool_tokens = self.total_bonded_tokens.get_or_default();

        if caps::exceeds_global_liquid_staking_cap(
            &params.global_liquid_staking_cap,
            total_liquid_staked,
            bonded_pool_tokens,
            tokens,
            tokenizing_shares,
        ) {
            self.env()
                .revert(LiquidStakingError::GlobalLiquidStakingCapExceeded);
        }

        self.total_liquid_staked
            .set(SafeMath::add(total_liquid_staked, tokens).unwrap_or_revert(&self.env()));
    }

    /// Add to a validator's liquid shares after checking the bond cap, then
    /// the validator liquid cap. The caller persists the validator.
    fn safely_increase_validator_liquid_shares(
        &mut self,
        validator: &mut Validator,
        shares: &Dec,
    ) {
        let params = self.get_params();

        if caps::exceeds_validator_bond_cap(&params.validator_bond_factor, validator, shares) {
            self.env()
                .revert(LiquidStakingError::InsufficientValidatorBondShares);
        }
        if caps::exceeds_validator_liquid_staking_cap(
            &params.validator_liquid_staking_cap,
            validator,
            shares,
        ) {
            self.env()
                .revert(LiquidStakingError::ValidatorLiquidStakingCapExceeded);
        }

        validator.total_liquid_shares = validator
            .total_liquid_shares
            .checked_add(shares)
            .unwrap_or_revert(&self.env());
    }

    /// Remove from the global liquid total. The caller guarantees the
    /// amount was previously added.
    fn decrease_total_liquid_staked(&mut self, tokens: U256) {
        let total_liquid_staked = self.get_total_liquid_staked();
        self.total_liquid_staked
            .set(SafeMath::sub(total_liquid_staked, tokens).unwrap_or_revert(&self.env()));
    }

    /// Remove from a validator's liquid shares. The caller persists the
    /// validator.
    fn decrease_validator_liquid_shares(&mut self, validator: &mut Validator, shares: &Dec) {
        validator.total_liquid_shares = validator
            .total_liquid_shares
            .checked_sub(shares)
            .unwrap_or_revert(&self.env());
    }

    /// Shrink a validator's bond, refusing if the remainder could no longer
    /// back the current liquid shares. With the bond factor disabled the
    /// check is skipped but the subtraction still happens.
    fn safely_decrease_validator_bond(&mut self, validator: &mut Validator, shares: &Dec) {
        let params = self.get_params();
        if let Some(factor) = &params.validator_bond_factor {
            let max_liquid_shares = validator
                .total_validator_bond_shares
                .checked_sub(shares)
                .unwrap_or_revert(&self.env())
                .mul(factor)
                .unwrap_or_revert(&self.env());
            if validator.total_liquid_shares.gt(&max_liquid_shares) {
                self.env()
                    .revert(LiquidStakingError::InsufficientValidatorBondShares);
            }
        }

        validator.total_validator_bond_shares = validator
            .total_validator_bond_shares
            .checked_sub(shares)
            .unwrap_or_revert(&self.env());
    }

    // ========================================
    // Internal helpers
    // ========================================

    fn load_validator(&self, validator_address: Address) -> Validator {
        self.validators
            .get(&validator_address)
            .unwrap_or_else(|| self.env().revert(LiquidStakingError::NoValidatorFound))
    }

    fn load_delegation(&self, delegator: Address, validator_address: Address) -> Delegation {
        self.delegations
            .get(&(delegator, validator_address))
            .filter(|delegation| !delegation.shares.is_zero())
            .unwrap_or_else(|| self.env().revert(LiquidStakingError::NoDelegationFound))
    }

    /// Add shares to a delegation, creating the entry (and its iteration
    /// slot) when absent
    fn credit_delegation(&mut self, delegator: Address, validator_address: Address, shares: &Dec) {
        let key = (delegator, validator_address);
        match self.delegations.get(&key) {
            Some(mut delegation) => {
                delegation.shares = delegation
                    .shares
                    .checked_add(shares)
                    .unwrap_or_revert(&self.env());
                self.delegations.set(&key, delegation);
            }
            None => {
                let index = self.delegation_count.get_or_default();
                self.delegation_list.set(&index, key);
                self.delegation_count.set(index + 1);
                self.delegations.set(
                    &key,
                    Delegation {
                        shares: shares.clone(),
                        validator_bond: false,
                    },
                );
            }
        }
    }

    /// Append an account to the unlock slot at `completion_time`, keeping
    /// the time index sorted
    fn queue_pending_unlock(&mut self, account: Address, completion_time: u64) {
        let mut slot = self.unlock_queue.get(&completion_time).unwrap_or_default();
        slot.push(account);
        self.unlock_queue.set(&completion_time, slot);

        let mut times = self.unlock_times.get_or_default();
        if let Err(position) = times.binary_search(&completion_time) {
            times.insert(position, completion_time);
            self.unlock_times.set(times);
        }
    }

    /// Drop an account from the unlock slot it is waiting in, removing the
    /// slot's time index entry when it empties
    fn cancel_pending_unlock(&mut self, account: Address, completion_time: u64) {
        let mut slot = self.unlock_queue.get(&completion_time).unwrap_or_default();
        slot.retain(|queued| queued != &account);
        let emptied = slot.is_empty();
        self.unlock_queue.set(&completion_time, slot);

        if emptied {
            let mut times = self.unlock_times.get_or_default();
            times.retain(|time| *time != completion_time);
            self.unlock_times.set(times);
        }
    }

    fn share_token_ref(&self) -> TokenizeShareTokenContractRef {
        let address = self
            .share_token
            .get_or_revert_with(LiquidStakingError::Unauthorized);
        TokenizeShareTokenContractRef::new(self.env(), address)
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(LiquidStakingError::Unauthorized);
        if caller != admin {
            self.env().revert(LiquidStakingError::Unauthorized);
        }
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(LiquidStakingError::ContractPaused);
        }
    }
}

/// Deterministic module account that holds a record's delegation. Never a
/// signer, only a delegation key.
fn record_module_address(record_id: u64) -> Address {
    let mut raw = [0u8; 32];
    raw[..8].copy_from_slice(b"tknzrec:");
    raw[24..].copy_from_slice(&record_id.to_be_bytes());
    Address::Account(AccountHash::new(raw))
}
