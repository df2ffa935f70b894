//! Event definitions for the Liquid Staking Module
use odra::prelude::*;
use odra::casper_types::U256;
use crate::math::Dec;

/// Event emitted when tokens are delegated to a validator
#[odra::event]
pub struct Delegated {
    /// Delegator account
    pub delegator: Address,
    /// Validator receiving the delegation
    pub validator: Address,
    /// Token amount delegated
    pub amount: U256,
    /// Shares issued for the delegation
    pub shares: Dec,
}

/// Event emitted when a delegation is unbonded
#[odra::event]
pub struct Undelegated {
    /// Delegator account
    pub delegator: Address,
    /// Validator the stake leaves
    pub validator: Address,
    /// Token amount released
    pub amount: U256,
    /// Shares removed from the delegation
    pub shares: Dec,
    /// Timestamp at which the unbonding completes
    pub completion_time: u64,
}

/// Event emitted when a delegation is flagged as a validator bond
#[odra::event]
pub struct ValidatorBonded {
    /// Delegator placing the bond
    pub delegator: Address,
    /// Validator being bonded
    pub validator: Address,
    /// Shares added to the validator's bond total
    pub shares: Dec,
}

/// Event emitted when a validator is slashed
#[odra::event]
pub struct ValidatorSlashed {
    /// Slashed validator
    pub validator: Address,
    /// Token amount burned from the validator
    pub slashed_tokens: U256,
    /// Portion of the burn that was liquid stake
    pub liquid_tokens: U256,
}

/// Event emitted when a delegation is tokenized
#[odra::event]
pub struct SharesTokenized {
    /// Record created for the tokenized stake
    pub record_id: u64,
    /// Delegator whose stake was tokenized
    pub delegator: Address,
    /// Validator backing the stake
    pub validator: Address,
    /// Receipt owner
    pub owner: Address,
    /// Token amount of receipts minted
    pub amount: U256,
    /// Shares moved to the record's module account
    pub shares: Dec,
}

/// Event emitted when receipt tokens are redeemed for a delegation
#[odra::event]
pub struct SharesRedeemed {
    /// Record the receipts belong to
    pub record_id: u64,
    /// Account redeeming
    pub redeemer: Address,
    /// Validator backing the stake
    pub validator: Address,
    /// Receipt amount burned
    pub amount: U256,
    /// Shares returned to the redeemer
    pub shares: Dec,
    /// Token value of the returned shares
    pub tokens: U256,
}

/// Event emitted when an account locks tokenization
#[odra::event]
pub struct TokenizeSharesDisabled {
    /// Locked account
    pub account: Address,
}

/// Event emitted when an account starts the unlock countdown
#[odra::event]
pub struct TokenizeSharesEnabled {
    /// Unlocking account
    pub account: Address,
    /// Timestamp at which the lock is removed
    pub completion_time: u64,
}

/// Event emitted when a matured lock is removed by the queue drain
#[odra::event]
pub struct TokenizeSharesUnlocked {
    /// Unlocked account
    pub account: Address,
}

/// Event emitted after the liquid totals are rebuilt from the delegations
#[odra::event]
pub struct TotalLiquidStakeRefreshed {
    /// New global total of liquid staked tokens
    pub total_liquid_staked: U256,
}

/// Event emitted when the module parameters change
#[odra::event]
pub struct ParamsUpdated {
    /// Admin that performed the update
    pub updated_by: Address,
}

/// Event emitted on receipt token transfers (mint uses the token contract
/// address as `from`, burn as `to`)
#[odra::event]
pub struct Transfer {
    /// Tokenize share record the receipts belong to
    pub record_id: u64,
    /// Sender
    pub from: Address,
    /// Recipient
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted on receipt token approvals
#[odra::event]
pub struct Approval {
    /// Tokenize share record the approval is scoped to
    pub record_id: u64,
    /// Owner granting the allowance
    pub owner: Address,
    /// Approved spender
    pub spender: Address,
    /// Approved amount
    pub value: U256,
}
