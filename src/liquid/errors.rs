//! Error definitions for the Liquid Staking Module
use odra::prelude::*;

/// Custom errors for the liquid staking contracts
#[odra::odra_error]
pub enum LiquidStakingError {
    /// The operation would push liquid stake past the global cap
    GlobalLiquidStakingCapExceeded = 300,

    /// The operation would push the validator past its liquid staking cap
    ValidatorLiquidStakingCapExceeded = 301,

    /// The validator's self bond cannot back the requested liquid shares
    InsufficientValidatorBondShares = 302,

    /// Tokenization is locked for this account
    TokenizeSharesDisabledForAccount = 303,

    /// Tokenization is already locked for this account
    TokenizeSharesAlreadyDisabledForAccount = 304,

    /// Tokenization is already enabled (or unlocking) for this account
    TokenizeSharesAlreadyEnabledForAccount = 305,

    /// Module accounts cannot place a validator bond
    ValidatorBondNotAllowedFromModuleAccount = 306,

    /// Validator does not exist
    NoValidatorFound = 307,

    /// Validator bond delegations cannot be tokenized
    ValidatorBondNotAllowedForTokenizeShare = 308,

    /// No delegation between this delegator and validator
    NoDelegationFound = 309,

    /// Delegation holds fewer shares than requested
    InsufficientDelegationShares = 310,

    /// Tokenize share record does not exist or was fully redeemed
    TokenizeShareRecordNotFound = 311,

    /// Caller holds fewer receipt tokens than requested
    InsufficientShareTokenBalance = 312,

    /// Mint/burn called by an account other than the hub
    UnauthorizedShareTokenCaller = 313,

    /// Parameter set failed validation
    InvalidParams = 314,

    /// Amount is zero or otherwise malformed
    InvalidAmount = 315,

    /// Validator is already registered
    ValidatorAlreadyExists = 316,

    /// Contract is paused
    ContractPaused = 317,

    /// Unauthorized access
    Unauthorized = 318,

    /// Spender allowance is too small
    InsufficientAllowance = 319,
}
