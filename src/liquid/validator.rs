//! Validator records and share/token exchange math
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::MathError;
use crate::math::{Dec, SafeMath};

/// A bonded validator together with its liquid staking aggregates.
///
/// `total_liquid_shares` and `total_validator_bond_shares` live directly on
/// the record so that a single store write keeps the aggregates and the
/// staking state in step.
#[odra::odra_type]
pub struct Validator {
    /// Validator operator address
    pub address: Address,
    /// Total tokens bonded to the validator
    pub tokens: U256,
    /// Total delegator shares issued against `tokens`
    pub delegator_shares: Dec,
    /// Shares held by liquid staking providers and tokenize records
    pub total_liquid_shares: Dec,
    /// Shares flagged as validator self bond
    pub total_validator_bond_shares: Dec,
}

impl Validator {
    /// A freshly registered validator with no stake
    pub fn new(address: Address) -> Self {
        Validator {
            address,
            tokens: U256::zero(),
            delegator_shares: Dec::zero(),
            total_liquid_shares: Dec::zero(),
            total_validator_bond_shares: Dec::zero(),
        }
    }

    /// Token value of a share amount at the current exchange rate
    pub fn tokens_from_shares(&self, shares: &Dec) -> Result<Dec, MathError> {
        shares.mul_int(self.tokens)?.quo(&self.delegator_shares)
    }

    /// Share value of a token amount at the current exchange rate
    pub fn shares_from_tokens(&self, tokens: U256) -> Result<Dec, MathError> {
        self.delegator_shares.mul_int(tokens)?.quo_int(self.tokens)
    }

    /// Shares a deposit of `tokens` would create. The first bond is 1:1;
    /// afterwards the current exchange rate applies.
    pub fn shares_for_deposit(&self, tokens: U256) -> Result<Dec, MathError> {
        if self.delegator_shares.is_zero() {
            Dec::from_int(tokens)
        } else {
            self.shares_from_tokens(tokens)
        }
    }

    /// Add a deposit of `tokens` issuing `shares` against it
    pub fn apply_deposit(&mut self, tokens: U256, shares: &Dec) -> Result<(), MathError> {
        self.tokens = SafeMath::add(self.tokens, tokens)?;
        self.delegator_shares = self.delegator_shares.checked_add(shares)?;
        Ok(())
    }

    /// Remove `shares` from the validator, returning the floored token
    /// amount they were worth
    pub fn remove_shares(&mut self, shares: &Dec) -> Result<U256, MathError> {
        let tokens = self.tokens_from_shares(shares)?.truncate();
        self.delegator_shares = self.delegator_shares.checked_sub(shares)?;
        self.tokens = SafeMath::sub(self.tokens, tokens)?;
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator_with(tokens: u64, shares: u64) -> Validator {
        let address = odra::prelude::Address::Account(
            odra::casper_types::account::AccountHash::new([7u8; 32]),
        );
        let mut validator = Validator::new(address);
        validator.tokens = U256::from(tokens);
        validator.delegator_shares = Dec::from_int(U256::from(shares)).unwrap();
        validator
    }

    #[test]
    fn test_first_deposit_is_one_to_one() {
        let validator = validator_with(0, 0);
        let shares = validator.shares_for_deposit(U256::from(1_000)).unwrap();
        assert_eq!(shares, Dec::from_int(U256::from(1_000)).unwrap());
    }

    #[test]
    fn test_exchange_rate_round_trip() {
        let validator = validator_with(100, 100);
        let shares = validator.shares_from_tokens(U256::from(40)).unwrap();
        assert_eq!(validator.tokens_from_shares(&shares).unwrap().truncate(), U256::from(40));
    }

    #[test]
    fn test_slashed_rate_floors() {
        // 90 tokens backing 100 shares: 10 shares are worth 9 tokens
        let validator = validator_with(90, 100);
        let ten = Dec::from_int(U256::from(10)).unwrap();
        assert_eq!(validator.tokens_from_shares(&ten).unwrap().truncate(), U256::from(9));

        // and 10 tokens buy 11.11.. shares, floored at the atomic level
        let shares = validator.shares_from_tokens(U256::from(10)).unwrap();
        assert!(shares.gt(&Dec::from_int(U256::from(11)).unwrap()));
        assert!(shares.lt(&Dec::from_int(U256::from(12)).unwrap()));
    }

    #[test]
    fn test_deposit_then_remove_restores_totals() {
        let mut validator = validator_with(100, 100);
        let shares = validator.shares_for_deposit(U256::from(50)).unwrap();
        validator.apply_deposit(U256::from(50), &shares).unwrap();
        assert_eq!(validator.tokens, U256::from(150));

        let released = validator.remove_shares(&shares).unwrap();
        assert_eq!(released, U256::from(50));
        assert_eq!(validator.tokens, U256::from(100));
        assert_eq!(validator.delegator_shares, Dec::from_int(U256::from(100)).unwrap());
    }
}
