//! Tokenize share receipt token
//!
//! Fungible receipts for tokenized delegations. Every tokenize share record
//! is its own denomination: balances, allowances and supply are all keyed
//! by record id. Only the liquid staking hub may mint and burn; transfers
//! are free because the underlying stake is already counted as liquid.
use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::LiquidStakingError;
use super::events::{Approval, Transfer};

/// Receipt token contract, one balance sheet per tokenize share record
#[odra::module]
pub struct TokenizeShareToken {
    /// Receipt supply per record
    total_supplies: Mapping<u64, U256>,
    /// Balance mapping: (record, owner) -> balance
    balances: Mapping<(u64, Address), U256>,
    /// Allowance mapping: (record, owner, spender) -> amount
    allowances: Mapping<(u64, Address, Address), U256>,
    /// Liquid staking hub address (only this contract can mint/burn)
    hub: Var<Address>,
    /// Contract admin
    admin: Var<Address>,
}

#[odra::module]
impl TokenizeShareToken {
    /// Initialize the receipt token
    pub fn init(&mut self, hub: Address) {
        let caller = self.env().caller();
        self.hub.set(hub);
        self.admin.set(caller);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        String::from("Tokenized Stake Receipt")
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        String::from("tSTAKE")
    }

    /// Get the receipt supply of a record
    pub fn total_supply(&self, record_id: u64) -> U256 {
        self.total_supplies.get(&record_id).unwrap_or_default()
    }

    /// Get the receipt balance of an owner for a record
    pub fn balance_of(&self, record_id: u64, owner: Address) -> U256 {
        self.balances.get(&(record_id, owner)).unwrap_or_default()
    }

    /// Get the allowance of a spender for a record
    pub fn allowance(&self, record_id: u64, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(record_id, owner, spender)).unwrap_or_default()
    }

    /// Transfer receipts of a record to another address
    pub fn transfer(&mut self, record_id: u64, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(record_id, caller, to, amount);
        true
    }

    /// Approve a spender for receipts of a record
    pub fn approve(&mut self, record_id: u64, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(record_id, caller, spender, amount);
        true
    }

    /// Transfer receipts on behalf of an owner (requires approval)
    pub fn transfer_from(
        &mut self,
        record_id: u64,
        from: Address,
        to: Address,
        amount: U256,
    ) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(record_id, from, caller);

        if current_allowance < amount {
            self.env().revert(LiquidStakingError::InsufficientAllowance);
        }

        self.approve_internal(record_id, from, caller, current_allowance - amount);
        self.transfer_internal(record_id, from, to, amount);
        true
    }

    /// Mint receipts for a record (only callable by the hub)
    pub fn mint(&mut self, record_id: u64, to: Address, amount: U256) {
        self.only_hub();

        let new_supply = self.total_supply(record_id) + amount;
        self.total_supplies.set(&record_id, new_supply);

        let current_balance = self.balance_of(record_id, to);
        self.balances.set(&(record_id, to), current_balance + amount);

        self.env().emit_event(Transfer {
            record_id,
            from: Address::from(self.env().self_address()),
            to,
            value: amount,
        });
    }

    /// Burn receipts for a record (only callable by the hub)
    pub fn burn(&mut self, record_id: u64, from: Address, amount: U256) {
        self.only_hub();

        let current_balance = self.balance_of(record_id, from);
        if current_balance < amount {
            self.env().revert(LiquidStakingError::InsufficientShareTokenBalance);
        }

        self.balances.set(&(record_id, from), current_balance - amount);
        self.total_supplies.set(&record_id, self.total_supply(record_id) - amount);

        self.env().emit_event(Transfer {
            record_id,
            from,
            to: Address::from(self.env().self_address()),
            value: amount,
        });
    }

    /// Get the hub address
    pub fn get_hub(&self) -> Address {
        self.hub.get_or_revert_with(LiquidStakingError::UnauthorizedShareTokenCaller)
    }

    /// Update the hub address (admin only)
    pub fn set_hub(&mut self, new_hub: Address) {
        self.only_admin();
        self.hub.set(new_hub);
    }

    /// Get the admin address
    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(LiquidStakingError::Unauthorized)
    }

    /// Transfer admin rights (admin only)
    pub fn transfer_admin(&mut self, new_admin: Address) {
        self.only_admin();
        self.admin.set(new_admin);
    }

    // Internal functions

    fn transfer_internal(&mut self, record_id: u64, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(record_id, from);
        if from_balance < amount {
            self.env().revert(LiquidStakingError::InsufficientShareTokenBalance);
        }

        self.balances.set(&(record_id, from), from_balance - amount);
        let to_balance = self.balance_of(record_id, to);
        self.balances.set(&(record_id, to), to_balance + amount);

        self.env().emit_event(Transfer {
            record_id,
            from,
            to,
            value: amount,
        });
    }

    fn approve_internal(&mut self, record_id: u64, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(record_id, owner, spender), amount);
        self.env().emit_event(Approval {
            record_id,
            owner,
            spender,
            value: amount,
        });
    }

    fn only_hub(&self) {
        let caller = self.env().caller();
        let hub = self
            .hub
            .get_or_revert_with(LiquidStakingError::UnauthorizedShareTokenCaller);
        if caller != hub {
            self.env().revert(LiquidStakingError::UnauthorizedShareTokenCaller);
        }
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(LiquidStakingError::Unauthorized);
        if caller != admin {
            self.env().revert(LiquidStakingError::Unauthorized);
        }
    }
}
