//! Liquid Staking Module (LSM)
//!
//! Extends the staking ledger with tokenized delegation shares and
//! validator bonds. Delegations can be exchanged for fungible receipt
//! tokens, validators reserve self-bond capacity for the liquid stake they
//! back, and three configurable caps bound how much of the total stake may
//! be liquid. Accounts can opt out of tokenization through a time-scheduled
//! lock.

pub mod caps;
pub mod errors;
pub mod events;
pub mod hub;
pub mod params;
pub mod share_token;
pub mod validator;


pub use errors::LiquidStakingError;
pub use events::*;
pub use hub::LiquidStakingHub;
pub use params::LiquidStakingParams;
pub use share_token::TokenizeShareToken;
pub use validator::Validator;
