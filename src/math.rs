//! Checked integer and fixed-point arithmetic for staking accounting
//!
//! Token amounts are plain `U256`. Validator shares are [`Dec`], an
//! 18-decimal fixed-point value, so that partial undelegations and slashes
//! keep exact ratios. All conversions back to token amounts floor.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::MathError;

/// Number of fractional decimal digits carried by [`Dec`]
pub const DECIMAL_PLACES: u32 = 18;

/// Scaling factor of one whole unit (10^18)
fn one_atomics() -> U256 {
    U256::from(1_000_000_000_000_000_000u128)
}

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_add(b).ok_or(MathError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_sub(b).ok_or(MathError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_mul(b).ok_or(MathError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, MathError> {
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(a / b)
    }
}

/// Fixed-point decimal with 18 fractional digits, backed by `U256`.
///
/// Multiplication and division floor toward zero, matching the truncation
/// the delegation accounting expects.
#[odra::odra_type]
pub struct Dec {
    atomics: U256,
}

impl Dec {
    /// The value 0
    pub fn zero() -> Self {
        Dec { atomics: U256::zero() }
    }

    /// The value 1
    pub fn one() -> Self {
        Dec { atomics: one_atomics() }
    }

    /// Lift an integer amount into a decimal
    pub fn from_int(value: U256) -> Result<Self, MathError> {
        Ok(Dec { atomics: SafeMath::mul(value, one_atomics())? })
    }

    /// Build a decimal from a raw 18-decimal atomic value
    pub fn from_atomics(atomics: U256) -> Self {
        Dec { atomics }
    }

    /// The floored quotient `numerator / denominator` as a decimal
    pub fn from_ratio(numerator: U256, denominator: U256) -> Result<Self, MathError> {
        let scaled = SafeMath::mul(numerator, one_atomics())?;
        Ok(Dec { atomics: SafeMath::div(scaled, denominator)? })
    }

    /// Raw atomic value
    pub fn atomics(&self) -> U256 {
        self.atomics
    }

    /// Floor toward zero into an integer amount
    pub fn truncate(&self) -> U256 {
        self.atomics / one_atomics()
    }

    pub fn checked_add(&self, other: &Dec) -> Result<Dec, MathError> {
        Ok(Dec { atomics: SafeMath::add(self.atomics, other.atomics)? })
    }

    pub fn checked_sub(&self, other: &Dec) -> Result<Dec, MathError> {
        Ok(Dec { atomics: SafeMath::sub(self.atomics, other.atomics)? })
    }

    /// Decimal multiplication, floored
    pub fn mul(&self, other: &Dec) -> Result<Dec, MathError> {
        let product = SafeMath::mul(self.atomics, other.atomics)?;
        Ok(Dec { atomics: product / one_atomics() })
    }

    /// Decimal division, floored
    pub fn quo(&self, other: &Dec) -> Result<Dec, MathError> {
        let scaled = SafeMath::mul(self.atomics, one_atomics())?;
        Ok(Dec { atomics: SafeMath::div(scaled, other.atomics)? })
    }

    /// Multiply by an integer amount
    pub fn mul_int(&self, value: U256) -> Result<Dec, MathError> {
        Ok(Dec { atomics: SafeMath::mul(self.atomics, value)? })
    }

    /// Divide by an integer amount, floored
    pub fn quo_int(&self, value: U256) -> Result<Dec, MathError> {
        Ok(Dec { atomics: SafeMath::div(self.atomics, value)? })
    }

    pub fn is_zero(&self) -> bool {
        self.atomics.is_zero()
    }

    /// Strictly greater than
    pub fn gt(&self, other: &Dec) -> bool {
        self.atomics > other.atomics
    }

    /// Strictly less than
    pub fn lt(&self, other: &Dec) -> bool {
        self.atomics < other.atomics
    }

    pub fn ge(&self, other: &Dec) -> bool {
        self.atomics >= other.atomics
    }

    pub fn le(&self, other: &Dec) -> bool {
        self.atomics <= other.atomics
    }
}
