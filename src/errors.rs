//! Shared error definitions for the contract suite
use odra::prelude::*;

/// Arithmetic errors raised by the numeric kernel.
///
/// These indicate a broken caller precondition rather than a user mistake.
/// Reverting with one of them aborts the whole deploy and leaves storage
/// untouched.
#[derive(Debug)]
#[odra::odra_error]
pub enum MathError {
    /// Addition or multiplication overflowed
    Overflow = 1,

    /// Subtraction underflowed
    Underflow = 2,

    /// Division by zero
    DivisionByZero = 3,
}
