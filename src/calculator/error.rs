//! Errors raised by a single key press.
//!
//! None of these are fatal: the calculator keeps its previous state and
//! accepts the next key as usual.

use thiserror::Error;

use super::state::{Base, BitWidth};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division or modulo with a zero right operand.
    #[error("{op} by zero")]
    DivisionByZero { op: &'static str },

    /// A digit that does not exist in the active base.
    #[error("digit {digit:X} is not valid in base {base}")]
    DigitOutOfRange { digit: u8, base: Base },

    /// A one-step operation with no meaning at the active width.
    #[error("{op} is not supported at {width}")]
    Unsupported { op: &'static str, width: BitWidth },
}
