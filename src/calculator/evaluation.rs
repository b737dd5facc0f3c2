//! Equals key: applies the pending operator to the stored and current
//! values.

use tracing::trace;

use super::bitops::{rotate_left, rotate_right};
use super::error::CalcError;
use super::state::{BitWidth, Calculator, Operator};

impl Calculator {
    /// Evaluate the pending operation.
    ///
    /// Pressing equals again right after a result keeps applying the same
    /// operator and right operand to the new result. On error the state is
    /// left exactly as it was.
    pub fn evaluate(&mut self) -> Result<(), CalcError> {
        let (left, right) = if self.result_shown {
            (self.current, self.stored)
        } else {
            (self.stored, self.current)
        };

        let result = match self.pending_op {
            Some(op) => compute(op, left, right, self.bit_width)?,
            None => self.current & self.mask,
        };
        trace!(op = ?self.pending_op, left, right, result, "evaluate");

        if !self.result_shown {
            self.stored = self.current & self.mask;
        }
        self.result = result;
        self.result_shown = true;
        self.pending_store = false;
        self.current = self.result;
        Ok(())
    }
}

/// Compute `left op right`, truncated to `width`.
pub fn compute(op: Operator, left: u64, right: u64, width: BitWidth) -> Result<u64, CalcError> {
    let bits = width.bits();
    let value = match op {
        Operator::Add => left.wrapping_add(right),
        Operator::Sub => left.wrapping_sub(right),
        Operator::Mul => left.wrapping_mul(right),
        Operator::Div => left
            .checked_div(right)
            .ok_or(CalcError::DivisionByZero { op: "division" })?,
        Operator::Mod => left
            .checked_rem(right)
            .ok_or(CalcError::DivisionByZero { op: "modulo" })?,
        Operator::ShiftLeft if right >= u64::from(bits) => 0,
        Operator::ShiftLeft => left << right,
        Operator::ShiftRight if right >= u64::from(bits) => 0,
        Operator::ShiftRight => left >> right,
        Operator::RotateLeft => rotate_left(left, (right % u64::from(bits)) as u32, width),
        Operator::RotateRight => rotate_right(left, (right % u64::from(bits)) as u32, width),
        Operator::And => left & right,
        Operator::Or => left | right,
        Operator::Nor => !(left | right),
        Operator::Xor => left ^ right,
    };
    Ok(value & width.mask())
}
