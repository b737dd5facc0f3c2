//! Calculator registers and mode configuration.
//!
//! Holds the values being edited, the operator waiting for its second
//! operand, and the width/base/color settings that shape every result.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::display::DisplayOptions;
use super::error::CalcError;

/// Active register width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BitWidth {
    W8,
    W16,
    W24,
    W32,
    W64,
}

impl BitWidth {
    pub fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W24 => 24,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// All-ones pattern covering the width.
    pub fn mask(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            other => (1u64 << other.bits()) - 1,
        }
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Self::W8),
            16 => Ok(Self::W16),
            24 => Ok(Self::W24),
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            other => Err(format!("unsupported bit width {}", other)),
        }
    }
}

impl From<BitWidth> for u8 {
    fn from(width: BitWidth) -> Self {
        width.bits() as u8
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Radix used for digit entry and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Base {
    Oct,
    Dec,
    Hex,
}

impl Base {
    pub fn radix(self) -> u8 {
        match self {
            Self::Oct => 8,
            Self::Dec => 10,
            Self::Hex => 16,
        }
    }
}

impl TryFrom<u8> for Base {
    type Error = String;

    fn try_from(radix: u8) -> Result<Self, Self::Error> {
        match radix {
            8 => Ok(Self::Oct),
            10 => Ok(Self::Dec),
            16 => Ok(Self::Hex),
            other => Err(format!("unsupported base {}", other)),
        }
    }
}

impl From<Base> for u8 {
    fn from(base: Base) -> Self {
        base.radix()
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.radix())
    }
}

/// Channel layout used by the color keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// 24-bit, 8/8/8.
    Rgb888,
    /// 16-bit, 5/6/5.
    Rgb565,
}

impl ColorMode {
    /// Width forced when the mode is selected.
    pub fn bit_width(self) -> BitWidth {
        match self {
            Self::Rgb888 => BitWidth::W24,
            Self::Rgb565 => BitWidth::W16,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb888 => f.write_str("RGB888"),
            Self::Rgb565 => f.write_str("RGB565"),
        }
    }
}

/// Operator waiting for its second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    RotateLeft,
    RotateRight,
    ShiftLeft,
    ShiftRight,
    And,
    Or,
    Nor,
    Xor,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "mod",
            Self::RotateLeft => "rol",
            Self::RotateRight => "ror",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::And => "and",
            Self::Or => "or",
            Self::Nor => "nor",
            Self::Xor => "xor",
        }
    }
}

/// The calculator state machine.
///
/// Every value written to `current` or `stored` is truncated to the active
/// width. Narrowing the width does not touch bits already held.
#[derive(Clone, Debug)]
pub struct Calculator {
    pub(super) current: u64,
    pub(super) stored: u64,
    pub(super) result: u64,
    pub(super) pending_op: Option<Operator>,
    pub(super) bit_width: BitWidth,
    pub(super) mask: u64,
    pub(super) base: Base,
    pub(super) color_mode: ColorMode,
    /// Next digit archives `current` into `stored` first.
    pub(super) pending_store: bool,
    /// `current` holds the result of the last equals.
    pub(super) result_shown: bool,
    pub(super) error: Option<CalcError>,
    pub(super) display_options: DisplayOptions,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// A calculator in 16-bit hex, RGB565, with every register zeroed.
    pub fn new() -> Self {
        Self {
            current: 0,
            stored: 0,
            result: 0,
            pending_op: None,
            bit_width: BitWidth::W16,
            mask: BitWidth::W16.mask(),
            base: Base::Hex,
            color_mode: ColorMode::Rgb565,
            pending_store: false,
            result_shown: false,
            error: None,
            display_options: DisplayOptions::default(),
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn stored(&self) -> u64 {
        self.stored
    }

    pub fn pending_op(&self) -> Option<Operator> {
        self.pending_op
    }

    pub fn bit_width(&self) -> BitWidth {
        self.bit_width
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn is_pending_store(&self) -> bool {
        self.pending_store
    }

    pub fn is_result_shown(&self) -> bool {
        self.result_shown
    }

    /// Error raised by the most recent key, if any.
    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    // Mode selection

    /// Changes the mask for future results; existing bits are kept as-is.
    pub fn set_bit_width(&mut self, width: BitWidth) {
        self.bit_width = width;
        self.mask = width.mask();
    }

    pub fn set_base(&mut self, base: Base) {
        self.base = base;
    }

    // Data entry

    /// Append a digit in the active base.
    ///
    /// Accumulation wraps at the active width, like a fixed-size display
    /// register.
    pub fn enter_digit(&mut self, digit: u8) -> Result<(), CalcError> {
        if digit >= self.base.radix() {
            return Err(CalcError::DigitOutOfRange {
                digit,
                base: self.base,
            });
        }

        if self.pending_store {
            self.store();
        }
        self.result_shown = false;
        self.current = self
            .current
            .wrapping_mul(u64::from(self.base.radix()))
            .wrapping_add(u64::from(digit))
            & self.mask;
        Ok(())
    }

    /// Move `current` into `stored` and start a fresh operand.
    fn store(&mut self) {
        self.stored = self.current & self.mask;
        self.current = 0;
        self.pending_store = false;
    }

    pub fn clear(&mut self) {
        self.current = 0;
        self.result_shown = false;
    }

    pub fn all_clear(&mut self) {
        self.current = 0;
        self.stored = 0;
        self.result = 0;
        self.result_shown = false;
        self.pending_store = false;
        self.pending_op = None;
    }

    // Two-step operations

    /// Arm an operator; the value moves to `stored` on the next digit.
    pub fn select_operator(&mut self, op: Operator) {
        self.pending_op = Some(op);
        self.pending_store = true;
        self.result_shown = false;
    }
}
