//! Formatting of the current value for rendering.

use serde::Serialize;

use super::color::channels;
use super::state::{Base, BitWidth, Calculator, ColorMode, Operator};

/// How the value is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Thousands separators in decimal.
    pub group_digits: bool,
    /// Zero pad hexadecimal to the full width.
    pub pad_hex: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            group_digits: true,
            pad_hex: true,
        }
    }
}

/// Snapshot of what the calculator shows after a key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Display {
    /// The current value.
    pub value: u64,
    /// Formatted for display (padded or grouped).
    pub text: String,
    /// Formatted for clipboard (prefixed, no separators).
    pub raw: String,
    pub base: Base,
    pub bit_width: BitWidth,
    pub color_mode: ColorMode,
    /// Red, green and blue fields of the value under `color_mode`.
    pub channels: [u8; 3],
    pub pending_op: Option<Operator>,
    /// Message of the error raised by the last key.
    pub error: Option<String>,
}

impl Display {
    pub fn new(calc: &Calculator, options: &DisplayOptions) -> Self {
        let value = calc.current();
        let base = calc.base();
        let bit_width = calc.bit_width();

        Self {
            value,
            text: format_display(value, base, bit_width, options),
            raw: format_raw(value, base),
            base,
            bit_width,
            color_mode: calc.color_mode(),
            channels: channels(value, calc.color_mode()),
            pending_op: calc.pending_op(),
            error: calc.error().map(|e| e.to_string()),
        }
    }

    /// Check if the last key raised an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl std::fmt::Display for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let radix = match self.base {
            Base::Oct => "OCT",
            Base::Dec => "DEC",
            Base::Hex => "HEX",
        };
        write!(f, "{} {:>2} {}", radix, self.bit_width.bits(), self.text)?;
        if let Some(op) = self.pending_op {
            write!(f, " [{}]", op.symbol())?;
        }
        if let Some(error) = &self.error {
            write!(f, " ({})", error)?;
        }
        Ok(())
    }
}

impl Calculator {
    /// What the calculator currently shows.
    pub fn display(&self) -> Display {
        Display::new(self, &self.display_options)
    }

    pub fn set_display_options(&mut self, options: DisplayOptions) {
        self.display_options = options;
    }
}

/// Format a value in `base` for display.
fn format_display(value: u64, base: Base, width: BitWidth, options: &DisplayOptions) -> String {
    match base {
        Base::Hex if options.pad_hex => {
            format!("{:0digits$X}", value, digits = (width.bits() / 4) as usize)
        }
        Base::Hex => format!("{:X}", value),
        Base::Oct => format!("{:o}", value),
        Base::Dec if options.group_digits => format_with_separators(value),
        Base::Dec => value.to_string(),
    }
}

/// Format an integer with thousand separators.
fn format_with_separators(value: u64) -> String {
    let s = value.to_string();

    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Format a value for clipboard (prefixed, no separators).
fn format_raw(value: u64, base: Base) -> String {
    match base {
        Base::Hex => format!("0x{:X}", value),
        Base::Oct => format!("0o{:o}", value),
        Base::Dec => value.to_string(),
    }
}
