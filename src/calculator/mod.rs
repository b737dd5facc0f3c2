//! Calculator engine for bit-manipulation arithmetic.
//!
//! This module provides:
//! - The calculator state machine and its mode configuration
//! - Two-operand evaluation with repeat-on-equals
//! - One-step bit, byte and word operations
//! - RGB888/RGB565 color editing
//! - Formatting of the current value for display
//! - Copying results to the clipboard

mod bitops;
mod clipboard;
mod color;
mod dispatch;
mod display;
mod error;
mod evaluation;
mod state;

pub use clipboard::copy_to_clipboard;
pub use color::{Channel, channels, convert};
pub use display::{Display, DisplayOptions};
pub use error::CalcError;
pub use evaluation::compute;
pub use state::{Base, BitWidth, Calculator, ColorMode, Operator};
