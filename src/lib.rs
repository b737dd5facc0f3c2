//! Engine of a handheld bit-manipulation calculator.
//!
//! Keys go in through [`Calculator::apply`], one at a time; what the
//! calculator shows comes back as a [`Display`].

pub mod calculator;
pub mod config;
pub mod keys;

pub use calculator::{CalcError, Calculator, Display};
pub use config::Config;
pub use keys::{KeyCode, KeySource};
