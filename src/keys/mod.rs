//! Logical keys of the calculator keypad.
//!
//! This module provides:
//! - The closed set of key codes the calculator reacts to
//! - Translation from a pressed button (plus the alternate modifier) to a key
//! - Parsing of whitespace separated key scripts
//! - The `KeySource` interface used to feed keys into the calculator

mod script;
mod source;

pub use script::{KeyParseError, parse_keys};
pub use source::{KeySource, ScriptSource};

use crate::calculator::{Base, BitWidth, Channel, ColorMode, Operator};
use std::fmt;
use std::str::FromStr;

/// Number of physical buttons (7 rows by 5 columns).
pub const BUTTON_COUNT: usize = 35;

/// Code offset applied while the alternate modifier is held.
pub const ALT_OFFSET: u8 = BUTTON_COUNT as u8;

/// Code of the alternate modifier button.
const ALT_CODE: u8 = 33;

/// Logical key code of each button index (`row * 5 + col`).
const BUTTON_MAP: [u8; BUTTON_COUNT] = [
    9, 6, 3, 16, 18, 8, 5, 2, 0, 19, 7, 4, 1, 17, 20, 15, 13, 11, 32, 21, 14, 12, 10, 31, 22, 28,
    23, 27, 26, 30, 25, 24, 29, 33, 34,
];

/// Direction of a channel step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Up,
    Down,
}

/// A logical key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A single digit, 0x0 to 0xF. Build from untrusted values with
    /// [`KeyCode::digit`]; `name` and `code` only look at the low nibble.
    Digit(u8),
    /// Enters two zeros.
    DoubleZero,
    /// Enters two 0xF digits.
    DoubleF,
    Equals,
    /// Arms a two-operand operator.
    Operator(Operator),
    ShiftLeft,
    ShiftRight,
    RotateLeft,
    RotateRight,
    OnesComplement,
    TwosComplement,
    ByteFlip,
    WordFlip,
    Channel(Channel, Step),
    BitWidth(BitWidth),
    Base(Base),
    ColorMode(ColorMode),
    Clear,
    AllClear,
    /// The modifier itself; selects the alternate layer but does nothing.
    Alt,
}

impl KeyCode {
    /// Digit key for `value`, `None` above 0xF.
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 0xF).then_some(Self::Digit(value))
    }

    /// Numeric code used by the keypad firmware.
    pub fn code(self) -> u8 {
        match self {
            Self::Digit(d) => d & 0xF,
            Self::DoubleZero => 16,
            Self::DoubleF => 17,
            Self::Equals => 18,
            Self::Operator(Operator::Mul) => 19,
            Self::Operator(Operator::Div) => 20,
            Self::Operator(Operator::Sub) => 21,
            Self::Operator(Operator::Add) => 22,
            Self::Operator(Operator::Xor) => 23,
            Self::Operator(Operator::And) => 24,
            Self::Operator(Operator::Or) => 25,
            Self::Operator(Operator::Nor) => 26,
            Self::RotateLeft => 27,
            Self::RotateRight => 28,
            Self::ShiftLeft => 29,
            Self::ShiftRight => 30,
            Self::OnesComplement => 31,
            Self::TwosComplement => 32,
            Self::Alt => ALT_CODE,
            Self::Clear => 34,
            Self::Channel(Channel::Red, Step::Down) => 39,
            Self::Channel(Channel::Green, Step::Down) => 40,
            Self::Channel(Channel::Blue, Step::Down) => 41,
            Self::Channel(Channel::Red, Step::Up) => 42,
            Self::Channel(Channel::Green, Step::Up) => 43,
            Self::Channel(Channel::Blue, Step::Up) => 44,
            Self::ByteFlip => 45,
            Self::WordFlip => 46,
            Self::BitWidth(BitWidth::W8) => 47,
            Self::BitWidth(BitWidth::W16) => 48,
            Self::BitWidth(BitWidth::W32) => 49,
            Self::BitWidth(BitWidth::W64) => 50,
            // 24 bits has no key of its own; it shares the RGB888 key.
            Self::BitWidth(BitWidth::W24) => 58,
            Self::Operator(Operator::Mod) => 55,
            Self::ColorMode(ColorMode::Rgb565) => 57,
            Self::ColorMode(ColorMode::Rgb888) => 58,
            Self::Base(Base::Oct) => 59,
            Self::Base(Base::Dec) => 60,
            Self::Base(Base::Hex) => 61,
            Self::Operator(Operator::RotateLeft) => 62,
            Self::Operator(Operator::RotateRight) => 63,
            Self::Operator(Operator::ShiftLeft) => 64,
            Self::Operator(Operator::ShiftRight) => 65,
            Self::AllClear => 69,
        }
    }

    /// Key for a firmware code, `None` for unassigned codes.
    pub fn from_code(code: u8) -> Option<Self> {
        let key = match code {
            0..=15 => Self::Digit(code),
            16 => Self::DoubleZero,
            17 => Self::DoubleF,
            18 => Self::Equals,
            19 => Self::Operator(Operator::Mul),
            20 => Self::Operator(Operator::Div),
            21 => Self::Operator(Operator::Sub),
            22 => Self::Operator(Operator::Add),
            23 => Self::Operator(Operator::Xor),
            24 => Self::Operator(Operator::And),
            25 => Self::Operator(Operator::Or),
            26 => Self::Operator(Operator::Nor),
            27 => Self::RotateLeft,
            28 => Self::RotateRight,
            29 => Self::ShiftLeft,
            30 => Self::ShiftRight,
            31 => Self::OnesComplement,
            32 => Self::TwosComplement,
            ALT_CODE => Self::Alt,
            34 => Self::Clear,
            39 => Self::Channel(Channel::Red, Step::Down),
            40 => Self::Channel(Channel::Green, Step::Down),
            41 => Self::Channel(Channel::Blue, Step::Down),
            42 => Self::Channel(Channel::Red, Step::Up),
            43 => Self::Channel(Channel::Green, Step::Up),
            44 => Self::Channel(Channel::Blue, Step::Up),
            45 => Self::ByteFlip,
            46 => Self::WordFlip,
            47 => Self::BitWidth(BitWidth::W8),
            48 => Self::BitWidth(BitWidth::W16),
            49 => Self::BitWidth(BitWidth::W32),
            50 => Self::BitWidth(BitWidth::W64),
            55 => Self::Operator(Operator::Mod),
            57 => Self::ColorMode(ColorMode::Rgb565),
            58 => Self::ColorMode(ColorMode::Rgb888),
            59 => Self::Base(Base::Oct),
            60 => Self::Base(Base::Dec),
            61 => Self::Base(Base::Hex),
            62 => Self::Operator(Operator::RotateLeft),
            63 => Self::Operator(Operator::RotateRight),
            64 => Self::Operator(Operator::ShiftLeft),
            65 => Self::Operator(Operator::ShiftRight),
            69 => Self::AllClear,
            _ => return None,
        };
        Some(key)
    }

    /// Key produced by pressing button `index` (`row * 5 + col`).
    ///
    /// Returns `None` for the alternate button itself, for out of range
    /// indices and for buttons with nothing on the alternate layer.
    pub fn from_button(index: usize, alt: bool) -> Option<Self> {
        let base = *BUTTON_MAP.get(index)?;
        if base == ALT_CODE {
            return None;
        }
        let code = if alt { base + ALT_OFFSET } else { base };
        Self::from_code(code)
    }

    /// Key that shares this key's button on the alternate layer.
    pub fn with_alt(self) -> Option<Self> {
        let code = self.code();
        if code >= ALT_OFFSET || self == Self::Alt {
            return None;
        }
        Self::from_code(code + ALT_OFFSET)
    }

    /// Script name of the key, accepted back by `FromStr`.
    pub fn name(self) -> &'static str {
        const DIGITS: [&str; 16] = [
            "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "A", "B", "C", "D", "E", "F",
        ];
        match self {
            Self::Digit(d) => DIGITS[usize::from(d & 0xF)],
            Self::DoubleZero => "00",
            Self::DoubleF => "FF",
            Self::Equals => "=",
            Self::Operator(Operator::Add) => "+",
            Self::Operator(Operator::Sub) => "-",
            Self::Operator(Operator::Mul) => "*",
            Self::Operator(Operator::Div) => "/",
            Self::Operator(Operator::Mod) => "mod",
            Self::Operator(Operator::And) => "and",
            Self::Operator(Operator::Or) => "or",
            Self::Operator(Operator::Nor) => "nor",
            Self::Operator(Operator::Xor) => "xor",
            Self::Operator(Operator::RotateLeft) => "rolby",
            Self::Operator(Operator::RotateRight) => "rorby",
            Self::Operator(Operator::ShiftLeft) => "<<",
            Self::Operator(Operator::ShiftRight) => ">>",
            Self::ShiftLeft => "shl",
            Self::ShiftRight => "shr",
            Self::RotateLeft => "rol",
            Self::RotateRight => "ror",
            Self::OnesComplement => "not",
            Self::TwosComplement => "neg",
            Self::ByteFlip => "bflip",
            Self::WordFlip => "wflip",
            Self::Channel(Channel::Red, Step::Up) => "r+",
            Self::Channel(Channel::Red, Step::Down) => "r-",
            Self::Channel(Channel::Green, Step::Up) => "g+",
            Self::Channel(Channel::Green, Step::Down) => "g-",
            Self::Channel(Channel::Blue, Step::Up) => "b+",
            Self::Channel(Channel::Blue, Step::Down) => "b-",
            Self::BitWidth(BitWidth::W8) => "8bit",
            Self::BitWidth(BitWidth::W16) => "16bit",
            Self::BitWidth(BitWidth::W24) => "24bit",
            Self::BitWidth(BitWidth::W32) => "32bit",
            Self::BitWidth(BitWidth::W64) => "64bit",
            Self::Base(Base::Oct) => "oct",
            Self::Base(Base::Dec) => "dec",
            Self::Base(Base::Hex) => "hex",
            Self::ColorMode(ColorMode::Rgb565) => "rgb565",
            Self::ColorMode(ColorMode::Rgb888) => "rgb888",
            Self::Clear => "clr",
            Self::AllClear => "ac",
            Self::Alt => "alt",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = KeyParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.len() == 1
            && let Some(d) = token.chars().next().and_then(|c| c.to_digit(16))
        {
            return Ok(Self::Digit(d as u8));
        }

        let key = match token.to_ascii_lowercase().as_str() {
            "00" => Self::DoubleZero,
            "ff" => Self::DoubleF,
            "=" => Self::Equals,
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Sub),
            "*" => Self::Operator(Operator::Mul),
            "/" => Self::Operator(Operator::Div),
            "mod" | "%" => Self::Operator(Operator::Mod),
            "and" | "&" => Self::Operator(Operator::And),
            "or" | "|" => Self::Operator(Operator::Or),
            "nor" => Self::Operator(Operator::Nor),
            "xor" | "^" => Self::Operator(Operator::Xor),
            "rolby" => Self::Operator(Operator::RotateLeft),
            "rorby" => Self::Operator(Operator::RotateRight),
            "<<" => Self::Operator(Operator::ShiftLeft),
            ">>" => Self::Operator(Operator::ShiftRight),
            "shl" => Self::ShiftLeft,
            "shr" => Self::ShiftRight,
            "rol" => Self::RotateLeft,
            "ror" => Self::RotateRight,
            "not" | "1s" => Self::OnesComplement,
            "neg" | "2s" => Self::TwosComplement,
            "bflip" => Self::ByteFlip,
            "wflip" => Self::WordFlip,
            "r+" => Self::Channel(Channel::Red, Step::Up),
            "r-" => Self::Channel(Channel::Red, Step::Down),
            "g+" => Self::Channel(Channel::Green, Step::Up),
            "g-" => Self::Channel(Channel::Green, Step::Down),
            "b+" => Self::Channel(Channel::Blue, Step::Up),
            "b-" => Self::Channel(Channel::Blue, Step::Down),
            "8bit" => Self::BitWidth(BitWidth::W8),
            "16bit" => Self::BitWidth(BitWidth::W16),
            "24bit" => Self::BitWidth(BitWidth::W24),
            "32bit" => Self::BitWidth(BitWidth::W32),
            "64bit" => Self::BitWidth(BitWidth::W64),
            "oct" => Self::Base(Base::Oct),
            "dec" => Self::Base(Base::Dec),
            "hex" => Self::Base(Base::Hex),
            "rgb565" => Self::ColorMode(ColorMode::Rgb565),
            "rgb888" => Self::ColorMode(ColorMode::Rgb888),
            "clr" => Self::Clear,
            "ac" => Self::AllClear,
            "alt" => Self::Alt,
            _ => return Err(KeyParseError::UnknownKey(token.to_string())),
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in 0..=u8::MAX {
            if let Some(key) = KeyCode::from_code(code) {
                assert_eq!(key.code(), code, "{key}");
            }
        }
    }

    #[test]
    fn test_unassigned_codes() {
        for code in [35, 36, 37, 38, 51, 56, 66, 70, 200] {
            assert_eq!(KeyCode::from_code(code), None);
        }
    }

    #[test]
    fn test_digit_stays_in_nibble() {
        assert_eq!(KeyCode::digit(0xF), Some(KeyCode::Digit(0xF)));
        assert_eq!(KeyCode::digit(16), None);
        assert_eq!(KeyCode::Digit(16).code(), 0);
        assert_ne!(KeyCode::Digit(16).code(), KeyCode::DoubleZero.code());
        assert_eq!(KeyCode::Digit(16).name(), KeyCode::Digit(0).name());
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(KeyCode::from_button(0, false), Some(KeyCode::Digit(9)));
        assert_eq!(KeyCode::from_button(4, false), Some(KeyCode::Equals));
        assert_eq!(KeyCode::from_button(34, false), Some(KeyCode::Clear));
        assert_eq!(KeyCode::from_button(34, true), Some(KeyCode::AllClear));
        assert_eq!(KeyCode::from_button(35, false), None);
    }

    #[test]
    fn test_alt_button_produces_nothing() {
        assert_eq!(KeyCode::from_button(33, false), None);
        assert_eq!(KeyCode::from_button(33, true), None);
    }

    #[test]
    fn test_alt_layer() {
        // Digit 4 doubles as red-down, 5 as byte flip.
        assert_eq!(
            KeyCode::from_button(11, true),
            Some(KeyCode::Channel(Channel::Red, Step::Down))
        );
        assert_eq!(
            KeyCode::Digit(5).with_alt(),
            Some(KeyCode::Channel(Channel::Green, Step::Down))
        );
        assert_eq!(KeyCode::Digit(0xA).with_alt(), Some(KeyCode::ByteFlip));
        assert_eq!(KeyCode::Digit(0x1).with_alt(), None);
        assert_eq!(KeyCode::Clear.with_alt(), Some(KeyCode::AllClear));
        assert_eq!(KeyCode::AllClear.with_alt(), None);
        assert_eq!(KeyCode::Alt.with_alt(), None);
    }

    #[test]
    fn test_names_round_trip() {
        for code in 0..=u8::MAX {
            if let Some(key) = KeyCode::from_code(code) {
                assert_eq!(key.name().parse::<KeyCode>(), Ok(key));
            }
        }
    }

    #[test]
    fn test_digit_names_are_case_insensitive() {
        assert_eq!("a".parse::<KeyCode>(), Ok(KeyCode::Digit(0xA)));
        assert_eq!("c".parse::<KeyCode>(), Ok(KeyCode::Digit(0xC)));
        assert_eq!("clr".parse::<KeyCode>(), Ok(KeyCode::Clear));
        assert_eq!("ff".parse::<KeyCode>(), Ok(KeyCode::DoubleF));
        assert_eq!(
            "B+".parse::<KeyCode>(),
            Ok(KeyCode::Channel(Channel::Blue, Step::Up))
        );
        assert!("sqrt".parse::<KeyCode>().is_err());
    }
}
