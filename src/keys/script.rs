//! Key scripts: whitespace separated key names such as `1 F + 2 =`.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::KeyCode;

lazy_static! {
    /// Characters that can appear in a key name.
    static ref KEY_CHARS: Regex = Regex::new(r"^[0-9A-Za-z+\-*/%&|^<>=]+$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("invalid characters in key `{0}`")]
    InvalidToken(String),

    #[error("unknown key `{0}`")]
    UnknownKey(String),

    #[error("key `{0}` has no alternate function")]
    NoAltFunction(String),

    #[error("`alt` must be followed by a key")]
    DanglingAlt,
}

/// Parse a key script into key codes.
///
/// `alt` applies the alternate layer to the key that follows it, so
/// `alt clr` is the same as `ac`.
pub fn parse_keys(input: &str) -> Result<Vec<KeyCode>, KeyParseError> {
    let mut keys = Vec::new();
    let mut alt = false;

    for token in input.split_whitespace() {
        if !KEY_CHARS.is_match(token) {
            return Err(KeyParseError::InvalidToken(token.to_string()));
        }

        let key: KeyCode = token.parse()?;
        if key == KeyCode::Alt {
            alt = true;
            continue;
        }

        if alt {
            let shifted = key
                .with_alt()
                .ok_or_else(|| KeyParseError::NoAltFunction(token.to_string()))?;
            keys.push(shifted);
            alt = false;
        } else {
            keys.push(key);
        }
    }

    if alt {
        return Err(KeyParseError::DanglingAlt);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{BitWidth, Channel, Operator};
    use crate::keys::Step;

    #[test]
    fn test_simple_script() {
        let keys = parse_keys("1 F + 2 =").unwrap();
        assert_eq!(
            keys,
            vec![
                KeyCode::Digit(1),
                KeyCode::Digit(0xF),
                KeyCode::Operator(Operator::Add),
                KeyCode::Digit(2),
                KeyCode::Equals,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_flexible() {
        assert_eq!(parse_keys("  dec\t1\n\n2  ").unwrap().len(), 3);
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys("   ").unwrap().is_empty());
    }

    #[test]
    fn test_alt_prefix() {
        assert_eq!(parse_keys("alt clr").unwrap(), vec![KeyCode::AllClear]);
        assert_eq!(
            parse_keys("alt C alt 4").unwrap(),
            vec![
                KeyCode::BitWidth(BitWidth::W8),
                KeyCode::Channel(Channel::Red, Step::Down)
            ]
        );
    }

    #[test]
    fn test_alt_errors() {
        assert_eq!(parse_keys("5 alt"), Err(KeyParseError::DanglingAlt));
        assert_eq!(
            parse_keys("alt 1"),
            Err(KeyParseError::NoAltFunction("1".to_string()))
        );
    }

    #[test]
    fn test_invalid_tokens_rejected() {
        assert_eq!(
            parse_keys("1 + $"),
            Err(KeyParseError::InvalidToken("$".to_string()))
        );
        assert_eq!(
            parse_keys("1 sqrt"),
            Err(KeyParseError::UnknownKey("sqrt".to_string()))
        );
    }
}
