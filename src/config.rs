//! Startup configuration loaded from a TOML file.
//!
//! Looked up at `$XDG_CONFIG_HOME/hexcalc/config.toml` unless a path is given.
//! A missing file means defaults.
//!
//! ```toml
//! color_mode = "rgb888"
//! bit_width = 32
//! base = 10
//! group_digits = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::calculator::{Base, BitWidth, Calculator, ColorMode, DisplayOptions};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Channel layout at startup. Applied first, so it also sets width and base.
    pub color_mode: Option<ColorMode>,
    pub bit_width: Option<BitWidth>,
    pub base: Option<Base>,
    /// Thousands separators in decimal.
    pub group_digits: bool,
    /// Zero pad hexadecimal to the full width.
    pub pad_hex: bool,
}

impl Default for Config {
    fn default() -> Self {
        let display = DisplayOptions::default();
        Self {
            color_mode: None,
            bit_width: None,
            base: None,
            group_digits: display.group_digits,
            pad_hex: display.pad_hex,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hexcalc").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config =
            Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            group_digits: self.group_digits,
            pad_hex: self.pad_hex,
        }
    }

    /// A fresh calculator in the configured modes.
    pub fn build_calculator(&self) -> Calculator {
        let mut calc = Calculator::new();
        if let Some(mode) = self.color_mode {
            calc.set_color_mode(mode);
        }
        if let Some(width) = self.bit_width {
            calc.set_bit_width(width);
        }
        if let Some(base) = self.base {
            calc.set_base(base);
        }
        calc.set_display_options(self.display_options());
        calc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());

        let calc = config.build_calculator();
        assert_eq!(calc.bit_width(), BitWidth::W16);
        assert_eq!(calc.base(), Base::Hex);
        assert_eq!(calc.color_mode(), ColorMode::Rgb565);
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            color_mode = "rgb888"
            bit_width = 32
            base = 10
            group_digits = false
            pad_hex = false
            "#,
        )
        .unwrap();

        let calc = config.build_calculator();
        assert_eq!(calc.color_mode(), ColorMode::Rgb888);
        assert_eq!(calc.bit_width(), BitWidth::W32);
        assert_eq!(calc.base(), Base::Dec);
        assert!(!config.display_options().group_digits);
    }

    #[test]
    fn test_color_mode_alone_sets_width() {
        let config = Config::parse(r#"color_mode = "rgb888""#).unwrap();
        let calc = config.build_calculator();
        assert_eq!(calc.bit_width(), BitWidth::W24);
        assert_eq!(calc.base(), Base::Hex);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::parse("bit_width = 12").is_err());
        assert!(Config::parse("base = 2").is_err());
        assert!(Config::parse(r#"color_mode = "rgb444""#).is_err());
        assert!(Config::parse("font = \"mono\"").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = std::env::temp_dir().join("hexcalc-config-does-not-exist.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("hexcalc-config-{}.toml", std::process::id()));
        std::fs::write(&path, "base = 8\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.base, Some(Base::Oct));
    }
}
