//! Key handling entry point.

use tracing::{debug, warn};

use super::color::Channel;
use super::display::Display;
use super::error::CalcError;
use super::state::Calculator;
use crate::keys::{KeyCode, KeySource, Step};

impl Calculator {
    /// Apply one key press and return what the calculator now shows.
    ///
    /// A failing key leaves the state as it was and raises the error flag
    /// until the next key; the returned error is also reflected in
    /// [`Calculator::display`].
    pub fn apply(&mut self, key: KeyCode) -> Result<Display, CalcError> {
        self.error = None;

        if let Err(err) = self.handle_key(key) {
            warn!(%key, %err, "key rejected");
            self.error = Some(err);
            return Err(err);
        }

        debug!(
            %key,
            current = self.current,
            stored = self.stored,
            pending_op = ?self.pending_op,
            "key applied"
        );
        Ok(self.display())
    }

    /// Apply every key from `source`, reporting each resulting display.
    pub fn run(
        &mut self,
        source: &mut impl KeySource,
        mut on_display: impl FnMut(KeyCode, &Display),
    ) {
        while let Some(key) = source.next_key() {
            let display = match self.apply(key) {
                Ok(display) => display,
                Err(_) => self.display(),
            };
            on_display(key, &display);
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<(), CalcError> {
        match key {
            KeyCode::Digit(d) => self.enter_digit(d)?,
            KeyCode::DoubleZero => {
                self.enter_digit(0)?;
                self.enter_digit(0)?;
            }
            KeyCode::DoubleF => {
                self.enter_digit(0xF)?;
                self.enter_digit(0xF)?;
            }
            KeyCode::Equals => self.evaluate()?,
            KeyCode::Operator(op) => self.select_operator(op),
            KeyCode::ShiftLeft => self.shift_left(),
            KeyCode::ShiftRight => self.shift_right(),
            KeyCode::RotateLeft => self.rotate_left(),
            KeyCode::RotateRight => self.rotate_right(),
            KeyCode::OnesComplement => self.ones_complement(),
            KeyCode::TwosComplement => self.twos_complement(),
            KeyCode::ByteFlip => self.byte_flip()?,
            KeyCode::WordFlip => self.word_flip()?,
            KeyCode::Channel(channel, step) => match (channel, step) {
                (Channel::Red, Step::Up) => self.inc_red(),
                (Channel::Red, Step::Down) => self.dec_red(),
                (Channel::Green, Step::Up) => self.inc_green(),
                (Channel::Green, Step::Down) => self.dec_green(),
                (Channel::Blue, Step::Up) => self.inc_blue(),
                (Channel::Blue, Step::Down) => self.dec_blue(),
            },
            KeyCode::BitWidth(width) => self.set_bit_width(width),
            KeyCode::Base(base) => self.set_base(base),
            KeyCode::ColorMode(mode) => self.set_color_mode(mode),
            KeyCode::Clear => self.clear(),
            KeyCode::AllClear => self.all_clear(),
            KeyCode::Alt => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{Base, BitWidth, ColorMode};
    use crate::keys::{ScriptSource, parse_keys};

    fn run_script(script: &str) -> Calculator {
        let mut calc = Calculator::new();
        for key in parse_keys(script).unwrap() {
            let _ = calc.apply(key);
        }
        calc
    }

    #[test]
    fn test_chained_equals() {
        let mut calc = run_script("5 + 3");
        assert_eq!(calc.stored(), 5);
        assert_eq!(calc.current(), 3);

        let display = calc.apply(KeyCode::Equals).unwrap();
        assert_eq!(display.value, 8);
        assert!(calc.is_result_shown());

        let display = calc.apply(KeyCode::Equals).unwrap();
        assert_eq!(display.value, 0xB);
    }

    #[test]
    fn test_division_by_zero_raises_flag() {
        let mut calc = run_script("dec 1 0 / 0");
        let err = calc.apply(KeyCode::Equals).unwrap_err();
        assert_eq!(err, CalcError::DivisionByZero { op: "division" });
        assert_eq!(calc.error(), Some(&err));
        assert!(calc.display().is_error());
        assert_eq!(calc.current(), 0);
        assert_eq!(calc.stored(), 10);

        // The flag lasts only until the next key.
        let display = calc.apply(KeyCode::Clear).unwrap();
        assert!(!display.is_error());
        assert_eq!(calc.error(), None);
    }

    #[test]
    fn test_shortcut_digits() {
        let calc = run_script("1 00");
        assert_eq!(calc.current(), 0x100);

        let calc = run_script("FF");
        assert_eq!(calc.current(), 0xFF);

        let mut calc = run_script("dec 7");
        assert!(calc.apply(KeyCode::DoubleF).is_err());
        assert_eq!(calc.current(), 7);
    }

    #[test]
    fn test_digit_after_operator_starts_new_operand() {
        let calc = run_script("dec 4 2 * 1 0");
        assert_eq!(calc.stored(), 42);
        assert_eq!(calc.current(), 10);
    }

    #[test]
    fn test_mode_keys() {
        let calc = run_script("64bit oct");
        assert_eq!(calc.bit_width(), BitWidth::W64);
        assert_eq!(calc.base(), Base::Oct);

        let calc = run_script("rgb888");
        assert_eq!(calc.bit_width(), BitWidth::W24);
        assert_eq!(calc.color_mode(), ColorMode::Rgb888);
    }

    #[test]
    fn test_color_keys() {
        let calc = run_script("rgb888 r+ r+ g- b+");
        assert_eq!(calc.current(), 0x02_FF01);
    }

    #[test]
    fn test_unsupported_flip_is_reported() {
        let mut calc = run_script("8bit 1 2");
        assert!(matches!(
            calc.apply(KeyCode::ByteFlip),
            Err(CalcError::Unsupported { .. })
        ));
        assert_eq!(calc.current(), 0x12);
    }

    #[test]
    fn test_alt_key_is_inert() {
        let mut calc = run_script("3 +");
        let before = (calc.current(), calc.stored(), calc.is_pending_store());
        calc.apply(KeyCode::Alt).unwrap();
        assert_eq!(
            (calc.current(), calc.stored(), calc.is_pending_store()),
            before
        );
    }

    #[test]
    fn test_values_stay_within_mask() {
        let body = "FF FF FF FF * FF FF = = = neg not rol << 1 F = r- g- b- \
                    wflip bflip ror shl FF - 1 = = mod 7 = rorby 3 = nor 0 = 00 FF";
        for mode in ["8bit", "16bit", "32bit", "64bit", "rgb888", "rgb565"] {
            let mut calc = Calculator::new();
            calc.apply(mode.parse().unwrap()).unwrap();
            for key in parse_keys(body).unwrap() {
                let _ = calc.apply(key);
                assert!(calc.current() <= calc.mask(), "{mode}: after {key}");
                assert!(calc.stored() <= calc.mask(), "{mode}: after {key}");
            }
        }
    }

    #[test]
    fn test_narrowing_then_committing_masks_stored() {
        let mut calc = Calculator::new();
        for key in parse_keys("64bit F F F F + 8bit 1").unwrap() {
            calc.apply(key).unwrap();
        }
        assert_eq!(calc.current(), 0x1);
        assert_eq!(calc.stored(), 0xFF);

        // Equals without an operator commits the narrowed value.
        let mut calc = Calculator::new();
        for key in parse_keys("64bit F F F F 8bit =").unwrap() {
            calc.apply(key).unwrap();
        }
        assert_eq!(calc.current(), 0xFF);
        assert_eq!(calc.stored(), 0xFF);

        let mut calc = Calculator::new();
        for key in parse_keys("64bit 1 2 3 + 4 5 6 8bit =").unwrap() {
            calc.apply(key).unwrap();
        }
        assert_eq!(calc.current(), 0x79);
        assert_eq!(calc.stored(), 0x56);
        calc.apply(KeyCode::Equals).unwrap();
        assert_eq!(calc.current(), 0xCF);
    }

    #[test]
    fn test_run_reports_every_key() {
        let mut calc = Calculator::new();
        let mut source = ScriptSource::new(parse_keys("1 + 2 = / 0 =").unwrap());
        let mut shown = Vec::new();
        calc.run(&mut source, |key, display| {
            shown.push((key, display.value, display.is_error()))
        });

        assert_eq!(shown.len(), 7);
        assert_eq!(shown[3], (KeyCode::Equals, 3, false));
        assert_eq!(shown[6], (KeyCode::Equals, 0, true));
    }
}
