//! Color modes and per-channel editing.
//!
//! RGB888 packs red, green and blue as 8/8/8 bits (`RRGGBB`); RGB565 packs
//! them as 5/6/5 bits in a 16-bit word. Channel keys change one field and
//! never carry into the neighbouring ones.

use serde::Serialize;

use super::state::{Base, Calculator, ColorMode};

/// Color channel addressed by the increment/decrement keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Bit field of one channel: (offset, width).
fn field(mode: ColorMode, channel: Channel) -> (u32, u32) {
    match (mode, channel) {
        (ColorMode::Rgb888, Channel::Red) => (16, 8),
        (ColorMode::Rgb888, Channel::Green) => (8, 8),
        (ColorMode::Rgb888, Channel::Blue) => (0, 8),
        (ColorMode::Rgb565, Channel::Red) => (11, 5),
        (ColorMode::Rgb565, Channel::Green) => (5, 6),
        (ColorMode::Rgb565, Channel::Blue) => (0, 5),
    }
}

/// Raw channel values of `value` under `mode`.
pub fn channels(value: u64, mode: ColorMode) -> [u8; 3] {
    [Channel::Red, Channel::Green, Channel::Blue].map(|channel| {
        let (offset, width) = field(mode, channel);
        ((value >> offset) & ((1 << width) - 1)) as u8
    })
}

/// Re-quantize a packed color from one layout to the other.
///
/// 888 to 565 keeps the top 5/6/5 bits of each channel; 565 to 888
/// left-justifies each field and zero fills the low bits. Round trips are
/// lossy: `0x112233` becomes `0x1106` and then `0x102030`.
pub fn convert(value: u64, from: ColorMode, to: ColorMode) -> u64 {
    match (from, to) {
        (ColorMode::Rgb888, ColorMode::Rgb565) => {
            let red = (value >> 19) & 0x1F;
            let green = (value >> 10) & 0x3F;
            let blue = (value >> 3) & 0x1F;
            (red << 11) | (green << 5) | blue
        }
        (ColorMode::Rgb565, ColorMode::Rgb888) => {
            let red = (value >> 11) & 0x1F;
            let green = (value >> 5) & 0x3F;
            let blue = value & 0x1F;
            (red << 19) | (green << 10) | (blue << 3)
        }
        _ => value,
    }
}

impl Calculator {
    /// Switch the channel layout.
    ///
    /// Selecting a different mode re-encodes `current`; selecting the active
    /// one leaves it alone. Either way the mode's width and hex base are
    /// applied.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        if self.color_mode != mode {
            self.current = convert(self.current, self.color_mode, mode);
            self.color_mode = mode;
        }
        self.set_bit_width(mode.bit_width());
        self.set_base(Base::Hex);
    }

    /// Add `delta` to one channel, wrapping inside its field.
    fn step_channel(&mut self, channel: Channel, delta: i64) {
        let (offset, width) = field(self.color_mode, channel);
        let field_mask = ((1u64 << width) - 1) << offset;
        let stepped = self.current.wrapping_add_signed(delta << offset) & field_mask;
        self.current = ((self.current & !field_mask) | stepped) & self.mask;
    }

    pub fn inc_red(&mut self) {
        self.step_channel(Channel::Red, 1);
    }

    pub fn dec_red(&mut self) {
        self.step_channel(Channel::Red, -1);
    }

    pub fn inc_green(&mut self) {
        self.step_channel(Channel::Green, 1);
    }

    pub fn dec_green(&mut self) {
        self.step_channel(Channel::Green, -1);
    }

    pub fn inc_blue(&mut self) {
        self.step_channel(Channel::Blue, 1);
    }

    pub fn dec_blue(&mut self) {
        self.step_channel(Channel::Blue, -1);
    }
}
