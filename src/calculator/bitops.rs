//! One-step bit operations on the current value.

use super::error::CalcError;
use super::state::{BitWidth, Calculator};

/// Rotate `value` left by `n` within `width` bits. `n` must be below the width.
pub(super) fn rotate_left(value: u64, n: u32, width: BitWidth) -> u64 {
    let bits = width.bits();
    let value = value & width.mask();
    if n == 0 {
        return value;
    }
    ((value << n) | (value >> (bits - n))) & width.mask()
}

/// Rotate `value` right by `n` within `width` bits. `n` must be below the width.
pub(super) fn rotate_right(value: u64, n: u32, width: BitWidth) -> u64 {
    let bits = width.bits();
    let value = value & width.mask();
    if n == 0 {
        return value;
    }
    ((value >> n) | (value << (bits - n))) & width.mask()
}

/// Reverse the order of the low `count` bytes.
fn reverse_bytes(value: u64, count: u32) -> u64 {
    (0..count).fold(0, |acc, i| {
        let byte = (value >> (8 * i)) & 0xFF;
        acc | (byte << (8 * (count - 1 - i)))
    })
}

impl Calculator {
    pub fn shift_left(&mut self) {
        self.current = (self.current << 1) & self.mask;
    }

    pub fn shift_right(&mut self) {
        self.current = (self.current >> 1) & self.mask;
    }

    pub fn rotate_left(&mut self) {
        self.current = rotate_left(self.current, 1, self.bit_width);
    }

    pub fn rotate_right(&mut self) {
        self.current = rotate_right(self.current, 1, self.bit_width);
    }

    pub fn ones_complement(&mut self) {
        self.current = !self.current & self.mask;
    }

    pub fn twos_complement(&mut self) {
        self.current = self.current.wrapping_neg() & self.mask;
    }

    /// Reverse byte order within the active width.
    pub fn byte_flip(&mut self) -> Result<(), CalcError> {
        let v = self.current & self.mask;
        self.current = match self.bit_width {
            BitWidth::W8 => {
                return Err(CalcError::Unsupported {
                    op: "byte flip",
                    width: self.bit_width,
                });
            }
            BitWidth::W16 => v.swap_bytes() >> 48,
            BitWidth::W24 => reverse_bytes(v, 3),
            BitWidth::W32 => v.swap_bytes() >> 32,
            BitWidth::W64 => v.swap_bytes(),
        };
        Ok(())
    }

    /// Reverse 16-bit word order within the active width.
    ///
    /// At 24 bits there is no whole second word, so the three bytes rotate
    /// left by one byte instead (`RRGGBB` becomes `GGBBRR`).
    pub fn word_flip(&mut self) -> Result<(), CalcError> {
        let v = self.current & self.mask;
        self.current = match self.bit_width {
            BitWidth::W8 | BitWidth::W16 => {
                return Err(CalcError::Unsupported {
                    op: "word flip",
                    width: self.bit_width,
                });
            }
            BitWidth::W24 => rotate_left(v, 8, BitWidth::W24),
            BitWidth::W32 => (v >> 16) | ((v & 0xFFFF) << 16),
            BitWidth::W64 => {
                ((v & 0xFFFF_0000_0000_0000) >> 48)
                    | ((v & 0x0000_FFFF_0000_0000) >> 16)
                    | ((v & 0x0000_0000_FFFF_0000) << 16)
                    | ((v & 0x0000_0000_0000_FFFF) << 48)
            }
        };
        Ok(())
    }
}
