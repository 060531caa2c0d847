//! IEEE 1164 `std_logic` values.
//!
//! Bit literals in the DSL (`'0'`, `'1'`, `'Z'`, ...) are validated against
//! this set and carried through the IR as [`Logic`], so the emitter never
//! sees a character VHDL would reject.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine `std_logic` values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Logic {
    /// `'U'`, uninitialized.
    Uninitialized,
    /// `'X'`, forcing unknown.
    Unknown,
    /// `'0'`, forcing low.
    Zero,
    /// `'1'`, forcing high.
    One,
    /// `'Z'`, high impedance.
    HighZ,
    /// `'W'`, weak unknown.
    WeakUnknown,
    /// `'L'`, weak low.
    WeakZero,
    /// `'H'`, weak high.
    WeakOne,
    /// `'-'`, don't care.
    DontCare,
}

impl Logic {
    /// Parses a `std_logic` character. Letters are accepted in either case.
    pub fn from_char(c: char) -> Option<Self> {
        let value = match c.to_ascii_uppercase() {
            'U' => Logic::Uninitialized,
            'X' => Logic::Unknown,
            '0' => Logic::Zero,
            '1' => Logic::One,
            'Z' => Logic::HighZ,
            'W' => Logic::WeakUnknown,
            'L' => Logic::WeakZero,
            'H' => Logic::WeakOne,
            '-' => Logic::DontCare,
            _ => return None,
        };
        Some(value)
    }

    /// The canonical (upper-case) character for this value.
    pub fn to_char(self) -> char {
        match self {
            Logic::Uninitialized => 'U',
            Logic::Unknown => 'X',
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::HighZ => 'Z',
            Logic::WeakUnknown => 'W',
            Logic::WeakZero => 'L',
            Logic::WeakOne => 'H',
            Logic::DontCare => '-',
        }
    }

    /// Whether every character of `s` is a `std_logic` value.
    pub fn is_bit_string(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| Self::from_char(c).is_some())
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
