use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Blue = 0,
    Green = 1,
    Magenta = 2,
    Silver = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Blue, Suit::Green, Suit::Magenta, Suit::Silver];

    /// Always outranks the led suit.
    pub const TRUMP: Suit = Suit::Silver;

    /// The suit a face-down card stands in for.
    pub const WILDCARD: Suit = Suit::Magenta;

    pub const fn is_trump(self) -> bool {
        matches!(self, Suit::Silver)
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, Suit::Magenta)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Suit::Blue => "BLUE",
            Suit::Green => "GREEN",
            Suit::Magenta => "MAGENTA",
            Suit::Silver => "SILVER",
        };
        f.write_str(label)
    }
}
