use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub value: u8,
}

impl Card {
    pub const fn new(suit: Suit, value: u8) -> Self {
        Self { suit, value }
    }

    pub const fn is_trump(self) -> bool {
        self.suit.is_trump()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.suit, self.value)
    }
}

/// A card on the table, tagged with the seat that played it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub owner: PlayerId,
    pub card: Card,
    pub face_down: bool,
}

impl PlayedCard {
    pub fn new(owner: PlayerId, card: Card, face_down: bool) -> Self {
        Self {
            owner,
            card,
            face_down,
        }
    }

    /// Suit the card counts as once it is on the table.
    pub fn effective_suit(&self) -> Suit {
        if self.face_down {
            Suit::WILDCARD
        } else {
            self.card.suit
        }
    }

    /// Face-down cards compare and score as the override value.
    pub fn effective_value(&self, override_value: u8) -> u8 {
        if self.face_down {
            override_value
        } else {
            self.card.value
        }
    }

    pub fn is_face_up_trump(&self) -> bool {
        !self.face_down && self.card.is_trump()
    }
}

impl fmt::Display for PlayedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.face_down {
            write!(f, "{} (masked)", Suit::WILDCARD)
        } else {
            write!(f, "{}", self.card)
        }
    }
}
