use crate::model::card::PlayedCard;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque seat identity handed in by the surrounding system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One completed round for a player: final score and chip delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub eq: u32,
    pub diff: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub chips: i32,
    pub hand: Hand,
    /// Winning cards taken this round, as they were played.
    pub score_pile: Vec<PlayedCard>,
    pub score_total: u32,
    pub busted: bool,
    pub ready: bool,
    #[serde(default)]
    pub history: Vec<RoundRecord>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, chips: i32) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            hand: Hand::new(),
            score_pile: Vec::new(),
            score_total: 0,
            busted: false,
            ready: false,
            history: Vec::new(),
        }
    }

    /// Clears everything that only lives for one round. Chips and history stay.
    pub fn reset_round(&mut self) {
        self.hand.clear();
        self.score_pile.clear();
        self.score_total = 0;
        self.busted = false;
    }

    /// Back to a fresh game: starting stack, empty history.
    pub fn reset_game(&mut self, starting_chips: i32) {
        self.reset_round();
        self.chips = starting_chips;
        self.history.clear();
        self.ready = false;
    }

    /// Points carried by the score pile.
    pub fn pile_value(&self, override_value: u8) -> u32 {
        self.score_pile
            .iter()
            .map(|played| u32::from(played.effective_value(override_value)))
            .sum()
    }

    /// Distance from the round target.
    pub fn distance_to(&self, target: u32) -> u32 {
        self.score_total.abs_diff(target)
    }
}
