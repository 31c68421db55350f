use crate::model::card::PlayedCard;
use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    capacity: usize,
    plays: Vec<PlayedCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    AlreadyPlayed(PlayerId),
    SecondOverride,
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::AlreadyPlayed(player) => {
                write!(f, "{player} has already played this trick")
            }
            TrickError::SecondOverride => write!(f, "trick already holds a face-down card"),
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            plays: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn plays(&self) -> &[PlayedCard] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() >= self.capacity
    }

    pub fn leader(&self) -> Option<&PlayerId> {
        self.plays.first().map(|play| &play.owner)
    }

    /// Suit set by the opening play; a face-down opener leads the wildcard suit.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(PlayedCard::effective_suit)
    }

    pub fn has_override(&self) -> bool {
        self.plays.iter().any(|play| play.face_down)
    }

    pub fn play(&mut self, played: PlayedCard) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        if self.plays.iter().any(|play| play.owner == played.owner) {
            return Err(TrickError::AlreadyPlayed(played.owner));
        }
        if played.face_down && self.has_override() {
            return Err(TrickError::SecondOverride);
        }
        self.plays.push(played);
        Ok(())
    }

    /// Card that takes the trick.
    ///
    /// Face-up trumps beat everything. Otherwise the highest effective value
    /// among lead-suit cards wins, where face-down cards only count when the
    /// wildcard suit was led. Equal values go to the earlier play. With no
    /// qualifying card the opener keeps it.
    pub fn winning_play(&self, override_value: u8) -> Option<&PlayedCard> {
        let opener = self.plays.first()?;

        if let Some(trump) = highest(
            self.plays.iter().filter(|play| play.is_face_up_trump()),
            override_value,
        ) {
            return Some(trump);
        }

        let lead = opener.effective_suit();
        let following = self.plays.iter().filter(|play| {
            if play.face_down {
                lead == Suit::WILDCARD
            } else {
                play.card.suit == lead
            }
        });
        Some(highest(following, override_value).unwrap_or(opener))
    }

    pub fn winner(&self, override_value: u8) -> Option<&PlayerId> {
        self.winning_play(override_value).map(|play| &play.owner)
    }

    pub fn clear(&mut self) {
        self.plays.clear();
    }
}

fn highest<'a>(
    plays: impl Iterator<Item = &'a PlayedCard>,
    override_value: u8,
) -> Option<&'a PlayedCard> {
    plays.fold(None, |best: Option<&PlayedCard>, play| match best {
        Some(current)
            if current.effective_value(override_value) >= play.effective_value(override_value) =>
        {
            Some(current)
        }
        _ => Some(play),
    })
}
