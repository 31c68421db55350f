use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use spectrum_core::SeatView;

use crate::config::PolicyKind;

/// A card to play: index into the viewer's sorted hand, and whether to mask it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayChoice {
    pub card_index: usize,
    pub face_down: bool,
}

pub trait SeatPolicy: Send {
    /// Picks a legal play from the seat's view, or `None` when nothing is legal.
    fn choose_play(&mut self, view: &SeatView) -> Option<PlayChoice>;
}

pub fn spawn_policy(kind: PolicyKind, seed: u64, override_value: u8) -> Box<dyn SeatPolicy> {
    match kind {
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::Cautious => Box::new(CautiousPolicy::new(override_value)),
    }
}

/// Uniform over legal face-up plays; masks a card now and then when allowed.
pub struct RandomPolicy {
    rng: StdRng,
    mask_rate: f64,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            mask_rate: 0.2,
        }
    }
}

impl SeatPolicy for RandomPolicy {
    fn choose_play(&mut self, view: &SeatView) -> Option<PlayChoice> {
        if !view.legal_face_down.is_empty() && self.rng.gen_bool(self.mask_rate) {
            let card_index = *view.legal_face_down.choose(&mut self.rng)?;
            return Some(PlayChoice {
                card_index,
                face_down: true,
            });
        }
        let card_index = *view.legal_plays.choose(&mut self.rng)?;
        Some(PlayChoice {
            card_index,
            face_down: false,
        })
    }
}

/// Sheds its highest card behind a mask when it can; otherwise plays low.
pub struct CautiousPolicy {
    override_value: u8,
}

impl CautiousPolicy {
    pub fn new(override_value: u8) -> Self {
        Self { override_value }
    }
}

impl SeatPolicy for CautiousPolicy {
    fn choose_play(&mut self, view: &SeatView) -> Option<PlayChoice> {
        let value_at = |index: usize| view.hand.get(index).map_or(0, |card| card.value);

        let masked = view
            .legal_face_down
            .iter()
            .copied()
            .filter(|&index| value_at(index) > self.override_value)
            .max_by_key(|&index| value_at(index));
        if let Some(card_index) = masked {
            return Some(PlayChoice {
                card_index,
                face_down: true,
            });
        }

        let card_index = view
            .legal_plays
            .iter()
            .copied()
            .min_by_key(|&index| value_at(index))?;
        Some(PlayChoice {
            card_index,
            face_down: false,
        })
    }
}
