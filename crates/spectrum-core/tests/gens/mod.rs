// Proptest generators shared by the property suites.
#![allow(dead_code)]

use proptest::prelude::*;
use spectrum_core::PlayerId;
use spectrum_core::model::card::Card;
use spectrum_core::model::suit::Suit;
use std::ops::RangeInclusive;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Blue),
        Just(Suit::Green),
        Just(Suit::Magenta),
        Just(Suit::Silver),
    ]
}

/// Any card of the four-seat deck.
pub fn card() -> impl Strategy<Value = Card> {
    (suit(), 1u8..=13).prop_map(|(suit, value)| Card::new(suit, value))
}

/// Distinct cards, in no particular order.
pub fn hand(size: RangeInclusive<usize>) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::hash_set(card(), size).prop_map(|cards| cards.into_iter().collect())
}

/// Plays in trick order, each flagged face-down or not. Only the first
/// face-down flag survives, so the sequence is always playable.
pub fn plays(size: RangeInclusive<usize>) -> impl Strategy<Value = Vec<(Card, bool)>> {
    prop::collection::vec((card(), any::<bool>()), size).prop_map(|mut plays| {
        let mut masked = false;
        for play in &mut plays {
            play.1 &= !masked;
            masked |= play.1;
        }
        plays
    })
}

pub fn seat_id(seat: usize) -> PlayerId {
    PlayerId::from(format!("p{seat}"))
}
