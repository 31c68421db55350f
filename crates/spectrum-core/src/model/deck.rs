use crate::model::card::Card;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Ranks per suit so that the four-suit deck splits evenly.
pub const fn ranks_per_suit(player_count: usize) -> u8 {
    if player_count == 3 { 9 } else { 13 }
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Ordered deck: one run `1..=N` for every suit.
    pub fn for_players(player_count: usize) -> Self {
        let top = ranks_per_suit(player_count);
        let mut cards = Vec::with_capacity(Suit::ALL.len() * top as usize);
        for suit in Suit::ALL.iter().copied() {
            for value in 1..=top {
                cards.push(Card::new(suit, value));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(player_count: usize, rng: &mut R) -> Self {
        let mut deck = Self::for_players(player_count);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(player_count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(player_count, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deals `len / player_count` cards to each seat round-robin.
    ///
    /// Returns the hands in seat order together with the undealt remainder.
    pub fn deal(self, player_count: usize) -> (Vec<Vec<Card>>, Vec<Card>) {
        if player_count == 0 {
            return (Vec::new(), self.cards);
        }
        let hand_size = self.cards.len() / player_count;
        let dealt = hand_size * player_count;
        let mut hands: Vec<Vec<Card>> = (0..player_count)
            .map(|_| Vec::with_capacity(hand_size))
            .collect();

        let mut cards = self.cards;
        let remainder = cards.split_off(dealt);
        for (index, card) in cards.into_iter().enumerate() {
            hands[index % player_count].push(card);
        }
        (hands, remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, ranks_per_suit};
    use crate::model::card::Card;
    use crate::model::suit::Suit;
    use std::collections::HashSet;

    #[test]
    fn deck_size_follows_player_count() {
        assert_eq!(ranks_per_suit(3), 9);
        assert_eq!(ranks_per_suit(4), 13);
        assert_eq!(Deck::for_players(3).len(), 36);
        assert_eq!(Deck::for_players(4).len(), 52);
    }

    #[test]
    fn deck_cards_are_unique() {
        let deck = Deck::for_players(4);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
        assert!(deck.cards().contains(&Card::new(Suit::Silver, 13)));
        assert!(!deck.cards().contains(&Card::new(Suit::Silver, 14)));
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(4, 42);
        let deck_b = Deck::shuffled_with_seed(4, 42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(4, 1);
        let deck_b = Deck::shuffled_with_seed(4, 2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_gives_equal_hands() {
        for players in [3usize, 4] {
            let deck = Deck::shuffled_with_seed(players, 7);
            let size = deck.len();
            let (hands, rest) = deck.deal(players);
            assert_eq!(hands.len(), players);
            let total: usize = hands.iter().map(Vec::len).sum();
            assert_eq!(total, size - size % players);
            assert!(hands.iter().all(|hand| hand.len() == size / players));
            assert_eq!(rest.len(), size % players);
        }
    }

    #[test]
    fn deal_keeps_remainder_undealt() {
        let deck = Deck::for_players(4);
        let (hands, rest) = deck.deal(5);
        assert!(hands.iter().all(|hand| hand.len() == 10));
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn shuffle_spreads_first_card_uniformly() {
        // 36 cards, 7200 shuffles: every card should lead the deck ~200 times.
        let mut counts = std::collections::HashMap::new();
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(2024);
        for _ in 0..7200 {
            let deck = Deck::shuffled(3, &mut rng);
            *counts.entry(deck.cards()[0]).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 36);
        assert!(counts.values().all(|&n| (110..=300).contains(&n)));
    }
}
