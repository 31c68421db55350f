use crate::model::card::Card;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// Cards held by one seat, kept sorted by suit then value.
///
/// Plays address cards by their index in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|c| c.suit == suit).count()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.value.cmp(&b.value)));
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Suit::Blue, 3);
        hand.add(card);
        assert_eq!(hand.cards(), &[card]);
        assert_eq!(hand.remove_at(0), Some(card));
        assert!(hand.is_empty());
        assert_eq!(hand.remove_at(0), None);
    }

    #[test]
    fn cards_are_sorted_by_suit_then_value() {
        let hand = Hand::with_cards(vec![
            Card::new(Suit::Silver, 2),
            Card::new(Suit::Blue, 9),
            Card::new(Suit::Blue, 1),
        ]);
        assert_eq!(hand.get(0), Some(Card::new(Suit::Blue, 1)));
        assert_eq!(hand.get(1), Some(Card::new(Suit::Blue, 9)));
        assert_eq!(hand.get(2), Some(Card::new(Suit::Silver, 2)));
    }

    #[test]
    fn suit_counts() {
        let hand = Hand::with_cards(vec![
            Card::new(Suit::Green, 4),
            Card::new(Suit::Green, 8),
            Card::new(Suit::Magenta, 1),
        ]);
        assert!(hand.has_suit(Suit::Green));
        assert!(!hand.has_suit(Suit::Silver));
        assert_eq!(hand.count_suit(Suit::Green), 2);
    }
}
