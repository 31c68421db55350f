pub mod card;
pub mod deck;
pub mod hand;
pub mod ledger;
pub mod player;
pub mod rules;
pub mod score;
pub mod suit;
pub mod trick;
