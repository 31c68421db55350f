use super::error::RuleError;
use super::state::{GameState, GameStatus, Turn};
use crate::model::card::PlayedCard;
use crate::model::player::PlayerId;
use tracing::debug;

impl GameState {
    /// Checks a proposed play without touching the state.
    ///
    /// The opening play of a trick is unrestricted. After that a player must
    /// follow the lead suit while holding it. A face-down card is allowed once
    /// per trick, and only when the player holds no lead-suit card or is
    /// masking the last one.
    pub fn validate(
        &self,
        player_id: &PlayerId,
        card_index: usize,
        face_down: bool,
    ) -> Result<(), RuleError> {
        let seat = self
            .seat_of(player_id)
            .ok_or_else(|| RuleError::UnknownPlayer {
                player: player_id.clone(),
            })?;
        let on_turn = self.status == GameStatus::Playing && self.turn == Turn::Seat(seat);
        if !on_turn {
            return Err(RuleError::NotYourTurn {
                player: player_id.clone(),
            });
        }

        let hand = &self.players[seat].hand;
        let card = hand.get(card_index).ok_or(RuleError::CardNotInHand {
            index: card_index,
            hand_size: hand.len(),
        })?;

        let Some(lead) = self.trick.lead_suit() else {
            return Ok(());
        };
        let held = hand.count_suit(lead);

        if face_down {
            if self.trick.has_override() {
                return Err(RuleError::OverrideAlreadyUsed);
            }
            let masks_last_lead = held == 1 && card.suit == lead;
            if held > 0 && !masks_last_lead {
                return Err(RuleError::InvalidOverride { lead });
            }
        } else if held > 0 && card.suit != lead {
            return Err(RuleError::MustFollowSuit { lead });
        }
        Ok(())
    }

    /// Plays a card from `player_id`'s hand into the trick.
    pub fn apply_move(
        &self,
        player_id: &PlayerId,
        card_index: usize,
        face_down: bool,
    ) -> Result<GameState, RuleError> {
        self.validate(player_id, card_index, face_down)?;

        let mut next = self.clone();
        let seat = next
            .seat_of(player_id)
            .ok_or_else(|| RuleError::UnknownPlayer {
                player: player_id.clone(),
            })?;
        let hand_size = next.players[seat].hand.len();
        let card = next.players[seat]
            .hand
            .remove_at(card_index)
            .ok_or(RuleError::CardNotInHand {
                index: card_index,
                hand_size,
            })?;

        let played = PlayedCard::new(player_id.clone(), card, face_down);
        let line = format!("{} played {}", next.players[seat].name, played);
        next.trick.play(played)?;
        next.logs.neutral(line);

        next.turn = if next.trick.is_complete() {
            Turn::ResolvePending
        } else {
            Turn::Seat((seat + 1) % next.players.len())
        };

        debug!(
            player = %player_id,
            card = %card,
            face_down,
            trick_len = next.trick.len(),
            "card played"
        );
        Ok(next)
    }

    /// Hand indices that may be played face-up right now.
    pub fn legal_plays(&self, player_id: &PlayerId) -> Vec<usize> {
        self.legal_indices(player_id, false)
    }

    /// Hand indices that may be played face-down right now.
    pub fn legal_face_down_now(&self, player_id: &PlayerId) -> Vec<usize> {
        self.legal_indices(player_id, true)
    }

    fn legal_indices(&self, player_id: &PlayerId, face_down: bool) -> Vec<usize> {
        let Some(player) = self.player(player_id) else {
            return Vec::new();
        };
        (0..player.hand.len())
            .filter(|&index| self.validate(player_id, index, face_down).is_ok())
            .collect()
    }
}
