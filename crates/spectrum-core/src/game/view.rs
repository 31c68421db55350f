use super::state::{GameState, GameStatus, RoundResult, Turn};
use crate::model::card::{Card, PlayedCard};
use crate::model::ledger::LogEntry;
use crate::model::player::{PlayerId, RoundRecord};
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// A card on the table as one seat sees it. Masked cards only reveal their
/// identity to the player who played them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisiblePlay {
    pub owner: PlayerId,
    pub face_down: bool,
    pub card: Option<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub id: PlayerId,
    pub name: String,
    pub chips: i32,
    pub cards_in_hand: usize,
    pub score_total: u32,
    pub busted: bool,
    pub ready: bool,
    pub history: Vec<RoundRecord>,
}

/// Everything one seat is allowed to know about the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub viewer: PlayerId,
    pub is_host: bool,
    pub status: GameStatus,
    pub turn: Turn,
    pub round_count: u32,
    pub reserve: u32,
    pub lead_suit: Option<Suit>,
    pub hand: Vec<Card>,
    pub legal_plays: Vec<usize>,
    pub legal_face_down: Vec<usize>,
    pub seats: Vec<OpponentView>,
    pub trick: Vec<VisiblePlay>,
    pub round_result: Option<RoundResult>,
    pub logs: Vec<LogEntry>,
}

impl GameState {
    /// Projects the table for one seat, or `None` when the viewer is not seated.
    pub fn view_for(&self, viewer: &PlayerId) -> Option<SeatView> {
        let me = self.player(viewer)?;
        let seats = self
            .players
            .iter()
            .map(|player| OpponentView {
                id: player.id.clone(),
                name: player.name.clone(),
                chips: player.chips,
                cards_in_hand: player.hand.len(),
                score_total: player.score_total,
                busted: player.busted,
                ready: player.ready,
                history: player.history.clone(),
            })
            .collect();
        let trick = self
            .trick
            .plays()
            .iter()
            .map(|play| visible(play, viewer))
            .collect();

        Some(SeatView {
            viewer: viewer.clone(),
            is_host: self.is_host(viewer),
            status: self.status,
            turn: self.turn,
            round_count: self.round_count,
            reserve: self.reserve,
            lead_suit: self.lead_suit(),
            hand: me.hand.cards().to_vec(),
            legal_plays: self.legal_plays(viewer),
            legal_face_down: self.legal_face_down_now(viewer),
            seats,
            trick,
            round_result: self.round_result.clone(),
            logs: self.logs.entries().to_vec(),
        })
    }
}

fn visible(play: &PlayedCard, viewer: &PlayerId) -> VisiblePlay {
    let revealed = !play.face_down || &play.owner == viewer;
    VisiblePlay {
        owner: play.owner.clone(),
        face_down: play.face_down,
        card: revealed.then_some(play.card),
    }
}
