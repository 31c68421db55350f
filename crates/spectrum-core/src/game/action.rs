use super::error::RuleError;
use super::state::GameState;
use crate::model::player::PlayerId;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Every request the engine accepts, in one serializable envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Play {
        player: PlayerId,
        card_index: usize,
        #[serde(default)]
        face_down: bool,
    },
    ResolveTrick,
    ScoreRound,
    StartRound {
        actor: PlayerId,
    },
    RestartGame {
        actor: PlayerId,
    },
    ReturnToLobby {
        actor: PlayerId,
    },
    Join {
        player: PlayerId,
        name: String,
    },
    Leave {
        actor: PlayerId,
        player: PlayerId,
    },
    Ready {
        player: PlayerId,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Play { .. } => "play",
            Action::ResolveTrick => "resolve_trick",
            Action::ScoreRound => "score_round",
            Action::StartRound { .. } => "start_round",
            Action::RestartGame { .. } => "restart_game",
            Action::ReturnToLobby { .. } => "return_to_lobby",
            Action::Join { .. } => "join",
            Action::Leave { .. } => "leave",
            Action::Ready { .. } => "ready",
        }
    }

    /// Engine steps that no seat requests directly.
    pub fn is_engine_step(&self) -> bool {
        matches!(self, Action::ResolveTrick | Action::ScoreRound)
    }
}

impl GameState {
    /// Routes an action to its transition. `rng` is only drawn from by deals.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        action: &Action,
        rng: &mut R,
    ) -> Result<GameState, RuleError> {
        match action {
            Action::Play {
                player,
                card_index,
                face_down,
            } => self.apply_move(player, *card_index, *face_down),
            Action::ResolveTrick => self.resolve_trick(),
            Action::ScoreRound => self.score_round(),
            Action::StartRound { actor } => self.start_round(actor, rng),
            Action::RestartGame { actor } => self.restart_game(actor, rng),
            Action::ReturnToLobby { actor } => self.return_to_lobby(actor),
            Action::Join { player, name } => self.seat_player(player.clone(), name.clone()),
            Action::Leave { actor, player } => self.unseat_player(actor, player),
            Action::Ready { player } => self.mark_ready(player),
        }
    }
}
