use super::state::{GameState, GameStatus, Turn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned wrapper used when a table is persisted or shipped between processes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub version: u32,
    pub state: GameState,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(&'static str),
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            state: state.clone(),
        }
    }

    /// Checks the structural rules a live table always satisfies.
    pub fn restore(self) -> Result<GameState, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        check_consistency(&self.state)?;
        Ok(self.state)
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GameState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        GameSnapshot::to_json(self)
    }

    pub fn from_json(json: &str) -> Result<GameState, SnapshotError> {
        GameSnapshot::from_json(json)?.restore()
    }
}

fn check_consistency(state: &GameState) -> Result<(), SnapshotError> {
    let seats = state.players.len();
    if seats > state.rules.max_players {
        return Err(SnapshotError::Inconsistent("too many seats"));
    }
    let mut ids = HashSet::new();
    if !state.players.iter().all(|player| ids.insert(&player.id)) {
        return Err(SnapshotError::Inconsistent("duplicate player id"));
    }
    if !ids.contains(&state.host_id) {
        return Err(SnapshotError::Inconsistent("host is not seated"));
    }
    if let Turn::Seat(seat) = state.turn {
        if seat >= seats {
            return Err(SnapshotError::Inconsistent("turn points past the last seat"));
        }
    }
    let masked = state.trick.plays().iter().filter(|play| play.face_down).count();
    if masked > 1 {
        return Err(SnapshotError::Inconsistent("trick holds two face-down cards"));
    }
    if state.trick.len() > state.trick.capacity() {
        return Err(SnapshotError::Inconsistent("trick is over capacity"));
    }

    let override_value = state.rules.override_value;
    for player in &state.players {
        if player.pile_value(override_value) != player.score_total {
            return Err(SnapshotError::Inconsistent(
                "score total disagrees with score pile",
            ));
        }
        if player.busted != (player.score_total > state.rules.target) {
            return Err(SnapshotError::Inconsistent("bust flag disagrees with score"));
        }
    }

    if state.status == GameStatus::Playing {
        let sizes = state.players.iter().map(|player| player.hand.len());
        let (low, high) = sizes.fold((usize::MAX, 0), |(low, high), len| {
            (low.min(len), high.max(len))
        });
        if seats > 0 && high - low > 1 {
            return Err(SnapshotError::Inconsistent("hand sizes drifted apart"));
        }
    }
    Ok(())
}
