use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use spectrum_core::{Action, GameState, PlayerId, RuleError, RuleSet, SeatView, Turn};
use thiserror::Error;
use tracing::{Level, debug, event};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthorityError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("submitted against version {submitted} but the table is at {current}")]
    StaleVersion { submitted: u64, current: u64 },
    #[error("{action} is run by the table, not requested by a seat")]
    EngineStep { action: &'static str },
}

/// Sole writer of a table's state.
///
/// Clients submit actions tagged with the version they last observed. Every
/// committed transition bumps the version, so a client acting on an older
/// state is refused instead of being evaluated against a newer one.
pub struct TableAuthority {
    state: GameState,
    version: u64,
    trick_delay: Duration,
    resolve_at: Option<Instant>,
    rng: StdRng,
}

impl TableAuthority {
    pub fn open(
        host_id: PlayerId,
        host_name: impl Into<String>,
        rules: RuleSet,
        trick_delay: Duration,
        seed: u64,
    ) -> Self {
        Self::from_state(GameState::new_lobby(host_id, host_name, rules), trick_delay, seed)
    }

    pub fn from_state(state: GameState, trick_delay: Duration, seed: u64) -> Self {
        Self {
            state,
            version: 0,
            trick_delay,
            resolve_at: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn view_for(&self, player_id: &PlayerId) -> Option<SeatView> {
        self.state.view_for(player_id)
    }

    /// When the pending trick becomes due, if one is waiting.
    pub fn resolve_deadline(&self) -> Option<Instant> {
        self.resolve_at
    }

    /// Applies a client action submitted against `seen_version`.
    ///
    /// Trick resolution and round scoring are run by the table itself and are
    /// refused here. Returns the version after the action and any engine steps
    /// it made due.
    pub fn submit(
        &mut self,
        seen_version: u64,
        action: &Action,
        now: Instant,
    ) -> Result<u64, AuthorityError> {
        if seen_version != self.version {
            return Err(AuthorityError::StaleVersion {
                submitted: seen_version,
                current: self.version,
            });
        }
        if action.is_engine_step() {
            return Err(AuthorityError::EngineStep {
                action: action.name(),
            });
        }
        let next = self.state.apply(action, &mut self.rng).inspect_err(|err| {
            debug!(action = action.name(), error = %err, "action rejected");
        })?;
        self.commit(next, action.name());
        self.advance(now)?;
        Ok(self.version)
    }

    /// Runs engine steps whose time has come. Returns true when anything changed.
    pub fn tick(&mut self, now: Instant) -> Result<bool, AuthorityError> {
        let before = self.version;
        self.advance(now)?;
        Ok(self.version != before)
    }

    fn advance(&mut self, now: Instant) -> Result<(), AuthorityError> {
        loop {
            match self.state.turn() {
                Turn::ResolvePending => match self.resolve_at {
                    None if !self.trick_delay.is_zero() => {
                        self.resolve_at = Some(now + self.trick_delay);
                        return Ok(());
                    }
                    Some(due) if now < due => return Ok(()),
                    _ => {
                        let next = self.state.resolve_trick()?;
                        self.commit(next, "resolve_trick");
                    }
                },
                Turn::ScorePending => {
                    let next = self.state.score_round()?;
                    self.commit(next, "score_round");
                }
                _ => return Ok(()),
            }
        }
    }

    fn commit(&mut self, next: GameState, action: &'static str) {
        self.state = next;
        self.version += 1;
        // A deadline only belongs to the trick that is waiting now.
        if self.state.turn() != Turn::ResolvePending {
            self.resolve_at = None;
        }
        event!(
            target: "spectrum_table::authority",
            Level::DEBUG,
            version = self.version,
            action,
            round = self.state.round_count(),
        );
    }
}
