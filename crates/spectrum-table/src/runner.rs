use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use spectrum_core::{Action, GameState, PlayerId, Turn};
use thiserror::Error;
use tracing::{Level, debug, event};

use crate::authority::{AuthorityError, TableAuthority};
use crate::config::{ResolvedOutputs, TableConfig};
use crate::policy::{SeatPolicy, spawn_policy};

/// Upper bound on engine steps per game; a healthy game needs a few hundred.
const MAX_STEPS_PER_GAME: usize = 10_000;

/// Plays seeded self-play games through a [`TableAuthority`].
pub struct TableRunner {
    config: TableConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub rounds_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    /// Games won per seat, in seat order.
    pub wins: Vec<(String, usize)>,
    /// Standings table of the last game.
    pub final_standings: String,
}

/// One JSONL row: a single player's result for one round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundLogRow {
    pub run_id: String,
    pub game: usize,
    pub game_seed: u64,
    pub round: u32,
    pub player: String,
    pub eq: u32,
    pub diff: i32,
    pub chips: i32,
    pub rank: Option<u32>,
    pub busted: bool,
    pub reserve: u32,
    pub is_final: bool,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("table rejected an action: {0}")]
    Authority(#[from] AuthorityError),
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("round {round} of game {game} broke chip conservation: {before} + {minted} != {after} + {forfeited}")]
    Conservation {
        game: usize,
        round: u32,
        before: i64,
        minted: u32,
        after: i64,
        forfeited: u32,
    },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}

struct GameOutcome {
    rounds: usize,
    winner: Option<PlayerId>,
    standings: String,
}

impl TableRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: TableConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.host().is_none() {
            return Err(RunnerError::game("configuration has no seats".to_string()));
        }
        Ok(Self { config, outputs })
    }

    /// Play every configured game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.simulation.seed.unwrap_or(0));

        let mut wins: Vec<(String, usize)> = self
            .config
            .seats
            .iter()
            .map(|seat| (seat.name.clone(), 0))
            .collect();
        let mut rows_written = 0usize;
        let mut rounds_played = 0usize;
        let mut final_standings = String::new();

        for game in 0..self.config.simulation.games {
            let game_seed = rng.next_u64();
            let outcome = self.play_game(game, game_seed, &mut writer, &mut rows_written)?;
            rounds_played += outcome.rounds;
            if let Some(winner) = outcome.winner {
                if let Some(entry) = wins.iter_mut().find(|(name, _)| name == winner.as_str()) {
                    entry.1 += 1;
                }
            }
            final_standings = outcome.standings;
        }

        writer.flush()?;

        Ok(RunSummary {
            games_played: self.config.simulation.games,
            rounds_played,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            wins,
            final_standings,
        })
    }

    fn play_game(
        &self,
        game: usize,
        game_seed: u64,
        writer: &mut BufWriter<File>,
        rows_written: &mut usize,
    ) -> Result<GameOutcome, RunnerError> {
        let seats = &self.config.seats;
        let host = PlayerId::from(seats[0].name.as_str());
        let mut table = TableAuthority::open(
            host.clone(),
            seats[0].name.clone(),
            self.config.rules,
            Duration::from_millis(self.config.pacing.trick_delay_ms),
            game_seed,
        );
        let mut policies: Vec<Box<dyn SeatPolicy>> = seats
            .iter()
            .enumerate()
            .map(|(index, seat)| {
                spawn_policy(
                    seat.policy,
                    game_seed.wrapping_add(index as u64 + 1),
                    self.config.rules.override_value,
                )
            })
            .collect();

        // The authority's clock is virtual here: pending tricks are released
        // by ticking straight to their deadline.
        let now = Instant::now();
        for seat in &seats[1..] {
            let action = Action::Join {
                player: PlayerId::from(seat.name.as_str()),
                name: seat.name.clone(),
            };
            table.submit(table.version(), &action, now)?;
        }
        let start = Action::StartRound {
            actor: host.clone(),
        };
        table.submit(table.version(), &start, now)?;

        let mut chips_before = table.state().chips_in_play();
        let mut rounds = 0usize;
        for _ in 0..MAX_STEPS_PER_GAME {
            if let Some(due) = table.resolve_deadline() {
                table.tick(due)?;
                continue;
            }

            let state = table.state();
            match state.turn() {
                Turn::Seat(seat) => {
                    let player = state.players()[seat].id.clone();
                    let view = table.view_for(&player).ok_or_else(|| {
                        RunnerError::game(format!("{player} has no view of the table"))
                    })?;
                    let choice = policies[seat].choose_play(&view).ok_or_else(|| {
                        RunnerError::game(format!("{player} found no legal play"))
                    })?;
                    let action = Action::Play {
                        player,
                        card_index: choice.card_index,
                        face_down: choice.face_down,
                    };
                    table.submit(table.version(), &action, now)?;
                }
                Turn::RoundOver => {
                    rounds += 1;
                    let state = table.state();
                    audit_round(game, state, chips_before)?;
                    *rows_written +=
                        write_round_rows(writer, &self.config.run_id, game, game_seed, state)?;

                    if state.is_game_finished() {
                        let winner = state
                            .round_result()
                            .and_then(|result| result.winner_id.clone());
                        event!(
                            target: "spectrum_table::runner",
                            Level::INFO,
                            run_id = %self.config.run_id,
                            game,
                            rounds,
                            winner = winner.as_ref().map(|id| id.as_str()).unwrap_or(""),
                        );
                        return Ok(GameOutcome {
                            rounds,
                            winner,
                            standings: state.standings_report().to_string(),
                        });
                    }

                    let guests: Vec<PlayerId> = state
                        .players()
                        .iter()
                        .filter(|player| player.id != host)
                        .map(|player| player.id.clone())
                        .collect();
                    for guest in guests {
                        let action = Action::Ready { player: guest };
                        table.submit(table.version(), &action, now)?;
                    }
                    chips_before = table.state().chips_in_play();
                    let action = Action::StartRound {
                        actor: host.clone(),
                    };
                    table.submit(table.version(), &action, now)?;
                    debug!(game, round = table.state().round_count(), "next round dealt");
                }
                other => {
                    return Err(RunnerError::game(format!(
                        "table stalled at {other:?} in game {game}"
                    )));
                }
            }
        }

        Err(RunnerError::game(format!(
            "game {game} did not finish within {MAX_STEPS_PER_GAME} steps"
        )))
    }
}

/// Chips held plus reserve may only grow by what the round minted, less any
/// reserve forfeited at game end.
fn audit_round(game: usize, state: &GameState, before: i64) -> Result<(), RunnerError> {
    let result = state
        .round_result()
        .ok_or_else(|| RunnerError::game("round over without a result".to_string()))?;
    let after = state.chips_in_play();
    if before + i64::from(result.minted) != after + i64::from(result.forfeited) {
        return Err(RunnerError::Conservation {
            game,
            round: result.round,
            before,
            minted: result.minted,
            after,
            forfeited: result.forfeited,
        });
    }
    Ok(())
}

fn write_round_rows(
    writer: &mut BufWriter<File>,
    run_id: &str,
    game: usize,
    game_seed: u64,
    state: &GameState,
) -> Result<usize, RunnerError> {
    let Some(result) = state.round_result() else {
        return Ok(0);
    };

    let mut rows_written = 0usize;
    for player in state.players() {
        let Some(record) = player.history.last() else {
            continue;
        };
        let entry = result
            .breakdown
            .iter()
            .find(|entry| entry.player_id == player.id);
        let row = RoundLogRow {
            run_id: run_id.to_string(),
            game,
            game_seed,
            round: result.round,
            player: player.id.to_string(),
            eq: record.eq,
            diff: record.diff,
            chips: player.chips,
            rank: entry.and_then(|entry| entry.rank),
            busted: entry.is_some_and(|entry| entry.busted),
            reserve: result.reserve,
            is_final: result.is_final,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::audit_round;
    use spectrum_core::{GameState, PlayerId, RuleSet};

    #[test]
    fn audit_needs_a_scored_round() {
        let state = GameState::new_lobby(PlayerId::from("h"), "Host", RuleSet::default());
        assert!(audit_round(0, &state, 5).is_err());
    }
}
