use super::error::RuleError;
use super::state::{GameState, GameStatus, Turn};
use tracing::{debug, info};

impl GameState {
    /// Banks the winning card for its owner, who leads the next trick.
    ///
    /// The other cards of the trick are discarded. When the last trick of the round is
    /// taken the turn moves to `ScorePending`.
    pub fn resolve_trick(&self) -> Result<GameState, RuleError> {
        if self.status != GameStatus::Playing || self.turn != Turn::ResolvePending {
            return Err(RuleError::lifecycle("resolve the trick", "the trick is not full"));
        }

        let override_value = self.rules.override_value;
        let winning = self
            .trick
            .winning_play(override_value)
            .cloned()
            .ok_or(RuleError::lifecycle("resolve the trick", "the trick is empty"))?;
        let seat = self
            .seat_of(&winning.owner)
            .ok_or_else(|| RuleError::UnknownPlayer {
                player: winning.owner.clone(),
            })?;

        let mut next = self.clone();
        let target = next.rules.target;
        let points = u32::from(winning.effective_value(override_value));
        let winner = &mut next.players[seat];
        winner.score_pile.push(winning.clone());
        winner.score_total += points;
        let newly_busted = winner.score_total > target && !winner.busted;
        if newly_busted {
            winner.busted = true;
        }
        let name = winner.name.clone();
        let total = winner.score_total;

        next.logs
            .success(format!("{name} took the trick with {winning} (+{points})"));
        if newly_busted {
            next.logs.danger(format!("{name} busted at {total}"));
        }

        next.trick.clear();
        let round_done = next.players.iter().all(|player| player.hand.is_empty());
        next.turn = if round_done {
            Turn::ScorePending
        } else {
            Turn::Seat(seat)
        };

        debug!(winner = %winning.owner, points, total, "trick resolved");
        if newly_busted {
            info!(player = %winning.owner, total, "player busted");
        }
        Ok(next)
    }
}
