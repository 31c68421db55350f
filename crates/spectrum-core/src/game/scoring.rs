use super::error::RuleError;
use super::state::{GameState, GameStatus, ResultEntry, RoundResult, Turn};
use crate::model::player::{Player, PlayerId, RoundRecord};
use crate::model::score::settle;
use tracing::{Level, event};

impl GameState {
    /// Settles chips for a finished round and decides whether the game is over.
    ///
    /// Valid exactly once per round: the turn must be `ScorePending`, and the
    /// resulting state sits at `RoundOver` (or `Finished`).
    pub fn score_round(&self) -> Result<GameState, RuleError> {
        if self.status != GameStatus::Playing || self.turn != Turn::ScorePending {
            return Err(RuleError::lifecycle(
                "score the round",
                "the round is not waiting to be scored",
            ));
        }

        let mut next = self.clone();
        let settlement = settle(&next.players, next.reserve, &next.rules);

        for (seat, player) in next.players.iter_mut().enumerate() {
            let delta = settlement.deltas[seat];
            player.chips += delta;
            player.history.push(RoundRecord {
                eq: player.score_total,
                diff: delta,
            });
        }

        for &seat in &settlement.perfect {
            let name = &next.players[seat].name;
            next.logs.success(format!("{name} hit the target exactly (+1)"));
        }
        for &seat in &settlement.busted {
            let name = &next.players[seat].name;
            next.logs
                .danger(format!("{name} busted and paid 1 chip to the reserve"));
        }
        let reserve_claim = settlement.reserve_claim.map(|(seat, amount)| {
            let player = &next.players[seat];
            (player.id.clone(), amount, player.name.clone())
        });
        if let Some((_, amount, name)) = &reserve_claim {
            next.logs
                .success(format!("{name} claimed the reserve (+{amount})"));
        }
        next.reserve = settlement.reserve_after;

        let is_final = next.round_count >= next.rules.round_cap
            || next
                .players
                .iter()
                .any(|player| player.chips >= next.rules.chip_goal);

        let mut breakdown: Vec<ResultEntry> = next
            .players
            .iter()
            .enumerate()
            .map(|(seat, player)| ResultEntry {
                player_id: player.id.clone(),
                name: player.name.clone(),
                score_total: player.score_total,
                rank: settlement.ranks[seat],
                chip_delta: settlement.deltas[seat],
                chips_total: player.chips,
                busted: player.busted,
            })
            .collect();
        breakdown.sort_by(|a, b| {
            a.busted
                .cmp(&b.busted)
                .then_with(|| b.chips_total.cmp(&a.chips_total))
        });

        let mut forfeited = 0;
        let mut winner_id = None;
        if is_final {
            forfeited = next.reserve;
            next.reserve = 0;
            winner_id = chip_leader(&next);
            next.status = GameStatus::Finished;
        }

        for player in &mut next.players {
            player.reset_round();
            player.ready = false;
        }
        next.deck.clear();
        next.trick.clear();
        next.turn = Turn::RoundOver;

        next.logs
            .neutral(format!("Round {} complete", next.round_count));
        if let Some(winner) = winner_id.as_ref().and_then(|id| next.player(id)) {
            let line = format!("{} wins the game with {} chips", winner.name, winner.chips);
            next.logs.success(line);
        }

        next.round_result = Some(RoundResult {
            round: next.round_count,
            breakdown,
            reserve: next.reserve,
            reserve_claim: reserve_claim.map(|(id, amount, _)| (id, amount)),
            is_final,
            winner_id: winner_id.clone(),
            minted: settlement.minted,
            forfeited,
        });

        event!(
            target: "spectrum_core::scoring",
            Level::INFO,
            round = next.round_count,
            reserve = next.reserve,
            minted = settlement.minted,
            forfeited,
            is_final,
            winner = winner_id.as_ref().map(|id| id.as_str()).unwrap_or(""),
        );
        Ok(next)
    }
}

/// Most chips wins; the earlier seat takes a tie.
fn chip_leader(state: &GameState) -> Option<PlayerId> {
    state
        .players
        .iter()
        .fold(None, |best: Option<&Player>, player| match best {
            Some(leader) if leader.chips >= player.chips => Some(leader),
            _ => Some(player),
        })
        .map(|player| player.id.clone())
}
