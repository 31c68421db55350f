use super::error::RuleError;
use super::state::{GameState, GameStatus, Turn};
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::{Player, PlayerId};
use crate::model::trick::Trick;
use rand::Rng;
use tracing::info;

impl GameState {
    /// Host deals the next round.
    ///
    /// From the lobby this needs a legal seat count. Between rounds every
    /// guest must be ready and the game must not be finished.
    pub fn start_round<R: Rng + ?Sized>(
        &self,
        actor: &PlayerId,
        rng: &mut R,
    ) -> Result<GameState, RuleError> {
        self.require_host(actor, "start the round")?;
        let mut next = self.clone();
        match (self.status, self.turn) {
            (GameStatus::Lobby, _) => {
                if !self.rules.seats_allowed(self.players.len()) {
                    return Err(RuleError::lifecycle(
                        "start the round",
                        "the table needs three or four players",
                    ));
                }
                next.round_count = 1;
            }
            (GameStatus::Playing, Turn::RoundOver) => {
                if !self.all_guests_ready() {
                    return Err(RuleError::lifecycle(
                        "start the round",
                        "not every guest is ready",
                    ));
                }
                next.round_count += 1;
            }
            (GameStatus::Finished, _) => {
                return Err(RuleError::lifecycle("start the round", "the game is over"));
            }
            (GameStatus::Playing, _) => {
                return Err(RuleError::lifecycle(
                    "start the round",
                    "a round is already in progress",
                ));
            }
        }

        next.deal(rng);
        next.logs.neutral(format!("Round {} dealt", next.round_count));
        info!(round = next.round_count, seats = next.players.len(), "round dealt");
        Ok(next)
    }

    /// Host throws away the current game and deals a fresh one at once.
    pub fn restart_game<R: Rng + ?Sized>(
        &self,
        actor: &PlayerId,
        rng: &mut R,
    ) -> Result<GameState, RuleError> {
        self.require_host(actor, "restart the game")?;
        if self.status == GameStatus::Lobby {
            return Err(RuleError::lifecycle(
                "restart the game",
                "no game has been started",
            ));
        }
        let mut next = self.clone();
        next.reset_game();
        next.logs.restart("Game restarted");
        next.deal(rng);
        next.logs.neutral("Round 1 dealt");
        info!(seats = next.players.len(), "game restarted");
        Ok(next)
    }

    /// Host abandons the game; everyone goes back to the lobby with fresh stacks.
    pub fn return_to_lobby(&self, actor: &PlayerId) -> Result<GameState, RuleError> {
        self.require_host(actor, "return to the lobby")?;
        if self.status == GameStatus::Lobby {
            return Err(RuleError::lifecycle(
                "return to the lobby",
                "the table is already in the lobby",
            ));
        }
        let mut next = self.clone();
        next.reset_game();
        next.status = GameStatus::Lobby;
        next.turn = Turn::Closed;
        next.logs.restart("Back in the lobby");
        info!("table returned to lobby");
        Ok(next)
    }

    /// Seats a new player. Lobby only.
    pub fn seat_player(
        &self,
        player_id: PlayerId,
        name: impl Into<String>,
    ) -> Result<GameState, RuleError> {
        if self.status != GameStatus::Lobby {
            return Err(RuleError::lifecycle(
                "seat a player",
                "players can only join in the lobby",
            ));
        }
        if self.seat_of(&player_id).is_some() {
            return Err(RuleError::DuplicatePlayer { player: player_id });
        }
        if self.players.len() >= self.rules.max_players {
            return Err(RuleError::TableFull {
                max: self.rules.max_players,
            });
        }
        let mut next = self.clone();
        let player = Player::new(player_id, name, next.rules.starting_chips);
        next.logs.neutral(format!("{} joined", player.name));
        info!(player = %player.id, seats = next.players.len() + 1, "player seated");
        next.players.push(player);
        Ok(next)
    }

    /// Removes a seat. Players may leave on their own; the host may remove
    /// anyone but themselves. Lobby only.
    pub fn unseat_player(
        &self,
        actor: &PlayerId,
        player_id: &PlayerId,
    ) -> Result<GameState, RuleError> {
        if self.status != GameStatus::Lobby {
            return Err(RuleError::lifecycle(
                "unseat a player",
                "players can only leave in the lobby",
            ));
        }
        let seat = self
            .seat_of(player_id)
            .ok_or_else(|| RuleError::UnknownPlayer {
                player: player_id.clone(),
            })?;
        if self.is_host(player_id) {
            return Err(RuleError::lifecycle(
                "unseat a player",
                "the host cannot leave their own table",
            ));
        }
        if actor != player_id {
            self.require_host(actor, "remove another player")?;
        }
        let mut next = self.clone();
        let removed = next.players.remove(seat);
        next.logs.neutral(format!("{} left", removed.name));
        info!(player = %removed.id, "player unseated");
        Ok(next)
    }

    /// Guest signals readiness for the next round.
    pub fn mark_ready(&self, player_id: &PlayerId) -> Result<GameState, RuleError> {
        let seat = self
            .seat_of(player_id)
            .ok_or_else(|| RuleError::UnknownPlayer {
                player: player_id.clone(),
            })?;
        if self.status != GameStatus::Playing || self.turn != Turn::RoundOver {
            return Err(RuleError::lifecycle(
                "mark ready",
                "no round is waiting to start",
            ));
        }
        let mut next = self.clone();
        next.players[seat].ready = true;
        Ok(next)
    }

    fn require_host(&self, actor: &PlayerId, action: &'static str) -> Result<(), RuleError> {
        if self.seat_of(actor).is_none() {
            return Err(RuleError::UnknownPlayer {
                player: actor.clone(),
            });
        }
        if !self.is_host(actor) {
            return Err(RuleError::NotHost { action });
        }
        Ok(())
    }

    fn reset_game(&mut self) {
        let starting = self.rules.starting_chips;
        for player in &mut self.players {
            player.reset_game(starting);
        }
        self.deck.clear();
        self.trick = Trick::new(self.players.len());
        self.round_count = 1;
        self.reserve = 0;
        self.round_result = None;
    }

    fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let seats = self.players.len();
        let (hands, remainder) = Deck::shuffled(seats, rng).deal(seats);
        for (player, cards) in self.players.iter_mut().zip(hands) {
            player.reset_round();
            player.hand = Hand::with_cards(cards);
            player.ready = false;
        }
        self.deck = remainder;
        self.trick = Trick::new(seats);
        self.turn = Turn::Seat(0);
        self.status = GameStatus::Playing;
        self.round_result = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::game::error::RuleError;
    use crate::game::state::test_support::id;
    use crate::game::state::{GameState, GameStatus, Turn};
    use crate::model::rules::RuleSet;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn lobby(seats: &[&str]) -> GameState {
        let mut state = GameState::new_lobby(id("h"), "Host", RuleSet::default());
        for seat in seats {
            state = state.seat_player(id(seat), *seat).unwrap();
        }
        state
    }

    #[test]
    fn start_needs_three_players() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = lobby(&["g1"]);
        assert!(matches!(
            state.start_round(&id("h"), &mut rng),
            Err(RuleError::IllegalLifecycleTransition { .. })
        ));
    }

    #[test]
    fn only_the_host_starts() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = lobby(&["g1", "g2"]);
        assert_eq!(
            state.start_round(&id("g1"), &mut rng),
            Err(RuleError::NotHost {
                action: "start the round"
            })
        );
    }

    #[test]
    fn three_seat_deal_uses_nine_ranks() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = lobby(&["g1", "g2"]).start_round(&id("h"), &mut rng).unwrap();
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.turn(), Turn::Seat(0));
        for player in state.players() {
            assert_eq!(player.hand.len(), 12);
            assert!(player.hand.iter().all(|card| card.value <= 9));
        }
        assert!(state.deck().is_empty());
    }

    #[test]
    fn four_seat_deal_uses_thirteen_ranks() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = lobby(&["g1", "g2", "g3"])
            .start_round(&id("h"), &mut rng)
            .unwrap();
        for player in state.players() {
            assert_eq!(player.hand.len(), 13);
        }
    }

    #[test]
    fn same_seed_deals_the_same_hands() {
        let table = lobby(&["g1", "g2"]);
        let first = table
            .start_round(&id("h"), &mut StdRng::seed_from_u64(42))
            .unwrap();
        let second = table
            .start_round(&id("h"), &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fifth_player_is_turned_away() {
        let state = lobby(&["g1", "g2", "g3"]);
        assert_eq!(
            state.seat_player(id("g4"), "late"),
            Err(RuleError::TableFull { max: 4 })
        );
        assert_eq!(
            state.seat_player(id("g1"), "again"),
            Err(RuleError::DuplicatePlayer { player: id("g1") })
        );
    }

    #[test]
    fn joining_mid_game_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = lobby(&["g1", "g2"]).start_round(&id("h"), &mut rng).unwrap();
        assert!(matches!(
            state.seat_player(id("g3"), "late"),
            Err(RuleError::IllegalLifecycleTransition { .. })
        ));
    }

    #[test]
    fn leaving_rules() {
        let state = lobby(&["g1", "g2"]);
        let left = state.unseat_player(&id("g1"), &id("g1")).unwrap();
        assert_eq!(left.players().len(), 2);
        assert_eq!(
            state.unseat_player(&id("g1"), &id("g2")),
            Err(RuleError::NotHost {
                action: "remove another player"
            })
        );
        assert!(state.unseat_player(&id("h"), &id("g2")).is_ok());
        assert!(state.unseat_player(&id("h"), &id("h")).is_err());
    }

    #[test]
    fn return_to_lobby_resets_the_table() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = lobby(&["g1", "g2"]).start_round(&id("h"), &mut rng).unwrap();
        assert!(state.return_to_lobby(&id("g1")).is_err());
        let back = state.return_to_lobby(&id("h")).unwrap();
        assert_eq!(back.status(), GameStatus::Lobby);
        assert_eq!(back.round_count(), 1);
        assert_eq!(back.reserve(), 0);
        assert_eq!(back.logs().len(), 1);
        for player in back.players() {
            assert!(player.hand.is_empty());
            assert_eq!(player.chips, 5);
        }
    }

    #[test]
    fn restart_deals_immediately() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = lobby(&["g1", "g2"]).start_round(&id("h"), &mut rng).unwrap();
        let restarted = state.restart_game(&id("h"), &mut rng).unwrap();
        assert_eq!(restarted.status(), GameStatus::Playing);
        assert_eq!(restarted.round_count(), 1);
        assert_eq!(restarted.turn(), Turn::Seat(0));
        assert_eq!(restarted.players()[1].hand.len(), 12);
        assert!(lobby(&["g1", "g2"]).restart_game(&id("h"), &mut rng).is_err());
    }

    #[test]
    fn ready_only_between_rounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = lobby(&["g1", "g2"]).start_round(&id("h"), &mut rng).unwrap();
        assert!(state.mark_ready(&id("g1")).is_err());
        assert!(state.start_round(&id("h"), &mut rng).is_err());
    }
}
