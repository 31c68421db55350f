use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::ledger::{Ledger, StandingsReport};
use crate::model::player::{Player, PlayerId};
use crate::model::rules::RuleSet;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Lobby,
    Playing,
    Finished,
}

/// Whose move it is, or which engine step is due next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    /// No round in progress.
    Closed,
    /// Seat index expected to play.
    Seat(usize),
    /// Trick is full; `resolve_trick` is due.
    ResolvePending,
    /// Last trick taken; `score_round` is due.
    ScorePending,
    /// Round scored; waiting for the host.
    RoundOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub score_total: u32,
    /// Busted seats are unranked.
    pub rank: Option<u32>,
    pub chip_delta: i32,
    pub chips_total: i32,
    pub busted: bool,
}

/// Outcome of the most recently scored round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    /// Non-busted seats first, then by chips, richest first.
    pub breakdown: Vec<ResultEntry>,
    pub reserve: u32,
    pub reserve_claim: Option<(PlayerId, u32)>,
    pub is_final: bool,
    pub winner_id: Option<PlayerId>,
    /// Chips created by rewards and perfect bonuses this round.
    pub minted: u32,
    /// Reserve left on the table when the game ended.
    pub forfeited: u32,
}

/// Complete table state. Every transition takes `&self` and returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) host_id: PlayerId,
    pub(crate) rules: RuleSet,
    pub(crate) players: Vec<Player>,
    /// Cards left over after the deal.
    pub(crate) deck: Vec<Card>,
    pub(crate) trick: Trick,
    pub(crate) turn: Turn,
    pub(crate) round_count: u32,
    pub(crate) reserve: u32,
    pub(crate) status: GameStatus,
    pub(crate) round_result: Option<RoundResult>,
    pub(crate) logs: Ledger,
}

impl GameState {
    /// Opens a lobby with the host in the first seat.
    pub fn new_lobby(host_id: PlayerId, host_name: impl Into<String>, rules: RuleSet) -> Self {
        let host = Player::new(host_id.clone(), host_name, rules.starting_chips);
        let mut logs = Ledger::new();
        logs.neutral(format!("{} opened the table", host.name));
        Self {
            host_id,
            players: vec![host],
            deck: Vec::new(),
            trick: Trick::new(rules.max_players),
            turn: Turn::Closed,
            round_count: 1,
            reserve: 0,
            status: GameStatus::Lobby,
            round_result: None,
            logs,
            rules,
        }
    }

    /// Starts play from hands chosen by the caller; seat 0 hosts and leads.
    ///
    /// Hands are sorted on the way in. Used for scripted tables and replays.
    pub fn from_hands(rules: RuleSet, seats: Vec<(PlayerId, String, Vec<Card>)>) -> Self {
        let host_id = seats
            .first()
            .map(|(id, _, _)| id.clone())
            .unwrap_or_else(|| PlayerId::from("host"));
        let players: Vec<Player> = seats
            .into_iter()
            .map(|(id, name, cards)| {
                let mut player = Player::new(id, name, rules.starting_chips);
                player.hand = Hand::with_cards(cards);
                player
            })
            .collect();
        let mut logs = Ledger::new();
        logs.neutral("Round 1 dealt");
        Self {
            host_id,
            trick: Trick::new(players.len()),
            players,
            deck: Vec::new(),
            turn: Turn::Seat(0),
            round_count: 1,
            reserve: 0,
            status: GameStatus::Playing,
            round_result: None,
            logs,
            rules,
        }
    }

    pub fn host_id(&self) -> &PlayerId {
        &self.host_id
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| &player.id == player_id)
    }

    pub fn seat_of(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|player| &player.id == player_id)
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    /// Effective suit of the opening play of the current trick.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.trick.lead_suit()
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn round_result(&self) -> Option<&RoundResult> {
        self.round_result.as_ref()
    }

    pub fn logs(&self) -> &Ledger {
        &self.logs
    }

    pub fn is_host(&self, player_id: &PlayerId) -> bool {
        &self.host_id == player_id
    }

    pub fn current_player(&self) -> Option<&Player> {
        match self.turn {
            Turn::Seat(seat) if self.status == GameStatus::Playing => self.players.get(seat),
            _ => None,
        }
    }

    pub fn is_my_turn(&self, player_id: &PlayerId) -> bool {
        self.current_player()
            .is_some_and(|player| &player.id == player_id)
    }

    pub fn is_trick_full(&self) -> bool {
        self.trick.is_complete()
    }

    pub fn is_round_over(&self) -> bool {
        self.turn == Turn::RoundOver
    }

    pub fn is_game_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// True when every seat except the host has signalled ready.
    pub fn all_guests_ready(&self) -> bool {
        self.players
            .iter()
            .filter(|player| player.id != self.host_id)
            .all(|player| player.ready)
    }

    /// Chips held by players plus the reserve.
    pub fn chips_in_play(&self) -> i64 {
        let held: i64 = self.players.iter().map(|player| i64::from(player.chips)).sum();
        held + i64::from(self.reserve)
    }

    pub fn standings_report(&self) -> StandingsReport {
        StandingsReport::from_players(&self.players)
    }
}
