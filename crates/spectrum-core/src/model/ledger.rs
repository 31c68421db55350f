use crate::model::player::{Player, PlayerId, RoundRecord};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Neutral,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub kind: LogKind,
}

/// Append-only table log shown to every seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LogEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        self.entries.push(LogEntry {
            text: text.into(),
            kind,
        });
    }

    pub fn neutral(&mut self, text: impl Into<String>) {
        self.push(LogKind::Neutral, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(LogKind::Success, text);
    }

    pub fn danger(&mut self, text: impl Into<String>) {
        self.push(LogKind::Danger, text);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Starts a fresh log with a single opening line.
    pub fn restart(&mut self, text: impl Into<String>) {
        self.entries.clear();
        self.neutral(text);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub player_id: PlayerId,
    pub name: String,
    pub rounds: Vec<RoundRecord>,
    pub chips: i32,
}

/// Multi-round table: one column per round (`eq` and chip `diff`), then chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsReport {
    pub rounds_played: usize,
    pub rows: Vec<StandingsRow>,
}

impl StandingsReport {
    /// Rows ordered by chips, richest first; seat order breaks ties.
    pub fn from_players(players: &[Player]) -> Self {
        let mut rows: Vec<StandingsRow> = players
            .iter()
            .map(|player| StandingsRow {
                player_id: player.id.clone(),
                name: player.name.clone(),
                rounds: player.history.clone(),
                chips: player.chips,
            })
            .collect();
        rows.sort_by(|a, b| b.chips.cmp(&a.chips));
        let rounds_played = rows.iter().map(|row| row.rounds.len()).max().unwrap_or(0);
        Self {
            rounds_played,
            rows,
        }
    }
}

impl fmt::Display for StandingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12}", "player")?;
        for round in 1..=self.rounds_played {
            write!(f, " {:>9}", format!("R{round}"))?;
        }
        writeln!(f, " {:>6}", "chips")?;

        for row in &self.rows {
            write!(f, "{:<12}", row.name)?;
            for round in 0..self.rounds_played {
                match row.rounds.get(round) {
                    Some(record) => write!(f, " {:>9}", format!("{} ({:+})", record.eq, record.diff))?,
                    None => write!(f, " {:>9}", "-")?,
                }
            }
            writeln!(f, " {:>6}", row.chips)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Ledger, LogKind, StandingsReport};
    use crate::model::player::{Player, PlayerId, RoundRecord};

    #[test]
    fn ledger_appends_in_order() {
        let mut ledger = Ledger::new();
        ledger.neutral("round 1");
        ledger.danger("bust");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].kind, LogKind::Neutral);
        assert_eq!(ledger.last().map(|e| e.text.as_str()), Some("bust"));
    }

    #[test]
    fn restart_keeps_only_the_opening_line() {
        let mut ledger = Ledger::new();
        ledger.success("a");
        ledger.success("b");
        ledger.restart("fresh");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].text, "fresh");
    }

    #[test]
    fn report_orders_by_chips_and_renders_rounds() {
        let mut ada = Player::new(PlayerId::from("a"), "Ada", 9);
        ada.history = vec![RoundRecord { eq: 25, diff: 4 }];
        let mut bo = Player::new(PlayerId::from("b"), "Bo", 4);
        bo.history = vec![RoundRecord { eq: 27, diff: -1 }];

        let report = StandingsReport::from_players(&[bo, ada]);
        assert_eq!(report.rounds_played, 1);
        assert_eq!(report.rows[0].name, "Ada");

        let text = report.to_string();
        assert!(text.contains("R1"));
        assert!(text.contains("25 (+4)"));
        assert!(text.contains("27 (-1)"));
    }
}
