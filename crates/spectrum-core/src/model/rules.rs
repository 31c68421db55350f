use serde::{Deserialize, Serialize};

/// The deck and reward ladders exist for three and four seats only.
pub const MIN_SEATS: usize = 3;
pub const MAX_SEATS: usize = 4;

/// Tunable constants of a table. Defaults are the standard game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Round score every player aims for; going over busts.
    pub target: u32,
    /// Last round of a game.
    pub round_cap: u32,
    /// Chip total that ends the game early.
    pub chip_goal: i32,
    pub starting_chips: i32,
    /// Rank and score of a face-down card.
    pub override_value: u8,
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            target: 25,
            round_cap: 4,
            chip_goal: 25,
            starting_chips: 5,
            override_value: 5,
            min_players: 3,
            max_players: 4,
        }
    }
}

impl RuleSet {
    pub fn seats_allowed(&self, count: usize) -> bool {
        (MIN_SEATS..=MAX_SEATS).contains(&count)
            && (self.min_players..=self.max_players).contains(&count)
    }

    /// Chips paid per rank slot, best first.
    pub fn rewards(&self, player_count: usize) -> &'static [i32] {
        match player_count {
            0..=3 => &[2, 1, 0],
            _ => &[3, 2, 1, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RuleSet;

    #[test]
    fn defaults_match_standard_game() {
        let rules = RuleSet::default();
        assert_eq!(rules.target, 25);
        assert_eq!(rules.round_cap, 4);
        assert_eq!(rules.chip_goal, 25);
        assert_eq!(rules.starting_chips, 5);
        assert_eq!(rules.override_value, 5);
    }

    #[test]
    fn seat_range_is_three_to_four() {
        let rules = RuleSet::default();
        assert!(!rules.seats_allowed(2));
        assert!(rules.seats_allowed(3));
        assert!(rules.seats_allowed(4));
        assert!(!rules.seats_allowed(5));
    }

    #[test]
    fn loose_bounds_cannot_widen_the_table() {
        let rules = RuleSet {
            min_players: 1,
            max_players: 6,
            ..RuleSet::default()
        };
        assert!(!rules.seats_allowed(2));
        assert!(!rules.seats_allowed(5));
        assert!(rules.seats_allowed(3));
    }

    #[test]
    fn reward_tables() {
        let rules = RuleSet::default();
        assert_eq!(rules.rewards(3), &[2, 1, 0]);
        assert_eq!(rules.rewards(4), &[3, 2, 1, 0]);
    }
}
