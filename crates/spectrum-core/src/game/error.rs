use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use crate::model::trick::TrickError;
use thiserror::Error;

/// Why the engine refused an action. The input state is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },
    #[error("must follow the {lead} lead while holding it")]
    MustFollowSuit { lead: Suit },
    #[error("only one face-down override may be played per trick")]
    OverrideAlreadyUsed,
    #[error("cannot mask a card while other {lead} cards can follow")]
    InvalidOverride { lead: Suit },
    #[error("cannot {action}: {reason}")]
    IllegalLifecycleTransition {
        action: &'static str,
        reason: &'static str,
    },
    #[error("{player} is not seated at this table")]
    UnknownPlayer { player: PlayerId },
    #[error("no card at index {index} (hand holds {hand_size})")]
    CardNotInHand { index: usize, hand_size: usize },
    #[error("only the host may {action}")]
    NotHost { action: &'static str },
    #[error("table already seats {max} players")]
    TableFull { max: usize },
    #[error("{player} is already seated")]
    DuplicatePlayer { player: PlayerId },
    #[error(transparent)]
    Trick(#[from] TrickError),
}

impl RuleError {
    pub(crate) fn lifecycle(action: &'static str, reason: &'static str) -> Self {
        RuleError::IllegalLifecycleTransition { action, reason }
    }

    /// Move-legality rejections, as opposed to lifecycle or contract errors.
    pub fn is_move_rejection(&self) -> bool {
        matches!(
            self,
            RuleError::NotYourTurn { .. }
                | RuleError::MustFollowSuit { .. }
                | RuleError::OverrideAlreadyUsed
                | RuleError::InvalidOverride { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::RuleError;
    use crate::model::suit::Suit;

    #[test]
    fn messages_name_the_problem() {
        let err = RuleError::MustFollowSuit { lead: Suit::Green };
        assert_eq!(err.to_string(), "must follow the GREEN lead while holding it");
        let err = RuleError::lifecycle("start the round", "need 3-4 players");
        assert_eq!(err.to_string(), "cannot start the round: need 3-4 players");
    }

    #[test]
    fn move_rejections_are_classified() {
        assert!(RuleError::OverrideAlreadyUsed.is_move_rejection());
        assert!(!RuleError::TableFull { max: 4 }.is_move_rejection());
    }
}
