#![deny(warnings)]

pub mod game;
pub mod model;

pub use game::action::Action;
pub use game::error::RuleError;
pub use game::serialization::{GameSnapshot, SnapshotError};
pub use game::state::{GameState, GameStatus, ResultEntry, RoundResult, Turn};
pub use game::view::SeatView;
pub use model::player::PlayerId;
pub use model::rules::RuleSet;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "spectrum"
    }

    pub const fn codename() -> &'static str {
        "Fives"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
