//! Player identities and the statistics collaborator.
//!
//! The engine never looks players up itself; callers seat concrete
//! [`Player`] values and inject a [`StatisticsSink`] that is notified once
//! per game, when the game reaches a terminal status.

use serde::{Deserialize, Serialize};

use crate::game::play::GameStatus;

/// An opaque identity plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Player {
        Player {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Receives the final result of a game exactly once.
///
/// `status` is always terminal: one of the won states or a draw.
pub trait StatisticsSink {
    fn record_result(&mut self, white: &Player, black: &Player, status: GameStatus);
}

/// A sink that drops every result, for callers without a rating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStatistics;

impl StatisticsSink for NoStatistics {
    fn record_result(&mut self, _white: &Player, _black: &Player, _status: GameStatus) {}
}
