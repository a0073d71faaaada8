//! Final standings.

use serde::{Deserialize, Serialize};

/// Standings of a finished game.
///
/// `winners` lists every player whose hand is empty, in roster order, so
/// several players can share the win. `finish_order` keeps the order in which
/// hands emptied for callers that only reward the first one out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Players with an empty hand, in roster order.
    pub winners: Vec<String>,
    /// Players in the order they went out.
    pub finish_order: Vec<String>,
    /// The last player left holding cards.
    pub loser: Option<String>,
}

impl GameOutcome {
    /// Returns the first player who went out.
    #[must_use]
    pub fn first_out(&self) -> Option<&str> {
        self.finish_order.first().map(String::as_str)
    }
}
