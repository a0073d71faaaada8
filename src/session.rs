//! A game shared between the connections of one session.

use crate::error::{ActionError, SnapshotError};
use crate::event::{Action, GameEvent};
use crate::game::GameState;
use crate::sync::Mutex;

/// A [`GameState`] behind a lock, so that at most one action runs at a time.
///
/// Keep one `SharedGame` per running game. Separate games need no
/// coordination with each other.
pub struct SharedGame {
    state: Mutex<GameState>,
}

impl SharedGame {
    /// Wraps a game.
    #[must_use]
    pub const fn new(state: GameState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Runs one action under the lock.
    ///
    /// # Errors
    ///
    /// Returns the rule violation reported by [`GameState::apply`].
    pub fn apply(&self, action: &Action) -> Result<Vec<GameEvent>, ActionError> {
        self.state.lock().apply(action)
    }

    /// Reads the state under the lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(&*self.state.lock())
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.lock().clone()
    }

    /// Serializes the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        self.state.lock().to_json()
    }

    /// Unwraps the game.
    #[must_use]
    pub fn into_inner(self) -> GameState {
        self.state.into_inner()
    }
}

impl From<GameState> for SharedGame {
    fn from(state: GameState) -> Self {
        Self::new(state)
    }
}
