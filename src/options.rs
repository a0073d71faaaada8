//! Game configuration options.

use serde::{Deserialize, Serialize};

use crate::game::Direction;
use crate::player::Player;

/// Number of cards dealt to each player by default.
pub const DEFAULT_INITIAL_CARDS: usize = 7;

/// Configuration options for a new game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use checkgame::GameOptions;
///
/// let options = GameOptions::default()
///     .with_initial_cards(5)
///     .with_random_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Cards dealt to each player.
    pub initial_cards: usize,
    /// Seed for the shuffle. `None` picks one from system entropy.
    pub random_seed: Option<u64>,
    /// Players who start with a prepared hand instead of a dealt one.
    pub custom_players: Option<Vec<Player>>,
    /// Initial rotation direction.
    pub direction: Direction,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            initial_cards: DEFAULT_INITIAL_CARDS,
            random_seed: None,
            custom_players: None,
            direction: Direction::Clockwise,
        }
    }
}

impl GameOptions {
    /// Sets the number of cards dealt to each player.
    ///
    /// # Example
    ///
    /// ```
    /// use checkgame::GameOptions;
    ///
    /// let options = GameOptions::default().with_initial_cards(4);
    /// assert_eq!(options.initial_cards, 4);
    /// ```
    #[must_use]
    pub const fn with_initial_cards(mut self, count: usize) -> Self {
        self.initial_cards = count;
        self
    }

    /// Sets the shuffle seed, making the deal reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use checkgame::GameOptions;
    ///
    /// let options = GameOptions::default().with_random_seed(7);
    /// assert_eq!(options.random_seed, Some(7));
    /// ```
    #[must_use]
    pub const fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Seats players with prepared hands.
    ///
    /// Each custom player must also appear in the player id list passed to
    /// [`crate::GameState::new`]. Their cards are taken out of the deck before
    /// dealing, and they receive no dealt cards.
    #[must_use]
    pub fn with_custom_players(mut self, players: Vec<Player>) -> Self {
        self.custom_players = Some(players);
        self
    }

    /// Sets the initial rotation direction.
    ///
    /// # Example
    ///
    /// ```
    /// use checkgame::{Direction, GameOptions};
    ///
    /// let options = GameOptions::default().with_direction(Direction::CounterClockwise);
    /// assert_eq!(options.direction, Direction::CounterClockwise);
    /// ```
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}
