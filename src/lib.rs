//! A rules engine for Check, a shedding card game played with a 54-card deck.
//!
//! The crate owns the cards, the draw and discard piles, every player's hand
//! and the turn state machine: attack chains started by Sevens and jokers,
//! suit locks after a Jack, skips, and recycling of the discard pile. It does
//! no I/O; a session layer feeds it moves and relays the resulting events.
//!
//! # Example
//!
//! ```
//! use checkgame::{GameOptions, GameState};
//!
//! let mut game = GameState::new(["alice", "bob"], GameOptions::default().with_random_seed(42))?;
//! let drawn = game.draw_card("alice").expect("alice moves first");
//! assert_eq!(drawn.len(), 1);
//! assert_eq!(game.current_player_id(), "bob");
//! # Ok::<(), checkgame::SetupError>(())
//! ```

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod options;
pub mod player;
pub mod result;
pub mod session;
mod sync;

// Re-export main types
pub use card::{Card, Color, DECK_SIZE, Rank, Suit};
pub use deck::Deck;
pub use error::{
    ActionError, CardError, ChangeSuitError, DrawError, PlayError, ReshuffleError, SetupError,
    SnapshotError,
};
pub use event::{Action, GameEvent};
pub use game::{Direction, GameState, OpponentView, Phase, PlayerView};
pub use options::{DEFAULT_INITIAL_CARDS, GameOptions};
pub use player::{Player, can_play_card_on};
pub use result::GameOutcome;
pub use session::SharedGame;
