//! Error types for game operations.
//!
//! Rule violations caused by a player's move are ordinary results; callers are
//! expected to report them back as a rejected move and keep the session going.
//! [`SetupError`] and [`CardError`] signal programming mistakes in the caller.

use thiserror::Error;

/// Errors that can occur when constructing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    /// The ordinary-card factory was given the joker suit.
    #[error("use the joker factories for joker cards")]
    JokerSuit,
    /// An ordinary suit without a rank.
    #[error("non-joker card is missing a rank")]
    MissingRank,
    /// A joker with a rank.
    #[error("joker cards have no rank")]
    JokerWithRank,
    /// The color does not match the suit.
    #[error("card color does not match its suit")]
    ColorMismatch,
}

/// Errors that can occur while setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// Fewer than two players were supplied.
    #[error("at least 2 players are required")]
    NotEnoughPlayers,
    /// The same player id was supplied twice.
    #[error("duplicate player id: {0}")]
    DuplicatePlayer(String),
    /// A custom player is not one of the supplied player ids.
    #[error("custom player {0} is not seated in this game")]
    UnknownCustomPlayer(String),
    /// A custom player was given an empty hand.
    #[error("custom player {0} must hold at least one card")]
    EmptyCustomHand(String),
    /// A custom hand asks for a card the deck cannot provide.
    #[error("card {0} is not available in the deck")]
    CardUnavailable(crate::Card),
    /// The deck ran out before the opening card could be turned.
    #[error("failed to draw initial card for discard pile")]
    EmptyDeck,
    /// A layout was supplied without a discard pile.
    #[error("the discard pile must hold at least the top card")]
    EmptyDiscardPile,
}

/// Errors that can occur when playing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    /// Not this player's turn.
    #[error("Not your turn")]
    NotYourTurn,
    /// The turn is locked until a suit is chosen.
    #[error("Turn is locked")]
    TurnLocked,
    /// Player not found.
    #[error("Player not found")]
    PlayerNotFound,
    /// The player does not hold the card.
    #[error("Card not in hand")]
    CardNotInHand,
    /// The card cannot be played on the current top card.
    #[error("Invalid play")]
    InvalidPlay,
    /// An attack chain can only be answered with a wild card.
    #[error("Must play a wild card to defend against an attack")]
    MustDefend,
}

/// Errors that can occur during reshuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReshuffleError {
    /// The discard pile holds nothing besides the top card.
    #[error("Not enough cards to reshuffle")]
    NotEnoughCards,
}

/// Errors that can occur when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Not this player's turn.
    #[error("Not your turn")]
    NotYourTurn,
    /// Player not found.
    #[error("Player not found")]
    PlayerNotFound,
    /// The draw pile is empty even after reshuffling.
    #[error("Failed to draw card")]
    NoCards,
    /// The discard pile could not be recycled.
    #[error(transparent)]
    Reshuffle(#[from] ReshuffleError),
}

/// Errors that can occur when declaring a new suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChangeSuitError {
    /// Not this player's turn.
    #[error("Not your turn")]
    NotYourTurn,
    /// No suit change is pending.
    #[error("Turn is not locked")]
    NotLocked,
    /// Only the four ordinary suits can be declared.
    #[error("Invalid suit")]
    InvalidSuit,
    /// The top card is not a Jack.
    #[error("Suit can only be changed after playing a Jack")]
    NotSuitChanger,
}

/// Any error returned by [`crate::GameState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Playing a card failed.
    #[error(transparent)]
    Play(#[from] PlayError),
    /// Drawing failed.
    #[error(transparent)]
    Draw(#[from] DrawError),
    /// Changing the suit failed.
    #[error(transparent)]
    ChangeSuit(#[from] ChangeSuitError),
}

/// Errors that can occur when restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid JSON for a game.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// The document decodes but breaks a game invariant.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(&'static str),
}
