//! Turn direction and phase types.

use serde::{Deserialize, Serialize};

/// Rotation direction through the active players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the next id in seating order.
    #[default]
    Clockwise,
    /// Towards the previous id in seating order.
    CounterClockwise,
}

/// Which sub-state the game is in, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ordinary play.
    Normal,
    /// A wild card is pending: defend with another wild card or draw.
    AttackChain,
    /// A Jack was played and the player must choose a suit.
    Locked,
    /// At most one player is left in rotation.
    Finished,
}
