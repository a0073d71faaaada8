//! What a single seat is allowed to see.

use serde::{Deserialize, Serialize};

use crate::card::{Card, Suit};

use super::{Direction, GameState};

/// Public information about another player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    /// Player id.
    pub id: String,
    /// Number of cards held.
    pub hand_size: usize,
    /// Whether the player is still in rotation.
    pub active: bool,
}

/// The game as seen from one seat: their own hand, everyone else's hand
/// sizes, and the draw pile reduced to a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// The observing player.
    pub player_id: String,
    /// The observer's hand.
    pub hand: Vec<Card>,
    /// Cards the observer could play right now.
    pub playable_cards: Vec<Card>,
    /// Everyone else, in roster order.
    pub opponents: Vec<OpponentView>,
    /// Ids still in rotation, in turn order.
    pub active_players: Vec<String>,
    /// Player to move.
    pub current_player_id: String,
    /// Rotation direction.
    pub direction: Direction,
    /// Top of the discard pile.
    pub top_card: Card,
    /// The discard pile, bottom first.
    pub discard_pile: Vec<Card>,
    /// Cards left in the draw pile.
    pub draw_pile_count: usize,
    /// Whether an attack chain is pending.
    pub in_attack_chain: bool,
    /// Pending penalty.
    pub attack_amount: usize,
    /// Suit in force.
    pub last_active_suit: Suit,
    /// Whether a suit choice is pending.
    pub locked_turn: bool,
    /// Whether the game has ended.
    pub is_game_over: bool,
}

impl GameState {
    /// Builds the view for `player_id`, or `None` if they are not seated.
    #[must_use]
    pub fn view_for(&self, player_id: &str) -> Option<PlayerView> {
        let me = self.find_player(player_id)?;

        let opponents = self
            .players
            .iter()
            .filter(|p| p.id() != player_id)
            .map(|p| OpponentView {
                id: p.id().to_owned(),
                hand_size: p.hand_size(),
                active: self.is_player_active(p.id()),
            })
            .collect();

        Some(PlayerView {
            player_id: player_id.to_owned(),
            hand: me.hand().to_vec(),
            playable_cards: self.playable_cards(player_id),
            opponents,
            active_players: self.active_players.clone(),
            current_player_id: self.current_player_id.clone(),
            direction: self.direction,
            top_card: self.top_card,
            discard_pile: self.discard_pile.clone(),
            draw_pile_count: self.draw_pile.len(),
            in_attack_chain: self.in_attack_chain,
            attack_amount: self.attack_amount,
            last_active_suit: self.last_active_suit,
            locked_turn: self.locked_turn,
            is_game_over: self.is_game_over(),
        })
    }
}
