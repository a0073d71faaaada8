//! JSON snapshots for persistence and reconnects.

use std::collections::HashSet;

use serde::Deserialize;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::deck::Deck;
use crate::error::SnapshotError;
use crate::player::Player;

use super::{Direction, GameState};

/// Decoded but unchecked form of a [`GameState`].
#[derive(Deserialize)]
pub(super) struct GameStateRepr {
    players: Vec<Player>,
    active_players: Vec<String>,
    #[serde(default)]
    finish_order: Vec<String>,
    current_player_id: String,
    direction: Direction,
    draw_pile: Deck,
    discard_pile: Vec<Card>,
    top_card: Card,
    in_attack_chain: bool,
    attack_amount: usize,
    last_active_suit: Suit,
    locked_turn: bool,
    seed: u64,
    #[serde(default)]
    reshuffles: u64,
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = SnapshotError;

    fn try_from(repr: GameStateRepr) -> Result<Self, Self::Error> {
        let state = Self {
            players: repr.players,
            active_players: repr.active_players,
            finish_order: repr.finish_order,
            current_player_id: repr.current_player_id,
            direction: repr.direction,
            draw_pile: repr.draw_pile,
            discard_pile: repr.discard_pile,
            top_card: repr.top_card,
            in_attack_chain: repr.in_attack_chain,
            attack_amount: repr.attack_amount,
            last_active_suit: repr.last_active_suit,
            locked_turn: repr.locked_turn,
            seed: repr.seed,
            reshuffles: repr.reshuffles,
        };
        state.validate()?;
        Ok(state)
    }
}

impl GameState {
    /// Serializes the full state, pile contents included.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the full state as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a state written by [`GameState::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] for malformed input and
    /// [`SnapshotError::Inconsistent`] if the decoded state breaks a game
    /// invariant.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let repr: GameStateRepr = serde_json::from_str(json)?;
        Self::try_from(repr)
    }

    /// Checks the invariants every reachable state satisfies.
    ///
    /// Layouts built with [`GameState::from_layout`] may hold a partial deck;
    /// they fail the card count here and cannot be restored from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Inconsistent`] naming the first broken
    /// invariant.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.players.len() < 2 {
            return Err(SnapshotError::Inconsistent("fewer than 2 players"));
        }

        let mut roster = HashSet::with_capacity(self.players.len());
        if !self.players.iter().all(|p| roster.insert(p.id())) {
            return Err(SnapshotError::Inconsistent("duplicate player id"));
        }

        let mut seen = HashSet::with_capacity(self.active_players.len());
        for id in &self.active_players {
            if !roster.contains(id.as_str()) || !seen.insert(id.as_str()) {
                return Err(SnapshotError::Inconsistent(
                    "active players must be distinct roster members",
                ));
            }
        }

        if !self.active_players.is_empty() && !self.is_player_active(&self.current_player_id) {
            return Err(SnapshotError::Inconsistent("current player is not active"));
        }

        if self.discard_pile.last() != Some(&self.top_card) {
            return Err(SnapshotError::Inconsistent(
                "top card is not the last discard",
            ));
        }

        if self.in_attack_chain != (self.attack_amount > 0) {
            return Err(SnapshotError::Inconsistent(
                "attack amount disagrees with attack chain flag",
            ));
        }

        if self.locked_turn && self.in_attack_chain {
            return Err(SnapshotError::Inconsistent(
                "turn is locked during an attack chain",
            ));
        }

        if self.locked_turn && !self.top_card.is_suit_changer() {
            return Err(SnapshotError::Inconsistent(
                "turn is locked without a Jack on top",
            ));
        }

        let empty_active = self
            .active_players
            .iter()
            .filter_map(|id| self.find_player(id))
            .any(Player::has_empty_hand);
        if empty_active {
            return Err(SnapshotError::Inconsistent(
                "active player has an empty hand",
            ));
        }

        // Every valid card is one of the 54 deck cards, so 54 distinct cards
        // are exactly one deck.
        let mut cards = HashSet::with_capacity(DECK_SIZE);
        let all_distinct = self
            .players
            .iter()
            .flat_map(|p| p.hand().iter())
            .chain(self.draw_pile.iter())
            .chain(self.discard_pile.iter())
            .all(|card| cards.insert(*card));
        if !all_distinct {
            return Err(SnapshotError::Inconsistent("card appears more than once"));
        }
        if cards.len() != DECK_SIZE {
            return Err(SnapshotError::Inconsistent(
                "cards in play do not form one deck",
            ));
        }

        Ok(())
    }
}
