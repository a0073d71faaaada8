//! Player commands and the events they produce.
//!
//! [`GameState::apply`] runs one [`Action`] and reports what happened as a
//! list of [`GameEvent`]s that a session layer can broadcast. Events carry no
//! timestamps; stamping them is up to the caller.

use serde::{Deserialize, Serialize};

use crate::card::{Card, Suit};
use crate::error::ActionError;
use crate::game::GameState;

/// A move requested by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Play a card from hand.
    PlayCard {
        /// Acting player.
        player_id: String,
        /// Card to play.
        card: Card,
    },
    /// Draw from the draw pile (or take the attack penalty).
    DrawCard {
        /// Acting player.
        player_id: String,
    },
    /// Name the suit in force after a Jack.
    ChangeSuit {
        /// Acting player.
        player_id: String,
        /// Suit to put in force.
        suit: Suit,
    },
}

impl Action {
    /// Returns the acting player's id.
    #[must_use]
    pub fn player_id(&self) -> &str {
        match self {
            Self::PlayCard { player_id, .. }
            | Self::DrawCard { player_id }
            | Self::ChangeSuit { player_id, .. } => player_id,
        }
    }
}

/// Something observable that happened in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The game was dealt.
    GameStarted {
        /// Seated players in turn order.
        player_ids: Vec<String>,
        /// Opening card.
        top_card: Card,
        /// First player to move.
        current_player_id: String,
    },
    /// A card was played.
    CardPlayed {
        /// Acting player.
        player_id: String,
        /// The card.
        card: Card,
    },
    /// Cards were drawn. The cards themselves are hidden information.
    CardsDrawn {
        /// Acting player.
        player_id: String,
        /// How many cards were taken.
        count: usize,
    },
    /// A suit was named after a Jack.
    SuitChanged {
        /// Acting player.
        player_id: String,
        /// New suit in force.
        suit: Suit,
    },
    /// The turn passed.
    TurnChanged {
        /// Player who held the turn.
        previous_player_id: String,
        /// Player who holds it now.
        current_player_id: String,
    },
    /// A player emptied their hand and left the rotation.
    PlayerFinished {
        /// The player.
        player_id: String,
    },
    /// At most one player is left in rotation.
    GameEnded {
        /// Players with an empty hand, in roster order.
        winners: Vec<String>,
        /// Last player holding cards.
        loser: Option<String>,
    },
}

impl GameState {
    /// Returns the event announcing this game's start.
    #[must_use]
    pub fn started_event(&self) -> GameEvent {
        GameEvent::GameStarted {
            player_ids: self.active_players().to_vec(),
            top_card: *self.top_card(),
            current_player_id: self.current_player_id().to_owned(),
        }
    }

    /// Runs one action and returns the events it caused.
    ///
    /// # Errors
    ///
    /// Returns the rule violation reported by the underlying operation; the
    /// state is unchanged in that case.
    pub fn apply(&mut self, action: &Action) -> Result<Vec<GameEvent>, ActionError> {
        let previous_player_id = self.current_player_id().to_owned();
        let was_over = self.is_game_over();
        let mut events = Vec::new();

        match action {
            Action::PlayCard { player_id, card } => {
                self.play_card(player_id, card)?;
                events.push(GameEvent::CardPlayed {
                    player_id: player_id.clone(),
                    card: *card,
                });
                if !self.is_player_active(player_id) {
                    events.push(GameEvent::PlayerFinished {
                        player_id: player_id.clone(),
                    });
                }
            }
            Action::DrawCard { player_id } => {
                let drawn = self.draw_card(player_id)?;
                events.push(GameEvent::CardsDrawn {
                    player_id: player_id.clone(),
                    count: drawn.len(),
                });
            }
            Action::ChangeSuit { player_id, suit } => {
                self.change_suit(player_id, *suit)?;
                events.push(GameEvent::SuitChanged {
                    player_id: player_id.clone(),
                    suit: *suit,
                });
            }
        }

        if self.current_player_id() != previous_player_id {
            events.push(GameEvent::TurnChanged {
                previous_player_id,
                current_player_id: self.current_player_id().to_owned(),
            });
        }

        if !was_over && self.is_game_over() {
            events.push(GameEvent::GameEnded {
                winners: self.winners().into_iter().map(str::to_owned).collect(),
                loser: self.loser().map(str::to_owned),
            });
        }

        Ok(events)
    }
}
