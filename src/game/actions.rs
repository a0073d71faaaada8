use tracing::{debug, warn};

use crate::card::{Card, Suit};
use crate::error::{ChangeSuitError, DrawError, PlayError, ReshuffleError};
use crate::player::can_play_card_on;

use super::GameState;

impl GameState {
    /// Plays `card` from the current player's hand onto the discard pile.
    ///
    /// A wild card starts or extends an attack chain, an Ace skips the next
    /// player and a Jack locks the turn until [`GameState::change_suit`] is
    /// called. A player whose hand empties leaves the rotation.
    ///
    /// # Errors
    ///
    /// Checked in order: it is not the player's turn, the turn is locked, the
    /// player is unknown, the card is not in hand, the card cannot go on the
    /// top card, or an attack chain is answered with a non-wild card.
    pub fn play_card(&mut self, player_id: &str, card: &Card) -> Result<(), PlayError> {
        if player_id != self.current_player_id {
            return Err(PlayError::NotYourTurn);
        }

        if self.locked_turn {
            return Err(PlayError::TurnLocked);
        }

        let player = self
            .find_player(player_id)
            .ok_or(PlayError::PlayerNotFound)?;

        if !player.has_card(card) {
            return Err(PlayError::CardNotInHand);
        }

        if !can_play_card_on(card, &self.top_card, self.in_attack_chain) {
            return Err(PlayError::InvalidPlay);
        }

        if self.in_attack_chain && !card.is_wild() {
            return Err(PlayError::MustDefend);
        }

        let player = self
            .find_player_mut(player_id)
            .ok_or(PlayError::PlayerNotFound)?;
        let card = player
            .remove_from_hand(card)
            .ok_or(PlayError::CardNotInHand)?;
        let emptied = player.has_empty_hand();

        self.discard_pile.push(card);
        self.top_card = card;
        // Jokers leave the suit in force untouched.
        if !card.is_joker() {
            self.last_active_suit = card.suit();
        }

        if card.is_wild() {
            if self.in_attack_chain {
                self.attack_amount += card.draw_penalty();
            } else {
                self.in_attack_chain = true;
                self.attack_amount = card.draw_penalty();
            }
        }

        debug!(
            player_id,
            card = %card,
            attack_amount = self.attack_amount,
            "card played"
        );

        self.process_card_effect(&card);

        if emptied {
            // Going out on a Jack leaves nobody to name a suit.
            self.locked_turn = false;
            self.retire_player(player_id);
        }

        Ok(())
    }

    /// Applies the turn effect of a card that was just played.
    pub(crate) fn process_card_effect(&mut self, card: &Card) {
        if card.is_skip() {
            self.skip_next_player();
        } else if card.is_wild() && self.in_attack_chain {
            self.advance_turn();
        } else if card.is_suit_changer() {
            self.locked_turn = true;
        } else if !self.in_attack_chain {
            self.advance_turn();
        }
    }

    /// Draws for the current player and passes the turn.
    ///
    /// Outside an attack chain one card is drawn. During a chain the player
    /// takes the whole accumulated penalty and the chain ends. The discard
    /// pile is recycled whenever the draw pile runs dry.
    ///
    /// Returns the drawn cards.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, the player is unknown,
    /// or there are not enough cards left to cover the draw even after
    /// recycling the discard pile. Nothing changes on error.
    pub fn draw_card(&mut self, player_id: &str) -> Result<Vec<Card>, DrawError> {
        if player_id != self.current_player_id {
            return Err(DrawError::NotYourTurn);
        }

        let seat = self
            .players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or(DrawError::PlayerNotFound)?;

        let count = if self.in_attack_chain {
            self.attack_amount.max(1)
        } else {
            1
        };

        let recyclable = self.discard_pile.len().saturating_sub(1);
        if self.draw_pile.len() + recyclable < count {
            warn!(
                player_id,
                needed = count,
                draw_pile = self.draw_pile.len(),
                recyclable,
                "not enough cards to draw"
            );
            return Err(ReshuffleError::NotEnoughCards.into());
        }

        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                self.reshuffle_discard_pile()?;
            }
            let card = self.draw_pile.draw().ok_or(DrawError::NoCards)?;
            self.players[seat].add_to_hand(card);
            drawn.push(card);
        }

        if self.in_attack_chain {
            self.in_attack_chain = false;
            self.attack_amount = 0;
        }

        debug!(player_id, count, "cards drawn");

        self.advance_turn();

        Ok(drawn)
    }

    /// Declares the suit in force after the current player played a Jack,
    /// then passes the turn.
    ///
    /// # Errors
    ///
    /// Checked in order: it is not the player's turn, the turn is not locked,
    /// `new_suit` is [`Suit::Joker`], or the top card is not a Jack.
    pub fn change_suit(&mut self, player_id: &str, new_suit: Suit) -> Result<(), ChangeSuitError> {
        if player_id != self.current_player_id {
            return Err(ChangeSuitError::NotYourTurn);
        }

        if !self.locked_turn {
            return Err(ChangeSuitError::NotLocked);
        }

        if !new_suit.is_ordinary() {
            return Err(ChangeSuitError::InvalidSuit);
        }

        if !self.top_card.is_suit_changer() {
            return Err(ChangeSuitError::NotSuitChanger);
        }

        self.last_active_suit = new_suit;
        self.locked_turn = false;

        debug!(player_id, suit = %new_suit, "suit changed");

        self.advance_turn();

        Ok(())
    }
}
