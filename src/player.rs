//! Players, their hands, and the card legality rule.

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Returns whether `played` may be put on `top`.
///
/// During an attack chain only a wild card may answer a wild card. Outside a
/// chain, Twos and Jacks go on anything, wild cards go on wild cards, and
/// otherwise the suit or rank must match (a joker also matches by color).
#[must_use]
pub fn can_play_card_on(played: &Card, top: &Card, in_attack_chain: bool) -> bool {
    if in_attack_chain {
        return top.is_wild() && played.is_wild();
    }

    if played.is_transparent() || played.is_suit_changer() {
        return true;
    }

    if played.is_wild() && top.is_wild() {
        return true;
    }

    if played.suit() == top.suit() || played.rank() == top.rank() {
        return true;
    }

    played.is_joker() && played.color() == top.color()
}

/// A seated player and the cards they hold.
///
/// Hand order carries no rule meaning but is preserved so that snapshots and
/// clones are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: String,
    hand: Vec<Card>,
}

impl Player {
    /// Creates a player with an empty hand.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hand: Vec::new(),
        }
    }

    /// Creates a player holding the given cards.
    #[must_use]
    pub fn with_hand(id: impl Into<String>, hand: Vec<Card>) -> Self {
        Self {
            id: id.into(),
            hand,
        }
    }

    /// Returns the player id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the cards in hand.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Adds a card to the hand.
    pub fn add_to_hand(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Adds several cards to the hand.
    pub fn add_cards_to_hand<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.hand.extend(cards);
    }

    /// Removes the first card equal to `card`.
    ///
    /// Returns the removed card, or `None` if the player does not hold it.
    pub fn remove_from_hand(&mut self, card: &Card) -> Option<Card> {
        let index = self.hand.iter().position(|c| c == card)?;
        Some(self.hand.remove(index))
    }

    /// Returns whether the player holds `card`.
    #[must_use]
    pub fn has_card(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    /// Returns whether any held card matches `top`.
    ///
    /// A held Two always counts as a match. With `include_wild_cards`, a held
    /// wild card matches a wild top card.
    #[must_use]
    pub fn has_matching_card(&self, top: &Card, include_wild_cards: bool) -> bool {
        self.hand.iter().any(|held| {
            held.is_transparent()
                || (include_wild_cards && held.is_wild() && top.is_wild())
                || held.suit() == top.suit()
                || held.rank() == top.rank()
                || (held.is_joker() && held.color() == top.color())
        })
    }

    /// Returns the held cards that can legally be played on `top`.
    #[must_use]
    pub fn playable_cards(&self, top: &Card, in_attack_chain: bool) -> Vec<Card> {
        self.hand
            .iter()
            .filter(|card| can_play_card_on(card, top, in_attack_chain))
            .copied()
            .collect()
    }

    /// Returns the number of cards in hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn has_empty_hand(&self) -> bool {
        self.hand.is_empty()
    }

    /// Discards the whole hand.
    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }
}
