//! Ordered card piles.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE, Rank, Suit};

/// An ordered pile of cards. The front is the top (drawn first), the back is
/// the bottom.
///
/// A deck does not enforce uniqueness; it is a general ordered bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Creates an empty deck.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: VecDeque::new(),
        }
    }

    /// Creates the standard 54-card deck: suits in [`Suit::ORDINARY`] order,
    /// ranks ascending within each suit, then the red and black jokers.
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = VecDeque::with_capacity(DECK_SIZE);

        // Ordinary suits never fail construction.
        cards.extend(
            Suit::ORDINARY
                .into_iter()
                .flat_map(|suit| Rank::ALL.into_iter().filter_map(move |rank| Card::new(suit, rank).ok())),
        );
        cards.push_back(Card::red_joker());
        cards.push_back(Card::black_joker());

        Self { cards }
    }

    /// Shuffles the deck in place with the supplied generator.
    ///
    /// The same generator state always yields the same order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Removes and returns the top card, or `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Removes and returns exactly `count` cards from the top.
    ///
    /// Returns `None` and leaves the deck untouched if fewer than `count`
    /// cards remain. Drawing zero cards always succeeds.
    pub fn draw_n(&mut self, count: usize) -> Option<Vec<Card>> {
        if self.cards.len() < count {
            return None;
        }
        Some(self.cards.drain(..count).collect())
    }

    /// Puts a card on top.
    pub fn add_to_top(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    /// Puts a card at the bottom.
    pub fn add_to_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Puts cards at the bottom, keeping their order.
    pub fn add_many_to_bottom<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Removes the first card equal to `card`, searching from the top.
    ///
    /// Returns whether a card was removed.
    pub fn remove(&mut self, card: &Card) -> bool {
        self.cards
            .iter()
            .position(|c| c == card)
            .and_then(|index| self.cards.remove(index))
            .is_some()
    }

    /// Returns the cards from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + Clone {
        self.cards.iter()
    }

    /// Returns the top card without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
