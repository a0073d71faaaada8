//! Card types and classification rules.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades.
    Spades,
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// The pseudo-suit carried by both jokers.
    Joker,
}

impl Suit {
    /// The four ordinary suits, in deck order.
    pub const ORDINARY: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Returns whether this is one of the four ordinary suits.
    #[must_use]
    pub const fn is_ordinary(self) -> bool {
        !matches!(self, Self::Joker)
    }

    /// Returns the color implied by an ordinary suit, or `None` for jokers.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Hearts | Self::Diamonds => Some(Color::Red),
            Self::Spades | Self::Clubs => Some(Color::Black),
            Self::Joker => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Spades => "Spades",
            Self::Hearts => "Hearts",
            Self::Diamonds => "Diamonds",
            Self::Clubs => "Clubs",
            Self::Joker => "Joker",
        };
        f.write_str(name)
    }
}

/// Card rank, Ace low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Ace.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Rank {
    /// All thirteen ranks in ascending order.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ace => "Ace",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Six => "Six",
            Self::Seven => "Seven",
            Self::Eight => "Eight",
            Self::Nine => "Nine",
            Self::Ten => "Ten",
            Self::Jack => "Jack",
            Self::Queen => "Queen",
            Self::King => "King",
        };
        f.write_str(name)
    }
}

/// Card color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Hearts, Diamonds and the red joker.
    Red,
    /// Spades, Clubs and the black joker.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "Red",
            Self::Black => "Black",
        })
    }
}

/// A playing card.
///
/// Cards are plain values: equality and hashing compare suit, rank and color.
/// Construct them through [`Card::new`] or the joker factories so that the
/// color always agrees with the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRepr", into = "CardRepr")]
pub struct Card {
    suit: Suit,
    rank: Option<Rank>,
    color: Color,
}

impl Card {
    /// Creates an ordinary card; the color follows from the suit.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::JokerSuit`] if `suit` is [`Suit::Joker`]. Use
    /// [`Card::red_joker`] or [`Card::black_joker`] instead.
    pub const fn new(suit: Suit, rank: Rank) -> Result<Self, CardError> {
        match suit.color() {
            Some(color) => Ok(Self {
                suit,
                rank: Some(rank),
                color,
            }),
            None => Err(CardError::JokerSuit),
        }
    }

    /// Creates the red joker.
    #[must_use]
    pub const fn red_joker() -> Self {
        Self {
            suit: Suit::Joker,
            rank: None,
            color: Color::Red,
        }
    }

    /// Creates the black joker.
    #[must_use]
    pub const fn black_joker() -> Self {
        Self {
            suit: Suit::Joker,
            rank: None,
            color: Color::Black,
        }
    }

    /// Returns the suit.
    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the rank, `None` for jokers.
    #[must_use]
    pub const fn rank(&self) -> Option<Rank> {
        self.rank
    }

    /// Returns the color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    const fn has_rank(&self, rank: Rank) -> bool {
        match self.rank {
            Some(own) => own as u8 == rank as u8,
            None => false,
        }
    }

    /// Returns whether this card is a joker.
    #[must_use]
    pub const fn is_joker(&self) -> bool {
        matches!(self.suit, Suit::Joker)
    }

    /// Returns whether this card is wild (a Seven or a joker).
    ///
    /// Wild cards carry a draw penalty and start or extend attack chains.
    #[must_use]
    pub const fn is_wild(&self) -> bool {
        self.has_rank(Rank::Seven) || self.is_joker()
    }

    /// Returns whether this card is transparent (a Two).
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.has_rank(Rank::Two)
    }

    /// Returns whether this card skips the next player (an Ace).
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        self.has_rank(Rank::Ace)
    }

    /// Returns whether this card locks the turn for a suit change (a Jack).
    #[must_use]
    pub const fn is_suit_changer(&self) -> bool {
        self.has_rank(Rank::Jack)
    }

    /// Number of cards this card adds to an attack chain.
    #[must_use]
    pub const fn draw_penalty(&self) -> usize {
        if self.has_rank(Rank::Seven) {
            2
        } else if self.is_joker() {
            4
        } else {
            0
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(rank) => write!(f, "{rank} of {}", self.suit),
            None => write!(f, "{} Joker", self.color),
        }
    }
}

/// Wire form of a card. `display` is informational and ignored on input.
#[derive(Serialize, Deserialize)]
struct CardRepr {
    suit: Suit,
    rank: Option<Rank>,
    color: Color,
    #[serde(default, skip_deserializing)]
    display: String,
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        Self {
            suit: card.suit,
            rank: card.rank,
            color: card.color,
            display: card.to_string(),
        }
    }
}

impl TryFrom<CardRepr> for Card {
    type Error = CardError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        match (repr.suit.color(), repr.rank) {
            (None, None) => Ok(Self {
                suit: Suit::Joker,
                rank: None,
                color: repr.color,
            }),
            (None, Some(_)) => Err(CardError::JokerWithRank),
            (Some(_), None) => Err(CardError::MissingRank),
            (Some(color), Some(rank)) if color == repr.color => Self::new(repr.suit, rank),
            (Some(_), Some(_)) => Err(CardError::ColorMismatch),
        }
    }
}

/// Number of cards in a standard deck: 52 ordinary cards and two jokers.
pub const DECK_SIZE: usize = 54;
