//! Game engine and state management.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::card::{Card, Suit};
use crate::deck::Deck;
use crate::error::{ReshuffleError, SetupError};
use crate::options::GameOptions;
use crate::player::Player;
use crate::result::GameOutcome;

mod actions;
mod snapshot;
pub mod state;
pub mod view;

pub use state::{Direction, Phase};
pub use view::{OpponentView, PlayerView};

/// Stride between reshuffle generators forked from one game seed.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The authoritative state of one game.
///
/// A `GameState` owns the roster, turn order, both piles and the attack-chain
/// and suit-lock flags. It is mutated in place by [`GameState::play_card`],
/// [`GameState::draw_card`] and [`GameState::change_suit`]; callers must not
/// run two mutating calls on the same game at once (see
/// [`crate::SharedGame`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "snapshot::GameStateRepr")]
pub struct GameState {
    /// Full roster, fixed for the game's lifetime.
    players: Vec<Player>,
    /// Ids still in rotation, in turn order.
    active_players: Vec<String>,
    /// Ids in the order their hands emptied.
    finish_order: Vec<String>,
    current_player_id: String,
    direction: Direction,
    draw_pile: Deck,
    discard_pile: Vec<Card>,
    /// Always the last card of `discard_pile`.
    top_card: Card,
    in_attack_chain: bool,
    attack_amount: usize,
    last_active_suit: Suit,
    locked_turn: bool,
    /// Seed the deck was shuffled with; reshuffles fork from it.
    seed: u64,
    /// Number of reshuffles performed so far.
    reshuffles: u64,
}

impl GameState {
    /// Creates a game, shuffles a standard deck and deals to every player.
    ///
    /// Cards are dealt one per player per round, in the order the ids are
    /// given, which is also the turn order. The first player moves first.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two ids are given, an id repeats, a
    /// custom player is not seated, repeats, holds no cards or asks for an
    /// unavailable card, or the deck runs out before the opening card can be
    /// turned.
    ///
    /// # Example
    ///
    /// ```
    /// use checkgame::{GameOptions, GameState};
    ///
    /// let game = GameState::new(["alice", "bob"], GameOptions::default().with_random_seed(42))?;
    /// assert_eq!(game.current_player_id(), "alice");
    /// assert_eq!(game.players()[0].hand_size(), 7);
    /// # Ok::<(), checkgame::SetupError>(())
    /// ```
    pub fn new<I, S>(player_ids: I, options: GameOptions) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = player_ids.into_iter().map(Into::into).collect();
        ensure_roster(&ids)?;

        let seed = options
            .random_seed
            .unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut draw_pile = Deck::standard();
        draw_pile.shuffle(&mut rng);

        let mut players: Vec<Player> = ids.iter().map(Player::new).collect();
        let mut prepared = vec![false; players.len()];

        for custom in options.custom_players.unwrap_or_default() {
            let index = ids
                .iter()
                .position(|id| id == custom.id())
                .ok_or_else(|| SetupError::UnknownCustomPlayer(custom.id().to_owned()))?;
            if prepared[index] {
                return Err(SetupError::DuplicatePlayer(custom.id().to_owned()));
            }
            if custom.has_empty_hand() {
                return Err(SetupError::EmptyCustomHand(custom.id().to_owned()));
            }
            for card in custom.hand() {
                if !draw_pile.remove(card) {
                    return Err(SetupError::CardUnavailable(*card));
                }
            }
            players[index] = custom;
            prepared[index] = true;
        }

        for _ in 0..options.initial_cards {
            for (player, _) in players
                .iter_mut()
                .zip(&prepared)
                .filter(|(_, prepared)| !**prepared)
            {
                if let Some(card) = draw_pile.draw() {
                    player.add_to_hand(card);
                }
            }
        }

        let mut top_card = draw_pile.draw().ok_or(SetupError::EmptyDeck)?;
        // A wild opening card goes back once; whatever comes next is kept.
        if top_card.is_wild() {
            draw_pile.add_to_bottom(top_card);
            draw_pile.shuffle(&mut rng);
            top_card = draw_pile.draw().ok_or(SetupError::EmptyDeck)?;
        }

        info!(
            players = players.len(),
            seed,
            top_card = %top_card,
            "game created"
        );

        let mut game = Self::assemble(players, draw_pile, vec![top_card], seed);
        game.direction = options.direction;
        Ok(game)
    }

    /// Creates a game from an explicit layout of hands and piles.
    ///
    /// Players holding cards form the rotation in roster order; players with
    /// an empty hand count as already finished. The last card of
    /// `discard_pile` becomes the top card.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two players are given, an id repeats, or
    /// the discard pile is empty.
    pub fn from_layout(
        players: Vec<Player>,
        draw_pile: Deck,
        discard_pile: Vec<Card>,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let ids: Vec<String> = players.iter().map(|p| p.id().to_owned()).collect();
        ensure_roster(&ids)?;
        if discard_pile.is_empty() {
            return Err(SetupError::EmptyDiscardPile);
        }

        Ok(Self::assemble(players, draw_pile, discard_pile, seed))
    }

    fn assemble(players: Vec<Player>, draw_pile: Deck, discard_pile: Vec<Card>, seed: u64) -> Self {
        let (active_players, finish_order): (Vec<String>, Vec<String>) = {
            let (active, finished): (Vec<&Player>, Vec<&Player>) =
                players.iter().partition(|p| !p.has_empty_hand());
            (
                active.iter().map(|p| p.id().to_owned()).collect(),
                finished.iter().map(|p| p.id().to_owned()).collect(),
            )
        };
        let current_player_id = active_players
            .first()
            .or_else(|| finish_order.first())
            .cloned()
            .unwrap_or_default();
        let top_card = discard_pile[discard_pile.len() - 1];

        Self {
            players,
            active_players,
            finish_order,
            current_player_id,
            direction: Direction::Clockwise,
            draw_pile,
            discard_pile,
            top_card,
            in_attack_chain: false,
            attack_amount: 0,
            last_active_suit: top_card.suit(),
            locked_turn: false,
            seed,
            reshuffles: 0,
        }
    }

    /// Returns the full roster in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the ids still in rotation, in turn order.
    #[must_use]
    pub fn active_players(&self) -> &[String] {
        &self.active_players
    }

    /// Returns the ids of finished players, first to empty their hand first.
    #[must_use]
    pub fn finish_order(&self) -> &[String] {
        &self.finish_order
    }

    /// Returns the id of the player to move.
    #[must_use]
    pub fn current_player_id(&self) -> &str {
        &self.current_player_id
    }

    /// Returns the player to move.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.find_player(&self.current_player_id)
    }

    /// Returns the rotation direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the draw pile. Its contents are hidden information; untrusted
    /// observers should only see [`GameState::draw_pile_len`].
    #[must_use]
    pub const fn draw_pile(&self) -> &Deck {
        &self.draw_pile
    }

    /// Returns the number of cards left in the draw pile.
    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Returns the discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Returns the card on top of the discard pile.
    #[must_use]
    pub const fn top_card(&self) -> &Card {
        &self.top_card
    }

    /// Returns whether an attack chain is pending.
    #[must_use]
    pub const fn in_attack_chain(&self) -> bool {
        self.in_attack_chain
    }

    /// Returns the number of cards the next drawer must take.
    #[must_use]
    pub const fn attack_amount(&self) -> usize {
        self.attack_amount
    }

    /// Returns the suit currently in force.
    #[must_use]
    pub const fn last_active_suit(&self) -> Suit {
        self.last_active_suit
    }

    /// Returns whether the current player must choose a suit.
    #[must_use]
    pub const fn locked_turn(&self) -> bool {
        self.locked_turn
    }

    /// Returns the seed the deck was shuffled with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the derived phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_game_over() {
            Phase::Finished
        } else if self.locked_turn {
            Phase::Locked
        } else if self.in_attack_chain {
            Phase::AttackChain
        } else {
            Phase::Normal
        }
    }

    /// Looks up a player by id.
    #[must_use]
    pub fn find_player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub(crate) fn find_player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Returns whether the player is still in rotation.
    #[must_use]
    pub fn is_player_active(&self, id: &str) -> bool {
        self.active_players.iter().any(|active| active == id)
    }

    /// Returns `(id, hand size)` for every player in roster order.
    #[must_use]
    pub fn hand_sizes(&self) -> Vec<(&str, usize)> {
        self.players
            .iter()
            .map(|p| (p.id(), p.hand_size()))
            .collect()
    }

    /// Returns the cards `player_id` could legally play right now.
    ///
    /// Empty when it is not their turn or the turn is locked.
    #[must_use]
    pub fn playable_cards(&self, player_id: &str) -> Vec<Card> {
        if player_id != self.current_player_id || self.locked_turn {
            return Vec::new();
        }
        self.find_player(player_id)
            .map(|p| p.playable_cards(&self.top_card, self.in_attack_chain))
            .unwrap_or_default()
    }

    /// Returns the index in the rotation of the player who moves next.
    #[must_use]
    pub fn next_player_index(&self) -> usize {
        let count = self.active_players.len();
        if count <= 1 {
            return 0;
        }
        let Some(current) = self
            .active_players
            .iter()
            .position(|id| *id == self.current_player_id)
        else {
            return 0;
        };

        match self.direction {
            Direction::Clockwise => (current + 1) % count,
            Direction::CounterClockwise => (current + count - 1) % count,
        }
    }

    /// Returns the player who moves next, if anyone else is in rotation.
    #[must_use]
    pub fn next_player(&self) -> Option<&Player> {
        if self.active_players.len() <= 1 {
            return None;
        }
        self.find_player(&self.active_players[self.next_player_index()])
    }

    /// Passes the turn to the next active player.
    pub(crate) fn advance_turn(&mut self) {
        if self.active_players.len() <= 1 {
            return;
        }
        self.current_player_id = self.active_players[self.next_player_index()].clone();
        debug!(player_id = %self.current_player_id, "turn advanced");
    }

    /// Skips the next player. With two players the mover goes again.
    pub(crate) fn skip_next_player(&mut self) {
        if self.active_players.len() <= 2 {
            return;
        }
        self.advance_turn();
        self.advance_turn();
    }

    /// Takes a player whose hand emptied out of rotation.
    ///
    /// If they still hold the turn, it passes to the player who would have
    /// followed them.
    pub(crate) fn retire_player(&mut self, player_id: &str) {
        let Some(index) = self.active_players.iter().position(|id| id == player_id) else {
            return;
        };
        if self.current_player_id == player_id {
            self.advance_turn();
        }
        self.active_players.remove(index);
        self.finish_order.push(player_id.to_owned());
        info!(player_id, remaining = self.active_players.len(), "player finished");

        if self.active_players.len() == 1 {
            self.current_player_id = self.active_players[0].clone();
        }
        if self.is_game_over() {
            info!(
                winners = ?self.winners(),
                loser = ?self.loser(),
                "game over"
            );
        }
    }

    /// Moves every discard but the top card under the draw pile and shuffles.
    ///
    /// Each reshuffle uses its own generator forked from the game seed, so a
    /// seeded game stays reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`ReshuffleError::NotEnoughCards`] if the discard pile holds
    /// only the top card.
    pub fn reshuffle_discard_pile(&mut self) -> Result<(), ReshuffleError> {
        if self.discard_pile.len() <= 1 {
            return Err(ReshuffleError::NotEnoughCards);
        }

        let recycled = self.discard_pile.len() - 1;
        self.draw_pile
            .add_many_to_bottom(self.discard_pile.drain(..recycled));

        self.reshuffles += 1;
        let mut rng = self.reshuffle_rng();
        self.draw_pile.shuffle(&mut rng);

        debug!(
            recycled,
            draw_pile = self.draw_pile.len(),
            "discard pile reshuffled"
        );
        Ok(())
    }

    fn reshuffle_rng(&self) -> ChaCha8Rng {
        let fork_seed = self
            .seed
            .wrapping_add(self.reshuffles.wrapping_mul(FORK_STRIDE));
        ChaCha8Rng::seed_from_u64(fork_seed)
    }

    /// Returns whether at most one player is left in rotation.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.active_players.len() <= 1
    }

    /// Returns every player with an empty hand, in roster order.
    #[must_use]
    pub fn winners(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| p.has_empty_hand())
            .map(Player::id)
            .collect()
    }

    /// Returns the last player in rotation once the game is over.
    #[must_use]
    pub fn loser(&self) -> Option<&str> {
        match self.active_players.as_slice() {
            [last] => Some(last),
            _ => None,
        }
    }

    /// Returns the final standings, or `None` while the game is running.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_game_over() {
            return None;
        }
        Some(GameOutcome {
            winners: self.winners().into_iter().map(str::to_owned).collect(),
            finish_order: self.finish_order.clone(),
            loser: self.loser().map(str::to_owned),
        })
    }
}

fn ensure_roster(ids: &[String]) -> Result<(), SetupError> {
    if ids.len() < 2 {
        return Err(SetupError::NotEnoughPlayers);
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(SetupError::DuplicatePlayer(id.clone()));
        }
    }
    Ok(())
}
