//! Property tests over seeded deals and random playouts.

use std::collections::HashSet;

use checkgame::{Card, DECK_SIZE, Deck, GameOptions, GameState, Player, Suit};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn total_cards(game: &GameState) -> usize {
    game.draw_pile_len()
        + game.discard_pile().len()
        + game.players().iter().map(Player::hand_size).sum::<usize>()
}

fn assert_invariants(game: &GameState) -> Result<(), TestCaseError> {
    prop_assert_eq!(total_cards(game), DECK_SIZE);
    prop_assert_eq!(game.discard_pile().last(), Some(game.top_card()));
    prop_assert_eq!(game.in_attack_chain(), game.attack_amount() > 0);
    if !game.active_players().is_empty() {
        prop_assert!(game.is_player_active(game.current_player_id()));
    }
    for id in game.active_players() {
        prop_assert!(!game.find_player(id).unwrap().has_empty_hand());
    }
    let checked = game.validate();
    prop_assert!(checked.is_ok(), "{:?}", checked);
    Ok(())
}

/// Plays one move for whoever is current, steered by `choice`.
fn step(game: &mut GameState, choice: usize) -> bool {
    let current = game.current_player_id().to_owned();

    if game.locked_turn() {
        let suit = Suit::ORDINARY[choice % Suit::ORDINARY.len()];
        return game.change_suit(&current, suit).is_ok();
    }

    let playable = game.playable_cards(&current);
    // Draw now and then even with a playable card.
    if !playable.is_empty() && choice % 5 != 0 {
        let card = playable[choice % playable.len()];
        return game.play_card(&current, &card).is_ok();
    }

    game.draw_card(&current).is_ok()
}

proptest! {
    #[test]
    fn prop_seeded_deal_is_deterministic(seed in any::<u64>(), players in 2usize..=6) {
        let ids: Vec<String> = (0..players).map(|i| format!("p{i}")).collect();
        let options = GameOptions::default().with_random_seed(seed);

        let first = GameState::new(ids.clone(), options.clone()).unwrap();
        let second = GameState::new(ids, options).unwrap();

        prop_assert_eq!(first.top_card(), second.top_card());
        prop_assert_eq!(first.players(), second.players());
        assert_invariants(&first)?;
    }

    #[test]
    fn prop_shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut deck = Deck::standard();
        deck.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        prop_assert_eq!(deck.len(), DECK_SIZE);
        let shuffled: HashSet<Card> = deck.iter().copied().collect();
        let original: HashSet<Card> = Deck::standard().iter().copied().collect();
        prop_assert_eq!(shuffled, original);

        let mut again = Deck::standard();
        again.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(deck, again);
    }

    #[test]
    fn prop_different_seeds_shuffle_differently(a in any::<u64>(), b in any::<u64>()) {
        prop_assume!(a != b);
        let mut first = Deck::standard();
        let mut second = Deck::standard();
        first.shuffle(&mut ChaCha8Rng::seed_from_u64(a));
        second.shuffle(&mut ChaCha8Rng::seed_from_u64(b));
        prop_assert_ne!(first, second);
    }

    #[test]
    fn prop_playouts_conserve_cards_and_turns(
        seed in any::<u64>(),
        players in 2usize..=5,
        choices in prop::collection::vec(any::<usize>(), 1..300),
    ) {
        let ids: Vec<String> = (0..players).map(|i| format!("p{i}")).collect();
        let mut game = GameState::new(ids, GameOptions::default().with_random_seed(seed)).unwrap();

        for choice in choices {
            if game.is_game_over() || !step(&mut game, choice) {
                break;
            }
            assert_invariants(&game)?;
        }
    }

    #[test]
    fn prop_playouts_replay_identically(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<usize>(), 1..200),
    ) {
        let options = GameOptions::default().with_random_seed(seed);
        let mut first = GameState::new(["a", "b", "c"], options.clone()).unwrap();
        let mut second = GameState::new(["a", "b", "c"], options).unwrap();

        for choice in choices {
            if first.is_game_over() {
                break;
            }
            let moved = step(&mut first, choice);
            prop_assert_eq!(moved, step(&mut second, choice));
            if !moved {
                break;
            }
        }
        prop_assert_eq!(first, second);
    }
}
