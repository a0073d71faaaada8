//! Snapshot, event and shared-session tests.

use std::thread;

use checkgame::{
    Action, ActionError, Card, Deck, GameEvent, GameOptions, GameState, PlayError, Player, Rank,
    SharedGame, SnapshotError, Suit,
};

fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank).unwrap()
}

fn two_player_finish() -> GameState {
    GameState::from_layout(
        vec![
            Player::with_hand("p1", vec![card(Suit::Hearts, Rank::Five)]),
            Player::with_hand("p2", vec![card(Suit::Spades, Rank::Three)]),
        ],
        Deck::from(vec![card(Suit::Diamonds, Rank::Nine)]),
        vec![card(Suit::Hearts, Rank::Queen)],
        7,
    )
    .unwrap()
}

#[test]
fn snapshot_round_trip() {
    let mut game = GameState::new(["a", "b", "c"], GameOptions::default().with_random_seed(11)).unwrap();
    game.draw_card("a").unwrap();
    game.draw_card("b").unwrap();

    let json = game.to_json().unwrap();
    let restored = GameState::from_json(&json).unwrap();
    assert_eq!(restored, game);

    let pretty = game.to_json_pretty().unwrap();
    assert_eq!(GameState::from_json(&pretty).unwrap(), game);
}

#[test]
fn snapshot_uses_snake_case_fields() {
    let game = GameState::new(["a", "b"], GameOptions::default().with_random_seed(4)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&game.to_json().unwrap()).unwrap();

    for field in [
        "players",
        "active_players",
        "current_player_id",
        "direction",
        "draw_pile",
        "discard_pile",
        "top_card",
        "in_attack_chain",
        "attack_amount",
        "last_active_suit",
        "locked_turn",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
    assert_eq!(json["draw_pile"].as_array().unwrap().len(), game.draw_pile_len());
    assert_eq!(json["players"][0]["id"], "a");
    assert_eq!(json["players"][0]["hand"].as_array().unwrap().len(), 7);
}

#[test]
fn restored_game_keeps_reshuffling_deterministically() {
    let hands = [card(Suit::Hearts, Rank::Nine), card(Suit::Spades, Rank::Nine)];
    let top = card(Suit::Hearts, Rank::Queen);
    let mut discard: Vec<Card> = Deck::standard()
        .iter()
        .copied()
        .filter(|c| !hands.contains(c) && *c != top)
        .collect();
    discard.push(top);

    let mut game = GameState::from_layout(
        vec![
            Player::with_hand("a", vec![hands[0]]),
            Player::with_hand("b", vec![hands[1]]),
        ],
        Deck::new(),
        discard,
        21,
    )
    .unwrap();
    let mut restored = GameState::from_json(&game.to_json().unwrap()).unwrap();

    game.reshuffle_discard_pile().unwrap();
    restored.reshuffle_discard_pile().unwrap();
    assert_eq!(game.draw_pile(), restored.draw_pile());
}

fn opening_without_jack() -> GameState {
    (0..100)
        .map(|seed| GameState::new(["a", "b"], GameOptions::default().with_random_seed(seed)).unwrap())
        .find(|game| !game.top_card().is_suit_changer())
        .unwrap()
}

fn rejection(json: &serde_json::Value) -> &'static str {
    match GameState::from_json(&json.to_string()) {
        Err(SnapshotError::Inconsistent(reason)) => reason,
        other => panic!("expected an inconsistent snapshot, got {other:?}"),
    }
}

#[test]
fn inconsistent_snapshots_are_rejected() {
    let game = opening_without_jack();
    let json: serde_json::Value = serde_json::from_str(&game.to_json().unwrap()).unwrap();

    let mut wrong_top = json.clone();
    wrong_top["top_card"] = serde_json::to_value(Card::red_joker()).unwrap();
    wrong_top["discard_pile"] = serde_json::json!([card(Suit::Clubs, Rank::Four)]);
    assert_eq!(rejection(&wrong_top), "top card is not the last discard");

    let mut half_chain = json.clone();
    half_chain["attack_amount"] = serde_json::json!(2);
    assert_eq!(
        rejection(&half_chain),
        "attack amount disagrees with attack chain flag"
    );

    let mut stray_turn = json.clone();
    stray_turn["current_player_id"] = serde_json::json!("nobody");
    assert_eq!(rejection(&stray_turn), "current player is not active");

    let mut bad_card = json;
    bad_card["top_card"]["rank"] = serde_json::json!("Ace");
    bad_card["top_card"]["suit"] = serde_json::json!("Joker");
    assert!(matches!(
        GameState::from_json(&bad_card.to_string()),
        Err(SnapshotError::Json(_))
    ));

    assert!(matches!(
        GameState::from_json("not json"),
        Err(SnapshotError::Json(_))
    ));
}

#[test]
fn snapshots_must_respect_lock_rules() {
    let game = opening_without_jack();
    let json: serde_json::Value = serde_json::from_str(&game.to_json().unwrap()).unwrap();

    let mut locked = json.clone();
    locked["locked_turn"] = serde_json::json!(true);
    assert_eq!(rejection(&locked), "turn is locked without a Jack on top");

    let mut locked_chain = json;
    locked_chain["locked_turn"] = serde_json::json!(true);
    locked_chain["in_attack_chain"] = serde_json::json!(true);
    locked_chain["attack_amount"] = serde_json::json!(2);
    assert_eq!(
        rejection(&locked_chain),
        "turn is locked during an attack chain"
    );
}

#[test]
fn snapshots_must_hold_exactly_one_deck() {
    let game = opening_without_jack();
    let json: serde_json::Value = serde_json::from_str(&game.to_json().unwrap()).unwrap();

    let mut duplicated = json.clone();
    duplicated["players"][0]["hand"][0] = duplicated["players"][0]["hand"][1].clone();
    assert_eq!(rejection(&duplicated), "card appears more than once");

    let mut missing = json.clone();
    missing["draw_pile"].as_array_mut().unwrap().pop();
    assert_eq!(rejection(&missing), "cards in play do not form one deck");

    let mut emptied = json;
    let hand = emptied["players"][1]["hand"].take();
    emptied["draw_pile"]
        .as_array_mut()
        .unwrap()
        .extend(hand.as_array().unwrap().iter().cloned());
    emptied["players"][1]["hand"] = serde_json::json!([]);
    assert_eq!(rejection(&emptied), "active player has an empty hand");
}

#[test]
fn plain_deserialization_is_validated_too() {
    let game = opening_without_jack();
    let json = game.to_json().unwrap();
    assert_eq!(serde_json::from_str::<GameState>(&json).unwrap(), game);

    let mut locked: serde_json::Value = serde_json::from_str(&json).unwrap();
    locked["locked_turn"] = serde_json::json!(true);
    let err = serde_json::from_str::<GameState>(&locked.to_string()).unwrap_err();
    assert!(err.to_string().contains("turn is locked without a Jack on top"));
}

#[test]
fn apply_reports_play_and_turn_change() {
    let mut game = GameState::from_layout(
        vec![
            Player::with_hand(
                "p1",
                vec![card(Suit::Hearts, Rank::Five), card(Suit::Clubs, Rank::Six)],
            ),
            Player::with_hand("p2", vec![card(Suit::Spades, Rank::Three)]),
        ],
        Deck::from(vec![card(Suit::Diamonds, Rank::Nine)]),
        vec![card(Suit::Hearts, Rank::Queen)],
        3,
    )
    .unwrap();

    let events = game
        .apply(&Action::PlayCard {
            player_id: "p1".to_owned(),
            card: card(Suit::Hearts, Rank::Five),
        })
        .unwrap();

    assert_eq!(
        events,
        vec![
            GameEvent::CardPlayed {
                player_id: "p1".to_owned(),
                card: card(Suit::Hearts, Rank::Five),
            },
            GameEvent::TurnChanged {
                previous_player_id: "p1".to_owned(),
                current_player_id: "p2".to_owned(),
            },
        ]
    );

    let events = game
        .apply(&Action::DrawCard {
            player_id: "p2".to_owned(),
        })
        .unwrap();
    assert_eq!(
        events[0],
        GameEvent::CardsDrawn {
            player_id: "p2".to_owned(),
            count: 1,
        }
    );
}

#[test]
fn apply_reports_game_end() {
    let mut game = two_player_finish();

    let events = game
        .apply(&Action::PlayCard {
            player_id: "p1".to_owned(),
            card: card(Suit::Hearts, Rank::Five),
        })
        .unwrap();

    assert_eq!(
        events,
        vec![
            GameEvent::CardPlayed {
                player_id: "p1".to_owned(),
                card: card(Suit::Hearts, Rank::Five),
            },
            GameEvent::PlayerFinished {
                player_id: "p1".to_owned(),
            },
            GameEvent::TurnChanged {
                previous_player_id: "p1".to_owned(),
                current_player_id: "p2".to_owned(),
            },
            GameEvent::GameEnded {
                winners: vec!["p1".to_owned()],
                loser: Some("p2".to_owned()),
            },
        ]
    );
}

#[test]
fn apply_surfaces_rule_errors() {
    let mut game = two_player_finish();
    let before = game.clone();

    let err = game
        .apply(&Action::PlayCard {
            player_id: "p2".to_owned(),
            card: card(Suit::Spades, Rank::Three),
        })
        .unwrap_err();

    assert_eq!(err, ActionError::Play(PlayError::NotYourTurn));
    assert_eq!(err.to_string(), "Not your turn");
    assert_eq!(game, before);
}

#[test]
fn actions_and_events_serialize_with_tags() {
    let action: Action =
        serde_json::from_str(r#"{"type":"change_suit","player_id":"p1","suit":"Hearts"}"#).unwrap();
    assert_eq!(
        action,
        Action::ChangeSuit {
            player_id: "p1".to_owned(),
            suit: Suit::Hearts,
        }
    );
    assert_eq!(action.player_id(), "p1");

    let game = two_player_finish();
    let started = serde_json::to_value(game.started_event()).unwrap();
    assert_eq!(started["type"], "game_started");
    assert_eq!(started["player_ids"], serde_json::json!(["p1", "p2"]));
    assert_eq!(started["current_player_id"], "p1");
}

#[test]
fn shared_game_serializes_moves() {
    let game = GameState::new(["a", "b"], GameOptions::default().with_random_seed(17)).unwrap();
    let shared = SharedGame::new(game);
    let draw = Action::DrawCard {
        player_id: "a".to_owned(),
    };

    let results: Vec<bool> = thread::scope(|scope| {
        let (shared, draw) = (&shared, &draw);
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || shared.apply(draw).is_ok()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|ok| **ok).count(), 1);
    assert_eq!(shared.with_state(|g| g.current_player_id().to_owned()), "b");

    let json = shared.to_json().unwrap();
    assert_eq!(GameState::from_json(&json).unwrap(), shared.snapshot());
    assert_eq!(shared.into_inner().find_player("a").unwrap().hand_size(), 8);
}
