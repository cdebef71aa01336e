//! Integration tests for session lifecycle, play gating, and questions.

use wwwcats_protocol::{Card, Command, QuestionKind};
use wwwcats_session::*;

// =========================================================================
// Helpers
// =========================================================================

fn identity() -> Identity {
    Identity::new("lobby1", "alice").expect("valid identity")
}

/// A session that has completed the join handshake.
fn active() -> Session {
    let mut session = Session::new(identity());
    session.begin_connect().expect("fresh session");
    session.transport_ready().expect("connecting");
    assert!(session.acknowledge_join());
    session.roster.set_players(vec![
        "alice".into(),
        "bob".into(),
        "carol".into(),
    ]);
    session.table.draw_pile = true;
    session
}

fn hand(cards: &[&str]) -> Vec<Card> {
    cards.iter().copied().map(Card::from).collect()
}

/// An active session where it is our turn and we hold `cards`.
fn our_turn(cards: &[&str]) -> Session {
    let mut session = active();
    session.hand.replace(hand(cards));
    session.set_now_playing("alice".into());
    session
}

// =========================================================================
// Identity and lifecycle
// =========================================================================

#[test]
fn test_identity_rejects_whitespace_and_empty() {
    assert!(Identity::new("lobby", "two words").is_err());
    assert!(Identity::new("", "alice").is_err());
    assert!(Identity::new("lob by", "alice").is_err());

    let err = Identity::new("lobby", "a b").unwrap_err();
    assert_eq!(
        err.locale_key().map(|k| k.as_str().to_string()),
        Some("one_word".to_string())
    );
}

#[test]
fn test_handshake_is_join_lobby_then_active() {
    let mut session = Session::new(identity());
    assert_eq!(session.phase(), ConnectionPhase::Disconnected);

    session.begin_connect().unwrap();
    assert_eq!(session.phase(), ConnectionPhase::Connecting);

    let handshake = session.transport_ready().unwrap();
    assert_eq!(handshake.to_string(), "join_lobby lobby1 alice");
    assert_eq!(session.phase(), ConnectionPhase::AwaitingJoinAck);

    assert!(session.acknowledge_join());
    assert_eq!(session.phase(), ConnectionPhase::Active);

    // A repeat acknowledgement changes nothing.
    assert!(!session.acknowledge_join());
    assert_eq!(session.phase(), ConnectionPhase::Active);
}

#[test]
fn test_second_connect_is_already_connecting() {
    let mut session = Session::new(identity());
    session.begin_connect().unwrap();
    assert_eq!(session.begin_connect(), Err(SessionError::AlreadyConnecting));
}

#[test]
fn test_nothing_is_sent_before_active() {
    let mut session = Session::new(identity());
    session.begin_connect().unwrap();
    session.transport_ready().unwrap();

    assert!(matches!(
        session.draw(),
        Err(SessionError::NotActive(ConnectionPhase::AwaitingJoinAck))
    ));
    assert!(matches!(session.chat("hi"), Err(SessionError::NotActive(_))));
    assert!(matches!(
        session.play_card(0),
        Err(SessionError::NotActive(_))
    ));
}

#[test]
fn test_close_clears_everything_and_is_terminal() {
    let mut session = our_turn(&["defuse", "nope"]);
    session.gate.locked = true;
    session.ask(QuestionKind::RandomWho, None);

    session.close();
    assert!(session.is_closed());
    assert!(session.hand.is_empty());
    assert!(session.roster.players().is_empty());
    assert_eq!(session.now_playing(), None);
    assert_eq!(session.pending_question(), None);
    assert_eq!(session.gate, GateFlags::default());
    assert_eq!(session.table, TableView::default());

    assert!(!session.acknowledge_join());
    assert_eq!(session.begin_connect(), Err(SessionError::AlreadyConnecting));
    assert!(matches!(session.draw(), Err(SessionError::NotActive(_))));
}

// =========================================================================
// Turn
// =========================================================================

#[test]
fn test_our_turn_follows_now_playing() {
    let mut session = active();
    assert!(!session.is_our_turn());

    session.set_now_playing("alice".into());
    assert!(session.is_our_turn());

    session.set_now_playing("bob".into());
    assert!(!session.is_our_turn());
    assert_eq!(session.now_playing_position(), Some(1));

    session.clear_turn();
    assert!(!session.is_our_turn());
    assert_eq!(session.now_playing_position(), None);
}

#[test]
fn test_now_playing_position_tracks_reordered_players() {
    let mut session = active();
    session.set_now_playing("carol".into());
    assert_eq!(session.now_playing_position(), Some(2));

    session
        .roster
        .set_players(vec!["carol".into(), "alice".into()]);
    assert_eq!(session.now_playing_position(), Some(0));
}

// =========================================================================
// Play gating
// =========================================================================

#[test]
fn test_play_in_turn_sends_index() {
    let mut session = our_turn(&["skip", "attack"]);
    assert_eq!(session.play_card(1), Ok(Command::Play(1)));
}

#[test]
fn test_play_out_of_range() {
    let mut session = our_turn(&["skip", "attack"]);
    assert_eq!(
        session.play_card(2),
        Err(SessionError::OutOfRange { index: 2, len: 2 })
    );
}

#[test]
fn test_play_out_of_turn_only_nope() {
    let mut session = active();
    session.hand.replace(hand(&["skip", "nope"]));
    session.set_now_playing("bob".into());

    assert_eq!(session.play_card(0), Err(SessionError::NotYourTurn));
    assert_eq!(session.play_card(1), Ok(Command::Play(1)));
}

#[test]
fn test_locked_rejects_every_play_and_draw() {
    let mut session = our_turn(&["nope", "defuse", "skip"]);
    session.gate.locked = true;
    for index in 0..3 {
        assert_eq!(session.play_card(index), Err(SessionError::Locked));
    }
    assert_eq!(session.draw(), Err(SessionError::Locked));

    session.gate.locked = false;
    assert_eq!(session.play_card(2), Ok(Command::Play(2)));
}

#[test]
fn test_defusing_round_trip() {
    let mut session = our_turn(&["skip", "defuse"]);
    session.gate.defusing = true;

    assert_eq!(session.play_card(0), Err(SessionError::DefuseOnly));
    assert_eq!(session.draw(), Err(SessionError::DefuseOnly));

    assert_eq!(session.play_card(1), Ok(Command::Play(1)));
    assert!(!session.gate.defusing);
}

#[test]
fn test_single_random_card_not_playable() {
    let mut session = our_turn(&["random2"]);
    assert_eq!(
        session.play_card(0),
        Err(SessionError::NotPlayable(Card::from("random2")))
    );
}

#[test]
fn test_combo_plays_multiple_and_resets() {
    let mut session = our_turn(&["random2", "skip", "random2"]);
    session.select_combo(2).unwrap();

    assert_eq!(
        session.play_card(2),
        Ok(Command::PlayMultiple {
            count: 2,
            card: Card::from("random2"),
        })
    );
    assert_eq!(session.combo(), Combo::SINGLE);
}

#[test]
fn test_combo_without_enough_copies_keeps_selection() {
    let mut session = our_turn(&["random2", "skip", "random2"]);
    session.select_combo(3).unwrap();

    assert_eq!(
        session.play_card(0),
        Err(SessionError::InsufficientCombo {
            card: Card::from("random2"),
            needed: 3,
            held: 2,
        })
    );
    assert_eq!(session.combo().multiplier(), 3);
}

#[test]
fn test_combo_three_with_three_copies() {
    let mut session = our_turn(&["attack", "skip", "attack", "attack"]);
    session.select_combo(3).unwrap();

    assert_eq!(
        session.play_card(3),
        Ok(Command::PlayMultiple {
            count: 3,
            card: Card::from("attack"),
        })
    );
    assert_eq!(session.combo(), Combo::SINGLE);

    // The selector is back to single plays: the next click plays one card.
    assert_eq!(session.play_card(1), Ok(Command::Play(1)));
}

#[test]
fn test_combo_two_with_one_copy_emits_nothing() {
    let mut session = our_turn(&["random2", "skip"]);
    session.select_combo(2).unwrap();

    assert_eq!(
        session.play_card(0),
        Err(SessionError::InsufficientCombo {
            card: Card::from("random2"),
            needed: 2,
            held: 1,
        })
    );
    assert_eq!(session.combo().multiplier(), 2);
}

#[test]
fn test_combo_off_ignores_clicks() {
    let mut session = our_turn(&["skip"]);
    session.select_combo(0).unwrap();
    assert_eq!(session.play_card(0), Err(SessionError::ComboDeselected));
    assert_eq!(session.select_combo(4), Err(SessionError::InvalidCombo(4)));
}

#[test]
fn test_draw_rules() {
    let mut session = our_turn(&[]);
    assert_eq!(session.draw(), Ok(Command::Draw));

    session.table.draw_pile = false;
    assert_eq!(session.draw(), Err(SessionError::EmptyDrawPile));

    session.table.draw_pile = true;
    session.set_now_playing("bob".into());
    assert_eq!(session.draw(), Err(SessionError::NotYourTurn));
}

// =========================================================================
// Questions
// =========================================================================

#[test]
fn test_favour_what_click_becomes_answer() {
    let mut session = active();
    session.hand.replace(hand(&["skip", "random1", "nope"]));
    session.set_now_playing("bob".into());
    session.ask(QuestionKind::FavourWhat, Some("bob".into()));

    // Not our turn and a random card, but it is an answer, not a play.
    assert_eq!(
        session.play_card(1),
        Ok(Command::Answer {
            kind: QuestionKind::FavourWhat,
            answer: "1".into(),
        })
    );
    assert_eq!(session.pending_question(), None);

    // The next click is an ordinary play again.
    assert_eq!(session.play_card(0), Err(SessionError::NotYourTurn));
}

#[test]
fn test_favour_what_click_still_honours_lock() {
    let mut session = our_turn(&["skip"]);
    session.ask(QuestionKind::FavourWhat, None);
    session.gate.locked = true;
    assert_eq!(session.play_card(0), Err(SessionError::Locked));
    assert!(session.pending_question().is_some());
}

#[test]
fn test_favour_what_typed_answer_honours_lock() {
    let mut session = our_turn(&["skip", "nope", "defuse"]);
    session.ask(QuestionKind::FavourWhat, Some("bob".into()));
    session.gate.locked = true;

    assert_eq!(session.answer("2"), Err(SessionError::Locked));
    assert!(session.pending_question().is_some());

    session.gate.locked = false;
    assert_eq!(
        session.answer("2").unwrap().map(|c| c.to_string()),
        Some("a favour_what 2".to_string())
    );
}

#[test]
fn test_locked_does_not_block_player_answers() {
    let mut session = our_turn(&[]);
    session.gate.locked = true;
    session.ask(QuestionKind::FavourWho, None);
    assert!(session.answer("bob").unwrap().is_some());
}

#[test]
fn test_generic_answer_is_one_word() {
    let mut session = active();
    session.ask(QuestionKind::Generic("pick_colour".into()), None);

    assert!(matches!(
        session.answer("light blue"),
        Err(SessionError::InvalidAnswer { .. })
    ));
    assert_eq!(
        session.answer("teal").unwrap().map(|c| c.to_string()),
        Some("a pick_colour teal".to_string())
    );
}

#[test]
fn test_other_question_blocks_play_and_draw() {
    let mut session = our_turn(&["skip"]);
    session.ask(QuestionKind::RandomWho, None);
    assert_eq!(
        session.play_card(0),
        Err(SessionError::QuestionPending(QuestionKind::RandomWho))
    );
    assert_eq!(
        session.draw(),
        Err(SessionError::QuestionPending(QuestionKind::RandomWho))
    );
}

#[test]
fn test_answer_player_question() {
    let mut session = our_turn(&["random1", "random1"]);
    session.ask(QuestionKind::RandomWho, None);

    assert_eq!(
        session.choices(),
        Some(Choices::Players(vec!["bob".into(), "carol".into()]))
    );
    assert!(matches!(
        session.answer("alice"),
        Err(SessionError::InvalidAnswer { .. })
    ));
    assert!(session.pending_question().is_some());

    let command = session.answer("carol").unwrap().unwrap();
    assert_eq!(command.to_string(), "a random_who carol");
    assert_eq!(session.pending_question(), None);
}

#[test]
fn test_answer_card_type_question() {
    let mut session = our_turn(&[]);
    session.ask(QuestionKind::StealWhat, None);
    assert!(session.answer("exploding").is_err());
    let command = session.answer("defuse").unwrap().unwrap();
    assert_eq!(command.to_string(), "a steal_what defuse");
}

#[test]
fn test_answer_without_question_is_noop() {
    let mut session = active();
    assert_eq!(session.answer("bob"), Ok(None));
}

#[test]
fn test_cancel_returns_to_none() {
    let mut session = active();
    session.ask(QuestionKind::FavourWho, None);
    assert!(session.cancel_question().is_some());
    assert_eq!(session.pending_question(), None);
    assert_eq!(session.choices(), None);
}

#[test]
fn test_new_question_replaces_pending() {
    let mut session = active();
    session.ask(QuestionKind::FavourWho, None);
    let replaced = session.ask(QuestionKind::StealWho, None);
    assert_eq!(
        replaced.map(|q| q.kind),
        Some(QuestionKind::FavourWho)
    );
    assert_eq!(
        session.pending_question().map(|q| q.kind.clone()),
        Some(QuestionKind::StealWho)
    );
}

#[test]
fn test_defuse_position_bounded_by_cards_left() {
    let mut session = active();
    session.table.cards_left = Some(4);
    session.ask(QuestionKind::DefusePos, None);
    assert!(session.answer("5").is_err());
    assert_eq!(
        session.answer("4").unwrap().map(|c| c.to_string()),
        Some("a defuse_pos 4".to_string())
    );
}

// =========================================================================
// Chat and snapshot
// =========================================================================

#[test]
fn test_chat_and_raw_commands() {
    let session = active();
    assert_eq!(
        session.chat("hello there").unwrap().map(|c| c.to_string()),
        Some("chat hello there".to_string())
    );
    assert_eq!(
        session.chat("/start").unwrap().map(|c| c.to_string()),
        Some("start".to_string())
    );
    assert_eq!(session.chat("").unwrap(), None);
}

#[test]
fn test_snapshot_serializes() {
    let mut session = our_turn(&["defuse", "nope"]);
    session.ask(QuestionKind::FavourWhat, Some("bob".into()));

    let snapshot = session.snapshot();
    assert!(snapshot.our_turn);
    assert_eq!(snapshot.phase, ConnectionPhase::Active);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["name"], "alice");
    assert_eq!(json["phase"], "Active");
    assert_eq!(json["hand"], serde_json::json!(["defuse", "nope"]));
    assert_eq!(json["combo"], 1);
    assert_eq!(json["pending_question"]["kind"], "favour_what");
    assert_eq!(json["pending_question"]["asker"], "bob");
    assert_eq!(json["roster"]["players"][1], "bob");
}
