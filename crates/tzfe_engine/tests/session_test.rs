//! Tests for the session controller driven through the public API.

use tzfe_engine::invariants::{BoardInvariants, InvariantSet};
use tzfe_engine::{
    Direction, EventRecorder, GameEvent, GameMove, Session, SessionBuilder, SessionConfig,
    TileMoveType,
};

fn seeded(config: SessionConfig, seed: u64) -> Session<EventRecorder> {
    SessionBuilder::new(config)
        .observer(EventRecorder::new())
        .seed(seed)
        .build()
        .expect("valid configuration")
}

/// Cycles through the directions until one changes the board.
fn play_changing_move(session: &mut Session<EventRecorder>) -> Option<Direction> {
    for direction in Direction::ALL {
        let before = session.board().clone();
        session.action_move(direction);
        if session.board() != &before {
            return Some(direction);
        }
    }
    None
}

#[test]
fn test_same_seed_same_game() {
    let moves = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Left,
        Direction::Up,
    ];

    let mut first = seeded(SessionConfig::default(), 2024);
    let mut second = seeded(SessionConfig::default(), 2024);
    first.new_game(0);
    second.new_game(0);

    for direction in moves {
        assert_eq!(first.action_move(direction), second.action_move(direction));
        assert_eq!(first.board(), second.board());
    }
    assert_eq!(first.score(), second.score());
    assert_eq!(first.history(), second.history());
}

#[test]
fn test_new_game_resets_everything() {
    let mut session = seeded(SessionConfig::new(3), 5);
    session.new_game(0);
    for _ in 0..10 {
        if play_changing_move(&mut session).is_none() {
            break;
        }
    }

    session.new_game(session.score());
    assert_eq!(session.board().occupied(), 2);
    assert_eq!(session.num_empty(), 7);
    assert_eq!(session.score(), 0);
    assert_eq!(session.max_tile(), 2);
    assert_eq!(session.moves(), 1);
    assert_eq!(session.history().len(), 1);
    assert!(session.board().tiles().iter().all(|&t| t == 0 || t == 2));
}

#[test]
fn test_invariants_hold_through_random_play() {
    for seed in 0..20 {
        let mut session = seeded(SessionConfig::new(4), seed);
        session.new_game(0);

        let mut step = 0usize;
        while session.has_moves_remaining() && step < 400 {
            let direction = Direction::ALL[(step * 7 + seed as usize) % 4];
            session.action_move(direction);
            assert!(
                BoardInvariants::check_all(session.board()).is_ok(),
                "seed {} step {}",
                seed,
                step
            );
            step += 1;
        }
    }
}

#[test]
fn test_score_delta_matches_merge_transitions() {
    let mut session = seeded(SessionConfig::default(), 99);
    session.new_game(0);

    for step in 0..200 {
        if !session.has_moves_remaining() {
            break;
        }
        let before = session.score();
        session.action_move(Direction::ALL[step % 4]);
        let merged: u64 = session
            .transitions()
            .of_kind(TileMoveType::Merge)
            .map(|t| u64::from(t.value()))
            .sum();
        assert_eq!(session.score() - before, merged);
    }
}

#[test]
fn test_one_outcome_per_move_request() {
    let mut session = seeded(SessionConfig::default(), 3);
    session.new_game(0);
    session.observer_mut().drain();

    for step in 0..30 {
        session.action_move(Direction::ALL[step % 4]);
    }
    assert_eq!(session.observer().outcomes().count(), 30);
}

#[test]
fn test_transitions_only_replayed_for_changing_moves() {
    let mut session = seeded(SessionConfig::default(), 8);
    session.new_game(0);

    for step in 0..40 {
        session.observer_mut().drain();
        let changed_board = {
            let before = session.board().clone();
            session.action_move(Direction::ALL[step % 4]);
            session.board() != &before
        };
        let replayed = session.observer().transitions().count();
        if changed_board {
            assert_eq!(replayed, session.transitions().len());
            assert!(replayed > 0);
        } else {
            assert_eq!(replayed, 0);
        }
    }
}

#[test]
fn test_undo_round_trip() {
    let mut session = seeded(SessionConfig::default(), 17);
    session.new_game(0);
    play_changing_move(&mut session).expect("opening board can move");

    let tiles = session.board().tiles().to_vec();
    let score = session.score();
    let num_empty = session.num_empty();
    let max_tile = session.max_tile();
    let moves = session.moves();

    play_changing_move(&mut session).expect("board can move again");
    assert!(session.go_back_one_move());

    assert_eq!(session.board().tiles(), tiles.as_slice());
    assert_eq!(session.score(), score);
    assert_eq!(session.num_empty(), num_empty);
    assert_eq!(session.max_tile(), max_tile);
    assert_eq!(session.moves(), moves);
}

#[test]
fn test_undo_depth_is_bounded() {
    let config = SessionConfig::default().with_max_undos(2);
    let mut session = seeded(config, 23);
    session.new_game(0);

    for _ in 0..6 {
        play_changing_move(&mut session).expect("early board can move");
        assert!(session.history().len() <= 3);
    }
    assert_eq!(session.history().len(), 3);

    assert!(session.go_back_one_move());
    assert!(session.go_back_one_move());
    session.observer_mut().drain();
    assert!(!session.go_back_one_move());
    assert_eq!(session.observer().events(), &[GameEvent::UndoRejected]);
}

#[test]
fn test_undo_emits_full_board_reset() {
    let mut session = seeded(SessionConfig::new(5), 31);
    session.new_game(0);
    let direction = play_changing_move(&mut session).expect("opening board can move");
    play_changing_move(&mut session).expect("board can move again");
    session.observer_mut().drain();

    assert!(session.go_back_one_move());
    let resets: Vec<_> = session.observer().transitions().collect();
    assert_eq!(resets.len(), 25);
    assert!(resets.iter().all(|t| t.kind() == TileMoveType::Reset));
    for (index, reset) in resets.iter().enumerate() {
        assert_eq!(reset.target(), index);
        assert_eq!(Some(reset.value()), session.tile(index));
    }

    let outcome = session.observer().outcomes().last().copied().unwrap();
    assert_eq!(outcome.game_move, GameMove::from(direction));
    assert!(outcome.succeeded);
}

#[test]
fn test_tile_lookup_out_of_range() {
    let mut session = seeded(SessionConfig::new(2), 1);
    session.new_game(0);
    assert!(session.tile(3).is_some());
    assert_eq!(session.tile(4), None);
}
