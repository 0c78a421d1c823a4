//! Integration tests for shapego
//!
//! Rules, session and generator behavior exercised through the public API,
//! with positions set up from GTP vertex text the way a controller would.

use shapego::board::{Color, Intersection, Point, Score};
use shapego::coord::{Vertex, parse_vertex};
use shapego::error::{EmptyHistory, MoveError};
use shapego::game::{Action, Game};
use shapego::genmove::{GeneratedMove, GeneratorMode, MoveGenerator};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of moves on a 9x9 board. Moves alternate between Black
/// and White; "pass" can be used to pass.
fn setup_position(moves: &[&str]) -> Game {
    let mut game = Game::new(9).unwrap();
    for mv in moves {
        match parse_vertex(mv, 9).unwrap() {
            Vertex::Pass => game.pass(),
            Vertex::Point(p) => game
                .play(p)
                .unwrap_or_else(|e| panic!("illegal move {mv} in setup: {e}")),
        }
    }
    game
}

fn point(text: &str) -> Point {
    match parse_vertex(text, 9).unwrap() {
        Vertex::Point(p) => p,
        Vertex::Pass => panic!("{text} is a pass"),
    }
}

/// Every stone on the board belongs to a group with at least one liberty.
fn assert_no_dead_groups(game: &Game) {
    for p in game.board().points() {
        if !game.intersection_at(p).is_empty() {
            assert!(
                game.group_liberties(p).unwrap() > 0,
                "group at {p:?} has no liberties"
            );
        }
    }
}

// =============================================================================
// Basic placement
// =============================================================================

#[test]
fn test_play_center_and_occupied() {
    let mut game = Game::new(9).unwrap();
    game.play(point("E5")).unwrap();
    assert_eq!(game.intersection_at((4, 4)), Intersection::Black);

    assert_eq!(game.play(point("E5")), Err(MoveError::Occupied));
    assert_eq!(game.current_player(), Color::White);
}

#[test]
fn test_out_of_bounds() {
    let mut game = Game::new(9).unwrap();
    assert_eq!(game.play((9, 0)), Err(MoveError::OutOfBounds));
    assert_eq!(game.play((0, 100)), Err(MoveError::OutOfBounds));
    assert_eq!(game.move_count(), 0);
}

// =============================================================================
// Capture tests
// =============================================================================

#[test]
fn test_capture_surrounded_center_stone() {
    // White at E5, Black closes the last liberty
    let mut game = setup_position(&["D5", "E5", "F5", "pass", "E4", "pass"]);
    game.play(point("E6")).unwrap();

    assert_eq!(game.intersection_at((4, 4)), Intersection::Empty);
    match &game.history().last().unwrap().action {
        Action::Play(placement) => assert_eq!(placement.captured, vec![(4, 4)]),
        other => panic!("expected a play, got {other:?}"),
    }
}

#[test]
fn test_capture_corner() {
    let mut game = setup_position(&["B2", "A1", "A2", "pass"]);
    game.play(point("B1")).unwrap();
    assert_eq!(game.intersection_at(point("A1")), Intersection::Empty);
}

#[test]
fn test_capture_two_stone_group() {
    let mut game = setup_position(&[
        "C4", "D4", "C5", "D5", "E4", "pass", "E5", "pass", "D3", "pass",
    ]);
    game.play(point("D6")).unwrap();
    assert_eq!(game.intersection_at(point("D4")), Intersection::Empty);
    assert_eq!(game.intersection_at(point("D5")), Intersection::Empty);
    assert_eq!(game.score().black, 81);
}

// =============================================================================
// Suicide tests
// =============================================================================

#[test]
fn test_suicide_single_stone() {
    let mut game = setup_position(&["A2", "pass", "B1"]);
    assert_eq!(game.play(point("A1")), Err(MoveError::Suicide));
    assert_eq!(game.intersection_at(point("A1")), Intersection::Empty);
    assert_eq!(game.current_player(), Color::White);
}

#[test]
fn test_filling_last_liberty_is_legal_when_it_captures() {
    // White A1 has one liberty at A2; Black A2 has none of its own
    let mut game = setup_position(&["B1", "A1", "pass", "B2", "pass", "A3"]);
    game.play(point("A2")).unwrap();
    assert_eq!(game.intersection_at(point("A1")), Intersection::Empty);
    assert_eq!(game.group_liberties(point("A2")), Some(1));
    assert_no_dead_groups(&game);
}

// =============================================================================
// Ko tests
// =============================================================================

/// Position right after Black takes a ko at A2, capturing White A1.
fn ko_position() -> Game {
    let mut game = setup_position(&["B1", "A1", "pass", "B2", "pass", "A3"]);
    game.play(point("A2")).unwrap();
    game
}

#[test]
fn test_ko_recapture_rejected() {
    let mut game = ko_position();
    assert_eq!(game.play(point("A1")), Err(MoveError::Ko));
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.intersection_at(point("A2")), Intersection::Black);
}

#[test]
fn test_ko_recapture_allowed_after_exchange_elsewhere() {
    let mut game = ko_position();
    game.play(point("J9")).unwrap();
    game.play(point("J8")).unwrap();
    game.play(point("A1")).unwrap();
    assert_eq!(game.intersection_at(point("A2")), Intersection::Empty);
    // Now Black may not retake immediately
    assert_eq!(game.play(point("A2")), Err(MoveError::Ko));
}

#[test]
fn test_ko_recapture_allowed_after_pass() {
    let mut game = ko_position();
    game.pass();
    game.pass();
    assert!(game.play(point("A1")).is_ok());
}

#[test]
fn test_capturing_two_stones_is_not_ko() {
    // White A1 B1 with a single liberty at C1
    let mut game = setup_position(&["A2", "A1", "B2", "B1"]);
    game.play(point("C1")).unwrap();
    assert_eq!(game.intersection_at(point("A1")), Intersection::Empty);
    assert_eq!(game.intersection_at(point("B1")), Intersection::Empty);
    assert!(game.board().ko().is_none());
}

// =============================================================================
// Scoring tests
// =============================================================================

#[test]
fn test_score_empty_board() {
    let game = Game::new(9).unwrap();
    assert_eq!(game.score(), Score { black: 0, white: 0 });
}

#[test]
fn test_score_territory_and_dame() {
    // Black wall on column C, White wall on column E
    let mut moves = Vec::new();
    for row in 1..=9 {
        moves.push(format!("C{row}"));
        moves.push(format!("E{row}"));
    }
    let moves: Vec<&str> = moves.iter().map(String::as_str).collect();
    let game = setup_position(&moves);

    let score = game.score();
    // Columns A-C for Black, E-J for White, column D is dame
    assert_eq!(score.black, 27);
    assert_eq!(score.white, 45);
}

// =============================================================================
// Game flow tests
// =============================================================================

#[test]
fn test_two_passes_end_game() {
    let mut game = setup_position(&["E5"]);
    game.pass();
    assert!(!game.is_over());
    game.pass();
    assert!(game.is_over());

    game.undo().unwrap();
    assert!(!game.is_over());
    game.pass();
    assert!(game.is_over());
}

#[test]
fn test_pass_play_pass_does_not_end_game() {
    let mut game = Game::new(9).unwrap();
    game.pass();
    game.play(point("E5")).unwrap();
    game.pass();
    assert!(!game.is_over());
}

#[test]
fn test_undo_everything() {
    let mut game = setup_position(&["D5", "E5", "F5", "pass", "E4", "pass", "E6", "C3"]);
    while game.move_count() > 0 {
        game.undo().unwrap();
    }
    assert!(game.board().is_empty());
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.undo(), Err(EmptyHistory));
}

#[test]
fn test_play_undo_round_trip_random_games() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let mut game = Game::new(7).unwrap();

    for _ in 0..400 {
        let p = (rng.usize(..7), rng.usize(..7));
        let board = game.board().clone();
        let player = game.current_player();
        let passes = game.consecutive_passes();

        if game.play(p).is_err() {
            assert_eq!(game.board(), &board);
            continue;
        }
        game.undo().unwrap();
        assert_eq!(game.board(), &board, "undo of {p:?} drifted");
        assert_eq!(game.board().ko(), board.ko());
        assert_eq!(game.current_player(), player);
        assert_eq!(game.consecutive_passes(), passes);

        // Keep the move so the position evolves, with captures and kos
        game.play(p).unwrap();
        assert_no_dead_groups(&game);
    }
}

// =============================================================================
// Move generator tests
// =============================================================================

#[test]
fn test_generator_self_play_keeps_rules() {
    let mut game = Game::new(9).unwrap();
    let mut generator = MoveGenerator::with_seed(GeneratorMode::Heuristic, 3);

    let mut moves = 0;
    while !game.is_over() && moves < 9 * 9 * 3 {
        let before = game.move_count();
        generator.generate(&mut game);
        assert_eq!(game.move_count(), before + 1);
        assert_no_dead_groups(&game);
        moves += 1;
    }
}

#[test]
fn test_generator_random_mode_self_play() {
    let mut game = Game::new(7).unwrap();
    let mut generator = MoveGenerator::with_seed(GeneratorMode::Random, 11);

    for _ in 0..60 {
        if game.is_over() {
            break;
        }
        let mover = game.current_player();
        if let GeneratedMove::Play(p) = generator.generate(&mut game) {
            assert_eq!(game.intersection_at(p), Intersection::from(mover));
        }
        assert_no_dead_groups(&game);
    }
}

#[test]
fn test_generator_state_is_per_game() {
    let mut first = Game::new(9).unwrap();
    let mut second = Game::new(9).unwrap();
    let mut generator = MoveGenerator::with_seed(GeneratorMode::Heuristic, 5);

    let a = generator.generate(&mut first);
    first.pass();
    generator.generate(&mut first);

    // Handing it another game starts the shape over
    let b = generator.generate(&mut second);
    assert_eq!(a, b);
}
