//! Perft (Performance Test) for validating move generation correctness.
//!
//! Perft counts the leaf nodes of the game tree at a given depth. A pass
//! counts as a ply, and a finished game is a leaf however deep it is.

use std::collections::{HashSet, VecDeque};

use othello_board::{Action, Board, GameState};
use othello_core::Player;

/// Count all leaf nodes at a given depth
fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 || state.is_final() {
        return 1;
    }

    let moves = state.valid_moves();
    if moves.is_empty() {
        return perft(&state.apply(&Action::pass(state.board)), depth - 1);
    }
    if depth == 1 {
        return moves.popcount() as u64;
    }

    moves
        .iter()
        .map(|sq| {
            let action = Action::place(sq, state.board.place_at_unchecked(state.to_move, sq));
            perft(&state.apply(&action), depth - 1)
        })
        .sum()
}

/// Positions reachable in at most `depth` plies, counting boards that are
/// mirror images of each other (with the same side to move) once.
fn distinct_positions(depth: u32) -> usize {
    let start = GameState::initial();
    let mut seen: HashSet<(Player, Board)> = HashSet::from([(start.to_move, start.board)]);
    let mut queue = VecDeque::from([(depth, start)]);

    while let Some((remaining, state)) = queue.pop_front() {
        let next = state.to_move.opponent();
        let moves = state.valid_moves();
        let successors: Vec<Board> = if moves.is_empty() {
            vec![state.board]
        } else {
            moves.iter().map(|sq| state.board.place_at_unchecked(state.to_move, sq)).collect()
        };

        for board in successors {
            if board.symmetries().iter().any(|image| seen.contains(&(next, *image))) {
                continue;
            }
            seen.insert((next, board));
            if remaining > 1 {
                queue.push_back((remaining - 1, GameState::new(board, state.steps + 1, next)));
            }
        }
    }
    seen.len()
}

// =============================================================================
// Starting Position Tests
// =============================================================================

#[test]
fn test_perft_starting_depth_1() {
    assert_eq!(perft(&GameState::initial(), 1), 4);
}

#[test]
fn test_perft_starting_depth_2() {
    assert_eq!(perft(&GameState::initial(), 2), 12);
}

#[test]
fn test_perft_starting_depth_3() {
    assert_eq!(perft(&GameState::initial(), 3), 56);
}

#[test]
fn test_perft_starting_depth_4() {
    assert_eq!(perft(&GameState::initial(), 4), 244);
}

#[test]
fn test_perft_starting_depth_5() {
    assert_eq!(perft(&GameState::initial(), 5), 1396);
}

#[test]
fn test_perft_starting_depth_6() {
    assert_eq!(perft(&GameState::initial(), 6), 8200);
}

// =============================================================================
// Symmetry-reduced counts
// =============================================================================

#[test]
fn test_distinct_positions_depth_1() {
    // All four openings are images of one another.
    assert_eq!(distinct_positions(1), 1 + 1);
}

#[test]
fn test_distinct_positions_depth_5() {
    assert_eq!(distinct_positions(5), 1 + 400);
}

#[test]
fn test_distinct_positions_depth_7() {
    assert_eq!(distinct_positions(7), 12832);
}

#[test]
fn test_symmetric_openings_have_same_subtree() {
    let initial = GameState::initial();
    let counts: Vec<u64> = initial
        .valid_moves()
        .iter()
        .map(|sq| {
            let action = initial.board.action(initial.to_move, Some(sq)).unwrap();
            perft(&initial.apply(&action), 4)
        })
        .collect();
    assert_eq!(counts.len(), 4);
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(counts.iter().sum::<u64>(), perft(&initial, 5));
}
