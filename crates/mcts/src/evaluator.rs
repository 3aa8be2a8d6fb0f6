//! Leaf evaluation for MCTS.
//!
//! The engine only needs a game result for the leaf it just reached; how
//! that result is produced sits behind the `Evaluator` trait.

use othello_board::{Bitboard, GameState, Square};
use othello_core::{Player, Reward};
use rand::Rng;
use std::cell::RefCell;

/// Trait for evaluating game positions.
pub trait Evaluator {
    /// Estimate the result of the game from `state`, as seen by
    /// `perspective`.
    fn evaluate(&self, state: &GameState, perspective: Player) -> Reward;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, state: &GameState, perspective: Player) -> Reward {
        (**self).evaluate(state, perspective)
    }
}

/// How a playout picks each move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RolloutPolicy {
    /// Any legal square, uniformly.
    #[default]
    Uniform,
    /// A corner whenever one is available, otherwise uniform.
    CornersFirst,
}

/// Evaluator that plays the game out at random and scores the final board.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,
    policy: RolloutPolicy,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a uniform rollout evaluator.
    pub fn new(rng: R) -> Self {
        Self::with_policy(rng, RolloutPolicy::Uniform)
    }

    pub fn with_policy(rng: R, policy: RolloutPolicy) -> Self {
        Self {
            rng: RefCell::new(rng),
            policy,
        }
    }

    pub fn policy(&self) -> RolloutPolicy {
        self.policy
    }

    fn pick(&self, moves: Bitboard) -> Option<Square> {
        let mut rng = self.rng.borrow_mut();
        match self.policy {
            RolloutPolicy::CornersFirst if (moves & Bitboard::CORNERS).is_not_empty() => {
                (moves & Bitboard::CORNERS).choose(&mut *rng)
            }
            _ => moves.choose(&mut *rng),
        }
    }

    /// Play from `state` until neither side can move.
    ///
    /// A side without a square passes; two passes in a row end the game.
    pub fn rollout(&self, state: &GameState, perspective: Player) -> Reward {
        let mut board = state.board;
        let mut player = state.to_move;
        let mut passed = false;

        loop {
            match self.pick(board.valid_moves(player)) {
                Some(sq) => {
                    board = board.place_at_unchecked(player, sq);
                    passed = false;
                }
                None if passed => break,
                None => passed = true,
            }
            player = player.opponent();
        }

        Reward::from_counts(board.count(perspective), board.count(perspective.opponent()))
    }
}

impl<R: Rng> Evaluator for RolloutEvaluator<R> {
    fn evaluate(&self, state: &GameState, perspective: Player) -> Reward {
        self.rollout(state, perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_board::Board;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_final_state_is_scored_directly() {
        let board = Board::new(Square::A1.bitboard() | Square::A2.bitboard(), Square::H8.bitboard()).unwrap();
        let state = GameState::new(board, 0, Player::White);
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(0));

        assert_eq!(evaluator.evaluate(&state, Player::Black), Reward::Win);
        assert_eq!(evaluator.evaluate(&state, Player::White), Reward::Loss);
    }

    #[test]
    fn test_equal_counts_draw() {
        let board = Board::new(Square::A1.bitboard(), Square::H8.bitboard()).unwrap();
        let state = GameState::new(board, 0, Player::Black);
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(0));
        assert_eq!(evaluator.evaluate(&state, Player::White), Reward::Draw);
    }

    #[test]
    fn test_forced_line() {
        // Black: D1 flips C1 and wipes white out.
        let board = Board::new(
            Square::A1.bitboard() | Square::B1.bitboard(),
            Square::C1.bitboard(),
        )
        .unwrap();
        let state = GameState::new(board, 0, Player::Black);
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(3));
        for _ in 0..5 {
            assert_eq!(evaluator.evaluate(&state, Player::Black), Reward::Win);
        }
    }

    #[test]
    fn test_rollout_deterministic_with_seed() {
        let state = GameState::initial();
        let a = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
        let b = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
        for _ in 0..20 {
            assert_eq!(a.evaluate(&state, Player::Black), b.evaluate(&state, Player::Black));
        }
    }

    #[test]
    fn test_rollouts_produce_mixed_results() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(7));
        let results: Vec<Reward> = (0..50)
            .map(|_| evaluator.evaluate(&GameState::initial(), Player::Black))
            .collect();
        assert!(results.contains(&Reward::Win));
        assert!(results.contains(&Reward::Loss));
    }

    #[test]
    fn test_corners_first_policy() {
        let evaluator = RolloutEvaluator::with_policy(ChaCha8Rng::seed_from_u64(1), RolloutPolicy::CornersFirst);
        let moves = Square::A1.bitboard() | Square::D3.bitboard() | Square::E6.bitboard();
        for _ in 0..10 {
            assert_eq!(evaluator.pick(moves), Some(Square::A1));
        }
        assert_eq!(evaluator.pick(Square::D3.bitboard()), Some(Square::D3));
        assert_eq!(evaluator.pick(Bitboard::EMPTY), None);
    }

    #[test]
    fn test_evaluator_by_reference() {
        fn score<E: Evaluator>(e: E) -> Reward {
            let board = Board::new(Square::A1.bitboard() | Square::A2.bitboard(), Square::H8.bitboard()).unwrap();
            e.evaluate(&GameState::new(board, 0, Player::Black), Player::Black)
        }
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(0));
        assert_eq!(score(&evaluator), Reward::Win);
    }
}
