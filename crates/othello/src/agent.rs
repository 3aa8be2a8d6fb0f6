//! Move-selection strategies.
//!
//! An [`Agent`] is told about the start of a game, about every move its
//! opponent makes, and is asked for its own moves in turn. Stateless agents
//! ignore the notifications; tree-search agents use them to keep their
//! search tree aligned with the real game.

use othello_core::{OthelloError, Player, Result};
use rand::Rng;

use crate::{Action, Bitboard, Board};

/// A player strategy.
pub trait Agent {
    /// Called once before the first move of a game.
    fn initialize(&mut self) {}

    /// Called after the opponent has played `action`.
    fn opponent_move_callback(&mut self, _action: &Action) -> Result<()> {
        Ok(())
    }

    /// Chooses the move `player` makes on `board`.
    ///
    /// Returns a pass action when `player` has no legal square.
    ///
    /// # Errors
    /// Returns `OthelloError::GameOver` if `board` is final.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn initialize(&mut self) {
        (**self).initialize()
    }

    fn opponent_move_callback(&mut self, action: &Action) -> Result<()> {
        (**self).opponent_move_callback(action)
    }

    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        (**self).select_move(board, player)
    }
}

/// Plays a uniformly random legal move.
pub struct RandomAgent<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        if board.is_final() {
            return Err(OthelloError::GameOver);
        }
        let moves = board.valid_moves(player);
        match moves.choose(&mut self.rng) {
            Some(sq) => Ok(Action::place(sq, board.place_at_unchecked(player, sq))),
            None => Ok(Action::pass(*board)),
        }
    }
}

/// One-ply heuristic player: grabs a corner when it can, otherwise avoids
/// moves that hand the opponent a corner, otherwise plays randomly.
pub struct CornerAgent<R: Rng> {
    rng: R,
}

impl<R: Rng> CornerAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for CornerAgent<R> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        if board.is_final() {
            return Err(OthelloError::GameOver);
        }
        let moves = board.valid_moves(player);

        let corners = moves & Bitboard::CORNERS;
        let safe: Bitboard = moves
            .iter()
            .filter(|&sq| {
                let next = board.place_at_unchecked(player, sq);
                (next.valid_moves(player.opponent()) & Bitboard::CORNERS).is_empty()
            })
            .collect();

        let candidates = if corners.is_not_empty() {
            corners
        } else if safe.is_not_empty() {
            safe
        } else {
            moves
        };

        match candidates.choose(&mut self.rng) {
            Some(sq) => Ok(Action::place(sq, board.place_at_unchecked(player, sq))),
            None => Ok(Action::pass(*board)),
        }
    }
}
