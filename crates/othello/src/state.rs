use othello_core::Player;

use crate::{Action, Bitboard, Board};

/// A position plus whose turn it is and how many plies led to it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GameState {
    pub board: Board,
    /// Plies played so far, passes included.
    pub steps: u32,
    pub to_move: Player,
}

impl GameState {
    pub const fn new(board: Board, steps: u32, to_move: Player) -> Self {
        GameState {
            board,
            steps,
            to_move,
        }
    }

    /// Starting position with Black to move.
    pub const fn initial() -> Self {
        Self::new(Board::initial(), 0, Player::Black)
    }

    #[inline]
    pub fn valid_moves(&self) -> Bitboard {
        self.board.valid_moves(self.to_move)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.board.is_final()
    }

    /// The state after `action` has been played by the side to move.
    pub fn apply(&self, action: &Action) -> GameState {
        GameState {
            board: action.board(),
            steps: self.steps + 1,
            to_move: self.to_move.opponent(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
