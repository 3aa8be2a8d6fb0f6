use std::fmt;

use crate::{Board, Square};

/// A move together with the position it produces.
///
/// `square` is `None` for a pass, in which case `board` is the unchanged
/// position. Two actions are equal when both the square and the resulting
/// board match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Action {
    square: Option<Square>,
    board: Board,
}

impl Action {
    pub const fn place(square: Square, board: Board) -> Self {
        Action {
            square: Some(square),
            board,
        }
    }

    pub const fn pass(board: Board) -> Self {
        Action {
            square: None,
            board,
        }
    }

    #[inline]
    pub const fn square(&self) -> Option<Square> {
        self.square
    }

    #[inline]
    pub const fn board(&self) -> Board {
        self.board
    }

    #[inline]
    pub const fn is_pass(&self) -> bool {
        self.square.is_none()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.square {
            Some(sq) => write!(f, "{sq}"),
            None => write!(f, "pass"),
        }
    }
}
