use thiserror::Error;

use crate::Player;

/// Errors raised by the Othello engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OthelloError {
    #[error("overlapping discs: black={black:#018x} white={white:#018x}")]
    InvalidState { black: u64, white: u64 },

    /// `square` is the board index of the attempted move, `None` for a pass.
    #[error("illegal move for {player}: {}", describe_square(.square))]
    IllegalMove { square: Option<u8>, player: Player },

    #[error("invalid square {0:?}: expected [A-H][1-8]")]
    InvalidSquare(String),

    #[error("game is already over")]
    GameOver,

    #[error("search tree out of sync: {0}")]
    Desync(String),

    /// A player stopped answering, e.g. the console input was closed.
    #[error("game aborted: {0}")]
    Aborted(String),
}

fn describe_square(square: &Option<u8>) -> String {
    match *square {
        Some(index) if index < 64 => {
            let file = (b'A' + index % 8) as char;
            let rank = (b'1' + index / 8) as char;
            format!("{file}{rank}")
        }
        Some(index) => format!("#{index}"),
        None => "pass".to_string(),
    }
}

/// Convenience Result type for Othello operations
pub type Result<T> = std::result::Result<T, OthelloError>;
