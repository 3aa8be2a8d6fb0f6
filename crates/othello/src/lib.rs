//! Othello Board - bitboard rules engine
//!
//! Positions are two disjoint 64-bit masks; legal moves and captures are
//! computed by shifting whole masks in the eight ray directions rather than
//! walking squares one at a time.
//!
//! # Example
//!
//! ```
//! use othello_board::{Board, Square};
//! use othello_core::Player;
//!
//! let board = Board::initial();
//! assert_eq!(board.valid_moves(Player::Black).popcount(), 4);
//!
//! let next = board.place_at(Player::Black, Square::D3).unwrap();
//! assert_eq!(next.count(Player::Black), 4);
//! assert_eq!(next.count(Player::White), 1);
//! ```

mod action;
mod agent;
mod bitboard;
mod board;
mod game;
mod square;
mod state;

pub use action::Action;
pub use agent::{Agent, CornerAgent, RandomAgent};
pub use bitboard::{Bitboard, BitboardIter, Direction};
pub use board::Board;
pub use game::{play_game, replay, GameRecord, Turn};
pub use square::Square;
pub use state::GameState;
