//! Othello Core - shared types
//!
//! This crate holds the vocabulary every other crate in the workspace speaks:
//!
//! - [`Player`] - the two sides, Black moving first
//! - [`Reward`] - Win/Draw/Loss from one player's perspective
//! - [`OthelloError`] - the error taxonomy and its [`Result`] alias

mod error;
mod player;
mod types;

pub use error::{OthelloError, Result};
pub use player::Player;
pub use types::Reward;
