//! Game driver: plays one full game between two agents.

use othello_core::{OthelloError, Player, Result};

use crate::{Action, Agent, Board, GameState, Square};

/// One ply as seen by an observer of [`play_game`].
#[derive(Debug)]
pub struct Turn<'a> {
    /// The state before the move.
    pub state: &'a GameState,
    pub action: &'a Action,
}

/// Summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    /// Squares played in order, `None` for a pass.
    pub moves: Vec<Option<Square>>,
    /// Final position.
    pub board: Board,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// Disc counts as (black, white).
    pub fn score(&self) -> (u32, u32) {
        (
            self.board.count(Player::Black),
            self.board.count(Player::White),
        )
    }

    pub fn passes(&self) -> usize {
        self.moves.iter().filter(|m| m.is_none()).count()
    }
}

/// Plays a game from the initial position until neither side can move.
///
/// Every action returned by an agent is checked against the rules and then
/// forwarded to the other agent's `opponent_move_callback`. `observer` sees
/// each ply before it is applied.
///
/// # Errors
/// Propagates agent errors, and returns `OthelloError::IllegalMove` if an
/// agent returns an action that does not match the position.
pub fn play_game<B, W, F>(black: &mut B, white: &mut W, mut observer: F) -> Result<GameRecord>
where
    B: Agent + ?Sized,
    W: Agent + ?Sized,
    F: FnMut(&Turn<'_>),
{
    black.initialize();
    white.initialize();

    let mut state = GameState::initial();
    let mut moves = Vec::new();

    while !state.is_final() {
        let player = state.to_move;
        let action = match player {
            Player::Black => black.select_move(&state.board, player)?,
            Player::White => white.select_move(&state.board, player)?,
        };

        let expected = state.board.action(player, action.square())?;
        if expected != action {
            return Err(OthelloError::IllegalMove {
                square: action.square().map(Square::index),
                player,
            });
        }
        log::trace!("ply {}: {} plays {}", state.steps, player, action);
        observer(&Turn {
            state: &state,
            action: &action,
        });

        match player {
            Player::Black => white.opponent_move_callback(&action)?,
            Player::White => black.opponent_move_callback(&action)?,
        }
        moves.push(action.square());
        state = state.apply(&action);
    }

    let record = GameRecord {
        moves,
        board: state.board,
    };
    let (b, w) = record.score();
    log::debug!("game over after {} plies: black {} - {} white", state.steps, b, w);
    Ok(record)
}

/// Replays `moves` from the initial position, `None` standing for a pass.
///
/// # Errors
/// Returns `OthelloError::IllegalMove` at the first move that is not legal,
/// and `OthelloError::GameOver` if moves remain after the game has ended.
pub fn replay<I>(moves: I) -> Result<GameState>
where
    I: IntoIterator<Item = Option<Square>>,
{
    let mut state = GameState::initial();
    for square in moves {
        if state.is_final() {
            return Err(OthelloError::GameOver);
        }
        let action = state.board.action(state.to_move, square)?;
        state = state.apply(&action);
    }
    Ok(state)
}
