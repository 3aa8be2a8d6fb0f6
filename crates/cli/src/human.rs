//! Console player reading coordinates line by line.

use std::io::{BufRead, Write};

use othello_board::{Action, Agent, Bitboard, Board, Square};
use othello_core::{OthelloError, Player, Result};

/// Space separated list of squares, e.g. "D3 C4 F5 E6".
pub fn format_moves(moves: Bitboard) -> String {
    moves.iter().map(|sq| sq.to_string()).collect::<Vec<_>>().join(" ")
}

/// Human player: shows the board, asks for a square, re-prompts on
/// anything unparsable or illegal. Passes happen without asking.
pub struct HumanAgent<I: BufRead, O: Write> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> HumanAgent<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Next line of input as raw bytes; only a closed or failing stream
    /// is an error.
    fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        match self.input.read_until(b'\n', &mut line) {
            Ok(0) => Err(OthelloError::Aborted("input closed".to_string())),
            Ok(_) => Ok(line),
            Err(e) => Err(OthelloError::Aborted(e.to_string())),
        }
    }

    fn say(&mut self, message: std::fmt::Arguments<'_>) -> Result<()> {
        self.output
            .write_fmt(message)
            .and_then(|()| self.output.flush())
            .map_err(|e| OthelloError::Aborted(e.to_string()))
    }
}

impl<I: BufRead, O: Write> Agent for HumanAgent<I, O> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        if board.is_final() {
            return Err(OthelloError::GameOver);
        }

        let moves = board.valid_moves(player);
        self.say(format_args!("\n{board}\n"))?;
        if moves.is_empty() {
            self.say(format_args!("{player} has no legal move and passes\n"))?;
            return board.action(player, None);
        }

        loop {
            self.say(format_args!("Legal moves: {}\n{player} {}> ", format_moves(moves), player.glyph()))?;
            let line = self.read_line()?;
            let parsed = match std::str::from_utf8(&line) {
                Ok(text) => text.trim().parse::<Square>(),
                Err(_) => Err(OthelloError::InvalidSquare(String::from_utf8_lossy(&line).trim().to_string())),
            };
            match parsed.and_then(|sq| board.action(player, Some(sq))) {
                Ok(action) => return Ok(action),
                Err(err @ (OthelloError::InvalidSquare(_) | OthelloError::IllegalMove { .. })) => {
                    self.say(format_args!("{err}, try again\n"))?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
