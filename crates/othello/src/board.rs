//! Othello position as a pair of disjoint occupancy bitboards.
//!
//! Move generation and capture resolution run the same fixed-depth flood
//! fill in all eight directions at once: a run of opponent discs is grown one
//! step per iteration with no early exit.

use std::fmt;

use othello_core::{OthelloError, Player, Result};

use crate::{Action, Bitboard, Direction, Square};

/// Longest run of opponent discs that can sit between two cells of a line.
const MAX_RUN: usize = 6;

/// An immutable Othello position.
///
/// Invariant: no square holds both a black and a white disc.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

/// Opponent discs reachable from `seed` by stepping in `dir` over a
/// contiguous run of `opp`.
#[inline]
fn run(seed: Bitboard, dir: Direction, opp: Bitboard) -> Bitboard {
    let mut x = seed.shift(dir) & opp;
    for _ in 1..MAX_RUN {
        x |= x.shift(dir) & opp;
    }
    x
}

impl Board {
    /// Creates a board from the two occupancy masks.
    ///
    /// # Errors
    /// Returns `OthelloError::InvalidState` if a square is claimed by both sides.
    pub fn new(black: Bitboard, white: Bitboard) -> Result<Self> {
        if (black & white).is_not_empty() {
            return Err(OthelloError::InvalidState {
                black: black.0,
                white: white.0,
            });
        }
        Ok(Board { black, white })
    }

    /// The standard starting position: white on D4 and E5, black on E4 and D5.
    pub const fn initial() -> Self {
        Board {
            black: Bitboard(0x0000_0008_1000_0000),
            white: Bitboard(0x0000_0010_0800_0000),
        }
    }

    #[inline]
    pub const fn discs(&self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    pub fn get(&self, sq: Square) -> Option<Player> {
        if self.black.contains(sq) {
            Some(Player::Black)
        } else if self.white.contains(sq) {
            Some(Player::White)
        } else {
            None
        }
    }

    /// Number of discs `player` has on the board
    #[inline]
    pub const fn count(&self, player: Player) -> u32 {
        self.discs(player).popcount()
    }

    /// All squares where `player` may legally place a disc.
    pub fn valid_moves(&self, player: Player) -> Bitboard {
        let mine = self.discs(player);
        let opp = self.discs(player.opponent());
        let empty = self.empty();

        let mut moves = Bitboard::EMPTY;
        for dir in Direction::ALL {
            moves |= run(mine, dir, opp).shift(dir) & empty;
        }
        moves
    }

    #[inline]
    pub fn is_legal(&self, player: Player, sq: Square) -> bool {
        self.valid_moves(player).contains(sq)
    }

    /// Opponent discs that placing at `sq` would flip.
    ///
    /// A run only counts when the step after it lands on one of the mover's
    /// discs; otherwise the run is zeroed by an all-clear mask.
    pub fn flips(&self, player: Player, sq: Square) -> Bitboard {
        let placed = sq.bitboard();
        let mine = self.discs(player) | placed;
        let opp = self.discs(player.opponent());

        let mut captured = Bitboard::EMPTY;
        for dir in Direction::ALL {
            let x = run(placed, dir, opp);
            let bounded = (x.shift(dir) & mine).is_not_empty() as u64;
            captured |= x & Bitboard(bounded.wrapping_neg());
        }
        captured
    }

    /// Places a disc for `player` at `sq` and flips every captured run.
    ///
    /// # Errors
    /// Returns `OthelloError::IllegalMove` if `sq` is not in `valid_moves(player)`.
    pub fn place_at(&self, player: Player, sq: Square) -> Result<Board> {
        if !self.is_legal(player, sq) {
            return Err(OthelloError::IllegalMove {
                square: Some(sq.index()),
                player,
            });
        }
        Ok(self.place_at_unchecked(player, sq))
    }

    /// Like [`Board::place_at`] without the legality check.
    ///
    /// The caller must pass a square taken from `valid_moves(player)`.
    pub fn place_at_unchecked(&self, player: Player, sq: Square) -> Board {
        debug_assert!(!self.occupied().contains(sq), "{sq} is occupied");
        let captured = self.flips(player, sq);
        let mine = self.discs(player) | sq.bitboard() | captured;
        let opp = self.discs(player.opponent()) ^ captured;
        match player {
            Player::Black => Board {
                black: mine,
                white: opp,
            },
            Player::White => Board {
                black: opp,
                white: mine,
            },
        }
    }

    /// Builds the action `player` takes by playing `square`, or by passing
    /// when `square` is `None`.
    ///
    /// # Errors
    /// Returns `OthelloError::IllegalMove` if the square is not legal, or if a
    /// pass is requested while `player` still has a legal square.
    pub fn action(&self, player: Player, square: Option<Square>) -> Result<Action> {
        match square {
            Some(sq) => Ok(Action::place(sq, self.place_at(player, sq)?)),
            None if self.valid_moves(player).is_empty() => Ok(Action::pass(*self)),
            None => Err(OthelloError::IllegalMove {
                square: None,
                player,
            }),
        }
    }

    /// True when neither side can move.
    pub fn is_final(&self) -> bool {
        self.valid_moves(Player::Black).is_empty() && self.valid_moves(Player::White).is_empty()
    }

    /// The side with more discs, None on a tie.
    pub fn winner(&self) -> Option<Player> {
        let black = self.count(Player::Black);
        let white = self.count(Player::White);
        if black > white {
            Some(Player::Black)
        } else if white > black {
            Some(Player::White)
        } else {
            None
        }
    }

    /// Mirror image across the A1-H8 diagonal.
    pub const fn flip_diag_a1_h8(&self) -> Board {
        Board {
            black: self.black.flip_diag_a1_h8(),
            white: self.white.flip_diag_a1_h8(),
        }
    }

    /// Mirror image across the A8-H1 diagonal.
    pub const fn flip_diag_a8_h1(&self) -> Board {
        Board {
            black: self.black.flip_diag_a8_h1(),
            white: self.white.flip_diag_a8_h1(),
        }
    }

    pub const fn rotate180(&self) -> Board {
        Board {
            black: self.black.rotate180(),
            white: self.white.rotate180(),
        }
    }

    /// The board and its images under the three symmetries that map the
    /// opening position onto itself.
    pub const fn symmetries(&self) -> [Board; 4] {
        [*self, self.flip_diag_a1_h8(), self.flip_diag_a8_h1(), self.rotate180()]
    }

    /// True when `other` is one of [`Board::symmetries`]. Equivalent boards
    /// have the same game value for the same player to move.
    pub fn equivalent(&self, other: &Board) -> bool {
        self.symmetries().contains(other)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  ABCDEFGH")?;
        for rank in 0..8 {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square(rank * 8 + file);
                let glyph = self.get(sq).map_or(' ', Player::glyph);
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board(black=0x{:016X}, white=0x{:016X})",
            self.black.0, self.white.0
        )?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(list: &[Square]) -> Bitboard {
        list.iter().copied().collect()
    }

    #[test]
    fn test_initial_position() {
        let board = Board::initial();
        assert_eq!(board.get(Square::D4), Some(Player::White));
        assert_eq!(board.get(Square::E5), Some(Player::White));
        assert_eq!(board.get(Square::E4), Some(Player::Black));
        assert_eq!(board.get(Square::D5), Some(Player::Black));
        assert_eq!(board.count(Player::Black), 2);
        assert_eq!(board.count(Player::White), 2);
        assert!(!board.is_final());
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::initial();
        assert_eq!(
            board.valid_moves(Player::Black),
            squares(&[Square::D3, Square::C4, Square::F5, Square::E6])
        );
        assert_eq!(
            board.valid_moves(Player::White),
            squares(&[Square::E3, Square::F4, Square::C5, Square::D6])
        );
    }

    #[test]
    fn test_opening_move_flips_one() {
        let board = Board::initial();
        for sq in board.valid_moves(Player::Black) {
            let next = board.place_at(Player::Black, sq).unwrap();
            assert_eq!(next.count(Player::Black), 4, "after {sq}");
            assert_eq!(next.count(Player::White), 1, "after {sq}");
            assert_eq!(next.get(sq), Some(Player::Black));
        }

        let next = board.place_at(Player::Black, Square::D3).unwrap();
        assert_eq!(next.get(Square::D4), Some(Player::Black));
        assert_eq!(next.get(Square::E5), Some(Player::White));
    }

    #[test]
    fn test_invalid_state() {
        let overlap = Board::new(Bitboard(0b11), Bitboard(0b10));
        assert!(matches!(
            overlap,
            Err(OthelloError::InvalidState { black: 3, white: 2 })
        ));
        assert!(Board::new(Bitboard(0b01), Bitboard(0b10)).is_ok());
    }

    #[test]
    fn test_illegal_move_rejected() {
        let board = Board::initial();
        // Occupied, and an empty square that captures nothing.
        for sq in [Square::D4, Square::A1, Square::C3] {
            assert_eq!(
                board.place_at(Player::Black, sq),
                Err(OthelloError::IllegalMove {
                    square: Some(sq.index()),
                    player: Player::Black,
                })
            );
        }
    }

    #[test]
    fn test_multi_direction_capture() {
        // Black A1, C1 (via B1), A3 (via A2), C3 (via B2); white B1, A2, B2.
        let black = squares(&[Square::C1, Square::A3, Square::C3]);
        let white = squares(&[Square::B1, Square::A2, Square::B2]);
        let board = Board::new(black, white).unwrap();

        assert!(board.is_legal(Player::Black, Square::A1));
        assert_eq!(board.flips(Player::Black, Square::A1), white);

        let next = board.place_at(Player::Black, Square::A1).unwrap();
        assert_eq!(next.count(Player::White), 0);
        assert_eq!(next.count(Player::Black), 7);
    }

    #[test]
    fn test_unbounded_run_not_captured() {
        // White run B1..G1 with nothing black behind it: A1 captures nothing
        // along rank 1, and H1 is empty so the run is open.
        let white = squares(&[
            Square::B1,
            Square::C1,
            Square::D1,
            Square::E1,
            Square::F1,
            Square::G1,
        ]);
        let black = squares(&[Square::H2]);
        let board = Board::new(black, white).unwrap();
        assert!(!board.is_legal(Player::Black, Square::A1));
        assert!(board.flips(Player::Black, Square::A1).is_empty());
    }

    #[test]
    fn test_longest_run_captured() {
        // Six white discs between A1 and H1.
        let white = squares(&[
            Square::B1,
            Square::C1,
            Square::D1,
            Square::E1,
            Square::F1,
            Square::G1,
        ]);
        let black = squares(&[Square::H1]);
        let board = Board::new(black, white).unwrap();
        assert!(board.is_legal(Player::Black, Square::A1));
        let next = board.place_at(Player::Black, Square::A1).unwrap();
        assert_eq!(next.count(Player::Black), 8);
        assert_eq!(next.count(Player::White), 0);
    }

    #[test]
    fn test_no_wraparound_capture() {
        // White H3 followed by black A4 would be a "run" only across the edge.
        let board = Board::new(squares(&[Square::A4]), squares(&[Square::H3])).unwrap();
        assert!(!board.is_legal(Player::Black, Square::G3));
        assert!(board.valid_moves(Player::Black).is_empty());
    }

    #[test]
    fn test_action_and_pass() {
        let board = Board::initial();
        let action = board.action(Player::Black, Some(Square::F5)).unwrap();
        assert_eq!(action.square(), Some(Square::F5));
        assert_eq!(action.board(), board.place_at(Player::Black, Square::F5).unwrap());

        assert!(board.action(Player::Black, None).is_err());

        // White has no disc adjacent to anything black can reach: black must pass.
        let stuck = Board::new(squares(&[Square::A1]), squares(&[Square::H8])).unwrap();
        let pass = stuck.action(Player::Black, None).unwrap();
        assert!(pass.is_pass());
        assert_eq!(pass.board(), stuck);
    }

    #[test]
    fn test_is_final_and_winner() {
        let board = Board::new(squares(&[Square::A1, Square::B1]), squares(&[Square::H8])).unwrap();
        assert!(board.is_final());
        assert_eq!(board.winner(), Some(Player::Black));

        let full_black = Board::new(Bitboard(!0), Bitboard::EMPTY).unwrap();
        assert!(full_black.is_final());

        let tie = Board::new(squares(&[Square::A1]), squares(&[Square::H8])).unwrap();
        assert_eq!(tie.winner(), None);

        assert!(!Board::initial().is_final());
    }

    #[test]
    fn test_display() {
        let text = Board::initial().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "  ABCDEFGH");
        assert_eq!(lines[4], "4    ○●   ");
        assert_eq!(lines[5], "5    ●○   ");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_opening_symmetries() {
        let initial = Board::initial();
        assert!(initial.symmetries().iter().all(|b| *b == initial));

        let d3 = initial.place_at(Player::Black, Square::D3).unwrap();
        for sq in [Square::C4, Square::F5, Square::E6] {
            let other = initial.place_at(Player::Black, sq).unwrap();
            assert_ne!(other, d3);
            assert!(d3.equivalent(&other), "{sq}");
        }

        let deeper = d3.place_at(Player::White, Square::C3).unwrap();
        assert!(!d3.equivalent(&deeper));
    }

    #[test]
    fn test_symmetric_boards_play_alike() {
        let board = Board::initial()
            .place_at(Player::Black, Square::D3)
            .and_then(|b| b.place_at(Player::White, Square::C5))
            .unwrap();
        for image in board.symmetries() {
            for player in [Player::Black, Player::White] {
                assert_eq!(image.valid_moves(player).popcount(), board.valid_moves(player).popcount());
                assert_eq!(image.count(player), board.count(player));
            }
        }
        assert_eq!(board.rotate180().valid_moves(Player::Black), board.valid_moves(Player::Black).rotate180());
    }
}
