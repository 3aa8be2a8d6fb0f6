use std::fmt;
use std::str::FromStr;

use othello_core::OthelloError;

use crate::Bitboard;

/// A board cell (0-63) using rank-major ordering.
/// A1=0, B1=1, ..., H1=7, A2=8, ..., H8=63
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Square(pub(crate) u8);

macro_rules! named_squares {
    ($($name:ident = $index:expr),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($index);)*
        }
    };
}

named_squares! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl Square {
    /// Creates a square from file (0-7, column A-H) and rank (0-7, row 1-8)
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the raw index (0-63)
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns a bitboard with just this square set
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1u64 << self.0)
    }

    /// Offset the square by (file_delta, rank_delta), returning None if off the board
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Iterator over all 64 squares, A1 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl FromStr for Square {
    type Err = OthelloError;

    /// Parses a coordinate such as `"d3"` or `"D3"`: a column letter A-H
    /// followed by a row digit 1-8.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OthelloError::InvalidSquare(s.to_string());
        match s.trim().as_bytes() {
            &[column, row] => {
                let file = column.to_ascii_uppercase().wrapping_sub(b'A');
                let rank = row.wrapping_sub(b'1');
                Square::from_coords(file, rank).ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = (b'A' + self.file()) as char;
        let row = (b'1' + self.rank()) as char;
        write!(f, "{column}{row}")
    }
}
