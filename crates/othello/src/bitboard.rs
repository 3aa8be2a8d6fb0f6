use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use rand::Rng;

use crate::Square;

/// One of the eight ray directions on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];
}

/// A 64-bit set of squares.
/// Each bit corresponds to a square (bit 0 = A1, bit 63 = H8).
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    /// A1, H1, A8 and H8
    pub const CORNERS: Bitboard = Bitboard(0x8100_0000_0000_0081);

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.0) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.0);
    }

    /// Population count
    #[inline]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Least significant set square, or None if empty
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }

    /// Pops and returns the least significant set square
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// The `n`-th set square counting from A1 (0-based), or None if fewer
    /// than `n + 1` squares are set.
    #[inline]
    pub fn nth(self, n: u32) -> Option<Square> {
        let mut bits = self.0;
        for _ in 0..n {
            bits &= bits.wrapping_sub(1);
        }
        Bitboard(bits).lsb()
    }

    /// Picks one set square uniformly at random.
    pub fn choose<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Square> {
        if self.is_empty() {
            return None;
        }
        let k = rng.gen_range(0..self.popcount());
        self.nth(k)
    }

    #[inline]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    /// Moves every set square one step in `dir`. Squares that would leave the
    /// board vanish; horizontal and diagonal steps mask the file that the
    /// shift would otherwise wrap into.
    #[inline]
    pub const fn shift(self, dir: Direction) -> Bitboard {
        let bits = self.0;
        Bitboard(match dir {
            Direction::North => bits << 8,
            Direction::South => bits >> 8,
            Direction::East => (bits << 1) & !Self::FILE_A.0,
            Direction::West => (bits >> 1) & !Self::FILE_H.0,
            Direction::NorthEast => (bits << 9) & !Self::FILE_A.0,
            Direction::NorthWest => (bits << 7) & !Self::FILE_H.0,
            Direction::SouthEast => (bits >> 7) & !Self::FILE_A.0,
            Direction::SouthWest => (bits >> 9) & !Self::FILE_H.0,
        })
    }
}

impl Bitboard {
    /// Mirror across the A1-H8 diagonal: (file, rank) -> (rank, file).
    pub const fn flip_diag_a1_h8(self) -> Bitboard {
        const K1: u64 = 0x5500_5500_5500_5500;
        const K2: u64 = 0x3333_0000_3333_0000;
        const K4: u64 = 0x0F0F_0F0F_0000_0000;
        let mut x = self.0;
        let t = K4 & (x ^ (x << 28));
        x ^= t ^ (t >> 28);
        let t = K2 & (x ^ (x << 14));
        x ^= t ^ (t >> 14);
        let t = K1 & (x ^ (x << 7));
        x ^= t ^ (t >> 7);
        Bitboard(x)
    }

    /// Mirror across the A8-H1 diagonal: (file, rank) -> (7 - rank, 7 - file).
    pub const fn flip_diag_a8_h1(self) -> Bitboard {
        const K1: u64 = 0xAA00_AA00_AA00_AA00;
        const K2: u64 = 0xCCCC_0000_CCCC_0000;
        const K4: u64 = 0xF0F0_F0F0_0F0F_0F0F;
        let mut x = self.0;
        let t = x ^ (x << 36);
        x ^= K4 & (t ^ (x >> 36));
        let t = K2 & (x ^ (x << 18));
        x ^= t ^ (t >> 18);
        let t = K1 & (x ^ (x << 9));
        x ^= t ^ (t >> 9);
        Bitboard(x)
    }

    /// Half turn: square i goes to 63 - i.
    pub const fn rotate180(self) -> Bitboard {
        Bitboard(self.0.reverse_bits())
    }
}

/// Iterator over the set squares in a bitboard, A1 first
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.popcount() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard(0x{:016X})", self.0)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  ABCDEFGH")?;
        for rank in 0..8 {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square(rank * 8 + file);
                write!(f, "{}", if self.contains(sq) { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
