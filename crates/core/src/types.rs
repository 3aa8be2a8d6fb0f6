//! Game outcome types.
//!
//! A `Reward` is always relative to one player: a Win for one side is a Loss
//! for the other, which is what backpropagation relies on when it flips the
//! sign at every ply.

use std::cmp::Ordering;
use std::fmt;

/// Result of a finished game from one player's point of view.
///
/// # Example
/// ```
/// use othello_core::Reward;
///
/// let reward = Reward::from_counts(40, 24);
/// assert_eq!(reward, Reward::Win);
/// assert_eq!(reward.negate(), Reward::Loss);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reward {
    Win,
    Draw,
    Loss,
}

impl Reward {
    /// Compare a player's disc count against the opponent's.
    pub fn from_counts(mine: u32, theirs: u32) -> Self {
        match mine.cmp(&theirs) {
            Ordering::Greater => Reward::Win,
            Ordering::Less => Reward::Loss,
            Ordering::Equal => Reward::Draw,
        }
    }

    /// Numeric value on the {-1, 0, +1} scale.
    pub const fn value(self) -> f32 {
        match self {
            Reward::Win => 1.0,
            Reward::Draw => 0.0,
            Reward::Loss => -1.0,
        }
    }

    /// The same outcome seen by the opponent.
    pub const fn negate(self) -> Self {
        match self {
            Reward::Win => Reward::Loss,
            Reward::Draw => Reward::Draw,
            Reward::Loss => Reward::Win,
        }
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reward::Win => write!(f, "win"),
            Reward::Draw => write!(f, "draw"),
            Reward::Loss => write!(f, "loss"),
        }
    }
}
