//! Physics-tick time model.
//!
//! Time is a monotonically increasing `Tick` counter, one count per simulated
//! physics step (20 ticks/s on a standard server, but nothing in this stack
//! assumes a rate — wall-clock mapping belongs to the embedding bot layer).
//! Using an integer tick as the canonical unit keeps all deadline arithmetic
//! exact and comparisons O(1).

use std::fmt;

/// An absolute physics-tick counter.
///
/// Stored as `u64`: at 20 ticks/s a u64 lasts ~29 billion years, so overflow
/// is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero if the
    /// arguments are reversed.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
