//! Continuous and grid-aligned coordinate types.
//!
//! `Vec3` uses `f64` throughout: positions feed into physics prediction where
//! single-precision drift accumulates visibly over a few hundred ticks.
//! `BlockPos` is the integer cell coordinate; the cell with corner
//! `(x, y, z)` spans `[x, x+1) × [y, y+1) × [z, z+1)`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A continuous 3-D position or displacement.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise offset.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The same point projected onto the XZ plane (y = 0).
    #[inline]
    pub fn xz(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.  Returns `ZERO` for a zero vector
    /// rather than dividing by zero — callers compare dot products against
    /// thresholds, and a zero result fails every threshold safely.
    pub fn normalize(self) -> Vec3 {
        let n = self.norm();
        if n == 0.0 { Vec3::ZERO } else { self * (1.0 / n) }
    }

    #[inline]
    pub fn distance_to(self, other: Vec3) -> f64 {
        (other - self).norm()
    }

    /// Horizontal (XZ-plane) distance, ignoring height difference.
    #[inline]
    pub fn xz_distance_to(self, other: Vec3) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// The grid cell containing this point.
    #[inline]
    pub fn floored(self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── BlockPos ──────────────────────────────────────────────────────────────────

/// A grid-aligned cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Neighboring cell at the given integer offsets.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The cell's minimum corner as a continuous point.
    #[inline]
    pub fn to_vec(self) -> Vec3 {
        Vec3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// The horizontal center of the cell at floor height — where an agent
    /// stands when centered on this cell.
    #[inline]
    pub fn floor_center(self) -> Vec3 {
        Vec3::new(self.x as f64 + 0.5, self.y as f64, self.z as f64 + 0.5)
    }

    /// The six face-adjacent neighbors.
    pub fn neighbors6(self) -> [BlockPos; 6] {
        [
            self.offset(0, 1, 0),
            self.offset(0, -1, 0),
            self.offset(0, 0, -1),
            self.offset(0, 0, 1),
            self.offset(-1, 0, 0),
            self.offset(1, 0, 0),
        ]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ── Step offsets ──────────────────────────────────────────────────────────────

/// A horizontal step direction used by move generators.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOffset {
    pub dx: i32,
    pub dz: i32,
}

/// The four cardinal step directions (±x, ±z).
pub const CARDINAL_DIRS: [StepOffset; 4] = [
    StepOffset { dx: 0, dz: -1 },
    StepOffset { dx: 1, dz: 0 },
    StepOffset { dx: 0, dz: 1 },
    StepOffset { dx: -1, dz: 0 },
];

/// The four diagonal step directions.
pub const DIAGONAL_DIRS: [StepOffset; 4] = [
    StepOffset { dx: 1, dz: -1 },
    StepOffset { dx: 1, dz: 1 },
    StepOffset { dx: -1, dz: 1 },
    StepOffset { dx: -1, dz: -1 },
];
