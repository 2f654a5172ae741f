//! Axis-aligned bounding boxes.

use nav_core::{BlockPos, Vec3};

/// An axis-aligned box, `min` inclusive / `max` exclusive on every axis for
/// intersection purposes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The unit cube of a full block cell.
    pub fn from_block(pos: BlockPos) -> Self {
        let min = pos.to_vec();
        Self { min, max: min.offset(1.0, 1.0, 1.0) }
    }

    /// A block cell's box up to `height` (absolute y) — partial blocks.
    pub fn from_block_to_height(pos: BlockPos, height: f64) -> Self {
        let min = pos.to_vec();
        Self {
            min,
            max: Vec3::new(min.x + 1.0, height.max(min.y), min.z + 1.0),
        }
    }

    /// An agent's box: `feet` is the bottom-center point.
    pub fn agent(feet: Vec3, width: f64, height: f64) -> Self {
        let half = width / 2.0;
        Self {
            min: Vec3::new(feet.x - half, feet.y, feet.z - half),
            max: Vec3::new(feet.x + half, feet.y + height, feet.z + half),
        }
    }

    /// Grow (or shrink, with negative arguments) symmetrically on each axis.
    pub fn expand(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            min: self.min.offset(-dx, -dy, -dz),
            max: self.max.offset(dx, dy, dz),
        }
    }

    /// Translate by `d`.
    pub fn offset(self, d: Vec3) -> Self {
        Self { min: self.min + d, max: self.max + d }
    }

    /// Strict overlap on all three axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// `true` if `p` lies inside (boundary-inclusive on min, exclusive max).
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// The eight corner points — ray-sample targets for placement checks.
    pub fn vertices(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// All cells the box overlaps.
    pub fn cells(&self) -> Vec<BlockPos> {
        let x0 = self.min.x.floor() as i32;
        let y0 = self.min.y.floor() as i32;
        let z0 = self.min.z.floor() as i32;
        // Exclusive max: a box flush on a cell boundary does not enter the
        // next cell.
        let x1 = (self.max.x - 1e-9).floor() as i32;
        let y1 = (self.max.y - 1e-9).floor() as i32;
        let z1 = (self.max.z - 1e-9).floor() as i32;

        let mut out = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    out.push(BlockPos::new(x, y, z));
                }
            }
        }
        out
    }
}
