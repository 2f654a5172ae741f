//! Block classification and the world query facade.

use nav_core::BlockPos;

/// Classification of one voxel cell, as needed by move generation and
/// execution.  Pure data — all policy (can we break it, can we stand on it
/// from here) lives in the consumers.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockInfo {
    /// The cell this record describes.
    pub pos: BlockPos,

    /// `true` if the cell has a collision box an agent can stand on.
    pub physical: bool,

    /// `true` if the cell is a liquid (water, lava).
    pub liquid: bool,

    /// `true` if a placement may overwrite the cell without breaking it
    /// first (air, tall grass, snow layers).
    pub replaceable: bool,

    /// `true` if an agent can occupy or pass the cell without harm.
    /// Air and water are safe; lava and fire are not.
    pub safe: bool,

    /// Absolute height of the cell's upper support surface.  For a full
    /// solid cube this is `pos.y + 1`; slabs and soul-sand-like partial
    /// blocks report less; non-physical cells report `pos.y`.
    pub height: f64,
}

impl BlockInfo {
    /// An air cell at `pos`: passable, replaceable, nothing to stand on.
    pub fn air(pos: BlockPos) -> Self {
        Self {
            pos,
            physical:    false,
            liquid:      false,
            replaceable: true,
            safe:        true,
            height:      pos.y as f64,
        }
    }

    /// `true` when the cell blocks an agent's body but is not a liquid —
    /// the "something is in the way" test used for corner clearance.
    #[inline]
    pub fn solid_blocking(&self) -> bool {
        self.physical && !self.liquid
    }
}

/// Read-only access to block classification.
///
/// Implementations must be pure queries: repeated calls with the same
/// coordinate between world mutations return identical records.  Move
/// generation relies on this for determinism.
pub trait BlockQuery {
    /// Classify the cell at `pos`.
    ///
    /// Out-of-range or unloaded cells classify as air — generation then
    /// treats them as placement targets rather than erroring.
    fn block_info(&self, pos: BlockPos) -> BlockInfo;

    /// Classify the cell at integer offsets from `base`.
    #[inline]
    fn offset_info(&self, base: BlockPos, dx: i32, dy: i32, dz: i32) -> BlockInfo {
        self.block_info(base.offset(dx, dy, dz))
    }

    /// Lowest cell y-coordinate that exists in this world.  Downward scans
    /// (drop-down landings) stop here.
    fn min_y(&self) -> i32;
}

impl<Q: BlockQuery> BlockQuery for &Q {
    fn block_info(&self, pos: BlockPos) -> BlockInfo {
        (*self).block_info(pos)
    }

    fn min_y(&self) -> i32 {
        (*self).min_y()
    }
}
