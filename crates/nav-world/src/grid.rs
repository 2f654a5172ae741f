//! Hash-map voxel world — the default [`BlockQuery`] backend.
//!
//! Cells not present in the map are air.  The block palette is intentionally
//! small: it covers every classification combination the navigation core
//! distinguishes, which is all a planner can observe anyway.

use rustc_hash::FxHashMap;

use nav_core::BlockPos;

use crate::block::{BlockInfo, BlockQuery};

/// The block palette.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// Empty cell.
    #[default]
    Air,
    /// Full solid cube (stone, dirt, planks, …).
    Solid,
    /// Partial-height solid block; `height` is the support surface offset
    /// above the cell floor, in `(0, 1)` (e.g. 0.5 for a bottom slab).
    Partial { height_frac: f64 },
    /// Still or flowing water: liquid, safe, swimmable.
    Water,
    /// Lava: liquid, hazardous.
    Lava,
    /// Vegetation and other break-free placement targets.
    Replaceable,
}

/// In-memory voxel world keyed by [`BlockPos`].
///
/// `FxHashMap` rather than the default hasher: keys are small integer
/// triples and block lookups dominate generation time.
#[derive(Clone, Debug, Default)]
pub struct GridWorld {
    cells: FxHashMap<BlockPos, Block>,
    /// Lowest valid y; cells below classify as air but scans stop here.
    min_y: i32,
}

impl GridWorld {
    /// An empty (all-air) world with the given bottom bound.
    pub fn new(min_y: i32) -> Self {
        Self { cells: FxHashMap::default(), min_y }
    }

    /// Set one cell.  Returns `&mut self` so worlds can be built fluently
    /// in tests.
    pub fn set(&mut self, pos: BlockPos, block: Block) -> &mut Self {
        if block == Block::Air {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, block);
        }
        self
    }

    /// Fill the horizontal rectangle `[x0..=x1] × [z0..=z1]` at height `y`.
    pub fn fill(&mut self, x0: i32, x1: i32, y: i32, z0: i32, z1: i32, block: Block) -> &mut Self {
        for x in x0..=x1 {
            for z in z0..=z1 {
                self.set(BlockPos::new(x, y, z), block);
            }
        }
        self
    }

    /// The raw block at `pos` (air when unset).
    pub fn block_at(&self, pos: BlockPos) -> Block {
        self.cells.get(&pos).copied().unwrap_or_default()
    }

    /// Number of non-air cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl BlockQuery for GridWorld {
    fn block_info(&self, pos: BlockPos) -> BlockInfo {
        let base = pos.y as f64;
        match self.block_at(pos) {
            Block::Air => BlockInfo::air(pos),
            Block::Solid => BlockInfo {
                pos,
                physical:    true,
                liquid:      false,
                replaceable: false,
                safe:        false,
                height:      base + 1.0,
            },
            Block::Partial { height_frac } => BlockInfo {
                pos,
                physical:    true,
                liquid:      false,
                replaceable: false,
                safe:        false,
                height:      base + height_frac,
            },
            Block::Water => BlockInfo {
                pos,
                physical:    false,
                liquid:      true,
                replaceable: true,
                safe:        true,
                height:      base,
            },
            Block::Lava => BlockInfo {
                pos,
                physical:    false,
                liquid:      true,
                replaceable: false,
                safe:        false,
                height:      base,
            },
            Block::Replaceable => BlockInfo {
                pos,
                physical:    false,
                liquid:      false,
                replaceable: true,
                safe:        true,
                height:      base,
            },
        }
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }
}
