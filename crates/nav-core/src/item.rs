//! Items the navigation layer needs to hold or consume.
//!
//! The real inventory lives in the embedding bot layer; the navigation core
//! only needs to know which *kind* of item an interaction requires and how
//! many placeable blocks remain for scaffold pruning.

use std::fmt;

/// The kinds of items block interactions can require.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Any block suitable for scaffolding placement.
    ScaffoldBlock,
    /// An empty bucket (used to drain a liquid source).
    Bucket,
    /// A filled water bucket (used to place a liquid).
    WaterBucket,
    /// A digging tool; any tool is acceptable for a break.
    Tool,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::ScaffoldBlock => "scaffold block",
            ItemKind::Bucket => "bucket",
            ItemKind::WaterBucket => "water bucket",
            ItemKind::Tool => "tool",
        };
        write!(f, "{name}")
    }
}

/// A minimal view of the agent's inventory.
///
/// `held` is what the main hand currently holds.  `perform` calls check the
/// held item first and emit an equip command when a swap is needed; a kind
/// with zero count is a hard failure (missing-item cancel).
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    /// Item currently held in the main hand, if any.
    pub held: Option<ItemKind>,
    /// Placeable scaffold blocks available.
    pub scaffold_blocks: u32,
    /// Empty buckets available.
    pub buckets: u32,
    /// Filled water buckets available.
    pub water_buckets: u32,
    /// Digging tools available.
    pub tools: u32,
}

impl Inventory {
    /// How many items of `kind` the agent carries (held item included).
    pub fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::ScaffoldBlock => self.scaffold_blocks,
            ItemKind::Bucket => self.buckets,
            ItemKind::WaterBucket => self.water_buckets,
            ItemKind::Tool => self.tools,
        }
    }

    /// `true` if the agent holds `kind` or could swap to it.
    #[inline]
    pub fn has(&self, kind: ItemKind) -> bool {
        self.held == Some(kind) || self.count(kind) > 0
    }
}
