//! `nav-core` — foundational types for the `rust_nav` voxel navigation stack.
//!
//! This crate is a dependency of every other `nav-*` crate.  It intentionally
//! has no `nav-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`pos`]     | `Vec3`, `BlockPos`, cardinal/diagonal step offsets    |
//! | [`time`]    | `Tick`                                                |
//! | [`control`] | `Control`, `ControlState`                             |
//! | [`item`]    | `ItemKind`, `Inventory`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types. |

pub mod control;
pub mod item;
pub mod pos;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use control::{Control, ControlState};
pub use item::{Inventory, ItemKind};
pub use pos::{BlockPos, StepOffset, Vec3, CARDINAL_DIRS, DIAGONAL_DIRS};
pub use time::Tick;
