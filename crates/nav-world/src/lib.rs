//! `nav-world` — block classification facade and in-memory voxel world.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                       |
//! |-----------|----------------------------------------------------------------|
//! | [`block`] | `BlockInfo` classification record, `BlockQuery` trait          |
//! | [`grid`]  | `GridWorld` — hash-map voxel world, the default query backend  |
//!
//! # Pluggability
//!
//! Move generation and execution consume world data through the
//! [`BlockQuery`] trait, so a live block cache backed by chunk data can
//! replace [`GridWorld`] without touching the navigation core.  `GridWorld`
//! is sufficient for tests and offline planning.

pub mod block;
pub mod grid;


pub use block::{BlockInfo, BlockQuery};
pub use grid::{Block, GridWorld};
