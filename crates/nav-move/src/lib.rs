//! `nav-move` — move graph nodes and successor generation.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`config`]     | `MovementConfig` — shared cost constants                        |
//! | [`interact`]   | `Interaction` — one block break/place sub-task                  |
//! | [`node`]       | `Move` — one edge of the navigation graph                       |
//! | [`generators`] | `Movement` — per-category successor functions                   |
//!
//! # Generation model
//!
//! An external path search holds a frontier of [`Move`] nodes and calls
//! [`Movement::provide_movements`] on each enabled category to expand it.
//! Generators are pure with respect to the world: given identical block
//! classifications and the same node they append the same candidates in the
//! same order.  Cost doubles as the feasibility gate — a candidate whose
//! running cost passes [`MovementConfig::cost_ceiling`] is dropped before any
//! further sub-tasks are scheduled, and is never emitted.

pub mod config;
pub mod generators;
pub mod interact;
pub mod node;

#[cfg(test)]
mod tests;

pub use config::MovementConfig;
pub use generators::Movement;
pub use interact::{InteractAction, InteractError, InteractKind, Interaction, Visibility, REACH};
pub use node::{Move, MoveKind};
