//! `nav-physics` — agent state snapshots and short-horizon physics prediction.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`aabb`]  | `Aabb` — axis-aligned boxes, block boxes, sample vertices     |
//! | [`state`] | `AgentState` — position, velocity, look, collision flags      |
//! | [`sim`]   | `Physics` trait, `StepPhysics` default stepper, `raycast`     |
//!
//! # Prediction model
//!
//! The execution layer never asks "where is the agent" — it asks "where will
//! the agent be in N ticks if the current controls are held".  Every
//! prediction starts from a fresh [`AgentState`] snapshot of the live agent;
//! [`Physics::step`] is a deterministic pure function of `(state, world)`,
//! so repeated predictions from the same snapshot agree exactly.

pub mod aabb;
pub mod sim;
pub mod state;

#[cfg(test)]
mod tests;

pub use aabb::Aabb;
pub use sim::{Face, Physics, RayHit, StepPhysics};
pub use state::AgentState;
