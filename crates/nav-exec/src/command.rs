//! Commands emitted by the executor for the embedding layer to apply.

use nav_core::{BlockPos, Control, ItemKind, Vec3};
use nav_physics::Face;

/// One side effect the executor wants applied to the live agent.
///
/// The executor never mutates the world or the agent directly: every tick
/// returns the commands for that tick as values, in application order, and
/// the embedding layer replays them against whatever it controls (a live
/// bot, a recorded trace, a test harness).
#[derive(Clone, Debug, PartialEq)]
pub enum AgentCommand {
    /// Rotate the head toward `target`.  `horizontal` keeps the current
    /// pitch and steers yaw only (path following); otherwise pitch follows
    /// too (aiming at a block).
    LookAt { target: Vec3, horizontal: bool },

    /// Press or release one control.
    SetControl { control: Control, active: bool },

    /// Release every control.
    ClearControls,

    /// Bring an item of `kind` into the active hand.
    Equip { kind: ItemKind, offhand: bool },

    /// Start digging out `pos`.
    Dig { pos: BlockPos },

    /// Place the held block against `against`, on its `face`.
    Place { against: BlockPos, face: Face },

    /// Use the held item (bucket fill or pour).
    ActivateItem { offhand: bool },
}
