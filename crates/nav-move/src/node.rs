//! The `Move` graph node.

use std::fmt;

use nav_core::{BlockPos, Vec3};

use crate::interact::Interaction;

/// Which movement category produced a move.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveKind {
    /// Route root — the agent's starting cell, no traversal.
    Idle,
    /// Flat cardinal step.
    Step,
    /// Cardinal step up one block, jumping.
    StepJump,
    /// Cardinal step off an edge, falling to a lower support or liquid.
    DropDown,
    /// Flat diagonal step.
    Diagonal,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::Idle => "idle",
            MoveKind::Step => "step",
            MoveKind::StepJump => "step-jump",
            MoveKind::DropDown => "drop-down",
            MoveKind::Diagonal => "diagonal",
        };
        write!(f, "{name}")
    }
}

/// One edge of the navigation graph: a target cell plus everything needed to
/// get there.
///
/// Immutable after generation except for the interaction lifecycle flags.
/// `cost` is the per-edge cost — the path search accumulates totals across
/// the route; generation guarantees `0 <= cost <= cost_ceiling`.
#[derive(Clone, Debug)]
pub struct Move {
    /// Where the agent stands when the move starts (predecessor's exit).
    pub entry_pos: Vec3,
    /// Target: the destination cell's horizontal center at landing height.
    pub exit_pos: Vec3,
    /// Per-edge traversal cost including obstacle surcharges.
    pub cost: f64,
    /// Blocks to remove, in execution order, before `to_place`.
    pub to_break: Vec<Interaction>,
    /// Blocks to put down, in execution order.
    pub to_place: Vec<Interaction>,
    /// The movement category that produced this move.
    pub kind: MoveKind,
    /// Placeable blocks left for this and descendant moves.
    pub remaining_blocks: u32,
}

impl Move {
    /// The root node of a route: the agent's current cell, zero cost,
    /// `remaining_blocks` from the live inventory.
    pub fn start_at(cell: BlockPos, remaining_blocks: u32) -> Self {
        let pos = cell.floor_center();
        Self {
            entry_pos: pos,
            exit_pos: pos,
            cost: 0.0,
            to_break: vec![],
            to_place: vec![],
            kind: MoveKind::Idle,
            remaining_blocks,
        }
    }

    /// A successor of `parent`.  Entry is the parent's exit; every scheduled
    /// placement consumes one remaining block, saturating at zero when the
    /// caller schedules more placements than the parent has left.
    pub fn step_from(
        parent: &Move,
        cost: f64,
        exit_pos: Vec3,
        kind: MoveKind,
        to_break: Vec<Interaction>,
        to_place: Vec<Interaction>,
    ) -> Self {
        let remaining_blocks = parent.remaining_blocks.saturating_sub(to_place.len() as u32);
        Self {
            entry_pos: parent.exit_pos,
            exit_pos,
            cost,
            to_break,
            to_place,
            kind,
            remaining_blocks,
        }
    }

    /// The grid cell of the exit position.
    #[inline]
    pub fn exit_cell(&self) -> BlockPos {
        self.exit_pos.floored()
    }

    /// The grid cell of the entry position.
    #[inline]
    pub fn entry_cell(&self) -> BlockPos {
        self.entry_pos.floored()
    }

    /// `true` once every break and place sub-task is done.
    pub fn interactions_done(&self) -> bool {
        self.to_break.iter().all(Interaction::is_done)
            && self.to_place.iter().all(Interaction::is_done)
    }

    /// `true` if any interaction is mid-flight.
    pub fn any_performing(&self) -> bool {
        self.to_break.iter().any(Interaction::is_performing)
            || self.to_place.iter().any(Interaction::is_performing)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} (cost {:.2}, {}B/{}P)",
            self.kind,
            self.entry_cell(),
            self.exit_cell(),
            self.cost,
            self.to_break.len(),
            self.to_place.len(),
        )
    }
}
