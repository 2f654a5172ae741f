//! Per-category successor generation.
//!
//! Each [`Movement`] variant is one traversal category with its own
//! admissibility rule; all share the same cost/feasibility core:
//!
//! 1. Classify the cells the agent's body crosses on the way to the target.
//! 2. Cells that must become floor may be placed into (consuming remaining
//!    blocks, breaking non-replaceable occupants first when safe).
//! 3. Every other crossed cell must be safe or breakable; breakable cells
//!    schedule a break and add to cost.
//! 4. Accumulation short-circuits past the cost ceiling before scheduling
//!    further work; candidates past the ceiling are never emitted.

use nav_core::{BlockPos, StepOffset, CARDINAL_DIRS, DIAGONAL_DIRS};
use nav_world::{BlockInfo, BlockQuery};

use crate::config::MovementConfig;
use crate::interact::Interaction;
use crate::node::{Move, MoveKind};

/// Base cost of a diagonal step: √2.
const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// A movement category.  Category-specific limits are variant payload;
/// shared cost constants live in [`MovementConfig`].
#[derive(Clone, Debug)]
pub enum Movement {
    /// Flat step to a cardinal neighbor, placing floor when needed.
    Step,

    /// Jump one block up to a cardinal neighbor, placing up to two blocks
    /// (floor below, then the landing block) when needed.
    StepJump {
        /// Maximum height differential the agent can jump.
        max_step_up: f64,
    },

    /// Walk off a cardinal edge and fall to the first support below.
    DropDown {
        /// Maximum fall distance onto a solid landing.
        max_drop: i32,
        /// Liquid landings ignore `max_drop`.
        infinite_liquid_drop: bool,
    },

    /// Flat step to a diagonal neighbor.  Never places blocks.
    Diagonal {
        /// Maximum floor-height drop toward the target before the cut
        /// corner becomes a fall.
        max_step_down: f64,
    },
}

impl Movement {
    /// The standard category set with default limits.
    pub fn standard_set() -> Vec<Movement> {
        vec![
            Movement::Step,
            Movement::StepJump { max_step_up: 1.2 },
            Movement::DropDown { max_drop: 3, infinite_liquid_drop: true },
            Movement::Diagonal { max_step_down: 0.6 },
        ]
    }

    /// The [`MoveKind`] tag carried by moves this category emits.
    pub fn kind(&self) -> MoveKind {
        match self {
            Movement::Step => MoveKind::Step,
            Movement::StepJump { .. } => MoveKind::StepJump,
            Movement::DropDown { .. } => MoveKind::DropDown,
            Movement::Diagonal { .. } => MoveKind::Diagonal,
        }
    }

    /// Append every feasible successor of `node` in this category to `out`.
    pub fn provide_movements<W: BlockQuery>(
        &self,
        node: &Move,
        world: &W,
        cfg: &MovementConfig,
        out: &mut Vec<Move>,
    ) {
        match self {
            Movement::Step => {
                for dir in CARDINAL_DIRS {
                    step_move(node, dir, world, cfg, out);
                }
            }
            Movement::StepJump { max_step_up } => {
                for dir in CARDINAL_DIRS {
                    jump_move(node, dir, *max_step_up, world, cfg, out);
                }
            }
            Movement::DropDown { max_drop, infinite_liquid_drop } => {
                for dir in CARDINAL_DIRS {
                    drop_move(node, dir, *max_drop, *infinite_liquid_drop, world, cfg, out);
                }
            }
            Movement::Diagonal { max_step_down } => {
                for dir in DIAGONAL_DIRS {
                    diagonal_move(node, dir, *max_step_down, world, cfg, out);
                }
            }
        }
    }
}

// ── Shared feasibility helpers ────────────────────────────────────────────────

/// A block may be broken only when none of its face neighbors is a hazard —
/// draining or digging next to lava floods the cell being cleared.
fn safe_to_break<W: BlockQuery>(world: &W, pos: BlockPos) -> bool {
    pos.neighbors6()
        .iter()
        .all(|&n| {
            let info = world.block_info(n);
            !(info.liquid && !info.safe)
        })
}

/// A break handler for `info`: bucket drain for liquids, dig otherwise.
fn break_handler(info: &BlockInfo) -> Interaction {
    if info.liquid {
        Interaction::drain_liquid(info.pos)
    } else {
        Interaction::break_solid(info.pos)
    }
}

/// Cost of letting the agent's body cross `info`'s cell, scheduling a break
/// when one is needed.
///
/// Safe cells (air, water) cost nothing.  Solid cells cost `break_cost` if
/// they can be broken safely.  Everything else (lava, unbreakable hazard
/// neighborhoods) costs `cost_inf`, pushing the candidate past the ceiling.
fn safe_or_break<W: BlockQuery>(
    world: &W,
    info: &BlockInfo,
    cfg: &MovementConfig,
    to_break: &mut Vec<Interaction>,
) -> f64 {
    if info.safe {
        return 0.0;
    }
    if info.solid_blocking() && safe_to_break(world, info.pos) {
        to_break.push(Interaction::break_solid(info.pos));
        return cfg.break_cost;
    }
    cfg.cost_inf
}

/// Schedule turning `floor`'s cell into standable floor: break a
/// non-replaceable occupant first (when safe), then place.
///
/// Returns the added cost, or `None` when the candidate must be rejected
/// (out of blocks, or the occupant cannot be broken safely).
fn place_floor<W: BlockQuery>(
    world: &W,
    floor: &BlockInfo,
    available_blocks: u32,
    cfg: &MovementConfig,
    to_break: &mut Vec<Interaction>,
    to_place: &mut Vec<Interaction>,
) -> Option<f64> {
    if available_blocks == 0 {
        return None; // not enough blocks to place
    }
    if !floor.replaceable {
        if !safe_to_break(world, floor.pos) {
            return None;
        }
        to_break.push(break_handler(floor));
    }
    to_place.push(Interaction::place_solid(floor.pos));
    Some(cfg.place_cost)
}

// ── Step ──────────────────────────────────────────────────────────────────────

fn step_move<W: BlockQuery>(
    node: &Move,
    dir: StepOffset,
    world: &W,
    cfg: &MovementConfig,
    out: &mut Vec<Move>,
) {
    let pos = node.exit_cell();
    if world.block_info(pos).liquid {
        return; // swimming exits are not step moves
    }

    let head = world.offset_info(pos, dir.dx, 1, dir.dz);
    let body = world.offset_info(pos, dir.dx, 0, dir.dz);
    let floor = world.offset_info(pos, dir.dx, -1, dir.dz);

    let mut cost = 1.0; // move cost
    let mut to_break = Vec::new();
    let mut to_place = Vec::new();

    if !floor.physical && !body.liquid {
        match place_floor(world, &floor, node.remaining_blocks, cfg, &mut to_break, &mut to_place) {
            Some(added) => cost += added,
            None => return,
        }
    }

    cost += safe_or_break(world, &body, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }
    cost += safe_or_break(world, &head, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }

    let exit = pos.offset(dir.dx, 0, dir.dz).floor_center();
    out.push(Move::step_from(node, cost, exit, MoveKind::Step, to_break, to_place));
}

// ── StepJump ──────────────────────────────────────────────────────────────────

fn jump_move<W: BlockQuery>(
    node: &Move,
    dir: StepOffset,
    max_step_up: f64,
    world: &W,
    cfg: &MovementConfig,
    out: &mut Vec<Move>,
) {
    let pos = node.exit_cell();

    let above = world.offset_info(pos, 0, 2, 0);
    let target_head = world.offset_info(pos, dir.dx, 2, dir.dz);
    let landing = world.offset_info(pos, dir.dx, 1, dir.dz);
    let support = world.offset_info(pos, dir.dx, 0, dir.dz);

    let mut cost = 2.0; // move cost (move + jump)
    let mut to_break = Vec::new();
    let mut to_place = Vec::new();

    let mut support_height = support.height;

    if !support.physical {
        if node.remaining_blocks == 0 {
            return; // not enough blocks to place
        }

        let below = world.offset_info(pos, dir.dx, -1, dir.dz);
        if !below.physical {
            if node.remaining_blocks == 1 {
                return; // supporting the support needs a second block
            }
            match place_floor(world, &below, node.remaining_blocks - 1, cfg, &mut to_break, &mut to_place)
            {
                Some(added) => cost += added,
                None => return,
            }
        }

        if !support.replaceable {
            if !safe_to_break(world, support.pos) {
                return;
            }
            to_break.push(break_handler(&support));
        }
        to_place.push(Interaction::place_solid(support.pos));
        cost += cfg.place_cost;

        support_height += 1.0;
    }

    let current_floor = world.offset_info(pos, 0, -1, 0);
    if support_height - current_floor.height > max_step_up {
        return; // too high to jump
    }

    cost += safe_or_break(world, &above, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }
    cost += safe_or_break(world, &landing, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }
    cost += safe_or_break(world, &target_head, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }

    let exit = landing.pos.floor_center();
    out.push(Move::step_from(node, cost, exit, MoveKind::StepJump, to_break, to_place));
}

// ── DropDown ──────────────────────────────────────────────────────────────────

/// Scan the landing column below the forward cell.  Returns the cell the
/// agent will occupy after the fall: the liquid cell itself for a water
/// landing, or the air cell above the first solid support.
fn landing_cell<W: BlockQuery>(
    node: &Move,
    dir: StepOffset,
    max_drop: i32,
    world: &W,
) -> Option<BlockPos> {
    let start = node.exit_cell();
    let mut scan = world.offset_info(start, dir.dx, -2, dir.dz);
    while scan.pos.y > world.min_y() {
        if scan.liquid && scan.safe {
            return Some(scan.pos);
        }
        if scan.physical {
            if start.y - scan.pos.y <= max_drop {
                return Some(scan.pos.offset(0, 1, 0));
            }
            return None;
        }
        if !scan.safe {
            return None;
        }
        scan = world.offset_info(scan.pos, 0, -1, 0);
    }
    None
}

fn drop_move<W: BlockQuery>(
    node: &Move,
    dir: StepOffset,
    max_drop: i32,
    infinite_liquid_drop: bool,
    world: &W,
    cfg: &MovementConfig,
    out: &mut Vec<Move>,
) {
    let pos = node.exit_cell();

    let above = world.offset_info(pos, dir.dx, 2, dir.dz);
    let head = world.offset_info(pos, dir.dx, 1, dir.dz);
    let body = world.offset_info(pos, dir.dx, 0, dir.dz);
    let below = world.offset_info(pos, dir.dx, -1, dir.dz);

    let mut cost = 1.0; // move cost
    let mut to_break = Vec::new();

    // The scan caps solid landings at max_drop; liquid landings come back
    // regardless of depth and are capped here unless unlimited.
    let landing = match landing_cell(node, dir, max_drop, world) {
        Some(cell) => cell,
        None => return,
    };
    if !infinite_liquid_drop && pos.y - landing.y > max_drop {
        return;
    }

    cost += safe_or_break(world, &above, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }
    cost += safe_or_break(world, &head, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }
    cost += safe_or_break(world, &body, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }
    cost += safe_or_break(world, &below, cfg, &mut to_break);
    if cost > cfg.cost_ceiling {
        return;
    }

    if body.liquid {
        return; // don't dive below a surface
    }

    let exit = landing.floor_center();
    out.push(Move::step_from(node, cost, exit, MoveKind::DropDown, to_break, vec![]));
}

// ── Diagonal ──────────────────────────────────────────────────────────────────

fn diagonal_move<W: BlockQuery>(
    node: &Move,
    dir: StepOffset,
    max_step_down: f64,
    world: &W,
    cfg: &MovementConfig,
    out: &mut Vec<Move>,
) {
    let pos = node.exit_cell();

    let mut cost = DIAGONAL_COST;
    let mut to_break = Vec::new();

    let here = world.block_info(pos);
    let target_body = world.offset_info(pos, dir.dx, 0, dir.dz);
    let drop = here.height - target_body.height;
    if drop > max_step_down {
        return; // too far down to cut the corner
    }
    // Stepping up across the corner needs both orthogonal columns open at
    // floor level, or the raised body clips them.
    let need_side_clearance = drop < 0.0;

    let target_head = world.offset_info(pos, dir.dx, 1, dir.dz);
    let target_floor = world.offset_info(pos, dir.dx, -1, dir.dz);
    if !target_floor.physical {
        return; // diagonals never place floor
    }

    // Target column plus both orthogonal corner columns.
    let crossings = [
        target_body,
        target_head,
        world.offset_info(pos, dir.dx, 0, 0),
        world.offset_info(pos, 0, 0, dir.dz),
        world.offset_info(pos, dir.dx, 1, 0),
        world.offset_info(pos, 0, 1, dir.dz),
    ];
    for info in &crossings {
        cost += safe_or_break(world, info, cfg, &mut to_break);
        if cost > cfg.cost_ceiling {
            return;
        }
    }

    if need_side_clearance {
        let corner_a = world.offset_info(pos, dir.dx, -1, 0);
        let corner_b = world.offset_info(pos, 0, -1, dir.dz);
        if corner_a.physical || corner_b.physical {
            return;
        }
    }

    let exit = pos.offset(dir.dx, 0, dir.dz).floor_center();
    out.push(Move::step_from(node, cost, exit, MoveKind::Diagonal, to_break, vec![]));
}
