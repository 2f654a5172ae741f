//! walkthrough — smallest end-to-end demo of the rust_nav stack.
//!
//! Builds a tiny voxel courtyard, generates candidate moves from the agent's
//! cell, and executes a three-move route (step east, jump a one-block ledge,
//! step along the top) against the built-in kinematic stepper, printing one
//! line per executor tick.
//!
//! Run with:
//!   cargo run -p nav-exec --example walkthrough

use nav_core::{BlockPos, Inventory, Tick, Vec3};
use nav_exec::{
    AgentCommand, ExecContext, ExecError, ExecObserver, ExecOptions, MovementExecutor, Status,
};
use nav_move::{Move, MoveKind, Movement, MovementConfig};
use nav_physics::{AgentState, Physics, StepPhysics};
use nav_world::{Block, GridWorld};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Floor height of the courtyard; the agent stands one above.
const FLOOR_Y: i32 = 63;
/// Per-move tick cap for the demo loop.
const MAX_TICKS_PER_MOVE: u64 = 200;

// ── World ─────────────────────────────────────────────────────────────────────

/// A 9×9 stone courtyard with a one-block ledge across x = 2.
fn build_courtyard() -> GridWorld {
    let mut world = GridWorld::new(0);
    world.fill(-4, 4, FLOOR_Y, -4, 4, Block::Solid);
    world.fill(2, 2, FLOOR_Y + 1, -4, 4, Block::Solid);
    world
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints move and interaction milestones as they happen.
struct Tracer;

impl ExecObserver for Tracer {
    fn on_move_start(&mut self, kind: MoveKind, exit: Vec3) {
        println!("-- {kind} move toward {exit}");
    }
    fn on_interaction_start(&mut self, pos: BlockPos) {
        println!("   interacting with {pos}");
    }
    fn on_interaction_end(&mut self, pos: BlockPos) {
        println!("   interaction at {pos} done");
    }
}

// ── Harness ───────────────────────────────────────────────────────────────────

/// Apply one tick's commands to the live agent and world, the way a bot
/// boundary layer would.
fn apply(agent: &mut AgentState, world: &mut GridWorld, commands: &[AgentCommand]) {
    for cmd in commands {
        match cmd {
            AgentCommand::LookAt { target, horizontal } => {
                if *horizontal {
                    agent.look_at_horizontal(*target);
                } else {
                    agent.look_at(*target);
                }
            }
            AgentCommand::SetControl { control, active } => agent.control.set(*control, *active),
            AgentCommand::ClearControls => agent.control.clear(),
            AgentCommand::Dig { pos } => {
                world.set(*pos, Block::Air);
            }
            AgentCommand::Place { against, face } => {
                let (dx, dy, dz) = face.normal();
                world.set(against.offset(dx, dy, dz), Block::Solid);
            }
            AgentCommand::Equip { .. } | AgentCommand::ActivateItem { .. } => {}
        }
    }
}

/// The generated candidate of any standard category exiting at `exit`.
fn candidate_to(node: &Move, exit: BlockPos, world: &GridWorld) -> Move {
    let cfg = MovementConfig::default();
    let mut out = Vec::new();
    for movement in Movement::standard_set() {
        movement.provide_movements(node, world, &cfg, &mut out);
    }
    out.into_iter()
        .find(|m| m.exit_cell() == exit)
        .unwrap_or_else(|| panic!("no generated move exits at {exit}"))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<(), ExecError> {
    let mut world = build_courtyard();
    let mut agent = AgentState::standing_at(BlockPos::new(0, FLOOR_Y + 1, 0).floor_center());
    let inventory = Inventory { scaffold_blocks: 4, tools: 1, ..Default::default() };

    let mut exec = MovementExecutor::new(StepPhysics, ExecOptions::default());
    let mut tracer = Tracer;
    let physics = StepPhysics;

    // Step east, jump the ledge, step along the top.
    let route = [
        BlockPos::new(1, FLOOR_Y + 1, 0),
        BlockPos::new(2, FLOOR_Y + 2, 0),
        BlockPos::new(2, FLOOR_Y + 2, 1),
    ];

    let mut now = Tick::ZERO;
    let mut node = Move::start_at(agent.pos.floored(), inventory.count(nav_core::ItemKind::ScaffoldBlock));

    for exit in route {
        let mv = candidate_to(&node, exit, &world);
        println!("executing: {mv}");
        node = mv.clone();

        let init = {
            let ctx = ExecContext::new(&agent, &world, &inventory, now);
            exec.begin(mv, &ctx, &mut tracer)?
        };
        apply(&mut agent, &mut world, &init);

        let mut done = false;
        for _ in 0..MAX_TICKS_PER_MOVE {
            let out = {
                let ctx = ExecContext::new(&agent, &world, &inventory, now);
                exec.tick(&ctx, &mut tracer)
            };
            now = now + 1;
            match out.status {
                Status::Complete => {
                    apply(&mut agent, &mut world, &out.commands);
                    println!("   complete at {now}, agent at {}", agent.pos);
                    done = true;
                    break;
                }
                Status::Failed(e) => return Err(e),
                _ => {
                    apply(&mut agent, &mut world, &out.commands);
                    physics.step(&mut agent, &world);
                }
            }
        }
        assert!(done, "move did not complete within {MAX_TICKS_PER_MOVE} ticks");
    }

    println!("route finished at {}", agent.pos);
    Ok(())
}
