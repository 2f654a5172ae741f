//! Unit tests for nav-move.

use nav_core::{BlockPos, ItemKind};
use nav_world::{Block, GridWorld};

use crate::{InteractAction, Interaction, Move, MoveKind, Movement, MovementConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Flat 11×11 stone floor at y = 63 centered on the origin; the agent's
/// cell is (0, 64, 0).
fn flat_world() -> GridWorld {
    let mut w = GridWorld::new(0);
    w.fill(-5, 5, 63, -5, 5, Block::Solid);
    w
}

/// A single stone block under the agent, air everywhere else.
fn pillar_world() -> GridWorld {
    let mut w = GridWorld::new(0);
    w.set(BlockPos::new(0, 63, 0), Block::Solid);
    w
}

fn root() -> Move {
    Move::start_at(BlockPos::new(0, 64, 0), 0)
}

fn root_with_blocks(blocks: u32) -> Move {
    Move::start_at(BlockPos::new(0, 64, 0), blocks)
}

fn expand(movement: &Movement, node: &Move, world: &GridWorld) -> Vec<Move> {
    let mut out = Vec::new();
    movement.provide_movements(node, world, &MovementConfig::default(), &mut out);
    out
}

fn find_exit(moves: &[Move], cell: BlockPos) -> Option<&Move> {
    moves.iter().find(|m| m.exit_cell() == cell)
}

// ── Interaction lifecycle ─────────────────────────────────────────────────────

mod interaction {
    use super::*;

    #[test]
    fn begin_finish_walks_the_states() {
        let mut it = Interaction::break_solid(BlockPos::new(1, 64, 0));
        assert!(it.is_idle());
        it.begin().unwrap();
        assert!(it.is_performing());
        it.finish().unwrap();
        assert!(it.is_done());
    }

    #[test]
    fn double_begin_and_early_finish_fail() {
        let mut it = Interaction::place_solid(BlockPos::new(1, 63, 0));
        assert!(it.finish().is_err());
        it.begin().unwrap();
        assert!(it.begin().is_err());
        it.finish().unwrap();
        assert!(it.begin().is_err());
    }

    #[test]
    fn abort_returns_to_idle_and_is_repeatable() {
        let mut it = Interaction::drain_liquid(BlockPos::new(2, 64, 0));
        it.abort(); // idle: no-op
        assert!(it.is_idle());
        it.begin().unwrap();
        it.abort();
        assert!(it.is_idle());
        it.begin().unwrap();
        it.finish().unwrap();
        it.abort(); // done: no-op
        assert!(it.is_done());
    }

    #[test]
    fn required_items_match_action_and_material() {
        let brk = Interaction::break_solid(BlockPos::new(0, 0, 0));
        let drain = Interaction::drain_liquid(BlockPos::new(0, 0, 0));
        let place = Interaction::place_solid(BlockPos::new(0, 0, 0));
        assert_eq!(brk.required_item(), ItemKind::Tool);
        assert_eq!(drain.required_item(), ItemKind::Bucket);
        assert_eq!(place.required_item(), ItemKind::ScaffoldBlock);
    }
}

// ── Step ──────────────────────────────────────────────────────────────────────

mod step {
    use super::*;

    #[test]
    fn flat_floor_steps_all_cardinals() {
        let moves = expand(&Movement::Step, &root(), &flat_world());
        assert_eq!(moves.len(), 4);
        for m in &moves {
            assert_eq!(m.kind, MoveKind::Step);
            assert_eq!(m.cost, 1.0);
            assert!(m.to_break.is_empty());
            assert!(m.to_place.is_empty());
            assert_eq!(m.exit_cell().y, 64);
        }
    }

    #[test]
    fn missing_floor_without_blocks_yields_nothing() {
        let moves = expand(&Movement::Step, &root(), &pillar_world());
        assert!(moves.is_empty());
    }

    #[test]
    fn missing_floor_places_with_surcharge() {
        let moves = expand(&Movement::Step, &root_with_blocks(1), &pillar_world());
        assert_eq!(moves.len(), 4);
        for m in &moves {
            assert!((m.cost - 1.1).abs() < 1e-9);
            assert_eq!(m.to_place.len(), 1);
            assert_eq!(m.to_place[0].pos.y, 63);
            assert_eq!(m.remaining_blocks, 0);
        }
    }

    #[test]
    fn wall_in_the_way_schedules_a_break() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 0), Block::Solid);
        let moves = expand(&Movement::Step, &root(), &w);

        let east = find_exit(&moves, BlockPos::new(1, 64, 0)).unwrap();
        assert_eq!(east.cost, 2.0);
        assert_eq!(east.to_break.len(), 1);
        assert_eq!(east.to_break[0].pos, BlockPos::new(1, 64, 0));
        assert_eq!(east.to_break[0].action, InteractAction::Break);
    }

    #[test]
    fn lava_in_the_way_rejects_only_that_direction() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 0), Block::Lava);
        let moves = expand(&Movement::Step, &root(), &w);
        assert_eq!(moves.len(), 3);
        assert!(find_exit(&moves, BlockPos::new(1, 64, 0)).is_none());
    }

    #[test]
    fn break_next_to_lava_is_rejected() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 0), Block::Solid);
        w.set(BlockPos::new(1, 65, 0), Block::Lava);
        let moves = expand(&Movement::Step, &root(), &w);
        assert!(find_exit(&moves, BlockPos::new(1, 64, 0)).is_none());
    }

    #[test]
    fn liquid_entry_generates_no_steps() {
        let mut w = flat_world();
        w.set(BlockPos::new(0, 64, 0), Block::Water);
        let moves = expand(&Movement::Step, &root(), &w);
        assert!(moves.is_empty());
    }
}

// ── StepJump ──────────────────────────────────────────────────────────────────

mod step_jump {
    use super::*;

    fn jump() -> Movement {
        Movement::StepJump { max_step_up: 1.2 }
    }

    #[test]
    fn one_block_ledge_is_jumpable() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 0), Block::Solid);
        let moves = expand(&jump(), &root(), &w);

        let east = find_exit(&moves, BlockPos::new(1, 65, 0)).unwrap();
        assert_eq!(east.kind, MoveKind::StepJump);
        assert_eq!(east.cost, 2.0);
        assert!(east.to_break.is_empty());
        assert!(east.to_place.is_empty());
    }

    #[test]
    fn ledge_above_slab_floor_is_too_high() {
        let mut w = flat_world();
        w.set(BlockPos::new(0, 63, 0), Block::Partial { height_frac: 0.5 });
        w.set(BlockPos::new(1, 64, 0), Block::Solid);
        let moves = expand(&jump(), &root(), &w);
        // rise from the slab top is 1.5
        assert!(find_exit(&moves, BlockPos::new(1, 65, 0)).is_none());
    }

    #[test]
    fn missing_ledge_is_placed_when_blocks_remain() {
        let w = flat_world();
        let moves = expand(&jump(), &root_with_blocks(1), &w);

        let east = find_exit(&moves, BlockPos::new(1, 65, 0)).unwrap();
        assert!((east.cost - 2.1).abs() < 1e-9);
        assert_eq!(east.to_place.len(), 1);
        assert_eq!(east.to_place[0].pos, BlockPos::new(1, 64, 0));
        assert_eq!(east.remaining_blocks, 0);
    }

    #[test]
    fn missing_ledge_and_floor_takes_two_blocks() {
        let w = pillar_world();

        let one = expand(&jump(), &root_with_blocks(1), &w);
        assert!(one.is_empty());

        let two = expand(&jump(), &root_with_blocks(2), &w);
        let east = find_exit(&two, BlockPos::new(1, 65, 0)).unwrap();
        assert!((east.cost - 2.2).abs() < 1e-9);
        assert_eq!(east.to_place.len(), 2);
        // floor first, ledge second
        assert_eq!(east.to_place[0].pos, BlockPos::new(1, 63, 0));
        assert_eq!(east.to_place[1].pos, BlockPos::new(1, 64, 0));
        assert_eq!(east.remaining_blocks, 0);
    }

    #[test]
    fn overhead_block_schedules_a_break() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 0), Block::Solid);
        w.set(BlockPos::new(0, 66, 0), Block::Solid);
        let moves = expand(&jump(), &root(), &w);

        let east = find_exit(&moves, BlockPos::new(1, 65, 0)).unwrap();
        assert_eq!(east.cost, 3.0);
        assert_eq!(east.to_break.len(), 1);
        assert_eq!(east.to_break[0].pos, BlockPos::new(0, 66, 0));
    }
}

// ── DropDown ──────────────────────────────────────────────────────────────────

mod drop_down {
    use super::*;

    fn drop(max_drop: i32, infinite_liquid_drop: bool) -> Movement {
        Movement::DropDown { max_drop, infinite_liquid_drop }
    }

    /// Floor at y = 63 only behind the agent; the east column is open.
    fn ledge_world() -> GridWorld {
        let mut w = GridWorld::new(0);
        w.fill(-5, 0, 63, -5, 5, Block::Solid);
        w
    }

    #[test]
    fn short_drop_lands_above_the_support() {
        let mut w = ledge_world();
        w.set(BlockPos::new(1, 61, 0), Block::Solid);
        let moves = expand(&drop(3, true), &root(), &w);

        let east = find_exit(&moves, BlockPos::new(1, 62, 0)).unwrap();
        assert_eq!(east.kind, MoveKind::DropDown);
        assert_eq!(east.cost, 1.0);
        assert!(east.to_place.is_empty());
    }

    #[test]
    fn deep_drop_onto_solid_is_rejected() {
        let mut w = ledge_world();
        w.set(BlockPos::new(1, 59, 0), Block::Solid);
        let moves = expand(&drop(3, true), &root(), &w);
        assert!(find_exit(&moves, BlockPos::new(1, 60, 0)).is_none());
    }

    #[test]
    fn deep_liquid_landing_allowed_when_unlimited() {
        let mut w = ledge_world();
        w.set(BlockPos::new(1, 54, 0), Block::Water);
        let moves = expand(&drop(3, true), &root(), &w);
        assert!(find_exit(&moves, BlockPos::new(1, 54, 0)).is_some());
    }

    #[test]
    fn deep_liquid_landing_rejected_when_limited() {
        let mut w = ledge_world();
        w.set(BlockPos::new(1, 54, 0), Block::Water);
        let moves = expand(&drop(3, false), &root(), &w);
        assert!(find_exit(&moves, BlockPos::new(1, 54, 0)).is_none());
    }

    #[test]
    fn lava_column_is_rejected() {
        let mut w = ledge_world();
        w.set(BlockPos::new(1, 60, 0), Block::Lava);
        let moves = expand(&drop(3, true), &root(), &w);
        assert!(moves.iter().all(|m| m.exit_cell().x != 1));
    }

    #[test]
    fn bottomless_column_is_rejected() {
        let moves = expand(&drop(3, true), &root(), &ledge_world());
        assert!(moves.iter().all(|m| m.exit_cell().x != 1));
    }
}

// ── Diagonal ──────────────────────────────────────────────────────────────────

mod diagonal {
    use super::*;

    fn diag() -> Movement {
        Movement::Diagonal { max_step_down: 0.6 }
    }

    #[test]
    fn flat_floor_diagonals_cost_sqrt_two() {
        let moves = expand(&diag(), &root(), &flat_world());
        assert_eq!(moves.len(), 4);
        for m in &moves {
            assert_eq!(m.kind, MoveKind::Diagonal);
            assert!((m.cost - std::f64::consts::SQRT_2).abs() < 1e-9);
            assert!(m.to_break.is_empty());
            assert!(m.to_place.is_empty());
        }
    }

    #[test]
    fn missing_target_floor_is_never_placed() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 63, 1), Block::Air);
        let moves = expand(&diag(), &root_with_blocks(8), &w);
        assert_eq!(moves.len(), 3);
        assert!(find_exit(&moves, BlockPos::new(1, 64, 1)).is_none());
    }

    #[test]
    fn blocked_corner_column_schedules_a_break() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 0), Block::Solid);
        let moves = expand(&diag(), &root(), &w);

        // both diagonals through the +x corner pay the break
        for z in [-1, 1] {
            let m = find_exit(&moves, BlockPos::new(1, 64, z)).unwrap();
            assert!((m.cost - (std::f64::consts::SQRT_2 + 1.0)).abs() < 1e-9);
            assert_eq!(m.to_break.len(), 1);
            assert_eq!(m.to_break[0].pos, BlockPos::new(1, 64, 0));
        }
    }

    #[test]
    fn drop_above_limit_is_rejected() {
        // Standing on a tall partial block, every diagonal steps down 0.7.
        let mut w = flat_world();
        w.set(BlockPos::new(0, 64, 0), Block::Partial { height_frac: 0.7 });
        let moves = expand(&diag(), &root(), &w);
        assert!(moves.is_empty());
    }

    #[test]
    fn raised_target_needs_open_corner_columns() {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 1), Block::Partial { height_frac: 0.5 });

        // Both corner floor cells solid: the raised body clips them.
        let moves = expand(&diag(), &root(), &w);
        assert!(find_exit(&moves, BlockPos::new(1, 64, 1)).is_none());

        // Open both corner columns and the step up is accepted, paying the
        // break for the occupied target body cell.
        w.set(BlockPos::new(1, 63, 0), Block::Air);
        w.set(BlockPos::new(0, 63, 1), Block::Air);
        let moves = expand(&diag(), &root(), &w);
        let m = find_exit(&moves, BlockPos::new(1, 64, 1)).unwrap();
        assert!((m.cost - (std::f64::consts::SQRT_2 + 1.0)).abs() < 1e-9);
        assert_eq!(m.to_break[0].pos, BlockPos::new(1, 64, 1));
    }
}

// ── Cross-category properties ─────────────────────────────────────────────────

mod properties {
    use super::*;

    fn busy_world() -> GridWorld {
        let mut w = flat_world();
        w.set(BlockPos::new(1, 64, 0), Block::Solid);
        w.set(BlockPos::new(0, 63, -1), Block::Air);
        w.set(BlockPos::new(-1, 60, 0), Block::Solid);
        w.set(BlockPos::new(0, 64, 1), Block::Water);
        w
    }

    #[test]
    fn generation_is_deterministic() {
        let w = busy_world();
        let node = root_with_blocks(4);
        for movement in Movement::standard_set() {
            let a = expand(&movement, &node, &w);
            let b = expand(&movement, &node, &w);
            assert_eq!(a.len(), b.len());
            for (ma, mb) in a.iter().zip(&b) {
                assert_eq!(ma.exit_cell(), mb.exit_cell());
                assert_eq!(ma.cost, mb.cost);
                assert_eq!(ma.to_break.len(), mb.to_break.len());
                assert_eq!(ma.to_place.len(), mb.to_place.len());
            }
        }
    }

    #[test]
    fn costs_stay_within_the_ceiling() {
        let w = busy_world();
        let cfg = MovementConfig::default();
        let node = root_with_blocks(4);
        for movement in Movement::standard_set() {
            for m in expand(&movement, &node, &w) {
                assert!(m.cost > 0.0);
                assert!(m.cost <= cfg.cost_ceiling);
            }
        }
    }

    #[test]
    fn every_placement_consumes_a_remaining_block() {
        let w = pillar_world();
        let node = root_with_blocks(2);
        for movement in Movement::standard_set() {
            for m in expand(&movement, &node, &w) {
                assert_eq!(
                    m.remaining_blocks,
                    node.remaining_blocks - m.to_place.len() as u32
                );
            }
        }
    }

    #[test]
    fn step_from_saturates_remaining_blocks() {
        // More placements than the parent has blocks left must clamp to
        // zero rather than wrap.
        let node = root();
        assert_eq!(node.remaining_blocks, 0);
        let m = Move::step_from(
            &node,
            1.1,
            BlockPos::new(1, 64, 0).floor_center(),
            MoveKind::Step,
            vec![],
            vec![Interaction::place_solid(BlockPos::new(1, 63, 0))],
        );
        assert_eq!(m.remaining_blocks, 0);
    }

    #[test]
    fn fresh_interactions_are_idle() {
        let w = busy_world();
        let node = root_with_blocks(4);
        for movement in Movement::standard_set() {
            for m in expand(&movement, &node, &w) {
                assert!(m.to_break.iter().all(Interaction::is_idle));
                assert!(m.to_place.iter().all(Interaction::is_idle));
                assert!(m.interactions_done() == (m.to_break.is_empty() && m.to_place.is_empty()));
            }
        }
    }
}
