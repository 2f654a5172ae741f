//! Unit tests for nav-physics.

use nav_core::{BlockPos, Control, Vec3};
use nav_world::{Block, GridWorld};

use crate::{Aabb, AgentState, Face, Physics, StepPhysics};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Flat 9×9 stone floor at y = 63 centered on the origin; agent stands at
/// y = 64.
fn flat_world() -> GridWorld {
    let mut w = GridWorld::new(0);
    w.fill(-4, 4, 63, -4, 4, Block::Solid);
    w
}

fn standing(x: f64, z: f64) -> AgentState {
    AgentState::standing_at(Vec3::new(x, 64.0, z))
}

// ── Aabb ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod aabb {
    use super::*;

    #[test]
    fn block_box_is_unit_cube() {
        let b = Aabb::from_block(BlockPos::new(1, 2, 3));
        assert_eq!(b.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.max, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn flush_boxes_do_not_intersect() {
        let a = Aabb::from_block(BlockPos::new(0, 0, 0));
        let b = Aabb::from_block(BlockPos::new(1, 0, 0));
        assert!(!a.intersects(&b));
        assert!(a.expand(0.1, 0.0, 0.0).intersects(&b));
    }

    #[test]
    fn cells_excludes_flush_boundary() {
        let a = Aabb::agent(Vec3::new(0.5, 64.0, 0.5), 0.6, 1.8);
        let cells = a.cells();
        // 0.6-wide box centered in a cell spans one column, two cells tall.
        assert_eq!(cells.len(), 2);
        assert!(cells.contains(&BlockPos::new(0, 64, 0)));
        assert!(cells.contains(&BlockPos::new(0, 65, 0)));
    }

    #[test]
    fn vertices_count_and_corners() {
        let b = Aabb::from_block(BlockPos::new(0, 0, 0));
        let vs = b.vertices();
        assert_eq!(vs.len(), 8);
        assert!(vs.contains(&Vec3::ZERO));
        assert!(vs.contains(&Vec3::new(1.0, 1.0, 1.0)));
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_state {
    use super::*;

    #[test]
    fn look_at_faces_target() {
        let mut s = standing(0.5, 0.5);
        s.look_at(Vec3::new(0.5, s.eye_pos().y, 10.5));
        let dir = s.look_dir();
        assert!(dir.z > 0.99, "expected +z look, got {dir}");
        assert!(dir.y.abs() < 1e-9);
    }

    #[test]
    fn look_at_horizontal_keeps_gaze_level() {
        let mut s = standing(0.5, 0.5);
        s.look_at_horizontal(Vec3::new(5.5, 0.0, 0.5));
        assert!(s.pitch.abs() < 1e-9);
        assert!(s.look_dir().x > 0.99);
    }

    #[test]
    fn sneaking_shrinks_box_and_eye() {
        let mut s = standing(0.5, 0.5);
        let tall = s.aabb();
        let eye = s.eye_pos();
        s.control.set(Control::Sneak, true);
        assert!(s.aabb().max.y < tall.max.y);
        assert!(s.eye_pos().y < eye.y);
    }
}

// ── StepPhysics ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepper {
    use super::*;

    #[test]
    fn falls_and_lands_on_floor() {
        let w = flat_world();
        let mut s = AgentState::standing_at(Vec3::new(0.5, 67.0, 0.5));
        s.on_ground = false;

        for _ in 0..40 {
            StepPhysics.step(&mut s, &w);
        }
        assert!(s.on_ground);
        assert!((s.pos.y - 64.0).abs() < 1e-9, "rests on surface, got y={}", s.pos.y);
    }

    #[test]
    fn walks_toward_look_direction() {
        let w = flat_world();
        let mut s = standing(0.5, 0.5);
        s.look_at_horizontal(Vec3::new(0.5, 64.0, 3.5));
        s.control.set(Control::Forward, true);

        for _ in 0..10 {
            StepPhysics.step(&mut s, &w);
        }
        assert!(s.pos.z > 1.0, "moved +z, got {}", s.pos.z);
        assert!((s.pos.x - 0.5).abs() < 1e-6);
        assert!(s.on_ground);
    }

    #[test]
    fn jump_leaves_ground_then_lands() {
        let w = flat_world();
        let mut s = standing(0.5, 0.5);
        s.control.set(Control::Jump, true);

        StepPhysics.step(&mut s, &w);
        assert!(!s.on_ground);
        assert!(s.pos.y > 64.0);

        s.control.clear();
        let mut peak: f64 = 0.0;
        for _ in 0..30 {
            StepPhysics.step(&mut s, &w);
            peak = peak.max(s.pos.y);
        }
        assert!(peak > 65.0, "jump clears one block, peak={peak}");
        assert!(s.on_ground);
        assert!((s.pos.y - 64.0).abs() < 1e-9);
    }

    #[test]
    fn wall_blocks_horizontal_motion() {
        let mut w = flat_world();
        w.set(BlockPos::new(0, 64, 2), Block::Solid);
        w.set(BlockPos::new(0, 65, 2), Block::Solid);

        let mut s = standing(0.5, 0.5);
        s.look_at_horizontal(Vec3::new(0.5, 64.0, 5.0));
        s.control.set(Control::Forward, true);

        for _ in 0..30 {
            StepPhysics.step(&mut s, &w);
        }
        assert!(s.collided_horizontally);
        assert!(s.pos.z < 2.0 - 0.3 + 1e-9, "stopped at wall, z={}", s.pos.z);
    }

    #[test]
    fn liquid_detected_and_sink_bounded() {
        let mut w = GridWorld::new(0);
        w.fill(-2, 2, 60, -2, 2, Block::Solid);
        for y in 61..=64 {
            w.fill(-2, 2, y, -2, 2, Block::Water);
        }
        let mut s = AgentState::standing_at(Vec3::new(0.5, 63.0, 0.5));
        s.on_ground = false;

        StepPhysics.step(&mut s, &w);
        assert!(s.in_liquid);
        assert!(s.vel.y >= -0.1 - 1e-9);
    }

    #[test]
    fn holding_jump_in_liquid_swims_up() {
        let mut w = GridWorld::new(0);
        for y in 60..=66 {
            w.fill(-2, 2, y, -2, 2, Block::Water);
        }
        let mut s = AgentState::standing_at(Vec3::new(0.5, 61.0, 0.5));
        s.on_ground = false;
        s.control.set(Control::Jump, true);

        let y0 = s.pos.y;
        for _ in 0..5 {
            StepPhysics.step(&mut s, &w);
        }
        assert!(s.pos.y > y0);
    }

    #[test]
    fn prediction_is_deterministic() {
        let w = flat_world();
        let mut s = standing(0.5, 0.5);
        s.look_at_horizontal(Vec3::new(3.5, 64.0, 0.5));
        s.control.set(Control::Forward, true);
        s.control.set(Control::Sprint, true);

        let a = StepPhysics.predict(&s, &w, 12);
        let b = StepPhysics.predict(&s, &w, 12);
        assert_eq!(a, b);
    }
}

// ── Raycast ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod raycast {
    use super::*;

    #[test]
    fn straight_down_hits_top_face() {
        let w = flat_world();
        let hit = StepPhysics
            .raycast(&w, Vec3::new(0.5, 65.62, 0.5), Vec3::new(0.0, -1.0, 0.0), 5.0)
            .unwrap();
        assert_eq!(hit.pos, BlockPos::new(0, 63, 0));
        assert_eq!(hit.face, Face::Up);
        assert!((hit.intersect.y - 64.0).abs() < 1e-9);
    }

    #[test]
    fn horizontal_hits_near_face() {
        let mut w = GridWorld::new(0);
        w.set(BlockPos::new(0, 64, 3), Block::Solid);
        let hit = StepPhysics
            .raycast(&w, Vec3::new(0.5, 64.5, 0.5), Vec3::new(0.0, 0.0, 1.0), 5.0)
            .unwrap();
        assert_eq!(hit.pos, BlockPos::new(0, 64, 3));
        assert_eq!(hit.face, Face::North);
        assert_eq!(hit.placement_cell(), BlockPos::new(0, 64, 2));
    }

    #[test]
    fn respects_max_distance() {
        let mut w = GridWorld::new(0);
        w.set(BlockPos::new(0, 64, 10), Block::Solid);
        let hit = StepPhysics.raycast(&w, Vec3::new(0.5, 64.5, 0.5), Vec3::new(0.0, 0.0, 1.0), 4.0);
        assert!(hit.is_none());
    }

    #[test]
    fn liquids_do_not_block_rays() {
        let mut w = GridWorld::new(0);
        w.set(BlockPos::new(0, 64, 2), Block::Water);
        w.set(BlockPos::new(0, 64, 4), Block::Solid);
        let hit = StepPhysics
            .raycast(&w, Vec3::new(0.5, 64.5, 0.5), Vec3::new(0.0, 0.0, 1.0), 6.0)
            .unwrap();
        assert_eq!(hit.pos, BlockPos::new(0, 64, 4));
    }
}
