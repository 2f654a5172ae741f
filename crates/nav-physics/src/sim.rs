//! The physics prediction trait and default stepper.
//!
//! # Pluggability
//!
//! The execution layer calls prediction via the [`Physics`] trait, so a full
//! server-accurate engine can replace the built-in [`StepPhysics`] without
//! touching the executor.  `StepPhysics` models the handful of behaviors the
//! navigation core actually depends on — walking, jumping, falling, liquid
//! buoyancy, and axis-clamped block collision — and is sufficient for tests
//! and offline planning.
//!
//! # Determinism
//!
//! [`Physics::step`] must be a pure function of `(state, world)`: identical
//! inputs produce identical outputs.  Completion and visibility checks rely
//! on replaying predictions from fresh snapshots.

use std::fmt;

use nav_core::{BlockPos, Vec3};
use nav_world::BlockQuery;

use crate::aabb::Aabb;
use crate::state::AgentState;

// ── Ray results ───────────────────────────────────────────────────────────────

/// A block face, named by the outward normal.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    /// −y
    Down,
    /// +y
    Up,
    /// −z
    North,
    /// +z
    South,
    /// −x
    West,
    /// +x
    East,
}

impl Face {
    /// Outward unit normal as integer offsets.
    pub fn normal(self) -> (i32, i32, i32) {
        match self {
            Face::Down => (0, -1, 0),
            Face::Up => (0, 1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Face::Down => "down",
            Face::Up => "up",
            Face::North => "north",
            Face::South => "south",
            Face::West => "west",
            Face::East => "east",
        };
        write!(f, "{name}")
    }
}

/// A resolved block raycast.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayHit {
    /// The physical cell the ray stopped at.
    pub pos: BlockPos,
    /// The face it entered through.
    pub face: Face,
    /// The entry point on that face.
    pub intersect: Vec3,
}

impl RayHit {
    /// The cell a block placed against this hit would occupy.
    pub fn placement_cell(&self) -> BlockPos {
        let (dx, dy, dz) = self.face.normal();
        self.pos.offset(dx, dy, dz)
    }
}

// ── Physics trait ─────────────────────────────────────────────────────────────

/// Pluggable physics prediction engine.
pub trait Physics {
    /// Advance `state` by one tick against `world`, honoring
    /// `state.control`.  Must be deterministic and side-effect free apart
    /// from the `state` mutation.
    fn step<W: BlockQuery>(&self, state: &mut AgentState, world: &W);

    /// Cast a ray from `origin` along `dir` (need not be normalized) up to
    /// `max_distance`, returning the first physical cell hit.
    fn raycast<W: BlockQuery>(
        &self,
        world: &W,
        origin: Vec3,
        dir: Vec3,
        max_distance: f64,
    ) -> Option<RayHit>;

    /// Clone `state` and step it `ticks` times.
    fn predict<W: BlockQuery>(&self, state: &AgentState, world: &W, ticks: u32) -> AgentState {
        let mut s = state.clone();
        for _ in 0..ticks {
            self.step(&mut s, world);
        }
        s
    }
}

// ── StepPhysics ───────────────────────────────────────────────────────────────

/// Per-tick gravity while airborne (blocks/tick²).
const GRAVITY: f64 = 0.08;
/// Vertical drag multiplier applied after gravity.
const VERTICAL_DRAG: f64 = 0.98;
/// Initial jump velocity.
const JUMP_VELOCITY: f64 = 0.42;
/// Walking speed (blocks/tick).
const WALK_SPEED: f64 = 0.1;
/// Sprinting speed.
const SPRINT_SPEED: f64 = 0.13;
/// Sneaking speed.
const SNEAK_SPEED: f64 = 0.03;
/// Horizontal speed while submerged.
const SWIM_SPEED: f64 = 0.04;
/// Upward swim velocity while holding jump in liquid.
const SWIM_UP_VELOCITY: f64 = 0.2;
/// Terminal sink rate in liquid.
const SINK_RATE: f64 = -0.1;
/// Residual horizontal velocity kept each airborne tick with no keys held.
const AIR_INERTIA: f64 = 0.91;
/// Residual horizontal velocity kept each grounded tick with no keys held.
const GROUND_INERTIA: f64 = 0.6;

/// The default prediction engine: simplified kinematics with axis-clamped
/// voxel collision.  Moves y, then x, then z each tick.
pub struct StepPhysics;

impl Physics for StepPhysics {
    fn step<W: BlockQuery>(&self, state: &mut AgentState, world: &W) {
        let in_liquid = touches_liquid(world, &state.aabb());
        state.in_liquid = in_liquid;

        apply_controls(state, in_liquid);

        // Integrate with collision, y first so landings register before
        // horizontal clamping.  Gravity is applied after the move so a fresh
        // jump impulse carries its full first tick.
        let height = state.height();
        let vel = state.vel;

        state.collided_vertically = false;
        state.collided_horizontally = false;
        state.on_ground = false;

        let (dy, hit_y) = collide_axis(world, &state.aabb(), vel.y, Axis::Y);
        state.pos.y += dy;
        if hit_y {
            state.collided_vertically = true;
            if vel.y < 0.0 {
                state.on_ground = true;
            }
            state.vel.y = 0.0;
        }

        let (dx, hit_x) = collide_axis(world, &state.aabb(), vel.x, Axis::X);
        state.pos.x += dx;
        if hit_x {
            state.collided_horizontally = true;
            state.vel.x = 0.0;
        }

        let (dz, hit_z) = collide_axis(world, &state.aabb(), vel.z, Axis::Z);
        state.pos.z += dz;
        if hit_z {
            state.collided_horizontally = true;
            state.vel.z = 0.0;
        }

        // An agent flush on a support surface counts as grounded even when
        // it did not move this tick.
        if !state.on_ground && state.vel.y <= 0.0 {
            let probe = Aabb::agent(state.pos.offset(0.0, -1e-4, 0.0), crate::state::AGENT_WIDTH, height);
            if blocked(world, &probe) {
                state.on_ground = true;
                state.vel.y = 0.0;
            }
        }

        if !in_liquid {
            state.vel.y = (state.vel.y - GRAVITY) * VERTICAL_DRAG;
        }
    }

    fn raycast<W: BlockQuery>(
        &self,
        world: &W,
        origin: Vec3,
        dir: Vec3,
        max_distance: f64,
    ) -> Option<RayHit> {
        let dir = dir.normalize();
        if dir == Vec3::ZERO {
            return None;
        }

        // Amanatides–Woo voxel traversal.
        let mut cell = origin.floored();
        let step_x = if dir.x > 0.0 { 1 } else { -1 };
        let step_y = if dir.y > 0.0 { 1 } else { -1 };
        let step_z = if dir.z > 0.0 { 1 } else { -1 };

        let t_delta = |d: f64| if d == 0.0 { f64::INFINITY } else { (1.0 / d).abs() };
        let (tdx, tdy, tdz) = (t_delta(dir.x), t_delta(dir.y), t_delta(dir.z));

        // Distance along the ray to the first boundary crossing per axis.
        let first = |o: f64, c: i32, d: f64, step: i32| -> f64 {
            if d == 0.0 {
                f64::INFINITY
            } else if step > 0 {
                ((c + 1) as f64 - o) / d
            } else {
                (c as f64 - o) / d
            }
        };
        let mut tx = first(origin.x, cell.x, dir.x, step_x);
        let mut ty = first(origin.y, cell.y, dir.y, step_y);
        let mut tz = first(origin.z, cell.z, dir.z, step_z);

        loop {
            let (t, face);
            if tx <= ty && tx <= tz {
                t = tx;
                tx += tdx;
                cell.x += step_x;
                face = if step_x > 0 { Face::West } else { Face::East };
            } else if ty <= tz {
                t = ty;
                ty += tdy;
                cell.y += step_y;
                face = if step_y > 0 { Face::Down } else { Face::Up };
            } else {
                t = tz;
                tz += tdz;
                cell.z += step_z;
                face = if step_z > 0 { Face::North } else { Face::South };
            }

            if t > max_distance {
                return None;
            }
            if world.block_info(cell).solid_blocking() {
                return Some(RayHit { pos: cell, face, intersect: origin + dir * t });
            }
        }
    }
}

// ── Stepper internals ─────────────────────────────────────────────────────────

enum Axis {
    X,
    Y,
    Z,
}

/// Translate held keys into velocity for this tick.
fn apply_controls(state: &mut AgentState, in_liquid: bool) {
    // Movement basis from yaw: forward is the look direction projected to XZ.
    let fwd = Vec3::new(-state.yaw.sin(), 0.0, state.yaw.cos());
    let left = Vec3::new(fwd.z, 0.0, -fwd.x);

    let c = state.control;
    let mut wish = Vec3::ZERO;
    if c.forward {
        wish = wish + fwd;
    }
    if c.back {
        wish = wish - fwd;
    }
    if c.left {
        wish = wish + left;
    }
    if c.right {
        wish = wish - left;
    }
    let wish = wish.normalize();

    let speed = if in_liquid {
        SWIM_SPEED
    } else if c.sneak {
        SNEAK_SPEED
    } else if c.sprint {
        SPRINT_SPEED
    } else {
        WALK_SPEED
    };

    if wish == Vec3::ZERO {
        let inertia = if state.on_ground { GROUND_INERTIA } else { AIR_INERTIA };
        state.vel.x *= inertia;
        state.vel.z *= inertia;
    } else {
        state.vel.x = wish.x * speed;
        state.vel.z = wish.z * speed;
    }

    if in_liquid {
        state.vel.y = if c.jump {
            SWIM_UP_VELOCITY
        } else {
            (state.vel.y - 0.02).max(SINK_RATE)
        };
    } else if c.jump && state.on_ground {
        state.vel.y = JUMP_VELOCITY;
    }
}

/// `true` if any cell the box overlaps is a liquid.
fn touches_liquid<W: BlockQuery>(world: &W, aabb: &Aabb) -> bool {
    aabb.cells().iter().any(|&c| world.block_info(c).liquid)
}

/// `true` if any physical cell's collision box intersects `aabb`.
fn blocked<W: BlockQuery>(world: &W, aabb: &Aabb) -> bool {
    aabb.cells().iter().any(|&c| {
        let info = world.block_info(c);
        info.physical && Aabb::from_block_to_height(c, info.height).intersects(aabb)
    })
}

/// Clamp a single-axis displacement of `aabb` against physical cells.
///
/// Returns `(allowed_delta, collided)`.
fn collide_axis<W: BlockQuery>(world: &W, aabb: &Aabb, delta: f64, axis: Axis) -> (f64, bool) {
    if delta == 0.0 {
        return (0.0, false);
    }

    // The region swept by the move.
    let swept = match axis {
        Axis::X if delta > 0.0 => Aabb::new(aabb.min, aabb.max.offset(delta, 0.0, 0.0)),
        Axis::X => Aabb::new(aabb.min.offset(delta, 0.0, 0.0), aabb.max),
        Axis::Y if delta > 0.0 => Aabb::new(aabb.min, aabb.max.offset(0.0, delta, 0.0)),
        Axis::Y => Aabb::new(aabb.min.offset(0.0, delta, 0.0), aabb.max),
        Axis::Z if delta > 0.0 => Aabb::new(aabb.min, aabb.max.offset(0.0, 0.0, delta)),
        Axis::Z => Aabb::new(aabb.min.offset(0.0, 0.0, delta), aabb.max),
    };

    let mut allowed = delta;
    for cell in swept.cells() {
        let info = world.block_info(cell);
        if !info.physical {
            continue;
        }
        let b = Aabb::from_block_to_height(cell, info.height);

        // The block only constrains this axis if the boxes overlap on the
        // other two.
        let overlaps_rest = match axis {
            Axis::X => {
                b.min.y < aabb.max.y && b.max.y > aabb.min.y && b.min.z < aabb.max.z && b.max.z > aabb.min.z
            }
            Axis::Y => {
                b.min.x < aabb.max.x && b.max.x > aabb.min.x && b.min.z < aabb.max.z && b.max.z > aabb.min.z
            }
            Axis::Z => {
                b.min.x < aabb.max.x && b.max.x > aabb.min.x && b.min.y < aabb.max.y && b.max.y > aabb.min.y
            }
        };
        if !overlaps_rest {
            continue;
        }

        let (lo, hi, b_lo, b_hi) = match axis {
            Axis::X => (aabb.min.x, aabb.max.x, b.min.x, b.max.x),
            Axis::Y => (aabb.min.y, aabb.max.y, b.min.y, b.max.y),
            Axis::Z => (aabb.min.z, aabb.max.z, b.min.z, b.max.z),
        };

        if delta > 0.0 && b_lo >= hi {
            allowed = allowed.min(b_lo - hi);
        } else if delta < 0.0 && b_hi <= lo {
            allowed = allowed.max(b_hi - lo);
        }
    }

    let collided = (allowed - delta).abs() > 1e-12;
    (allowed, collided)
}
