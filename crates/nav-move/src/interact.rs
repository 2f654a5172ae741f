//! Block interaction sub-tasks.
//!
//! An [`Interaction`] is one break or place of one block, owned by exactly
//! one [`Move`][crate::Move].  Generation creates them idle; the executor
//! drives the `idle → performing → done` lifecycle and may `abort` a
//! performing interaction back to idle.

use thiserror::Error;

use nav_core::{BlockPos, ItemKind, Vec3};
use nav_physics::{Aabb, AgentState, Physics, RayHit};
use nav_world::BlockQuery;

/// Maximum interaction distance from the eye to the target block.
pub const REACH: f64 = 4.0;

/// How placement sample points extend past the target cell: a little
/// horizontally, half a block vertically, so rays can reach top/bottom edges
/// of the neighboring faces.
const SAMPLE_EXPAND: (f64, f64, f64) = (0.1, 0.5, 0.1);

// ── Errors ────────────────────────────────────────────────────────────────────

/// Invalid interaction lifecycle transitions.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InteractError {
    #[error("interaction at {0} is already performing")]
    AlreadyPerforming(BlockPos),

    #[error("interaction at {0} is already done")]
    AlreadyDone(BlockPos),

    #[error("interaction at {0} is not performing")]
    NotPerforming(BlockPos),
}

// ── Interaction ───────────────────────────────────────────────────────────────

/// What the interaction does to the world.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InteractAction {
    /// Remove the block (dig, or drain with a bucket for liquids).
    Break,
    /// Put a block (or liquid) into the cell.
    Place,
}

/// What kind of material the interaction deals with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InteractKind {
    /// A solid block.
    Solid,
    /// A liquid source handled with a bucket.
    LiquidDrain,
    /// Material a placement may overwrite without a break.
    Replaceable,
}

/// One block break or place sub-task.
#[derive(Clone, Debug)]
pub struct Interaction {
    pub pos: BlockPos,
    pub action: InteractAction,
    pub kind: InteractKind,
    /// Perform with the off-hand item slot.
    pub offhand: bool,

    performing: bool,
    done: bool,
}

impl Interaction {
    pub fn new(pos: BlockPos, action: InteractAction, kind: InteractKind) -> Self {
        Self { pos, action, kind, offhand: false, performing: false, done: false }
    }

    /// A break of solid material at `pos`.
    pub fn break_solid(pos: BlockPos) -> Self {
        Self::new(pos, InteractAction::Break, InteractKind::Solid)
    }

    /// A bucket drain of a liquid source at `pos`.
    pub fn drain_liquid(pos: BlockPos) -> Self {
        Self::new(pos, InteractAction::Break, InteractKind::LiquidDrain)
    }

    /// A solid placement into `pos`.
    pub fn place_solid(pos: BlockPos) -> Self {
        Self::new(pos, InteractAction::Place, InteractKind::Solid)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_performing(&self) -> bool {
        self.performing
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.performing && !self.done
    }

    /// idle → performing.
    pub fn begin(&mut self) -> Result<(), InteractError> {
        if self.performing {
            return Err(InteractError::AlreadyPerforming(self.pos));
        }
        if self.done {
            return Err(InteractError::AlreadyDone(self.pos));
        }
        self.performing = true;
        Ok(())
    }

    /// performing → done.
    pub fn finish(&mut self) -> Result<(), InteractError> {
        if !self.performing {
            return Err(InteractError::NotPerforming(self.pos));
        }
        self.performing = false;
        self.done = true;
        Ok(())
    }

    /// performing → idle.  No-op from any other state; an aborted
    /// interaction is not done and may be re-begun.
    pub fn abort(&mut self) {
        self.performing = false;
    }

    // ── Item requirements ─────────────────────────────────────────────────

    /// The item kind this interaction must hold to proceed.
    pub fn required_item(&self) -> ItemKind {
        match (self.action, self.kind) {
            (InteractAction::Break, InteractKind::LiquidDrain) => ItemKind::Bucket,
            (InteractAction::Break, _) => ItemKind::Tool,
            (InteractAction::Place, InteractKind::LiquidDrain) => ItemKind::WaterBucket,
            (InteractAction::Place, _) => ItemKind::ScaffoldBlock,
        }
    }

    // ── Prediction queries ────────────────────────────────────────────────

    /// Search the next `max_ticks` of predicted agent motion for the first
    /// tick at which this interaction can be executed.
    ///
    /// For a placement, a predicted tick qualifies when some ray from the
    /// predicted eye toward a sample vertex around the target cell resolves
    /// to exactly that cell through an adjacent face, and the placed block
    /// would not intersect the agent's own predicted box.  A tick whose
    /// only rejections are self-intersections records a crouch tick instead:
    /// the agent must sneak as of that predicted tick (shrinking its box)
    /// for the later accepting tick to hold.
    ///
    /// For a break, a tick qualifies as soon as the target is within reach
    /// of the predicted eye — digging is not blocked by line of sight the
    /// way placement is.
    ///
    /// Returns `None` when no tick within the horizon qualifies; the caller
    /// retries after waiting, this is not an error.
    pub fn visibility_check<W: BlockQuery, P: Physics>(
        &self,
        agent: &AgentState,
        world: &W,
        physics: &P,
        max_ticks: u32,
    ) -> Option<Visibility> {
        match self.action {
            InteractAction::Break => self.break_reachable(agent, world, physics, max_ticks),
            InteractAction::Place => self.place_visible(agent, world, physics, max_ticks),
        }
    }

    fn break_reachable<W: BlockQuery, P: Physics>(
        &self,
        agent: &AgentState,
        world: &W,
        physics: &P,
        max_ticks: u32,
    ) -> Option<Visibility> {
        let center = self.pos.floor_center().offset(0.0, 0.5, 0.0);
        let mut state = agent.clone();
        for i in 0..=max_ticks {
            if state.eye_pos().distance_to(center) <= REACH {
                return Some(Visibility { ticks: i, crouch_tick: None, rays: vec![] });
            }
            physics.step(&mut state, world);
        }
        None
    }

    fn place_visible<W: BlockQuery, P: Physics>(
        &self,
        agent: &AgentState,
        world: &W,
        physics: &P,
        max_ticks: u32,
    ) -> Option<Visibility> {
        let target_box = Aabb::from_block(self.pos);
        let (ex, ey, ez) = SAMPLE_EXPAND;
        let samples = target_box.expand(ex, ey, ez).vertices();

        let mut state = agent.clone();
        let mut crouch_tick = None;

        for i in 0..=max_ticks {
            let eye = state.eye_pos();
            let body = state.aabb();
            let mut rays: Vec<RayHit> = Vec::new();
            let mut self_blocked = false;

            for sample in samples {
                let Some(hit) = physics.raycast(world, eye, sample - eye, REACH) else {
                    continue;
                };
                if hit.placement_cell() != self.pos {
                    continue;
                }
                if target_box.intersects(&body) {
                    self_blocked = true;
                    continue;
                }
                rays.push(hit);
            }

            if self_blocked && crouch_tick.is_none() {
                // Crouching from this predicted tick on shrinks the box out
                // of the placement cell.
                crouch_tick = Some(i);
                state.control.sneak = true;
            }

            if !rays.is_empty() {
                sort_nearest_first(&mut rays, eye);
                return Some(Visibility { ticks: i, crouch_tick, rays });
            }

            physics.step(&mut state, world);
        }
        None
    }

    /// While performing: may outside movement control run for the next
    /// `ticks` without compromising this interaction?  Predicts forward and
    /// requires the target to stay within reach.  Always `true` when idle
    /// or done.
    pub fn reach_holds<W: BlockQuery, P: Physics>(
        &self,
        agent: &AgentState,
        world: &W,
        physics: &P,
        ticks: u32,
    ) -> bool {
        if !self.performing {
            return true;
        }
        let predicted = physics.predict(agent, world, ticks);
        let center = self.pos.floor_center().offset(0.0, 0.5, 0.0);
        predicted.eye_pos().distance_to(center) < REACH
    }
}

// ── Visibility result ─────────────────────────────────────────────────────────

/// A resolved visibility search.
#[derive(Clone, Debug)]
pub struct Visibility {
    /// Predicted ticks to wait before the interaction is executable.
    pub ticks: u32,
    /// Predicted tick index at which the agent must start sneaking to avoid
    /// placing a block into its own body, if any.
    pub crouch_tick: Option<u32>,
    /// Accepted rays, nearest intersect first.  Empty for break
    /// interactions (reach-gated, not ray-gated).
    pub rays: Vec<RayHit>,
}

impl Visibility {
    /// The ray to execute against — nearest accepted sample.
    pub fn best_ray(&self) -> Option<&RayHit> {
        self.rays.first()
    }
}

fn sort_nearest_first(rays: &mut [RayHit], eye: Vec3) {
    rays.sort_by(|a, b| {
        let da = a.intersect.distance_to(eye);
        let db = b.intersect.distance_to(eye);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });
}
