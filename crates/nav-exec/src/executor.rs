//! The `MovementExecutor` and its per-tick state machine.

use nav_core::{Control, Tick, Vec3};
use nav_physics::{AgentState, Physics, RayHit};
use nav_move::{InteractAction, InteractKind, Move, MoveKind};
use nav_world::BlockQuery;

use crate::{AgentCommand, ExecContext, ExecError, ExecObserver, ExecResult};

// ── Options ───────────────────────────────────────────────────────────────────

/// Tunable execution thresholds.
///
/// Defaults reproduce the behavior the generators' costs assume; loosen or
/// tighten per deployment without touching executor code.
#[derive(Clone, Debug)]
pub struct ExecOptions {
    /// Directional similarity required by [`MovementExecutor::align`].
    pub align_dot: f64,

    /// Directional similarity accepted by the completion prediction.
    pub heading_dot: f64,

    /// Horizontal arrival radius around the exit position.
    pub arrive_distance: f64,

    /// Arrival radius for jump moves, which land less precisely.
    pub jump_arrive_distance: f64,

    /// Hard per-move tick ceiling; exceeding it cancels the move.
    pub tick_budget: u32,

    /// Ticks granted to abort negotiation before giving up.
    pub abort_timeout_ticks: u64,

    /// Extra prediction ticks in the completion check.
    pub completion_lookahead: u32,

    /// Prediction horizon for interaction visibility searches.
    pub visibility_horizon: u32,

    /// Prediction ticks the active interaction must tolerate before
    /// movement control may run alongside it.
    pub reach_lookahead: u32,

    /// Permit the sprint control on unobstructed moves.
    pub allow_sprint: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            align_dot:            0.95,
            heading_dot:          0.5,
            arrive_distance:      0.2,
            jump_arrive_distance: 0.3,
            tick_budget:          160,
            abort_timeout_ticks:  20,
            completion_lookahead: 1,
            visibility_horizon:   5,
            reach_lookahead:      1,
            allow_sprint:         true,
        }
    }
}

// ── Tick output ───────────────────────────────────────────────────────────────

/// Outcome of one executor tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    /// Movement control is active; the move is not finished.
    InProgress,

    /// An interaction gate (visibility wait, countdown, or abort
    /// negotiation) is holding this tick.
    Waiting,

    /// The move's exit condition holds; the run ended.
    Complete,

    /// The run ended in failure.  Controls were cleared.
    Failed(ExecError),
}

/// Status plus the commands to apply this tick, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutput {
    pub status:   Status,
    pub commands: Vec<AgentCommand>,
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// Where the active interaction is in its own little lifecycle.
enum InteractPhase {
    /// Bring the required item into the hand.
    Equip,
    /// Wait for a predicted tick at which the interaction resolves.
    AwaitVisibility,
    /// Count down to the resolved execution tick, crouching on schedule.
    Countdown { remaining: u32, elapsed: u32, crouch_after: Option<u32> },
    /// Emit the world-changing command and finish the handler.
    Issue,
}

/// The single interaction currently delegated control, if any.
struct ActiveInteraction {
    /// Index into the run's break-then-place interaction order.
    index:     usize,
    phase:     InteractPhase,
    /// Accepted placement ray, captured when visibility resolved.
    ray:       Option<RayHit>,
    crouching: bool,
}

/// Exclusively owned state for one move being executed.
struct MoveRun {
    mv:        Move,
    ticks:     u32,
    active:    Option<ActiveInteraction>,
    jumped:    bool,
    jump_tick: u32,
}

impl MoveRun {
    fn new(mv: Move) -> Self {
        Self { mv, ticks: 0, active: None, jumped: false, jump_tick: 0 }
    }

    fn breaks(&self) -> usize {
        self.mv.to_break.len()
    }

    /// Interactions are ordered breaks first, then places.
    fn interaction(&self, index: usize) -> &nav_move::Interaction {
        if index < self.breaks() {
            &self.mv.to_break[index]
        } else {
            &self.mv.to_place[index - self.breaks()]
        }
    }

    fn interaction_mut(&mut self, index: usize) -> &mut nav_move::Interaction {
        let breaks = self.breaks();
        if index < breaks {
            &mut self.mv.to_break[index]
        } else {
            &mut self.mv.to_place[index - breaks]
        }
    }

    fn interaction_count(&self) -> usize {
        self.mv.to_break.len() + self.mv.to_place.len()
    }

    /// First idle interaction in break-then-place order.
    fn next_pending(&self) -> Option<usize> {
        (0..self.interaction_count()).find(|&i| self.interaction(i).is_idle())
    }

    fn places_pending(&self) -> bool {
        self.mv.to_place.iter().any(|p| !p.is_done())
    }
}

// ── Executor ──────────────────────────────────────────────────────────────────

/// Drives one [`Move`] at a time, one call per physics tick, emitting
/// [`AgentCommand`] values instead of touching the agent directly.
///
/// # Type parameter
///
/// `P` must implement [`Physics`] (e.g. [`nav_physics::StepPhysics`]).
/// Swap it at compile time for a different prediction model with no runtime
/// overhead.
///
/// # Lifecycle
///
/// ```text
/// begin ─→ tick* ─→ Complete
///            │
///            ├─ safety bound ─→ Failed(Cancelled | MissingItem | …)
///            └─ abort() ─→ tick* (negotiation) ─→ Failed(Aborted | AbortTimeout)
/// ```
///
/// `cancelled` and `resetting` are checked at every entry point before any
/// control command is built; a resetting executor rejects all work until
/// [`reset`][Self::reset].
pub struct MovementExecutor<P: Physics> {
    /// The prediction engine.
    pub physics: P,

    /// Execution thresholds.
    pub options: ExecOptions,

    current:       Option<MoveRun>,
    cancelled:     bool,
    resetting:     bool,
    abort_started: Tick,
}

impl<P: Physics> MovementExecutor<P> {
    pub fn new(physics: P, options: ExecOptions) -> Self {
        Self {
            physics,
            options,
            current: None,
            cancelled: false,
            resetting: false,
            abort_started: Tick::ZERO,
        }
    }

    /// Whether a move is currently running.
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    // ── Session control ───────────────────────────────────────────────────

    /// Accept `mv` and emit its initial orientation and controls.
    ///
    /// Fails without side effects when cancelled, resetting, already
    /// running, or when the inventory cannot cover the move's scheduled
    /// interactions.
    pub fn begin<W: BlockQuery>(
        &mut self,
        mv: Move,
        ctx: &ExecContext<W>,
        observer: &mut dyn ExecObserver,
    ) -> ExecResult<Vec<AgentCommand>> {
        if self.resetting {
            return Err(ExecError::Resetting);
        }
        if self.cancelled {
            return Err(ExecError::Aborted);
        }
        if let Some(run) = &self.current {
            return Err(ExecError::Cancelled {
                kind:   run.mv.kind,
                reason: "a move is already running",
            });
        }

        for it in mv.to_break.iter().chain(&mv.to_place) {
            let item = it.required_item();
            if !ctx.inventory.has(item) {
                return Err(ExecError::MissingItem(item));
            }
        }

        observer.on_move_start(mv.kind, mv.exit_pos);

        let mut run = MoveRun::new(mv);
        let mut commands = Vec::new();
        movement_control(&mut run, ctx.agent, &self.options, &mut commands);
        self.current = Some(run);
        Ok(commands)
    }

    /// Request cooperative cancellation.  Idempotent: repeated calls while
    /// already cancelled or resetting do nothing.  Pending interaction
    /// handlers are aborted exactly once; subsequent [`tick`][Self::tick]
    /// calls negotiate until the agent reaches a safe stopping state or the
    /// timeout expires.
    pub fn abort(&mut self, now: Tick, resetting: bool, observer: &mut dyn ExecObserver) {
        if self.cancelled || self.resetting {
            return;
        }
        self.cancelled = true;
        self.resetting = resetting;
        self.abort_started = now;

        if let Some(run) = &mut self.current {
            observer.on_abort(run.mv.kind);
            run.active = None;
            for it in run.mv.to_break.iter_mut().chain(run.mv.to_place.iter_mut()) {
                it.abort();
            }
        }
    }

    /// Clear all session state, including the `resetting` latch.
    pub fn reset(&mut self) {
        self.current = None;
        self.cancelled = false;
        self.resetting = false;
    }

    /// Whether stopping right now would leave the agent in a stable state:
    /// standing on something, or swimming.
    pub fn safe_to_cancel<W: BlockQuery>(&self, ctx: &ExecContext<W>) -> bool {
        ctx.agent.on_ground || ctx.world.block_info(ctx.agent.pos.floored()).liquid
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the run by one tick.
    ///
    /// Re-asserts look target and controls, drives at most one interaction
    /// handler, enforces the per-move safety bounds, and reports the run's
    /// status.  Failure statuses always carry
    /// [`AgentCommand::ClearControls`] so the agent never keeps stale
    /// inputs.
    pub fn tick<W: BlockQuery>(
        &mut self,
        ctx: &ExecContext<W>,
        observer: &mut dyn ExecObserver,
    ) -> TickOutput {
        if self.resetting {
            let out = failed(ExecError::Resetting);
            observer.on_tick(ctx.now, &out.status);
            return out;
        }
        if self.cancelled {
            let out = self.negotiate_abort(ctx);
            observer.on_tick(ctx.now, &out.status);
            return out;
        }
        if self.current.is_none() {
            let out = failed(ExecError::Cancelled {
                kind:   MoveKind::Idle,
                reason: "no move in progress",
            });
            observer.on_tick(ctx.now, &out.status);
            return out;
        }

        if self.is_complete(ctx) {
            self.current = None;
            let out = TickOutput {
                status:   Status::Complete,
                commands: vec![AgentCommand::ClearControls],
            };
            observer.on_tick(ctx.now, &out.status);
            return out;
        }

        let out = self.drive(ctx, observer);
        if matches!(out.status, Status::Failed(_)) {
            self.current = None;
        }
        observer.on_tick(ctx.now, &out.status);
        out
    }

    fn negotiate_abort<W: BlockQuery>(&mut self, ctx: &ExecContext<W>) -> TickOutput {
        if self.safe_to_cancel(ctx) {
            self.current = None;
            self.cancelled = false;
            return failed(ExecError::Aborted);
        }
        let waited = ctx.now.since(self.abort_started);
        if waited >= self.options.abort_timeout_ticks {
            self.current = None;
            self.cancelled = false;
            return failed(ExecError::AbortTimeout { waited });
        }
        TickOutput {
            status:   Status::Waiting,
            commands: vec![AgentCommand::ClearControls],
        }
    }

    fn drive<W: BlockQuery>(
        &mut self,
        ctx: &ExecContext<W>,
        observer: &mut dyn ExecObserver,
    ) -> TickOutput {
        let opts = self.options.clone();
        let physics = &self.physics;
        let Some(run) = self.current.as_mut() else {
            return failed(ExecError::Cancelled {
                kind:   MoveKind::Idle,
                reason: "no move in progress",
            });
        };

        run.ticks += 1;
        if run.ticks > opts.tick_budget {
            return failed(ExecError::Cancelled {
                kind:   run.mv.kind,
                reason: "tick budget exceeded",
            });
        }
        if run.jumped
            && ctx.agent.on_ground
            && ctx.agent.pos.y + 1e-9 < run.mv.exit_pos.y
            && run.ticks > run.jump_tick + 20
        {
            return failed(ExecError::Cancelled {
                kind:   run.mv.kind,
                reason: "fell short of the ledge",
            });
        }

        // Delegate at most one interaction handler.
        if run.active.is_none() && !run.mv.interactions_done() {
            if let Some(index) = run.next_pending() {
                let it = run.interaction(index);
                let item = it.required_item();
                if !ctx.inventory.has(item) {
                    return failed(ExecError::MissingItem(item));
                }
                match it.action {
                    // A placement needs a physical face to place against.
                    InteractAction::Place => {
                        if !it.pos.neighbors6().iter().any(|&n| ctx.world.block_info(n).physical)
                        {
                            return failed(ExecError::MissingBlock(it.pos));
                        }
                    }
                    // A break needs its target to still be there; the world
                    // may have changed since the move was generated.
                    InteractAction::Break => {
                        let info = ctx.world.block_info(it.pos);
                        let present = if it.kind == InteractKind::LiquidDrain {
                            info.liquid
                        } else {
                            info.physical
                        };
                        if !present {
                            return failed(ExecError::MissingBlock(it.pos));
                        }
                    }
                }
                observer.on_interaction_start(it.pos);
                run.active = Some(ActiveInteraction {
                    index,
                    phase: InteractPhase::Equip,
                    ray: None,
                    crouching: false,
                });
            }
        }

        let mut interact_cmds = Vec::new();
        let mut waiting = false;
        if run.active.is_some() {
            match drive_interaction(run, ctx, physics, &opts, &mut interact_cmds, observer) {
                Ok(w) => waiting = w,
                Err(e) => return failed(e),
            }
        }

        // One writer to control state per tick: the handler keeps exclusive
        // control whenever outside movement could pull the agent out of
        // reach mid-interaction.
        let mut commands = Vec::new();
        let suppressed = match &run.active {
            Some(active) => !run.interaction(active.index).reach_holds(
                ctx.agent,
                ctx.world,
                physics,
                opts.reach_lookahead,
            ),
            None => false,
        };
        if suppressed {
            commands.push(AgentCommand::ClearControls);
            commands.extend(interact_cmds);
        } else {
            commands.extend(interact_cmds);
            movement_control(run, ctx.agent, &opts, &mut commands);
        }

        TickOutput {
            status: if waiting { Status::Waiting } else { Status::InProgress },
            commands,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Pre-commit directional check: is the agent still approaching the
    /// exit along the move's own displacement, standing on good support —
    /// or already there?
    pub fn align<W: BlockQuery>(&self, ctx: &ExecContext<W>) -> bool {
        let Some(run) = &self.current else {
            return false;
        };
        let exit = run.mv.exit_pos;
        let pos = ctx.agent.pos;

        if pos.xz_distance_to(exit) < self.options.arrive_distance {
            return true;
        }

        let dir = (exit - run.mv.entry_pos).xz().normalize();
        let toward = (exit - pos).xz().normalize();
        if toward.dot(dir) <= self.options.align_dot {
            return false;
        }

        let here_ok = ctx.agent.on_ground
            && ctx.world.block_info(pos.floored().offset(0, -1, 0)).physical
            || ctx.world.block_info(pos.floored()).liquid;
        let target_ok = ctx.world.block_info(run.mv.exit_cell().offset(0, -1, 0)).physical
            || ctx.world.block_info(run.mv.exit_cell()).liquid;
        here_ok && target_ok
    }

    /// Exit condition for the current move.
    ///
    /// Predicts a short horizon ahead and accepts when every scheduled
    /// interaction is done and the predicted agent rests on good support in
    /// the exit column while still heading toward (or already at) the exit.
    /// Falls back to an exact static check: within the arrival radius, at
    /// the exit height, grounded.
    pub fn is_complete<W: BlockQuery>(&self, ctx: &ExecContext<W>) -> bool {
        let Some(run) = &self.current else {
            return false;
        };
        if !run.mv.interactions_done() || run.active.is_some() {
            return false;
        }

        let exit = run.mv.exit_pos;
        let arrive = match run.mv.kind {
            MoveKind::StepJump => self.options.jump_arrive_distance,
            _ => self.options.arrive_distance,
        };

        let predicted =
            self.physics.predict(ctx.agent, ctx.world, self.options.completion_lookahead);
        if predicted_complete(run, &predicted, ctx.world, exit, arrive, self.options.heading_dot) {
            return true;
        }

        // Static fallback: exactly there.
        ctx.agent.pos.xz_distance_to(exit) < arrive
            && (ctx.agent.pos.y - exit.y).abs() < 1e-6
            && ctx.agent.on_ground
    }

    /// The first pending interaction (breaks before places) whose
    /// visibility check resolves within `ticks` of prediction.
    pub fn interact_possible<W: BlockQuery>(&self, ctx: &ExecContext<W>, ticks: u32) -> Option<usize> {
        let run = self.current.as_ref()?;
        (0..run.interaction_count()).find(|&i| {
            let it = run.interaction(i);
            it.is_idle() && it.visibility_check(ctx.agent, ctx.world, &self.physics, ticks).is_some()
        })
    }
}

fn failed(err: ExecError) -> TickOutput {
    TickOutput {
        status:   Status::Failed(err),
        commands: vec![AgentCommand::ClearControls],
    }
}

// ── Interaction driving ───────────────────────────────────────────────────────

/// Advance the active interaction one phase (or more when a phase resolves
/// instantly).  Returns whether the run is gated on the handler this tick.
///
/// The handler is taken out of the run for the duration of the call and
/// reinstalled unless it finished, so the run's interactions stay freely
/// borrowable in between.
fn drive_interaction<W: BlockQuery, P: Physics>(
    run: &mut MoveRun,
    ctx: &ExecContext<W>,
    physics: &P,
    opts: &ExecOptions,
    out: &mut Vec<AgentCommand>,
    observer: &mut dyn ExecObserver,
) -> ExecResult<bool> {
    let Some(mut active) = run.active.take() else {
        return Ok(false);
    };
    let index = active.index;

    loop {
        match &mut active.phase {
            InteractPhase::Equip => {
                let it = run.interaction(index);
                out.push(AgentCommand::Equip { kind: it.required_item(), offhand: it.offhand });
                active.phase = InteractPhase::AwaitVisibility;
                run.active = Some(active);
                return Ok(true);
            }

            InteractPhase::AwaitVisibility => {
                let it = run.interaction(index);
                let Some(vis) =
                    it.visibility_check(ctx.agent, ctx.world, physics, opts.visibility_horizon)
                else {
                    // Not an error: retry next tick, bounded by the move's
                    // tick budget.
                    run.active = Some(active);
                    return Ok(true);
                };

                let look = match vis.best_ray() {
                    Some(ray) => ray.intersect,
                    None => it.pos.floor_center().offset(0.0, 0.5, 0.0),
                };
                out.push(AgentCommand::LookAt { target: look, horizontal: false });

                run.interaction_mut(index).begin()?;
                active.ray = vis.best_ray().cloned();
                // The recorded crouch tick is best-effort: clamp it into the
                // wait window rather than trusting it to be monotonic.
                active.phase = InteractPhase::Countdown {
                    remaining:    vis.ticks,
                    elapsed:      0,
                    crouch_after: vis.crouch_tick.map(|c| c.min(vis.ticks)),
                };
            }

            InteractPhase::Countdown { remaining, elapsed, crouch_after } => {
                if let Some(c) = *crouch_after {
                    if *elapsed >= c && !active.crouching {
                        active.crouching = true;
                        out.push(AgentCommand::SetControl { control: Control::Sneak, active: true });
                    }
                }
                if *remaining == 0 {
                    active.phase = InteractPhase::Issue;
                    continue;
                }
                *remaining -= 1;
                *elapsed += 1;
                run.active = Some(active);
                return Ok(true);
            }

            InteractPhase::Issue => {
                let it = run.interaction(index);
                match (it.action, it.kind) {
                    (InteractAction::Break, InteractKind::LiquidDrain)
                    | (InteractAction::Place, InteractKind::LiquidDrain) => {
                        out.push(AgentCommand::ActivateItem { offhand: it.offhand });
                    }
                    (InteractAction::Break, _) => {
                        out.push(AgentCommand::Dig { pos: it.pos });
                    }
                    (InteractAction::Place, _) => {
                        let Some(ray) = &active.ray else {
                            return Err(ExecError::MissingBlock(it.pos));
                        };
                        out.push(AgentCommand::Place { against: ray.pos, face: ray.face });
                    }
                }
                if active.crouching {
                    out.push(AgentCommand::SetControl { control: Control::Sneak, active: false });
                }
                let pos = it.pos;
                run.interaction_mut(index).finish()?;
                observer.on_interaction_end(pos);
                return Ok(false);
            }
        }
    }
}

// ── Movement control ──────────────────────────────────────────────────────────

/// Re-assert this tick's look target and controls for the run's category.
fn movement_control(
    run: &mut MoveRun,
    agent: &AgentState,
    opts: &ExecOptions,
    out: &mut Vec<AgentCommand>,
) {
    let exit = run.mv.exit_pos;
    let eye_level = Vec3::new(exit.x, agent.eye_pos().y, exit.z);

    match run.mv.kind {
        MoveKind::Idle => {}

        MoveKind::Step => {
            if run.places_pending() {
                // Walk backward off the edge so the floor cell stays
                // placeable in front of the agent.
                let away = agent.pos + (agent.pos - exit).xz();
                out.push(AgentCommand::LookAt {
                    target: Vec3::new(away.x, agent.eye_pos().y, away.z),
                    horizontal: true,
                });
                out.push(AgentCommand::SetControl { control: Control::Back, active: true });
            } else {
                out.push(AgentCommand::LookAt { target: eye_level, horizontal: true });
                out.push(AgentCommand::SetControl { control: Control::Forward, active: true });
                if opts.allow_sprint && run.interaction_count() == 0 {
                    out.push(AgentCommand::SetControl { control: Control::Sprint, active: true });
                }
            }
        }

        MoveKind::StepJump => {
            out.push(AgentCommand::LookAt { target: eye_level, horizontal: true });
            out.push(AgentCommand::SetControl { control: Control::Forward, active: true });
            if !run.jumped && run.mv.interactions_done() && agent.on_ground {
                run.jumped = true;
                run.jump_tick = run.ticks;
                out.push(AgentCommand::SetControl { control: Control::Jump, active: true });
            } else if run.jumped {
                out.push(AgentCommand::SetControl { control: Control::Jump, active: false });
            }
        }

        MoveKind::DropDown | MoveKind::Diagonal => {
            out.push(AgentCommand::LookAt { target: eye_level, horizontal: true });
            out.push(AgentCommand::SetControl { control: Control::Forward, active: true });
        }
    }
}

// ── Completion prediction ─────────────────────────────────────────────────────

fn predicted_complete<W: BlockQuery>(
    run: &MoveRun,
    predicted: &AgentState,
    world: &W,
    exit: Vec3,
    arrive: f64,
    heading_dot: f64,
) -> bool {
    if predicted.collided_horizontally {
        return false;
    }

    let feet = predicted.pos.floored();
    let exit_cell = run.mv.exit_cell();
    let feet_info = world.block_info(feet);
    let below_info = world.block_info(feet.offset(0, -1, 0));

    // The predicted box must rest in the exit column on good support:
    // physical floor on land, the liquid itself when swimming, a safe cell
    // below when still falling toward liquid.
    let in_column = feet.x == exit_cell.x
        && feet.z == exit_cell.z
        && (feet.y == exit_cell.y || (feet_info.liquid && feet.y < exit_cell.y));
    if !in_column {
        return false;
    }
    let support_ok = if feet_info.liquid {
        true
    } else if predicted.on_ground {
        below_info.physical
    } else {
        predicted.vel.y < 0.0 && below_info.liquid && below_info.safe
    };
    if !support_ok {
        return false;
    }

    let offset = (exit - predicted.pos).xz();
    if offset.norm() < arrive {
        return true;
    }
    let dir = (exit - run.mv.entry_pos).xz().normalize();
    offset.normalize().dot(dir) > heading_dot
}
