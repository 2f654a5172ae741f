//! Executor observer trait for progress reporting and tracing.

use nav_core::{BlockPos, Tick, Vec3};
use nav_move::MoveKind;

use crate::executor::Status;

/// Callbacks invoked by [`MovementExecutor::tick`][crate::MovementExecutor::tick]
/// at key points in a move's lifetime.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — tick tracer
///
/// ```rust,ignore
/// struct Tracer;
///
/// impl ExecObserver for Tracer {
///     fn on_tick(&mut self, tick: Tick, status: &Status) {
///         println!("{tick}: {status:?}");
///     }
/// }
/// ```
pub trait ExecObserver {
    /// A move was accepted and its run started.
    fn on_move_start(&mut self, _kind: MoveKind, _exit: Vec3) {}

    /// An interaction handler took control (break or place at `pos`).
    fn on_interaction_start(&mut self, _pos: BlockPos) {}

    /// The active interaction issued its command and finished.
    fn on_interaction_end(&mut self, _pos: BlockPos) {}

    /// One executor tick completed with `status`.
    fn on_tick(&mut self, _tick: Tick, _status: &Status) {}

    /// Abort negotiation began.
    fn on_abort(&mut self, _kind: MoveKind) {}
}

/// An [`ExecObserver`] that does nothing.  Use when driving the executor
/// without tracing.
pub struct NoopObserver;

impl ExecObserver for NoopObserver {}
