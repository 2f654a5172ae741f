//! `nav-exec` — tick-driven execution of one move at a time.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`command`]  | `AgentCommand` — side effects emitted as values               |
//! | [`context`]  | `ExecContext<'a, W>` — per-tick read-only snapshot            |
//! | [`executor`] | `MovementExecutor<P>`, `ExecOptions`, `Status`, `TickOutput`  |
//! | [`observer`] | `ExecObserver` trait + `NoopObserver`                         |
//! | [`error`]    | `ExecError` / `ExecResult`                                    |
//!
//! # Execution model
//!
//! The embedding layer owns the agent and the clock.  Once per physics tick
//! it builds an [`ExecContext`] from the live state and calls
//! [`MovementExecutor::tick`]; the executor answers with a [`TickOutput`]
//! holding the run's status and the [`AgentCommand`] values to apply, in
//! order.  The executor never mutates anything outside itself, so a tick can
//! be replayed, traced, or dropped by the caller.
//!
//! Suspension is returning `Status::Waiting`; cancellation is cooperative
//! via [`MovementExecutor::abort`] and negotiated over subsequent ticks
//! until the agent is grounded or swimming, bounded by
//! [`ExecOptions::abort_timeout_ticks`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nav_exec::{ExecContext, ExecOptions, MovementExecutor, NoopObserver, Status};
//! use nav_physics::StepPhysics;
//!
//! let mut exec = MovementExecutor::new(StepPhysics, ExecOptions::default());
//! exec.begin(mv, &ctx, &mut NoopObserver)?;
//! loop {
//!     let out = exec.tick(&ctx, &mut NoopObserver);
//!     apply(out.commands);
//!     match out.status {
//!         Status::Complete => break,
//!         Status::Failed(e) => return Err(e.into()),
//!         _ => advance_physics(),
//!     }
//! }
//! ```

pub mod command;
pub mod context;
pub mod error;
pub mod executor;
pub mod observer;


pub use command::AgentCommand;
pub use context::ExecContext;
pub use error::{ExecError, ExecResult};
pub use executor::{ExecOptions, MovementExecutor, Status, TickOutput};
pub use observer::{ExecObserver, NoopObserver};
