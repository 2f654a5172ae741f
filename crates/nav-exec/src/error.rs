use nav_core::{BlockPos, ItemKind};
use nav_move::{InteractError, MoveKind};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExecError {
    /// The run was cancelled cooperatively via [`abort`][crate::MovementExecutor::abort].
    #[error("move aborted")]
    Aborted,

    /// The executor is recovering from a failed move and rejects new work
    /// until [`reset`][crate::MovementExecutor::reset] is called.
    #[error("executor is resetting")]
    Resetting,

    /// A safety bound tripped mid-run.
    #[error("{kind} move cancelled: {reason}")]
    Cancelled { kind: MoveKind, reason: &'static str },

    /// The inventory cannot supply an item a scheduled interaction needs.
    #[error("missing required item: {0}")]
    MissingItem(ItemKind),

    /// A placement has no physical neighbor to place against, or a break
    /// target that is no longer present in the world.
    #[error("missing world block at {0}")]
    MissingBlock(BlockPos),

    /// Abort negotiation did not reach a safe stopping state in time.
    #[error("abort negotiation timed out after {waited} ticks")]
    AbortTimeout { waited: u64 },

    #[error("interaction lifecycle: {0}")]
    Interaction(#[from] InteractError),
}

pub type ExecResult<T> = Result<T, ExecError>;
