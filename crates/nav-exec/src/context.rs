//! Read-only world/agent snapshot passed to every executor entry point.

use nav_core::{Inventory, Tick};
use nav_physics::AgentState;
use nav_world::BlockQuery;

/// A read-only snapshot of everything the executor may consult during one
/// tick.
///
/// Built by the embedding layer once per physics tick from the live agent
/// state; the executor holds no reference to it between ticks, so the
/// borrows only need to outlive the call.
pub struct ExecContext<'a, W: BlockQuery> {
    /// The agent as of the start of this tick.  Predictions clone this
    /// snapshot; the executor never mutates it.
    pub agent: &'a AgentState,

    /// Block classification source.
    pub world: &'a W,

    /// Current item counts, consulted before interactions begin.
    pub inventory: &'a Inventory,

    /// Current tick, for budgets and abort deadlines.
    pub now: Tick,
}

impl<'a, W: BlockQuery> ExecContext<'a, W> {
    #[inline]
    pub fn new(agent: &'a AgentState, world: &'a W, inventory: &'a Inventory, now: Tick) -> Self {
        Self { agent, world, inventory, now }
    }
}
