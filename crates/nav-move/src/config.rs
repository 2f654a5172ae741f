//! Shared generation cost constants.

/// Cost constants shared by every movement category.
///
/// Category-specific limits (max drop height, jump step-up) live as payload
/// on the [`Movement`][crate::Movement] variants instead.
#[derive(Clone, Debug)]
pub struct MovementConfig {
    /// Candidates whose accumulated cost exceeds this are discarded during
    /// generation — the edge is effectively impassable.
    pub cost_ceiling: f64,

    /// Cost contribution of a cell that must not be touched (hazardous or
    /// unbreakable).  Any value above `cost_ceiling` works; keeping it a
    /// plain number lets `safe_or_break` stay branch-free at the call site.
    pub cost_inf: f64,

    /// Surcharge per scheduled block placement.
    pub place_cost: f64,

    /// Surcharge per scheduled block break.
    pub break_cost: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            cost_ceiling: 100.0,
            cost_inf:     999.0,
            place_cost:   0.1,
            break_cost:   1.0,
        }
    }
}
