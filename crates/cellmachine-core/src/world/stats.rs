//! Simulation statistics collection

/// Trait for collecting simulation statistics
///
/// The rule table reports what happened through this trait; callers that
/// don't care pass `NoopStats`.
pub trait SimStats {
    /// A cell's contents moved to another cell (fall, flow, sink)
    fn record_cell_moved(&mut self);

    /// A cell changed material on its own (growth, ignition, burnout)
    fn record_state_change(&mut self);

    /// Two materials reacted (lava quench, lava igniting a plant)
    fn record_reaction(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_cell_moved(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_reaction(&mut self) {}
}

/// Counters for a single `update()`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub cells_moved: u32,
    pub state_changes: u32,
    pub reactions: u32,
}

impl StepStats {
    /// True if nothing happened during the step
    pub fn is_idle(&self) -> bool {
        self.cells_moved == 0 && self.state_changes == 0 && self.reactions == 0
    }
}

impl SimStats for StepStats {
    fn record_cell_moved(&mut self) {
        self.cells_moved += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }
}
