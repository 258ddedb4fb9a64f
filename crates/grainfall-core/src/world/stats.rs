//! Simulation statistics collection

/// Sink for per-rule counters, so rule code never depends on a concrete collector
pub trait SimStats {
    /// A cell changed coordinates
    fn record_pixel_moved(&mut self);

    /// A phase change or ageing conversion happened
    fn record_state_change(&mut self);

    /// A neighbour reaction fired
    fn record_reaction(&mut self);
}

/// Discards everything
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_pixel_moved(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_reaction(&mut self) {}
}

/// Plain counters, kept per tick and as running totals by the world
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountingStats {
    pub pixels_moved: u64,
    pub state_changes: u64,
    pub reactions: u64,
}

impl CountingStats {
    /// Add another set of counters onto this one
    pub fn merge(&mut self, other: &CountingStats) {
        self.pixels_moved += other.pixels_moved;
        self.state_changes += other.state_changes;
        self.reactions += other.reactions;
    }
}

impl SimStats for CountingStats {
    fn record_pixel_moved(&mut self) {
        self.pixels_moved += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }
}
