use machina_shared::{Eta, MeterSync, ProgressDirection};

/// Read-only copy of a server-owned meter, as of the last sync
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeterView {
    state: MeterSync,
    syncs: u32,
}

impl MeterView {
    pub(crate) fn new(state: MeterSync) -> Self {
        Self { state, syncs: 1 }
    }

    pub(crate) fn apply(&mut self, state: MeterSync) {
        self.state = state;
        self.syncs = self.syncs.saturating_add(1);
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn current(&self) -> i32 {
        self.state.current
    }

    pub fn maximum(&self) -> i32 {
        self.state.maximum
    }

    pub fn direction(&self) -> ProgressDirection {
        self.state.direction
    }

    pub fn progress_fraction(&self) -> f32 {
        self.state.progress_fraction()
    }

    pub fn eta(&self, ticks_per_second: u32) -> Eta {
        self.state.eta(ticks_per_second)
    }

    /// How many snapshots have been applied to this view
    pub fn syncs(&self) -> u32 {
        self.syncs
    }
}
