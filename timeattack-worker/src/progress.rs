use std::sync::Mutex;

use tracing::info;

/// Run-scoped progress over all samples of all inputs.
///
/// One tracker is shared by every sampling task of a run. The milestone is
/// computed under the same lock as the increment, so milestones are never
/// skipped or duplicated under contention.
pub struct ProgressTracker {
    state: Mutex<ProgressState>,
}

struct ProgressState {
    total: usize,
    processed: usize,
    last_milestone: Option<u32>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ProgressState {
                total: 0,
                processed: 0,
                last_milestone: None,
            }),
        }
    }

    /// Reinitialize for a run expecting `total` samples.
    pub fn reset(&self, total: usize) {
        let mut state = self.state.lock().unwrap();
        state.total = total;
        state.processed = 0;
        state.last_milestone = None;
    }

    /// Record one completed sample. Returns the milestone percentage when
    /// this sample is the first to reach a new multiple of 10, else `None`.
    /// A tracker reset with `total == 0` counts but never reports.
    pub fn record_sample(&self) -> Option<u32> {
        let mut state = self.state.lock().unwrap();
        state.processed += 1;

        if state.total == 0 {
            return None;
        }

        let pct = (100 * state.processed / state.total) as u32;
        let milestone = pct / 10 * 10;
        if state.last_milestone.map_or(true, |last| milestone > last) {
            state.last_milestone = Some(milestone);
            info!("Progress: {}%", milestone);
            return Some(milestone);
        }
        None
    }

    /// Samples recorded since the last reset.
    pub fn processed(&self) -> usize {
        self.state.lock().unwrap().processed
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
