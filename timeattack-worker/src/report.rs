use std::cmp::Ordering;

use serde::Serialize;

use crate::reducer::Reducer;

/// Measured samples for one input, in request order.
///
/// The sample sequence may be shorter than the configured sample count (a
/// failed request aborts the input's remaining samples) or empty (the first
/// request failed, or the task itself faulted).
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub input: String,
    pub samples: Vec<f64>,
}

/// One row of the ranked report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub input: String,
    /// Reduced duration in seconds; the ranking key.
    pub duration: f64,
    pub sample_count: usize,
}

/// All task results of one run, in scheduling order; read-only once produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub results: Vec<TaskResult>,
}

impl RunReport {
    /// Rank inputs ascending by reduced duration. The sort is stable, so
    /// equal durations keep their scheduling order; `results` itself is
    /// not reordered.
    pub fn ranked(&self, reducer: Reducer) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = self
            .results
            .iter()
            .map(|result| RankedEntry {
                input: result.input.clone(),
                duration: reducer.apply(&result.samples),
                sample_count: result.samples.len(),
            })
            .collect();

        entries.sort_by(|a, b| a.duration.partial_cmp(&b.duration).unwrap_or(Ordering::Equal));
        entries
    }
}
