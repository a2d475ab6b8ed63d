//! Float, criticality and float-band reporting.

use crate::models::{FloatAnalysis, FloatEntry, FloatSummary};

use super::types::{FloatCategory, TaskTiming};

/// Fill in total float for every task and return the number of critical tasks.
pub fn compute_float(timings: &mut [TaskTiming]) -> usize {
    let mut critical = 0;
    for timing in timings.iter_mut() {
        timing.total_float = timing.late_start - timing.early_start;
        if timing.is_critical() {
            critical += 1;
        }
    }
    critical
}

/// Bucket tasks into critical, near-critical and normal float bands.
///
/// Each bucket is ordered by (float, task ID).
pub fn bucket_by_float(entries: impl IntoIterator<Item = FloatEntry>) -> FloatAnalysis {
    let mut analysis = FloatAnalysis::default();

    for entry in entries {
        match FloatCategory::from_float(entry.total_float) {
            FloatCategory::Critical => analysis.critical.push(entry),
            FloatCategory::NearCritical => analysis.near_critical.push(entry),
            FloatCategory::Normal => analysis.normal.push(entry),
        }
    }

    for bucket in [
        &mut analysis.critical,
        &mut analysis.near_critical,
        &mut analysis.normal,
    ] {
        bucket.sort_by_key(|e| (e.total_float, e.id));
    }

    analysis.summary = FloatSummary {
        critical: analysis.critical.len(),
        near_critical: analysis.near_critical.len(),
        normal: analysis.normal.len(),
    };
    analysis
}
