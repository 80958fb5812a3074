//! Percentile helpers using nearest-rank extraction.
//!
//! - The value for percentile `p` over `n` sorted values sits at the 1-indexed
//!   rank `ceil(p / 100 * n)`, clamped to `[1, n]`.
//! - The rank is computed in integer arithmetic so labels such as 70 over
//!   10 values land exactly on rank 7.
//! - Empty input => `None`.
//!
//! Reading a report depends on the forecast mode. For periods-to-completion a
//! higher percentile is a longer, safer estimate. For items-completed a higher
//! percentile is a larger item count, so an "at least this many" commitment
//! reads the low percentiles. Reports are never inverted to hide this.
use serde::Serialize;

use crate::services::simulation::SimulationOutcome;

/// Confidence levels reported for every forecast.
pub const PERCENTILES: [u8; 5] = [70, 80, 90, 95, 98];

/// Returns the nearest-rank percentile from a slice that is already sorted in
/// ascending order.
pub fn nearest_rank_sorted<T: Copy>(sorted_values: &[T], percentile: u8) -> Option<T> {
    if sorted_values.is_empty() {
        return None;
    }

    let n = sorted_values.len();
    let rank = (usize::from(percentile) * n).div_ceil(100).clamp(1, n);
    sorted_values.get(rank - 1).copied()
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PercentileEntry {
    pub percentile: u8,
    pub value: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct PercentileReport {
    entries: Vec<PercentileEntry>,
}

impl PercentileReport {
    pub fn entries(&self) -> &[PercentileEntry] {
        &self.entries
    }

    pub fn get(&self, percentile: u8) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.percentile == percentile)
            .map(|entry| entry.value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn summarize(outcome: &SimulationOutcome) -> PercentileReport {
    summarize_values(&outcome.values)
}

pub fn summarize_values(values: &[f64]) -> PercentileReport {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let entries = PERCENTILES
        .iter()
        .filter_map(|&percentile| {
            nearest_rank_sorted(&sorted, percentile)
                .map(|value| PercentileEntry { percentile, value })
        })
        .collect();
    PercentileReport { entries }
}
