use serde::Serialize;

use crate::domain::throughput_sample::ThroughputSample;

/// Descriptive statistics of a throughput sample (population definitions).
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ThroughputStatistics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub count: usize,
}

pub fn compute_statistics(sample: &ThroughputSample) -> ThroughputStatistics {
    let values = sample.values();
    let count = values.len();

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = sorted.iter().sum::<f64>() / count as f64;
    let middle = count / 2;
    let median = if count % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    };

    ThroughputStatistics {
        mean,
        min: sorted[0],
        max: sorted[count - 1],
        median,
        count,
    }
}
