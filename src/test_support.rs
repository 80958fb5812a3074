use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::throughput::Throughput;
use crate::domain::throughput_sample::ThroughputSample;

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn sample_of(values: &[f64]) -> ThroughputSample {
    ThroughputSample::new(values.to_vec()).unwrap()
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// Weekly records starting on `start`.
pub fn weekly_throughput(start: NaiveDate, values: &[f64]) -> Vec<Throughput> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| Throughput {
            date: start + chrono::Duration::days(7 * idx as i64),
            completed_issues: *value,
        })
        .collect()
}
