//! Pure forecasting entry points over an already validated sample.

use rand::Rng;

use crate::domain::throughput_sample::ThroughputSample;
use crate::services::percentiles::{PercentileReport, summarize};
use crate::services::simulation::{ForecastRequest, SimulationError, simulate, simulate_with_rng};

pub use crate::services::simulation::DEFAULT_ITERATIONS;
pub use crate::services::statistics::compute_statistics;

/// Periods needed to finish `item_count` items. Higher percentiles are the
/// more conservative dates.
pub fn forecast_periods_for_item_count(
    sample: &ThroughputSample,
    item_count: u64,
    iterations: usize,
) -> Result<PercentileReport, SimulationError> {
    let outcome = simulate(
        sample,
        ForecastRequest::TargetItemCount { item_count },
        iterations,
    )?;
    Ok(summarize(&outcome))
}

pub fn forecast_periods_for_item_count_with_rng<R: Rng + ?Sized>(
    sample: &ThroughputSample,
    item_count: u64,
    iterations: usize,
    rng: &mut R,
) -> Result<PercentileReport, SimulationError> {
    let outcome = simulate_with_rng(
        sample,
        ForecastRequest::TargetItemCount { item_count },
        iterations,
        rng,
    )?;
    Ok(summarize(&outcome))
}

/// Items completed within `period_count` periods. Higher percentiles are
/// larger counts; read the low percentiles for an "at least" commitment.
pub fn forecast_items_for_period_count(
    sample: &ThroughputSample,
    period_count: f64,
    iterations: usize,
) -> Result<PercentileReport, SimulationError> {
    let outcome = simulate(
        sample,
        ForecastRequest::TargetPeriod { period_count },
        iterations,
    )?;
    Ok(summarize(&outcome))
}

pub fn forecast_items_for_period_count_with_rng<R: Rng + ?Sized>(
    sample: &ThroughputSample,
    period_count: f64,
    iterations: usize,
    rng: &mut R,
) -> Result<PercentileReport, SimulationError> {
    let outcome = simulate_with_rng(
        sample,
        ForecastRequest::TargetPeriod { period_count },
        iterations,
        rng,
    )?;
    Ok(summarize(&outcome))
}
