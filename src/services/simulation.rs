use rand::Rng;
use thiserror::Error;

use crate::domain::throughput_sample::ThroughputSample;
use crate::services::resampler::Resampler;

pub const DEFAULT_ITERATIONS: usize = 5000;

/// Upper bound on draws a single items-to-periods trial may consume.
pub const MAX_DRAWS_PER_TRIAL: usize = 10_000;

/// Largest period count a periods-to-items request may ask for.
pub const MAX_PERIODS_PER_TRIAL: f64 = MAX_DRAWS_PER_TRIAL as f64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("target of {item_count} items not reached within {max_draws} periods")]
    NonConvergence { item_count: u64, max_draws: usize },
    #[error("invalid forecast request: {0}")]
    InvalidRequest(String),
}

/// The two questions a forecast can answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForecastRequest {
    /// When will `item_count` items be done? Outcomes are periods consumed.
    TargetItemCount { item_count: u64 },
    /// How many items finish within `period_count` periods? Outcomes are items.
    TargetPeriod { period_count: f64 },
}

impl ForecastRequest {
    fn validate(&self) -> Result<(), SimulationError> {
        match *self {
            ForecastRequest::TargetItemCount { item_count: 0 } => Err(
                SimulationError::InvalidRequest("item count must be greater than zero".into()),
            ),
            ForecastRequest::TargetPeriod { period_count }
                if !period_count.is_finite() || period_count <= 0.0 =>
            {
                Err(SimulationError::InvalidRequest(format!(
                    "period count must be a positive number, got {period_count}"
                )))
            }
            ForecastRequest::TargetPeriod { period_count }
                if period_count > MAX_PERIODS_PER_TRIAL =>
            {
                Err(SimulationError::InvalidRequest(format!(
                    "period count {period_count} exceeds the limit of {MAX_PERIODS_PER_TRIAL}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Raw per-trial results of one simulation run, in trial order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub request: ForecastRequest,
    pub values: Vec<f64>,
}

pub fn simulate(
    sample: &ThroughputSample,
    request: ForecastRequest,
    iterations: usize,
) -> Result<SimulationOutcome, SimulationError> {
    let mut rng = rand::thread_rng();
    simulate_with_rng(sample, request, iterations, &mut rng)
}

pub fn simulate_with_rng<R: Rng + ?Sized>(
    sample: &ThroughputSample,
    request: ForecastRequest,
    iterations: usize,
    rng: &mut R,
) -> Result<SimulationOutcome, SimulationError> {
    if iterations == 0 {
        return Err(SimulationError::InvalidRequest(
            "iterations must be greater than zero".into(),
        ));
    }
    request.validate()?;

    let resampler = Resampler::new(sample);
    let mut values = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let outcome = match request {
            ForecastRequest::TargetItemCount { item_count } => {
                periods_until_done(&resampler, item_count, rng)? as f64
            }
            ForecastRequest::TargetPeriod { period_count } => {
                items_within_periods(&resampler, period_count, rng)
            }
        };
        values.push(outcome);
    }

    Ok(SimulationOutcome { request, values })
}

fn periods_until_done<R: Rng + ?Sized>(
    resampler: &Resampler<'_>,
    item_count: u64,
    rng: &mut R,
) -> Result<usize, SimulationError> {
    if item_count == 0 {
        return Ok(0);
    }

    let target = item_count as f64;
    let mut completed = 0.0_f64;
    for draws in 1..=MAX_DRAWS_PER_TRIAL {
        completed += resampler.draw(rng);
        if completed >= target {
            return Ok(draws);
        }
    }

    Err(SimulationError::NonConvergence {
        item_count,
        max_draws: MAX_DRAWS_PER_TRIAL,
    })
}

// A trailing partial period contributes its share of one extra draw.
fn items_within_periods<R: Rng + ?Sized>(
    resampler: &Resampler<'_>,
    period_count: f64,
    rng: &mut R,
) -> f64 {
    let whole_periods = period_count.trunc();
    let partial = period_count - whole_periods;

    let mut completed: f64 = (0..whole_periods as usize)
        .map(|_| resampler.draw(rng))
        .sum();
    if partial > 0.0 {
        completed += resampler.draw(rng) * partial;
    }
    completed
}
