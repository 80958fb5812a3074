use std::num::NonZeroUsize;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::throughput_sample::{ThroughputSample, ValidationError};
use crate::services::forecast_config::ForecastSettings;
use crate::services::forecast_report::{
    ForecastMode, ForecastOutput, ForecastPercentile, ForecastReport,
};
use crate::services::percentiles::summarize_values;
use crate::services::period_calendar::{PeriodCalendarError, end_date_for_periods, periods_between};
use crate::services::simulation::{ForecastRequest, SimulationError, simulate_with_rng};
use crate::services::statistics::compute_statistics;
use crate::services::throughput_yaml::{ThroughputYamlError, deserialize_throughput_from_yaml_str};

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("failed to read throughput file: {0}")]
    ReadThroughput(#[from] std::io::Error),
    #[error("failed to parse throughput yaml: {0}")]
    ParseThroughput(#[from] ThroughputYamlError),
    #[error("invalid throughput data: {0}")]
    Validation(#[from] ValidationError),
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Calendar(#[from] PeriodCalendarError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThroughputSource {
    /// Throughput YAML file with `date` / `completed_issues` records.
    File(String),
    /// Delimited values such as `"2, 3, 5"`.
    Inline(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSample {
    pub sample: ThroughputSample,
    pub data_source: String,
}

/// Forecast horizon for the items-completed question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    EndDate(NaiveDate),
    Periods(f64),
}

pub fn load_sample(
    source: &ThroughputSource,
    history_limit: Option<NonZeroUsize>,
) -> Result<LoadedSample, ForecastError> {
    let (sample, data_source) = match source {
        ThroughputSource::File(path) => {
            let throughput_yaml = std::fs::read_to_string(path)?;
            let throughput = deserialize_throughput_from_yaml_str(&throughput_yaml)?;
            (
                ThroughputSample::from_throughput(&throughput)?,
                data_source_name(path),
            )
        }
        ThroughputSource::Inline(values) => (
            values.parse::<ThroughputSample>()?,
            "inline values".to_string(),
        ),
    };

    let sample = match history_limit {
        Some(periods) => sample.most_recent(periods),
        None => sample,
    };
    info!(
        data_source = %data_source,
        periods = sample.len(),
        "loaded throughput sample"
    );
    Ok(LoadedSample {
        sample,
        data_source,
    })
}

/// Answers "when will `item_count` items be done?" starting at `start_date`.
pub fn forecast_completion(
    loaded: &LoadedSample,
    item_count: u64,
    start_date: NaiveDate,
    settings: &ForecastSettings,
) -> Result<ForecastOutput, ForecastError> {
    let request = ForecastRequest::TargetItemCount { item_count };
    let results = run(loaded, request, settings)?;

    let percentiles = summarize_with(&results, |periods| {
        end_date_for_periods(start_date, periods, settings.period_days)
            .map(|date| Some(date.format("%Y-%m-%d").to_string()))
    })?;

    let report = ForecastReport {
        data_source: loaded.data_source.clone(),
        mode: ForecastMode::ItemsToPeriods,
        start_date: start_date.format("%Y-%m-%d").to_string(),
        end_date: None,
        item_count: Some(item_count),
        period_count: None,
        iterations: settings.iterations,
        period_days: settings.period_days,
        seed: settings.seed,
        statistics: compute_statistics(&loaded.sample),
        percentiles,
    };
    Ok(ForecastOutput { report, results })
}

/// Answers "how many items finish between `start_date` and the horizon?".
pub fn forecast_throughput(
    loaded: &LoadedSample,
    start_date: NaiveDate,
    horizon: Horizon,
    settings: &ForecastSettings,
) -> Result<ForecastOutput, ForecastError> {
    let (period_count, end_date) = match horizon {
        Horizon::EndDate(end_date) => (
            periods_between(start_date, end_date, settings.period_days)?,
            end_date,
        ),
        Horizon::Periods(periods) => (
            periods,
            end_date_for_periods(start_date, periods, settings.period_days)?,
        ),
    };
    debug!(period_count, "resolved forecast horizon");

    let request = ForecastRequest::TargetPeriod { period_count };
    let results = run(loaded, request, settings)?;
    let percentiles = summarize_with(&results, |_| Ok(None))?;

    let report = ForecastReport {
        data_source: loaded.data_source.clone(),
        mode: ForecastMode::PeriodsToItems,
        start_date: start_date.format("%Y-%m-%d").to_string(),
        end_date: Some(end_date.format("%Y-%m-%d").to_string()),
        item_count: None,
        period_count: Some(period_count),
        iterations: settings.iterations,
        period_days: settings.period_days,
        seed: settings.seed,
        statistics: compute_statistics(&loaded.sample),
        percentiles,
    };
    Ok(ForecastOutput { report, results })
}

fn run(
    loaded: &LoadedSample,
    request: ForecastRequest,
    settings: &ForecastSettings,
) -> Result<Vec<f64>, ForecastError> {
    let mut rng = build_rng(settings.seed);
    let outcome = simulate_with_rng(&loaded.sample, request, settings.iterations, &mut rng)?;
    info!(
        iterations = settings.iterations,
        ?request,
        "simulation finished"
    );
    Ok(outcome.values)
}

fn summarize_with<F>(results: &[f64], date_for: F) -> Result<Vec<ForecastPercentile>, ForecastError>
where
    F: Fn(f64) -> Result<Option<String>, PeriodCalendarError>,
{
    summarize_values(results)
        .entries()
        .iter()
        .map(|entry| {
            Ok(ForecastPercentile {
                percentile: entry.percentile,
                value: entry.value,
                date: date_for(entry.value)?,
            })
        })
        .collect()
}

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
