use serde::Serialize;

use crate::services::statistics::ThroughputStatistics;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMode {
    /// Periods needed to finish a number of items.
    ItemsToPeriods,
    /// Items finished within a number of periods.
    PeriodsToItems,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastPercentile {
    pub percentile: u8,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub data_source: String,
    pub mode: ForecastMode,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_count: Option<f64>,
    pub iterations: usize,
    pub period_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub statistics: ThroughputStatistics,
    pub percentiles: Vec<ForecastPercentile>,
}

/// Report plus the raw per-trial results it was summarized from.
#[derive(Debug, Clone)]
pub struct ForecastOutput {
    pub report: ForecastReport,
    pub results: Vec<f64>,
}
