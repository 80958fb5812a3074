use crate::services::forecast_report::{ForecastMode, ForecastPercentile, ForecastReport};
use crate::services::statistics::ThroughputStatistics;

pub fn format_forecast_report(report: &ForecastReport) -> String {
    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    match report.mode {
        ForecastMode::ItemsToPeriods => {
            if let Some(item_count) = report.item_count {
                lines.push(format!("Question: when will {item_count} items be done?"));
            }
        }
        ForecastMode::PeriodsToItems => {
            if let Some(period_count) = report.period_count {
                lines.push(format!(
                    "Question: how many items finish in {period_count:.2} periods?"
                ));
            }
        }
    }
    lines.push(format!("Start date: {}", report.start_date));
    if let Some(end_date) = &report.end_date {
        lines.push(format!("End date: {end_date}"));
    }
    lines.push(format!("Iterations: {}", report.iterations));
    lines.push(format!("Period length: {} days", report.period_days));
    lines.push(format!("Sample size: {}", report.statistics.count));
    lines.push(String::new());
    lines.push("Percentiles:".to_string());
    match report.mode {
        ForecastMode::ItemsToPeriods => {
            lines.push("Percentile | Periods | Date".to_string());
            lines.push("-----------|---------|-----".to_string());
        }
        ForecastMode::PeriodsToItems => {
            lines.push("Percentile | Items".to_string());
            lines.push("-----------|------".to_string());
        }
    }
    for percentile in &report.percentiles {
        lines.push(format_percentile_row(percentile));
    }
    lines.push(String::new());
    lines.push(reading_note(report.mode).to_string());

    lines.join("\n")
}

pub fn format_statistics(data_source: &str, statistics: &ThroughputStatistics) -> String {
    [
        "Throughput Statistics".to_string(),
        format!("Data source: {data_source}"),
        format!("Periods: {}", statistics.count),
        format!("Mean: {:.2}", statistics.mean),
        format!("Median: {:.2}", statistics.median),
        format!("Min: {:.2}", statistics.min),
        format!("Max: {:.2}", statistics.max),
    ]
    .join("\n")
}

fn format_percentile_row(percentile: &ForecastPercentile) -> String {
    match &percentile.date {
        Some(date) => format!(
            "P{label} | {value:.2} | {date}",
            label = percentile.percentile,
            value = percentile.value,
        ),
        None => format!(
            "P{label} | {value:.2}",
            label = percentile.percentile,
            value = percentile.value,
        ),
    }
}

// Percentiles are ascending ranks in both modes, so the safe side differs.
fn reading_note(mode: ForecastMode) -> &'static str {
    match mode {
        ForecastMode::ItemsToPeriods => {
            "P{n}: n% of simulated runs finished within this many periods; higher percentiles are safer dates."
        }
        ForecastMode::PeriodsToItems => {
            "P{n}: n% of simulated runs finished at most this many items; read the lower percentiles for a conservative commitment."
        }
    }
}
