use std::collections::BTreeMap;

use plotters::prelude::*;
use thiserror::Error;

use crate::services::forecast_report::ForecastPercentile;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Percentiles drawn as dashed marker lines, with their line colors.
const MARKERS: [(u8, RGBColor); 2] = [(80, RGBColor(237, 137, 54)), (90, RGBColor(220, 38, 38))];

/// Marker lines for the 80th and 90th percentiles present in `percentiles`.
fn percentile_markers(percentiles: &[ForecastPercentile]) -> Vec<(u8, f64, RGBColor)> {
    MARKERS
        .iter()
        .filter_map(|&(label, color)| {
            percentiles
                .iter()
                .find(|entry| entry.percentile == label)
                .map(|entry| (label, entry.value, color))
        })
        .collect()
}

/// Renders the distribution of simulation results with the 80% and 90%
/// percentiles marked; `x_desc` names the unit of the results (periods or
/// items).
pub fn write_histogram_png(
    output_path: &str,
    results: &[f64],
    percentiles: &[ForecastPercentile],
    x_desc: &str,
) -> Result<(), HistogramError> {
    if results.is_empty() {
        return Ok(());
    }

    let min_value = results.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = results.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let range = max_value - min_value;
    let bin_width = if range < f64::EPSILON {
        1.0
    } else {
        range / (results.len() as f64).sqrt()
    };

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for value in results {
        let bucket = (*value / bin_width).floor() as i64;
        *counts.entry(bucket).or_insert(0usize) += 1;
    }
    let max_count = *counts.values().max().unwrap_or(&1);
    let min_bucket = counts.keys().next().copied().unwrap_or(0);
    let max_bucket = counts.keys().next_back().copied().unwrap_or(0) + 1;
    let x_range = (min_bucket as f64 * bin_width)..(max_bucket as f64 * bin_width);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Simulation Results", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(x_range, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{value:.1}"))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(counts.iter().map(|(bucket, count)| {
            let left = *bucket as f64 * bin_width;
            Rectangle::new([(left, 0), (left + bin_width, *count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let label_y = (max_count * 4).div_ceil(5);
    for (label, value, color) in percentile_markers(percentiles) {
        chart
            .draw_series(DashedLineSeries::new(
                vec![(value, 0), (value, max_count)],
                8,
                5,
                ShapeStyle::from(&color).stroke_width(2),
            ))
            .map_err(|e| HistogramError::Render(e.to_string()))?;
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{label}%"),
                (value + bin_width * 0.2, label_y),
                ("sans-serif", 16).into_font().color(&color),
            )))
            .map_err(|e| HistogramError::Render(e.to_string()))?;
    }

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
