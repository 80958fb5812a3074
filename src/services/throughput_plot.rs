use crate::domain::throughput::Throughput;
use crate::services::throughput_yaml::{ThroughputYamlError, deserialize_throughput_from_yaml_str};
use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThroughputPlotError {
    #[error("failed to read throughput file: {0}")]
    ReadThroughput(#[from] std::io::Error),
    #[error("failed to parse throughput yaml: {0}")]
    ParseThroughput(#[from] ThroughputYamlError),
    #[error("throughput data is empty")]
    EmptyThroughput,
    #[error("failed to render throughput plot: {0}")]
    Plot(String),
}

pub fn plot_throughput_from_yaml_file(
    input_path: &str,
    output_path: &str,
) -> Result<(), ThroughputPlotError> {
    let throughput_yaml = std::fs::read_to_string(input_path)?;
    let throughput = deserialize_throughput_from_yaml_str(&throughput_yaml)?;
    if throughput.is_empty() {
        return Err(ThroughputPlotError::EmptyThroughput);
    }
    render_plot_png(output_path, &throughput)
}

fn render_plot_png(
    output_path: &str,
    throughput: &[Throughput],
) -> Result<(), ThroughputPlotError> {
    let max_completed = throughput
        .iter()
        .map(|item| item.completed_issues)
        .fold(0.0_f64, f64::max);
    let max_y = max_completed.ceil() + 1.0;
    let max_x = throughput.len().max(1) as i32;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Throughput Over Time", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, 0.0..max_y)
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    let label_count = throughput.len().clamp(1, 10);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Period start")
        .y_desc("Completed items")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(label_count)
        .x_label_formatter(&|index| {
            if *index < 0 {
                return String::new();
            }
            throughput
                .get(*index as usize)
                .map(|item| item.date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled().stroke_width(1);
    chart
        .draw_series(throughput.iter().enumerate().map(|(idx, item)| {
            Rectangle::new(
                [(idx as i32, 0.0), (idx as i32 + 1, item.completed_issues)],
                bar_style,
            )
        }))
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;
    Ok(())
}
