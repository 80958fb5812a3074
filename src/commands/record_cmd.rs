use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::domain::throughput::Throughput;
use crate::domain::throughput_sample::ThroughputSample;
use crate::services::period_calendar::{end_date_for_periods, parse_date};
use crate::services::throughput_yaml::serialize_throughput_to_yaml;

pub fn record_command(cmd: Commands) -> ExitCode {
    let Commands::Record {
        values,
        start_date,
        period_days,
        output,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    if period_days == 0 {
        eprintln!("Period length must be at least one day");
        return ExitCode::FAILURE;
    }
    let start_date = match parse_date(&start_date) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("Failed to parse start date: {e}");
            return ExitCode::FAILURE;
        }
    };
    let sample: ThroughputSample = match values.parse() {
        Ok(sample) => sample,
        Err(e) => {
            eprintln!("Invalid throughput values: {e}");
            return ExitCode::FAILURE;
        }
    };

    let throughput = sample
        .values()
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            end_date_for_periods(start_date, idx as f64, period_days).map(|date| Throughput {
                date,
                completed_issues: *value,
            })
        })
        .collect::<Result<Vec<_>, _>>();
    let throughput = match throughput {
        Ok(throughput) => throughput,
        Err(e) => {
            eprintln!("Failed to date throughput records: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut buffer = Vec::new();
    if let Err(e) = serialize_throughput_to_yaml(&mut buffer, &throughput) {
        eprintln!("Failed to serialize throughput to YAML: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = std::fs::write(&output, buffer) {
        eprintln!("Failed to write output file: {e}");
        return ExitCode::FAILURE;
    }
    info!(periods = throughput.len(), output = %output, "recorded throughput");
    println!("Throughput data written to {output}");
    ExitCode::SUCCESS
}
