use std::process::ExitCode;

use serde::Serialize;

use crate::commands::base_commands::Commands;
use crate::commands::output_file::write_output_file;
use crate::commands::report_format::format_statistics;
use crate::services::forecast_config::history_window;
use crate::services::statistics::{ThroughputStatistics, compute_statistics};
use crate::services::throughput_forecast::load_sample;

#[derive(Serialize)]
struct StatisticsOutput<'a> {
    data_source: &'a str,
    statistics: ThroughputStatistics,
}

pub fn stats_command(cmd: Commands) -> ExitCode {
    let Commands::Stats { input, output } = cmd else {
        return ExitCode::FAILURE;
    };

    let history_limit = match history_window(input.history) {
        Ok(history_limit) => history_limit,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let loaded = match load_sample(&input.source(), history_limit) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load throughput data: {e}");
            return ExitCode::FAILURE;
        }
    };
    let statistics = compute_statistics(&loaded.sample);
    println!("{}", format_statistics(&loaded.data_source, &statistics));

    if let Some(output) = output {
        let contents = StatisticsOutput {
            data_source: &loaded.data_source,
            statistics,
        };
        if let Err(e) = write_output_file(&output, &contents) {
            eprintln!("Failed to write statistics output: {e}");
            return ExitCode::FAILURE;
        }
        println!("Statistics written to {output}");
    }
    ExitCode::SUCCESS
}
