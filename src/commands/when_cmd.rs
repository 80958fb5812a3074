use std::process::ExitCode;

use tracing::error;

use crate::commands::base_commands::Commands;
use crate::commands::output_file::write_output_file;
use crate::commands::report_format::format_forecast_report;
use crate::services::histogram::write_histogram_png;
use crate::services::period_calendar::parse_date;
use crate::services::throughput_forecast::{forecast_completion, load_sample};

pub fn when_command(cmd: Commands) -> ExitCode {
    let Commands::When {
        input,
        simulation,
        number_of_items,
        start_date,
        output,
        histogram,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let settings = match simulation.settings(input.history) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid settings");
            eprintln!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let start_date = match parse_date(&start_date) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("Failed to parse start date: {e}");
            return ExitCode::FAILURE;
        }
    };
    let loaded = match load_sample(&input.source(), settings.history_limit) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, "failed to load throughput");
            eprintln!("Failed to load throughput data: {e}");
            return ExitCode::FAILURE;
        }
    };

    let forecast = match forecast_completion(&loaded, number_of_items, start_date, &settings) {
        Ok(forecast) => forecast,
        Err(e) => {
            error!(error = %e, "forecast failed");
            eprintln!("Failed to forecast completion: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", format_forecast_report(&forecast.report));

    if let Some(histogram_path) = histogram {
        match write_histogram_png(
            &histogram_path,
            &forecast.results,
            &forecast.report.percentiles,
            "Periods until done",
        ) {
            Ok(()) => println!("Simulation histogram written to {histogram_path}"),
            Err(e) => {
                eprintln!("Failed to write simulation histogram: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(output) = output {
        if let Err(e) = write_output_file(&output, &forecast.report) {
            eprintln!("Failed to write forecast output: {e}");
            return ExitCode::FAILURE;
        }
        println!("Forecast for {number_of_items} items written to {output}");
    }
    ExitCode::SUCCESS
}
