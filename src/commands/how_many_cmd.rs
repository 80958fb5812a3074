use std::process::ExitCode;

use tracing::error;

use crate::commands::base_commands::Commands;
use crate::commands::output_file::write_output_file;
use crate::commands::report_format::format_forecast_report;
use crate::services::histogram::write_histogram_png;
use crate::services::period_calendar::parse_date;
use crate::services::throughput_forecast::{Horizon, forecast_throughput, load_sample};

pub fn how_many_command(cmd: Commands) -> ExitCode {
    let Commands::HowMany {
        input,
        simulation,
        start_date,
        end_date,
        periods,
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
    let horizon = match (end_date, periods) {
        (_, Some(periods)) => Horizon::Periods(periods),
        (Some(end_date), None) => match parse_date(&end_date) {
            Ok(date) => Horizon::EndDate(date),
            Err(e) => {
                eprintln!("Failed to parse end date: {e}");
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            eprintln!("Either an end date or a number of periods is required");
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

    let forecast = match forecast_throughput(&loaded, start_date, horizon, &settings) {
        Ok(forecast) => forecast,
        Err(e) => {
            error!(error = %e, "forecast failed");
            eprintln!("Failed to forecast throughput: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", format_forecast_report(&forecast.report));

    if let Some(histogram_path) = histogram {
        match write_histogram_png(
            &histogram_path,
            &forecast.results,
            &forecast.report.percentiles,
            "Items completed",
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
        println!("Forecast written to {output}");
    }
    ExitCode::SUCCESS
}
