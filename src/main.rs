use std::process::ExitCode;

use clap::Parser;
use throughput_forecasts::commands::base_commands::{CliArgs, Commands};
use throughput_forecasts::commands::completions_cmd::completions_command;
use throughput_forecasts::commands::how_many_cmd::how_many_command;
use throughput_forecasts::commands::plot_throughput_cmd::plot_throughput_command;
use throughput_forecasts::commands::record_cmd::record_command;
use throughput_forecasts::commands::stats_cmd::stats_command;
use throughput_forecasts::commands::when_cmd::when_command;
use throughput_forecasts::logging::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::When { .. } => when_command(cmd),
        cmd @ Commands::HowMany { .. } => how_many_command(cmd),
        cmd @ Commands::Stats { .. } => stats_command(cmd),
        cmd @ Commands::Record { .. } => record_command(cmd),
        cmd @ Commands::PlotThroughput { .. } => plot_throughput_command(cmd),
        Commands::Completions { shell } => {
            completions_command(shell);
            ExitCode::SUCCESS
        }
    }
}
