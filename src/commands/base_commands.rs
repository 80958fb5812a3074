use chrono::Local;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::services::forecast_config::{
    ConfigOverrides, ForecastConfig, ForecastConfigError, ForecastSettings,
};
use crate::services::period_calendar::next_business_day;
use crate::services::throughput_forecast::ThroughputSource;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the historical throughput comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Throughput YAML file
    #[arg(short = 'f', long, required_unless_present = "values")]
    pub throughput: Option<String>,
    /// Inline throughput values, e.g. "2, 3, 5, 2"
    #[arg(long, conflicts_with = "throughput")]
    pub values: Option<String>,
    /// Only use the most recent N periods
    #[arg(long)]
    pub history: Option<usize>,
}

/// Simulation settings; each flag overrides the settings file.
#[derive(Args, Debug, Clone)]
pub struct SimulationArgs {
    /// Optional YAML settings file
    #[arg(short, long)]
    pub config: Option<String>,
    /// Number of simulation iterations [default: 5000]
    #[arg(short, long)]
    pub iterations: Option<usize>,
    /// Length of one throughput period in days [default: 7]
    #[arg(long)]
    pub period_days: Option<u32>,
    /// Seed for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast when a number of items will be done
    When {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        simulation: SimulationArgs,
        /// Number of items to finish
        #[arg(short, long)]
        number_of_items: u64,
        /// Forecast start date (YYYY-MM-DD)
        #[arg(short, long, default_value_t = default_start_date())]
        start_date: String,
        /// Output YAML (or .json) file
        #[arg(short, long)]
        output: Option<String>,
        /// Output PNG histogram of simulated durations
        #[arg(long)]
        histogram: Option<String>,
    },
    /// Forecast how many items will be done by a date or within a number of periods
    HowMany {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        simulation: SimulationArgs,
        /// Forecast start date (YYYY-MM-DD)
        #[arg(short, long, default_value_t = default_start_date())]
        start_date: String,
        /// Forecast end date (YYYY-MM-DD)
        #[arg(short, long, required_unless_present = "periods")]
        end_date: Option<String>,
        /// Number of periods to forecast
        #[arg(short, long, conflicts_with = "end_date")]
        periods: Option<f64>,
        /// Output YAML (or .json) file
        #[arg(short, long)]
        output: Option<String>,
        /// Output PNG histogram of simulated item counts
        #[arg(long)]
        histogram: Option<String>,
    },
    /// Show descriptive statistics of throughput data
    Stats {
        #[command(flatten)]
        input: InputArgs,
        /// Output YAML (or .json) file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Write inline throughput values to a dated YAML file
    Record {
        /// Throughput values, one per period, e.g. "2, 3, 5"
        #[arg(long)]
        values: String,
        /// Start date of the first period (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: String,
        /// Length of one period in days
        #[arg(long, default_value_t = 7)]
        period_days: u32,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Plot throughput data from YAML into a PNG chart
    PlotThroughput {
        /// Throughput YAML file
        #[arg(short, long)]
        input: String,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl InputArgs {
    pub fn source(&self) -> ThroughputSource {
        match (&self.throughput, &self.values) {
            (_, Some(values)) => ThroughputSource::Inline(values.clone()),
            (Some(path), None) => ThroughputSource::File(path.clone()),
            (None, None) => ThroughputSource::Inline(String::new()),
        }
    }
}

impl SimulationArgs {
    pub fn overrides(&self, history: Option<usize>) -> ConfigOverrides {
        ConfigOverrides {
            iterations: self.iterations,
            period_days: self.period_days,
            history_limit: history,
            seed: self.seed,
        }
    }

    /// Settings file (if any) with command-line overrides applied.
    pub fn settings(
        &self,
        history: Option<usize>,
    ) -> Result<ForecastSettings, ForecastConfigError> {
        ForecastConfig::load(self.config.as_deref())?.with_overrides(&self.overrides(history))
    }
}

fn default_start_date() -> String {
    next_business_day(Local::now().date_naive())
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_defaults_start_date_to_next_business_day() {
        let args = CliArgs::parse_from([
            "throughput-forecasts",
            "when",
            "-f",
            "throughput.yaml",
            "-n",
            "5",
        ]);

        if let Commands::When {
            start_date,
            simulation,
            ..
        } = args.command
        {
            assert_eq!(start_date, default_start_date());
            assert_eq!(simulation.iterations, None);
        } else {
            panic!("expected when command");
        }
    }

    #[test]
    fn how_many_accepts_period_count() {
        let args = CliArgs::parse_from([
            "throughput-forecasts",
            "how-many",
            "--values",
            "1 2 3",
            "-p",
            "4",
            "--seed",
            "9",
        ]);

        if let Commands::HowMany {
            input,
            periods,
            end_date,
            simulation,
            ..
        } = args.command
        {
            assert_eq!(input.source(), ThroughputSource::Inline("1 2 3".to_string()));
            assert_eq!(periods, Some(4.0));
            assert_eq!(end_date, None);
            assert_eq!(simulation.seed, Some(9));
        } else {
            panic!("expected how-many command");
        }
    }

    #[test]
    fn how_many_requires_a_horizon() {
        let result = CliArgs::try_parse_from(["throughput-forecasts", "how-many", "--values", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn input_requires_file_or_values() {
        let result = CliArgs::try_parse_from(["throughput-forecasts", "stats"]);
        assert!(result.is_err());
    }

    #[test]
    fn file_and_values_conflict() {
        let result = CliArgs::try_parse_from([
            "throughput-forecasts",
            "stats",
            "-f",
            "throughput.yaml",
            "--values",
            "1 2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_carry_cli_values() {
        let args = SimulationArgs {
            config: None,
            iterations: Some(100),
            period_days: None,
            seed: Some(3),
        };
        let overrides = args.overrides(Some(12));
        assert_eq!(overrides.iterations, Some(100));
        assert_eq!(overrides.period_days, None);
        assert_eq!(overrides.history_limit, Some(12));
        assert_eq!(overrides.seed, Some(3));
    }
}
