pub mod forecast;
pub mod forecast_config;
pub mod forecast_report;
pub mod histogram;
pub mod percentiles;
pub mod period_calendar;
pub mod resampler;
pub mod simulation;
pub mod statistics;
pub mod throughput_forecast;
pub mod throughput_plot;
pub mod throughput_yaml;
