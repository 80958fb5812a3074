pub mod base_commands;
pub mod completions_cmd;
pub mod how_many_cmd;
pub mod output_file;
pub mod plot_throughput_cmd;
pub mod record_cmd;
pub mod report_format;
pub mod stats_cmd;
pub mod when_cmd;
