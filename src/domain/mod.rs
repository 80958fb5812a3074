pub mod throughput;
pub mod throughput_sample;
