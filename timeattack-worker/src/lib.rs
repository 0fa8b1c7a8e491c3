pub mod config;
pub mod progress;
pub mod reducer;
pub mod report;
pub mod sampler;
pub mod worker;
