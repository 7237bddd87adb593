//! Data models and structures for the VPN latency ranker

pub mod config;
pub mod probe;

// Re-export main model types
pub use config::Config;
pub use probe::{partition, ProbeFailure, ProbeOutcome, ProbeResult};
