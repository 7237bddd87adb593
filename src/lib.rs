//! VPN Latency Ranker
//!
//! Discovers VPN server hostnames from a provider's public listing page,
//! caches the list locally, pings every server with the system `ping`
//! utility and ranks the servers by average round-trip time.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod servers;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, ProbeFailure, ProbeOutcome, ProbeResult};
pub use output::LatencyReport;
pub use probe::{EchoRunner, Prober, SystemPing};
pub use servers::{HostnameSource, ListingClient, ServerListCache};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_SOURCE_URL: &str = "https://nordvpn.com/ovpn/";
    pub const DEFAULT_SELECTOR: &str = "span.mr-2";
    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
    pub const DEFAULT_CACHE_FILE: &str = "vpn-urls";
    pub const DEFAULT_CACHE_MAX_AGE_DAYS: u64 = 14;
    pub const DEFAULT_PING_COUNT: u32 = 10;
    pub const DEFAULT_PING_COMMAND: &str = "ping";
    pub const DEFAULT_JOBS: usize = 1;
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const REPORT_FILE_PREFIX: &str = "ping-results_";
}
