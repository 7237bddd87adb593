//! Command-line interface

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// VPN Latency Ranker - ping every server of a VPN provider and rank them by latency
#[derive(Parser, Debug, Clone)]
#[command(name = "vlr")]
#[command(version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Number of ping trials per server (falls back to the default when not a positive integer)
    #[arg(value_name = "COUNT")]
    pub count: Option<String>,

    /// File caching the server hostname list
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Refresh the cached server list when it is older than this many days
    #[arg(long, value_name = "DAYS")]
    pub max_age_days: Option<u64>,

    /// Provider page listing the VPN servers
    #[arg(long, value_name = "URL")]
    pub source_url: Option<String>,

    /// CSS selector of the elements holding server hostnames
    #[arg(long, value_name = "CSS")]
    pub selector: Option<String>,

    /// Echo utility to run as `<PROG> -c <COUNT> -- <host>`
    #[arg(long, value_name = "PROG")]
    pub ping_command: Option<String>,

    /// Number of servers to probe at the same time
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Listing fetch timeout in seconds
    #[arg(short, long, value_parser = parse_duration, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Directory the saved report is written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Save the report without asking
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "no_save")]
    pub save: bool,

    /// Do not ask to save the report
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_save: bool,

    /// Do not print a line for every server being pinged
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// List the supported environment variables and exit
    #[arg(long)]
    pub env_help: bool,
}

/// Outcome of interpreting the positional trial count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountChoice {
    pub count: u32,
    /// Set when the argument was rejected and the default used instead
    pub warning: Option<String>,
}

/// What to do with the report once it has been printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Ask,
    Always,
    Never,
}

impl Cli {
    /// Resolve the trial count, never failing on malformed input
    pub fn resolve_count(&self, default: u32) -> CountChoice {
        match self.count.as_deref() {
            None => CountChoice { count: default, warning: None },
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(count) if count > 0 => CountChoice { count, warning: None },
                Ok(_) => CountChoice {
                    count: default,
                    warning: Some(format!(
                        "trial count must be at least 1, got '{}'; using default of {}",
                        raw, default
                    )),
                },
                Err(e) => CountChoice {
                    count: default,
                    warning: Some(format!(
                        "invalid trial count '{}': {}\nonly command line argument accepted is a single integer; using default of {}",
                        raw, e, default
                    )),
                },
            },
        }
    }

    pub fn save_mode(&self) -> SaveMode {
        if self.save {
            SaveMode::Always
        } else if self.no_save {
            SaveMode::Never
        } else {
            SaveMode::Ask
        }
    }
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Duration cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}
