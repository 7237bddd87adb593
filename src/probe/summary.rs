//! Parsing of the echo utility's round-trip summary

use crate::models::{ProbeFailure, ProbeOutcome};
use crate::probe::runner::EchoOutput;
use crate::Result;
use regex::Regex;

/// Matches the iputils summary `rtt min/avg/max/mdev = 10.1/12.3/15.0/1.2 ms`.
///
/// The capture is the number after the first slash following `mdev = `,
/// which is the avg column of that line.
const SUMMARY_PATTERN: &str = r"mdev = \d+\.\d+/(?P<avg_ping_time>\d+.\d+)";

/// Turns raw echo utility output into a probe outcome
#[derive(Debug, Clone)]
pub struct SummaryParser {
    pattern: Regex,
}

impl SummaryParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(SUMMARY_PATTERN)?,
        })
    }

    /// Average round-trip time in milliseconds from the first summary match
    pub fn average_ms(&self, output: &str) -> Option<f64> {
        self.pattern
            .captures(output)
            .and_then(|captures| captures.name("avg_ping_time"))
            .and_then(|avg| avg.as_str().parse::<f64>().ok())
    }

    /// Classify one run of the utility
    pub fn classify(&self, echo: &EchoOutput) -> ProbeOutcome {
        match echo.exit_code {
            Some(0) => match self.average_ms(&echo.output) {
                Some(avg_ms) => ProbeOutcome::Success { avg_ms },
                None => ProbeOutcome::Failure(ProbeFailure::MissingSummary),
            },
            code => ProbeOutcome::Failure(ProbeFailure::from_exit_code(code)),
        }
    }
}
