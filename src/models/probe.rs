//! Probe result data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a server could not be ranked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeFailure {
    /// Utility exited with status 1: no reply to any echo request
    NoResponse,
    /// Utility exited with status 2: hostname lookup failed
    Unresolved,
    /// Any other nonzero exit status
    UnknownExit(i32),
    /// Utility was killed before it could exit
    Terminated,
    /// Utility succeeded but printed no parsable summary line
    MissingSummary,
}

impl ProbeFailure {
    /// Classify a nonzero exit status of the echo utility
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(1) => Self::NoResponse,
            Some(2) => Self::Unresolved,
            Some(other) => Self::UnknownExit(other),
            None => Self::Terminated,
        }
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => f.write_str("server did not respond"),
            Self::Unresolved => f.write_str("name could not be resolved"),
            Self::UnknownExit(code) => write!(f, "unknown error (exit code {})", code),
            Self::Terminated => f.write_str("ping was terminated by a signal"),
            Self::MissingSummary => f.write_str("no latency summary in ping output"),
        }
    }
}

/// Outcome of probing one server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbeOutcome {
    Success { avg_ms: f64 },
    Failure(ProbeFailure),
}

/// One server and how probing it went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub hostname: String,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    pub fn success<S: Into<String>>(hostname: S, avg_ms: f64) -> Self {
        Self {
            hostname: hostname.into(),
            outcome: ProbeOutcome::Success { avg_ms },
        }
    }

    pub fn failure<S: Into<String>>(hostname: S, reason: ProbeFailure) -> Self {
        Self {
            hostname: hostname.into(),
            outcome: ProbeOutcome::Failure(reason),
        }
    }
}

/// Split results into `(hostname, avg_ms)` successes and `(hostname, reason)`
/// failures, both in probe order.
pub fn partition(results: Vec<ProbeResult>) -> (Vec<(String, f64)>, Vec<(String, ProbeFailure)>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for result in results {
        match result.outcome {
            ProbeOutcome::Success { avg_ms } => successes.push((result.hostname, avg_ms)),
            ProbeOutcome::Failure(reason) => failures.push((result.hostname, reason)),
        }
    }

    (successes, failures)
}
