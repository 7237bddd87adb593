//! Latency report table

use crate::models::{partition, ProbeFailure, ProbeResult};

/// Width of the left-aligned server column
pub const SERVER_COLUMN_WIDTH: usize = 25;

/// Results of one run, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyReport {
    /// Trials per server
    pub count: u32,
    /// `(hostname, avg_ms)` in probe order
    pub successes: Vec<(String, f64)>,
    /// `(hostname, reason)` in probe order
    pub failures: Vec<(String, ProbeFailure)>,
}

impl LatencyReport {
    pub fn new(count: u32, successes: Vec<(String, f64)>, failures: Vec<(String, ProbeFailure)>) -> Self {
        Self { count, successes, failures }
    }

    pub fn from_results(count: u32, results: Vec<ProbeResult>) -> Self {
        let (successes, failures) = partition(results);
        Self::new(count, successes, failures)
    }

    /// Successes ordered by ascending latency; equal latencies keep probe order
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .successes
            .iter()
            .map(|(host, avg)| (host.as_str(), *avg))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }

    pub fn title_line(&self) -> String {
        format!("Ping statistics - number of trials per server: {}", self.count)
    }

    pub fn column_header() -> String {
        format!("{:<width$}{}", "server", "avg latency (ms)", width = SERVER_COLUMN_WIDTH)
    }

    pub fn success_line(host: &str, avg_ms: f64) -> String {
        format!("{:<width$}{:3.3}", host, avg_ms, width = SERVER_COLUMN_WIDTH)
    }

    pub fn failure_line(host: &str, reason: &ProbeFailure) -> String {
        format!("{:<width$}{}", host, reason, width = SERVER_COLUMN_WIDTH)
    }

    /// Title, column header, ranked successes, then failures in probe order
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2 + self.successes.len() + self.failures.len());
        lines.push(self.title_line());
        lines.push(Self::column_header());

        for (host, avg_ms) in self.ranked() {
            lines.push(Self::success_line(host, avg_ms));
        }

        for (host, reason) in &self.failures {
            lines.push(Self::failure_line(host, reason));
        }

        lines
    }

    /// Total number of servers in the report
    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fastest server, if any responded
    pub fn best(&self) -> Option<(&str, f64)> {
        self.ranked().into_iter().next()
    }
}
