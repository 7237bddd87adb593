//! Colored console rendering of the latency report
//!
//! The text is identical to the plain report; only ANSI styling is added.
//! Header lines are bold, ranked rows are tinted by how fast the server
//! answered and failure rows are yellow.

use super::report::LatencyReport;
use colored::{Color, Colorize};

/// Latency tier used for row coloring
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    Excellent, // < 50ms
    Good,      // 50-100ms
    Fair,      // 100-300ms
    Poor,      // >= 300ms
}

impl PerformanceLevel {
    pub fn from_latency(avg_ms: f64) -> Self {
        if avg_ms < 50.0 {
            Self::Excellent
        } else if avg_ms < 100.0 {
            Self::Good
        } else if avg_ms < 300.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Blue,
            Self::Poor => Color::Magenta,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub column_header: Color,
    pub failure: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::White,
            column_header: Color::White,
            failure: Color::Yellow,
        }
    }
}

/// Renders a report for the terminal
pub struct ConsoleFormatter {
    enable_color: bool,
    color_scheme: ColorScheme,
}

impl ConsoleFormatter {
    pub fn new(enable_color: bool) -> Self {
        Self {
            enable_color,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Report lines, styled when color is enabled
    pub fn format(&self, report: &LatencyReport) -> Vec<String> {
        if !self.enable_color {
            return report.render();
        }

        let mut lines = Vec::with_capacity(2 + report.len());
        lines.push(report.title_line().color(self.color_scheme.header).bold().to_string());
        lines.push(LatencyReport::column_header().color(self.color_scheme.column_header).bold().to_string());

        for (host, avg_ms) in report.ranked() {
            let level = PerformanceLevel::from_latency(avg_ms);
            lines.push(LatencyReport::success_line(host, avg_ms).color(level.color()).to_string());
        }

        for (host, reason) in &report.failures {
            lines.push(LatencyReport::failure_line(host, reason).color(self.color_scheme.failure).to_string());
        }

        lines
    }

    /// Print the report to stdout
    pub fn print(&self, report: &LatencyReport) {
        for line in self.format(report) {
            println!("{}", line);
        }
    }
}
