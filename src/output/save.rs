//! Persisting a report to a timestamped text file

use crate::{defaults, AppError, Result};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// `ping-results_<date>_<time>` with seconds precision, e.g.
/// `ping-results_2024-03-09_14-05-07`.
///
/// The ISO-8601 `T` separator becomes `_` and `:` becomes `-` so the name
/// is valid on every filesystem.
pub fn report_file_name<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}{}",
        defaults::REPORT_FILE_PREFIX,
        timestamp.format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Write `lines`, each followed by a newline, to a timestamped file in `dir`
pub fn save_report<Tz>(lines: &[String], dir: &Path, timestamp: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let path = dir.join(report_file_name(timestamp));

    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    fs::write(&path, content)
        .map_err(|e| AppError::io(format!("Failed to write report '{}': {}", path.display(), e)))?;

    Ok(path)
}
