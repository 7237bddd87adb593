//! Report rendering, display and persistence
//!
//! A run's results become a fixed-width text table. The table is printed to
//! the terminal (optionally colored) and, on confirmation, saved verbatim to
//! a timestamped file.

mod console;
pub mod prompt;
mod report;
mod save;

pub use console::{ColorScheme, ConsoleFormatter, PerformanceLevel};
pub use prompt::confirm_save;
pub use report::{LatencyReport, SERVER_COLUMN_WIDTH};
pub use save::{report_file_name, save_report};

use crate::{cli::SaveMode, Result};
use chrono::Local;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Prints a report and saves it according to the save mode
pub struct OutputCoordinator {
    formatter: ConsoleFormatter,
    save_mode: SaveMode,
    output_dir: PathBuf,
}

impl OutputCoordinator {
    pub fn new(enable_color: bool, save_mode: SaveMode, output_dir: &Path) -> Self {
        Self {
            formatter: ConsoleFormatter::new(enable_color),
            save_mode,
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn display(&self, report: &LatencyReport) {
        self.formatter.print(report);
    }

    /// Save the plain report if wanted; returns the written path
    pub fn finish<R, W>(&self, report: &LatencyReport, input: &mut R, output: &mut W) -> Result<Option<PathBuf>>
    where
        R: BufRead,
        W: Write,
    {
        let save = match self.save_mode {
            SaveMode::Always => true,
            SaveMode::Never => false,
            SaveMode::Ask => confirm_save(input, output)?,
        };

        if !save {
            return Ok(None);
        }

        let path = save_report(&report.render(), &self.output_dir, &Local::now())?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProbeFailure;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn report() -> LatencyReport {
        LatencyReport::new(
            3,
            vec![("fast".to_string(), 1.5)],
            vec![("gone".to_string(), ProbeFailure::NoResponse)],
        )
    }

    fn finish(mode: SaveMode, answer: &str, dir: &Path) -> Option<PathBuf> {
        let coordinator = OutputCoordinator::new(false, mode, dir);
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        coordinator.finish(&report(), &mut input, &mut output).unwrap()
    }

    #[test]
    fn test_confirmed_save_writes_plain_report() {
        let dir = TempDir::new().unwrap();
        let path = finish(SaveMode::Ask, "y\n", dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("ping-results_"));
        let expected: String = report().render().iter().map(|l| format!("{}\n", l)).collect();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_declined_save_writes_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(finish(SaveMode::Ask, "n\n", dir.path()).is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_modes_skip_prompt() {
        let dir = TempDir::new().unwrap();
        assert!(finish(SaveMode::Always, "", dir.path()).is_some());
        assert!(finish(SaveMode::Never, "y\n", dir.path()).is_none());
    }
}
