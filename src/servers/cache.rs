//! Flat-file cache of the server hostname list
//!
//! The cache is a plain text file with one hostname per line. It is
//! rewritten wholesale whenever it is missing or older than the staleness
//! window, and never edited in place.

use crate::logging::Logger;
use crate::servers::HostnameSource;
use crate::{AppError, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// What `ensure_fresh` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    /// File was recent enough and left untouched
    Fresh { age: Duration },
    /// File was missing or stale and has been rewritten
    Refreshed { count: usize },
}

/// Cache manager for the server hostname list
pub struct ServerListCache {
    path: PathBuf,
    max_age: Duration,
    logger: Option<Logger>,
}

impl ServerListCache {
    pub fn new<P: Into<PathBuf>>(path: P, max_age: Duration) -> Self {
        Self {
            path: path.into(),
            max_age,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Age of the cache file, `None` when it does not exist.
    ///
    /// A modification time in the future counts as age zero.
    pub fn age(&self) -> Result<Option<Duration>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::cache(format!(
                    "Failed to inspect cache file '{}': {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let modified = metadata.modified().map_err(|e| {
            AppError::cache(format!(
                "Failed to read modification time of '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(Some(SystemTime::now().duration_since(modified).unwrap_or_default()))
    }

    /// Whether the file is missing or older than the staleness window
    pub fn is_stale(&self) -> Result<bool> {
        Ok(match self.age()? {
            None => true,
            Some(age) => age > self.max_age,
        })
    }

    /// Refresh the cache from `source` if it is missing or stale, otherwise do nothing
    pub async fn ensure_fresh<S>(&self, source: &S) -> Result<CacheStatus>
    where
        S: HostnameSource + ?Sized,
    {
        if let Some(age) = self.age()? {
            if age <= self.max_age {
                if let Some(logger) = &self.logger {
                    logger
                        .debug("Server list cache is fresh")
                        .field("path", self.path.display().to_string())
                        .field("age_secs", age.as_secs())
                        .log()
                        .await;
                }
                return Ok(CacheStatus::Fresh { age });
            }
        }

        // Fetch completely before touching the file
        let hostnames = source.fetch_hostnames().await?;
        self.save(&hostnames)?;

        if let Some(logger) = &self.logger {
            if hostnames.is_empty() {
                logger
                    .warn("Listing page yielded no servers; the page layout may have changed")
                    .field("path", self.path.display().to_string())
                    .log()
                    .await;
            } else {
                logger
                    .info("Refreshed server list cache")
                    .field("path", self.path.display().to_string())
                    .field("count", hostnames.len())
                    .log()
                    .await;
            }
        }

        Ok(CacheStatus::Refreshed { count: hostnames.len() })
    }

    /// Overwrite the cache file with `hostnames`, one per line
    pub fn save(&self, hostnames: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::cache(format!(
                        "Failed to create cache directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut content = String::new();
        for hostname in hostnames {
            content.push_str(hostname);
            content.push('\n');
        }

        fs::write(&self.path, content).map_err(|e| {
            AppError::cache(format!(
                "Failed to write cache file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Hostnames to probe, see [`load_hostnames`]
    pub fn load(&self) -> Result<Vec<String>> {
        load_hostnames(&self.path)
    }
}

/// Read a hostname list for probing.
///
/// Empty lines are skipped and repeated hostnames keep only their first
/// occurrence, so every distinct server is probed exactly once.
pub fn load_hostnames(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::cache(format!("Failed to read cache file '{}': {}", path.display(), e))
    })?;

    let mut seen = HashSet::new();
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect())
}
