//! Latency probing of VPN servers
//!
//! Every hostname is probed with the external echo utility, one host fully
//! probed before the next by default. With more than one job, hosts are
//! probed concurrently but results still come back in probe order.

pub mod runner;
pub mod summary;

pub use runner::{EchoOutput, EchoRunner, SystemPing};
pub use summary::SummaryParser;

use crate::logging::Logger;
use crate::models::{Config, ProbeResult};
use crate::Result;
use futures::stream::{self, StreamExt, TryStreamExt};

/// Probes a list of hosts with an [`EchoRunner`]
pub struct Prober<R: EchoRunner> {
    runner: R,
    parser: SummaryParser,
    jobs: usize,
    show_progress: bool,
    logger: Option<Logger>,
}

impl<R: EchoRunner> Prober<R> {
    /// Sequential prober without progress output
    pub fn new(runner: R) -> Result<Self> {
        Ok(Self {
            runner,
            parser: SummaryParser::new()?,
            jobs: 1,
            show_progress: false,
            logger: None,
        })
    }

    /// Number of hosts probed at the same time, at least one
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Print `pinging <host>` before each probe
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Probe a single host with `count` trials
    pub async fn probe_host(&self, host: &str, count: u32) -> Result<ProbeResult> {
        if self.show_progress {
            println!("pinging {}", host);
        }

        let echo = self.runner.run(host, count).await?;
        let result = ProbeResult {
            hostname: host.to_string(),
            outcome: self.parser.classify(&echo),
        };

        if let Some(logger) = &self.logger {
            logger
                .debug("Probed server")
                .probe(&result)
                .field("exit_code", echo.exit_code)
                .log()
                .await;
        }

        Ok(result)
    }

    /// Probe every host; the returned results are in the same order as `hostnames`.
    ///
    /// Per-host failures are part of the results. Only a utility that cannot
    /// be started aborts the whole run.
    pub async fn probe_all(&self, hostnames: &[String], count: u32) -> Result<Vec<ProbeResult>> {
        if self.jobs == 1 {
            let mut results = Vec::with_capacity(hostnames.len());
            for host in hostnames {
                results.push(self.probe_host(host, count).await?);
            }
            return Ok(results);
        }

        stream::iter(hostnames)
            .map(|host| self.probe_host(host, count))
            .buffered(self.jobs)
            .try_collect()
            .await
    }
}

impl Prober<SystemPing> {
    /// Prober running the configured ping command
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(SystemPing::new(config.ping_command.clone()))?
            .with_jobs(config.jobs)
            .with_progress(!config.quiet))
    }
}
