//! Invocation of the external echo utility

use crate::{AppError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// What the echo utility reported for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoOutput {
    /// Exit status, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Stdout followed by stderr
    pub output: String,
}

impl EchoOutput {
    pub fn new<S: Into<String>>(exit_code: Option<i32>, output: S) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }
}

/// Runs `count` echo trials against one host
#[async_trait]
pub trait EchoRunner: Send + Sync {
    /// Err only when the utility could not be started at all
    async fn run(&self, host: &str, count: u32) -> Result<EchoOutput>;
}

/// The system `ping` (or a compatible program) run as `<program> -c <count> -- <host>`
#[derive(Debug, Clone)]
pub struct SystemPing {
    program: String,
}

impl SystemPing {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new(crate::defaults::DEFAULT_PING_COMMAND)
    }
}

#[async_trait]
impl EchoRunner for SystemPing {
    async fn run(&self, host: &str, count: u32) -> Result<EchoOutput> {
        let output = Command::new(&self.program)
            .arg("-c")
            .arg(count.to_string())
            // Scraped names must never be read as options
            .arg("--")
            .arg(host)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| AppError::probe(format!("Failed to run '{}': {}", self.program, e)))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(EchoOutput::new(output.status.code(), combined))
    }
}
