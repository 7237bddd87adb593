//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::Cli, config::env::EnvManager, error::Result, models::Config};

/// Configuration plus the non-fatal problems noticed while building it
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<String>,
}

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<LoadedConfig> {
        EnvManager::load_env_file(self.cli.debug)?;
        self.parse_with_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a given variable lookup instead of the process environment
    pub fn parse_with_vars<F>(&self, lookup: F) -> Result<LoadedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.merge_from_vars(lookup)?;

        let warnings = self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(LoadedConfig { config, warnings })
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) -> Vec<String> {
        let mut warnings = Vec::new();

        let choice = self.cli.resolve_count(config.ping_count);
        config.ping_count = choice.count;
        warnings.extend(choice.warning);

        if let Some(ref path) = self.cli.cache_file {
            config.cache_file = path.clone();
        }

        if let Some(days) = self.cli.max_age_days {
            config.cache_max_age_days = days;
        }

        if let Some(ref url) = self.cli.source_url {
            config.source_url = url.clone();
        }

        if let Some(ref selector) = self.cli.selector {
            config.selector = selector.clone();
        }

        if let Some(ref command) = self.cli.ping_command {
            config.ping_command = command.clone();
        }

        if let Some(jobs) = self.cli.jobs {
            config.jobs = jobs;
        }

        if let Some(timeout) = self.cli.timeout {
            config.fetch_timeout_seconds = timeout;
        }

        if let Some(ref dir) = self.cli.output_dir {
            config.output_dir = dir.clone();
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        // CLI-only flags
        config.quiet = self.cli.quiet;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        warnings
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<LoadedConfig> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Listing URL: {}", config.source_url));
    summary.push(format!("Selector: {}", config.selector));
    summary.push(format!("Cache File: {}", config.cache_file.display()));
    summary.push(format!("Cache Max Age: {} days", config.cache_max_age_days));
    summary.push(format!("Ping Count: {}", config.ping_count));
    summary.push(format!("Ping Command: {}", config.ping_command));
    summary.push(format!("Jobs: {}", config.jobs));
    summary.push(format!("Fetch Timeout: {}s", config.fetch_timeout_seconds));
    summary.push(format!("Output Dir: {}", config.output_dir.display()));
    summary.push(format!("Color Output: {}", config.enable_color));

    summary.join("\n")
}
