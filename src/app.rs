//! Main application orchestration and execution

use crate::{
    cli::SaveMode,
    config::{display_config_summary, LoadedConfig},
    error::Result,
    logging::Logger,
    models::Config,
    output::{LatencyReport, OutputCoordinator},
    probe::{EchoRunner, Prober},
    servers::{HostnameSource, ListingClient, ServerListCache},
};

/// Refresh the server list if needed, probe every server and build the report
pub async fn rank_servers<S, R>(
    cache: &ServerListCache,
    source: &S,
    prober: &Prober<R>,
    count: u32,
) -> Result<LatencyReport>
where
    S: HostnameSource + ?Sized,
    R: EchoRunner,
{
    cache.ensure_fresh(source).await?;
    let hostnames = cache.load()?;
    let results = prober.probe_all(&hostnames, count).await?;
    Ok(LatencyReport::from_results(count, results))
}

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    warnings: Vec<String>,
    save_mode: SaveMode,
}

impl App {
    pub fn new(loaded: LoadedConfig, save_mode: SaveMode) -> Self {
        Self {
            config: loaded.config,
            warnings: loaded.warnings,
            save_mode,
        }
    }

    /// Run the whole pipeline once
    pub async fn run(self) -> Result<()> {
        let config = &self.config;
        let logger = Logger::with_config("vlr", config);
        logger.start_session().await;

        for warning in &self.warnings {
            println!("Warning: {}", warning);
        }

        if config.debug {
            println!("{} v{}", crate::PKG_NAME, crate::VERSION);
            println!("{}", display_config_summary(config));
            println!();
        }

        let cache = ServerListCache::new(config.cache_file.clone(), config.cache_max_age())
            .with_logger(logger.child("cache"));
        let client = ListingClient::from_config(config)?;
        let prober = Prober::from_config(config)?.with_logger(logger.child("probe"));

        let report = rank_servers(&cache, &client, &prober, config.ping_count).await?;

        logger
            .info("Probing finished")
            .field("servers", report.len())
            .field("responding", report.successes.len())
            .log()
            .await;

        let coordinator = OutputCoordinator::new(config.enable_color, self.save_mode, &config.output_dir);
        coordinator.display(&report);

        let saved = {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            coordinator.finish(&report, &mut input, &mut output)?
        };

        if let Some(path) = saved {
            println!("Results saved to {}", path.display());
            logger
                .info("Saved report")
                .field("path", path.display().to_string())
                .log()
                .await;
        }

        Ok(())
    }
}
