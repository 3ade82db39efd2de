use crate::app::config::RtdConfig;
use crate::core::events::LoggingEventSink;
use crate::core::models::{BidRequestConfig, RefererInfo};
use crate::core::rtd::{RtdModule, RtdRegistry};
use anyhow::{Context, Error, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "neuwo-rtd",
    version,
    about = "Enrich a bid request config with Neuwo.ai contextual categories"
)]
pub struct Cli {
    /// Path to the yaml configuration file
    #[arg(short, long, value_name = "PATH", default_value = "rtd.yaml")]
    pub config: PathBuf,

    /// Bid request config json, read from stdin when omitted
    #[arg(short, long, value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// Url of the page the auction runs on
    #[arg(short, long, value_name = "URL")]
    pub page: Option<String>,

    /// Overrides the configured log level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Applies command line overrides on top of the loaded config
    pub fn load_config(&self) -> Result<RtdConfig, Error> {
        let mut config = RtdConfig::load(&self.config)
            .with_context(|| format!("failed to load config {}", self.config.display()))?;

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }

    fn read_request(&self) -> Result<BidRequestConfig, Error> {
        let raw = match &self.request {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read request {}", path.display()))?,
            None => std::io::read_to_string(std::io::stdin())
                .context("failed to read request from stdin")?,
        };

        serde_json::from_str(&raw).context("request is not a valid bid request config")
    }
}

/// Runs one enrichment cycle and returns the enriched request as json
pub async fn run(cli: &Cli, config: &RtdConfig) -> Result<String, Error> {
    let registry = RtdRegistry::with_defaults(&config.http)?;
    let module = RtdModule::new(&registry, &config.providers, config.auction_delay);

    if module.is_empty() {
        bail!("No real time data provider could be initialised");
    }

    info!("Active providers: {:?}", module.active_names());

    let mut request = cli.read_request()?;
    let referer = RefererInfo {
        page: cli.page.clone(),
    };

    let applied = module.enrich(&mut request, &referer, &LoggingEventSink).await;
    info!("{} provider(s) enriched the request", applied);

    Ok(serde_json::to_string_pretty(&request)?)
}
