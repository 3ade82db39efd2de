use clap::Parser;
use neuwo_rtd::app::cli::{Cli, run};
use neuwo_rtd::core::observability;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guards = match observability::init(&config.logging) {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("error: failed to initialize logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config).await {
        Ok(enriched) => {
            println!("{}", enriched);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Enrichment failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
