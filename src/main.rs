//! item-uploader - batch upload service
//!
//! Loads the configuration, installs logging and serves the upload routes.

use clap::Parser;
use item_uploader::server::builder::{load_config, run_server};
use item_uploader::utils::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "item-uploader", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "UPLOADER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let mut config = match load_config(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(host) = cli.host {
        config.uploader.server.host = host;
    }
    if let Some(port) = cli.port {
        config.uploader.server.port = port;
    }

    match run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the message readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
