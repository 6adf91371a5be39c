//! Vista server entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use vista_server::{Application, VistaConfig, init_tracing};

#[derive(Parser, Debug)]
#[command(author, version, about = "Vista image analysis server", long_about = None)]
struct Args {
    /// Configuration file layered over the defaults
    #[arg(short, long, env = "VISTA_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = VistaConfig::load(args.config.as_deref())?;
    init_tracing(&config.logging, args.verbose)?;

    info!(
        address = %config.server.address(),
        provider = %config.provider.kind,
        "Starting Vista server"
    );

    let mut app = Application::new(config)?;
    let served = app.serve(shutdown_signal()).await;

    // Close even when serving failed so the provider releases its client.
    if let Err(e) = app.close().await {
        error!(error = %e, "Failed to close analysis service");
    }

    served?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
