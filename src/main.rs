//! mindlog CLI entrypoint

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mindlog::cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing; session output goes to stdout, so stay quiet by default
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let result = runtime.block_on(cli.execute());

    // A pending stdin read sits on a blocking thread and would hold shutdown open
    runtime.shutdown_timeout(Duration::from_millis(200));

    result
}
