use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stockroom_cli::MenuController;
use stockroom_cli::settings::{build_system, load_config};

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Interactive inventory management")]
struct Cli {
    /// YAML configuration file (accounts, low-stock threshold, audit mirror)
    #[arg(long, env = "STOCKROOM_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured low-stock threshold
    #[arg(long)]
    low_stock_threshold: Option<u64>,

    /// Log filter used when RUST_LOG is not set, e.g. "info" or "stockroom_inventory=debug"
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the menu transcript.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli.config.as_deref(), cli.low_stock_threshold)?;
    let system = build_system(&config)?;

    let stdin = io::stdin();
    let mut controller = MenuController::new(system, stdin.lock(), io::stdout());
    controller.run()?;
    Ok(())
}
