//! `delicias` binary: parses the command line and runs one command.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use delicias::{
    cli::{Cli, Commands},
    commands,
    config::Config,
    AppResult,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
        Commands::Seed => commands::seed::execute(config).await,
    }
}

/// `--verbose` wins over `RUST_LOG`; the default level is info.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
