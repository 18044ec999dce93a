//! User store console entry point
//!
//! Run with:
//! ```bash
//! cargo run -p user-cli -- app:test
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use clap::Parser;
use tracing::{error, info};
use user_cli::{build_context, run_diagnostic, Cli, Commands};
use user_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = try_init_tracing();
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        store = ?config.store,
        "Configuration loaded"
    );

    let ctx = build_context(&config).await?;

    match cli.command() {
        Commands::Test => {
            let stdout = std::io::stdout();
            run_diagnostic(&ctx, &mut stdout.lock()).await?;
        }
    }

    Ok(())
}
