//! Tidings CLI binary.
//!
//! - `tidings run` starts the Discord bot
//! - `tidings ask <command...>` runs one command and prints the reply

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, ask, load_config};
    #[cfg(feature = "discord")]
    use cli::run_bot;

    // Secrets may live in a .env file next to the binary
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        #[cfg(feature = "discord")]
        Commands::Run => {
            run_bot(config).await?;
        }

        Commands::Ask { words, out } => {
            ask(&config, &words, out.as_deref()).await?;
        }
    }

    Ok(())
}
