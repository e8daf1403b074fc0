use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use insights::{Config, Loader};

#[derive(Parser)]
#[command(name = "insights", about = "Insights — dataset loader and filtered read API")]
struct Cli {
    /// TOML config file layered over the built-in defaults. Must exist when
    /// given; otherwise `insights.toml` is read if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Load the dataset into the store once and exit.
    Load,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; variables may come from the real environment.
    let dotenv = dotenvy::dotenv();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if let Ok(path) = &dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let store = insights::open_store(&config).await?;
    let loader = Loader::new(store.clone(), &config.dataset.path);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = insights::http::AppState::new(store, loader);
            insights::http::serve(&config.server.bind_addr(), state).await
        }
        Command::Load => {
            let outcome = loader
                .load()
                .await
                .with_context(|| format!("failed to load {}", config.dataset.path.display()))?;
            println!("{}", outcome.message());
            Ok(())
        }
    }
}
