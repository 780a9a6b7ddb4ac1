use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ranked_films::auth::{Accounts, Manager, TokenIssuer};
use ranked_films::catalog::KinopoiskFeed;
use ranked_films::config::ServerConfig;
use ranked_films::http::AppState;
use ranked_films::{Film, JsonFileCollection, RankedStore, SharedCollection};

#[derive(Parser)]
#[command(name = "ranked-films", about = "Ranked film catalog over flat JSON collections")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve(ServerConfig),
    /// Grant a registered manager read and write access
    Promote {
        /// Email the manager registered with
        email: String,
        #[command(flatten)]
        config: ServerConfig,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve(config) => serve(config).await,
        Commands::Promote { email, config } => {
            let manager = accounts(&config)?
                .promote(&email)
                .with_context(|| format!("promoting {}", email))?;
            println!("manager {} ({}) now has read and write access", manager.id, manager.email);
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let films: SharedCollection<Film> = Arc::new(JsonFileCollection::<Film>::new(&config.films_file));
    let feed = KinopoiskFeed::new(config.catalog_url.clone(), config.api_key.clone());
    if config.api_key.is_none() {
        tracing::warn!("no API key configured; catalog refresh will fail");
    }

    let state = AppState::new(RankedStore::new(films), accounts(&config)?, Arc::new(feed));

    info!(
        films = %config.films_file.display(),
        managers = %config.managers_file.display(),
        "starting ranked-films v{}",
        env!("CARGO_PKG_VERSION")
    );
    ranked_films::http::serve(Arc::new(state), &config.bind)
        .await
        .with_context(|| format!("serving on {}", config.bind))
}

fn accounts(config: &ServerConfig) -> anyhow::Result<Accounts<SharedCollection<Manager>>> {
    let tokens = TokenIssuer::new(&config.token_secret, config.token_ttl())
        .context("invalid token secret")?;
    let managers: SharedCollection<Manager> =
        Arc::new(JsonFileCollection::<Manager>::new(&config.managers_file));
    Ok(Accounts::new(managers, tokens))
}
