//! Entry point for the CoinSpark command-line tool.

mod cli;

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coinspark::store::{KeyValueStore, MemoryStore};
use coinspark::ui::{App, SystemClipboard};
use coinspark::{AppConfig, GeminiTransport, IdeaGenerator, PersistentStore, SqliteStore};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    info!("Using data directory {}", config.data_dir.display());

    let backend: Arc<dyn KeyValueStore> = match SqliteStore::open(&config.database_path()).await {
        Ok(store) => store,
        Err(e) => {
            warn!("Local store unavailable ({}); nothing will be saved this session", e);
            Arc::new(MemoryStore::new())
        }
    };
    let store = PersistentStore::new(backend);

    let transport = GeminiTransport::from_config(&config)?;
    let generator = Arc::new(IdeaGenerator::new(Arc::new(transport)));

    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();

    let mut app = App::new(
        generator,
        store,
        Box::new(SystemClipboard::new()),
        config.history_cap(),
    )
    .await
    .with_color(color);

    cli::run(&mut app, cli.command.unwrap_or(Commands::Shell)).await
}
