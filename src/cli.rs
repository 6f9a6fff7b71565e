//! Command-line surface: global flags, subcommands and one-shot dispatch.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use coinspark::types::Theme;
use coinspark::ui::{shell, App, CardRef};

#[derive(Parser)]
#[command(name = "coinspark")]
#[command(about = "Generate satirical meme coin ideas with AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/coinspark/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the local store
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate three ideas for a topic
    Generate {
        topic: String,

        #[arg(long, short)]
        style: Option<String>,
    },

    /// Generate with a random topic and style
    Surprise,

    /// Show past generations
    History,

    /// Show pinned ideas
    Pinned,

    /// Pin or unpin a card (p<N> or <G>.<I>)
    Pin { card: CardRef },

    /// Copy a card to the clipboard
    Copy { card: CardRef },

    /// Forget saved ideas
    Clear { target: ClearArg },

    /// Show or change the colour theme
    Theme { mode: Option<ThemeArg> },

    /// Interactive mode (default)
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ClearArg {
    History,
    Pinned,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

pub async fn run(app: &mut App, command: Commands) -> Result<()> {
    let now = Instant::now();

    match command {
        Commands::Generate { topic, style } => {
            if let Err(e) = app.generate(&topic, style.as_deref()).await {
                bail!("{e}");
            }
            println!("{}", app.render_history(now));
        }
        Commands::Surprise => {
            if let Err(e) = app.surprise().await {
                bail!("{e}");
            }
            println!("{}", app.render_history(now));
        }
        Commands::History => println!("{}", app.render_history(now)),
        Commands::Pinned => println!("{}", app.render_pinned(now)),
        Commands::Pin { card } => {
            let change = app.toggle_pin(card).await?;
            println!("{card}: {change:?}");
        }
        Commands::Copy { card } => {
            if app.copy(card, now)? {
                println!("[{card}] Copied!");
            } else {
                bail!("Could not access the clipboard");
            }
        }
        Commands::Clear { target } => {
            if matches!(target, ClearArg::History | ClearArg::All) {
                app.clear_history().await;
            }
            if matches!(target, ClearArg::Pinned | ClearArg::All) {
                app.clear_pinned().await;
            }
            println!("Cleared.");
        }
        Commands::Theme { mode } => {
            let theme = match mode {
                None => app.ui.theme,
                Some(ThemeArg::Toggle) => app.toggle_theme().await,
                Some(ThemeArg::Light) => {
                    app.set_theme(Theme::Light).await;
                    Theme::Light
                }
                Some(ThemeArg::Dark) => {
                    app.set_theme(Theme::Dark).await;
                    Theme::Dark
                }
            };
            println!("Theme: {}", theme.as_str());
        }
        Commands::Shell => shell::run(app).await?,
    }

    Ok(())
}
