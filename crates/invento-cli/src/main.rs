use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use invento_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "invento")]
#[command(author, version, about = "Terminal preview of the Invento feature showcase")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the showcase in the terminal
    Run,
    /// Print the scroll bound of a card strip
    Bounds {
        /// Number of cards
        #[arg(short = 'n', long)]
        cards: usize,
        /// Card width in pixels (default: configured fallback width)
        #[arg(short = 'w', long)]
        card_width: Option<f64>,
        /// Gap between cards in pixels (default: configured gap)
        #[arg(short, long)]
        gap: Option<f64>,
        /// Viewport width in pixels
        #[arg(short, long)]
        viewport: f64,
        /// Padding kept after the last card (default: configured padding)
        #[arg(short, long)]
        padding: Option<f64>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Install the global subscriber; RUST_LOG overrides the configured level
///
/// The TUI owns the terminal, so while it runs logs go to a file.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("opening {}", log_path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let runs_tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, runs_tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Bounds {
            cards,
            card_width,
            gap,
            viewport,
            padding,
            json,
        }) => {
            let carousel = &config.carousel;
            let geometry = invento_core::StripGeometry {
                card_count: cards,
                card_width: card_width.unwrap_or(carousel.fallback_card_width_px),
                gap: gap.unwrap_or(carousel.gap_px),
                viewport_width: viewport,
                edge_padding: padding.unwrap_or(carousel.edge_padding_px),
            };
            commands::bounds::run(geometry, carousel.breakpoint_px, json)
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}
