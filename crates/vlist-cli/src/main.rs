use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vlist_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "vlist")]
#[command(author, version, about = "Virtualized list windowing engine for TV interfaces")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/vlist/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print metrics, scroll bounds and the initial window as JSON
    Metrics {
        /// Override the configured number of items
        #[arg(short = 'n', long)]
        data_size: Option<i64>,
        /// Client width in pixels when the config does not set one
        #[arg(long, default_value_t = 1920.0)]
        width: f64,
        /// Client height in pixels when the config does not set one
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
    },
    /// Run a scripted input session and print scroll events as JSON lines
    Simulate {
        /// TOML script with [[step]] entries
        script: PathBuf,
    },
    /// Interactive terminal list
    Demo {
        /// Write logs to stderr
        #[arg(long)]
        log: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // The demo owns the terminal, so it only logs when asked to
    let logging = !matches!(cli.command, None | Some(Commands::Demo { log: false }));
    if logging {
        init_logging(&config.general.log_level);
    }

    match cli.command {
        Some(Commands::Metrics {
            data_size,
            width,
            height,
        }) => commands::metrics::run(&config, data_size, width, height),
        Some(Commands::Simulate { script }) => commands::simulate::run(&config, &script),
        Some(Commands::Demo { .. }) | None => commands::demo::run(&config),
    }
}

fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
