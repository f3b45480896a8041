use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tourline_core::{AppConfig, MAX_SPEED, MIN_SPEED};

mod commands;

#[derive(Parser)]
#[command(name = "tourline")]
#[command(author, version, about = "Scripted guided tours for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the guided tour in the terminal UI
    Run,
    /// Play the tour without a UI and print its events
    Headless {
        /// Playback speed multiplier (0.01 to 1000)
        #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
        speed: f64,
        /// Viewport width in cells
        #[arg(long, default_value_t = 80)]
        width: u16,
        /// Viewport height in cells
        #[arg(long, default_value_t = 24)]
        height: u16,
    },
    /// Print the built-in tour script
    Script {
        #[arg(long, value_enum, default_value_t = ScriptFormat::Json)]
        format: ScriptFormat,
    },
    /// Show the effective configuration
    Config {
        /// Write the defaults to the config file if it does not exist
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptFormat {
    Json,
    Toml,
}

fn parse_speed(s: &str) -> std::result::Result<f64, String> {
    let speed: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
        Ok(speed)
    } else {
        Err(format!("speed must be between {} and {}", MIN_SPEED, MAX_SPEED))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui_mode = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui_mode)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Headless { speed, width, height }) => {
            commands::headless::run(config, speed, width, height).await
        }
        Some(Commands::Script { format }) => commands::script::run(&config, format),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}

/// Initialize logging
///
/// The TUI owns the terminal, so in TUI mode logs go to a file in the data
/// directory instead of stderr.
fn init_logging(config: &AppConfig, tui_mode: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if tui_mode {
        std::fs::create_dir_all(config.data_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
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
