mod commands;
mod config;
mod render;

use clap::{Parser, Subcommand};
use config::CliConfig;
use giftbox_core::GiftboxError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "giftbox")]
#[command(about = "Gift box lottery - open one box, win one prize")]
#[command(version)]
struct Cli {
    /// Path to the lottery config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Seed for reproducible shuffles
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactive rounds
    Play {
        /// Number of boxes on the board (defaults to the prize count)
        #[arg(short, long)]
        boxes: Option<usize>,
        /// How confetti bursts are rendered
        #[arg(short, long, value_enum, default_value = "terminal")]
        effect: commands::EffectKind,
    },
    /// List the configured prize pool
    Prizes,
    /// Measure how evenly the shuffle spreads prizes across boxes
    Odds {
        /// Number of shuffles to run
        #[arg(short, long, default_value_t = 100_000)]
        trials: u64,
    },
    /// Configuration commands
    #[command(subcommand)]
    Config(commands::ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cli_config = CliConfig::new(cli.config, cli.verbose);

    // Initialize logging
    let log_level = if cli_config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "giftbox={},giftbox_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = run(cli.command, &cli_config, rng).await;

    if let Err(e) = result {
        match e.downcast_ref::<GiftboxError>() {
            Some(GiftboxError::CardinalityMismatch { boxes, prizes }) => {
                eprintln!("Error: {} boxes cannot hold {} prizes", boxes, prizes);
                eprintln!("Use '--boxes {}' or edit the prize list in your config", prizes);
            }
            Some(GiftboxError::Config(msg)) => {
                eprintln!("Error: Invalid configuration: {}", msg);
                eprintln!("Use 'giftbox config init --force' to restore the defaults");
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Commands, cli_config: &CliConfig, mut rng: StdRng) -> anyhow::Result<()> {
    match command {
        Commands::Play { boxes, effect } => {
            commands::play(cli_config.load_lottery()?, boxes, effect, rng).await
        }
        Commands::Prizes => commands::list_prizes(&cli_config.load_lottery()?),
        Commands::Odds { trials } => {
            commands::show_odds(&cli_config.load_lottery()?, trials, &mut rng)
        }
        Commands::Config(cmd) => commands::handle_config_command(cmd, cli_config),
    }
}
