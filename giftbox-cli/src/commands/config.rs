use crate::config::CliConfig;
use clap::Subcommand;
use giftbox_core::LotteryConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as JSON
    Show,
    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_config_command(cmd: ConfigCommands, cli: &CliConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = cli.load_lottery()?;
            println!("# {}", cli.config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        ConfigCommands::Init { force } => {
            if cli.config_path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    cli.config_path.display()
                );
            }

            LotteryConfig::default().save(&cli.config_path)?;
            println!("Wrote default config to {}", cli.config_path.display());
        }
    }

    Ok(())
}
