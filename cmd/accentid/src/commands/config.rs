//! Configuration management commands.

use clap::{Args, Subcommand};

use super::{config_path, get_config, output_result, print_success};
use crate::Cli;

/// Manage configuration.
///
/// Configuration is stored in ~/.accentid/config.yaml unless --config is
/// given. Global flags (--store, --model) override the file.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    #[command(alias = "view")]
    Show,
    /// Print the config file path
    Path,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::Init { force } => {
                let path = config_path(cli)?;
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists, use --force to overwrite",
                        path.display()
                    );
                }
                let cfg = get_config(cli)?;
                cfg.save(&path)?;
                print_success(&format!("Config written to {}", path.display()));
                Ok(())
            }

            ConfigSubcommand::Show => {
                let cfg = get_config(cli)?;
                output_result(&cfg, cli.output.as_deref(), cli.json)
            }

            ConfigSubcommand::Path => {
                println!("{}", config_path(cli)?.display());
                Ok(())
            }
        }
    }
}
