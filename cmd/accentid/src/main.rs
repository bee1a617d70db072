//! accentid - identify the English accent of a speech clip.

use std::path::PathBuf;
use std::process::ExitCode;

use accentid::AccentError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    BuildCommand, ClassifyCommand, ConfigCommand, ListCommand, RemoveCommand, SeedCommand,
    print_error,
};

/// accentid - English accent identification.
///
/// Classifies a speech clip as the accent whose reference embedding is most
/// similar to the clip's embedding. References are built from sample clips
/// with `build` or `seed` and stored one file per class.
///
/// Configuration is stored in ~/.accentid/config.yaml.
#[derive(Parser)]
#[command(name = "accentid")]
#[command(about = "English accent identification")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.accentid/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Reference directory (overrides store_dir)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// ONNX model file, or "fbank" for the filterbank backend
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Input file (seed manifest)
    #[arg(short = 'f', long = "file", global = true)]
    pub input: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the accent of a WAV clip
    Classify(ClassifyCommand),
    /// Build (or rebuild) the reference for one class
    Build(BuildCommand),
    /// Build references for every class in a manifest
    Seed(SeedCommand),
    /// List stored references
    List(ListCommand),
    /// Delete a stored reference
    Remove(RemoveCommand),
    /// Manage configuration
    Config(ConfigCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Classify(cmd) => cmd.run(&cli),
        Commands::Build(cmd) => cmd.run(&cli),
        Commands::Seed(cmd) => cmd.run(&cli),
        Commands::List(cmd) => cmd.run(&cli),
        Commands::Remove(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AccentError>() {
                Some(ae) => print_error(&format!("{}: {ae}", ae.kind())),
                None => print_error(&format!("{e:#}")),
            }
            ExitCode::FAILURE
        }
    }
}
