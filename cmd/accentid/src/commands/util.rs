//! Utility functions for CLI commands.

use std::path::PathBuf;

use accentid::{AccentId, Config, ModelKind};
use tracing::debug;

use crate::Cli;

/// Loads the configuration and applies command line overrides.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = cli.config.as_deref().map(PathBuf::from);
    let mut cfg = Config::load(path.as_deref())?;

    if let Some(store) = &cli.store {
        cfg.store_dir = store.clone();
    }
    match cli.model.as_deref() {
        Some("fbank") => cfg.model.kind = ModelKind::Fbank,
        Some(path) => {
            cfg.model.kind = ModelKind::Wav2vec2;
            cfg.model.path = Some(PathBuf::from(path));
        }
        None => {}
    }
    Ok(cfg)
}

/// Config file the CLI reads and writes.
pub fn config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.config {
        Some(p) => Ok(PathBuf::from(p)),
        None => Config::default_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path, use --config")),
    }
}

/// Builds the classifier and builder from the effective configuration.
pub fn open(cli: &Cli) -> anyhow::Result<AccentId> {
    let cfg = get_config(cli)?;
    debug!(
        store = %cfg.store_dir.display(),
        model = ?cfg.model.kind,
        config = cli.config.as_deref().unwrap_or("default"),
        "opening accentid"
    );
    Ok(AccentId::from_config(&cfg)?)
}

/// Requires input file to be provided.
pub fn require_input_file(cli: &Cli) -> anyhow::Result<&str> {
    cli.input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("input file is required, use -f flag"))
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: serde::Serialize>(
    result: &T,
    output_path: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    let output = if as_json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        serde_yaml::to_string(result)?
    };

    match output_path {
        Some(path) => std::fs::write(path, output)?,
        None => print!("{}", output),
    }

    Ok(())
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints error message.
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m✗\x1b[0m {}", msg);
}

/// Prints warning message.
pub fn print_warning(msg: &str) {
    eprintln!("\x1b[33m⚠\x1b[0m {}", msg);
}
