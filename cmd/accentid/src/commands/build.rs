use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::{open, output_result, print_success};
use crate::Cli;

/// Build (or rebuild) the reference embedding for one class.
///
/// The clip goes through the same normalization and model as classify
/// queries. Any existing reference for the class is replaced.
#[derive(Args)]
pub struct BuildCommand {
    /// WAV file with a sample of the accent
    wav: PathBuf,

    /// Accent class (must be configured)
    class: String,
}

#[derive(Serialize)]
struct BuildSummary {
    class: String,
    source: PathBuf,
    tag: String,
    dimension: usize,
}

impl BuildCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let id = open(cli)?;
        let embedding = id.build_reference_wav(&self.wav, &self.class)?;

        let class = self.class.trim().to_lowercase();
        print_success(&format!("Reference for \"{}\" built", class));
        output_result(
            &BuildSummary {
                class,
                source: self.wav.clone(),
                tag: embedding.tag().to_string(),
                dimension: embedding.dimension(),
            },
            cli.output.as_deref(),
            cli.json,
        )
    }
}
