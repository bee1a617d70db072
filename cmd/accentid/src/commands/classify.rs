use std::path::PathBuf;

use clap::Args;

use super::{open, output_result, print_verbose};
use crate::Cli;

/// Classify the accent of a WAV clip.
///
/// Prints the best matching class, its confidence (best similarity x 100)
/// and the cosine similarity to every configured class.
#[derive(Args)]
pub struct ClassifyCommand {
    /// WAV file to classify
    wav: PathBuf,
}

impl ClassifyCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let id = open(cli)?;
        print_verbose(cli, &format!("pipeline: {}", id.pipeline().tag()));

        let result = id.classify_wav(&self.wav)?;
        print_verbose(
            cli,
            &format!("{}: {} ({:.1}%)", self.wav.display(), result.best, result.confidence),
        );
        output_result(&result, cli.output.as_deref(), cli.json)
    }
}
