use std::path::Path;

use accentid::Manifest;
use clap::Args;

use super::{open, output_result, print_success, print_warning, require_input_file};
use crate::Cli;

/// Build references for every class listed in a manifest.
///
/// The manifest (-f) maps class names to sample clips:
///
///   american: samples/american.wav
///   british: samples/british.wav
///
/// Relative paths are resolved against the manifest's directory. A failing
/// entry is reported and the rest are still built.
#[derive(Args)]
pub struct SeedCommand {}

impl SeedCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let manifest = Manifest::load(Path::new(require_input_file(cli)?))?;
        let id = open(cli)?;

        let report = id.seed(&manifest);
        output_result(&report, cli.output.as_deref(), cli.json)?;

        if report.is_success() {
            print_success(&format!("{} references built", report.built()));
            Ok(())
        } else {
            print_warning(&format!(
                "{} of {} references failed",
                report.failed(),
                report.entries.len()
            ));
            anyhow::bail!("seeding incomplete")
        }
    }
}
