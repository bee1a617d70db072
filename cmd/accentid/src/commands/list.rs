use clap::Args;

use super::{open, output_result, print_warning};
use crate::Cli;

/// List stored references with their model tag and dimension.
///
/// Marks references that belong to no configured class or that were built
/// with a different model or preprocessing than the current configuration.
#[derive(Args)]
pub struct ListCommand {}

impl ListCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let id = open(cli)?;
        let refs = id.list_references()?;

        for class in id.classifier().classes() {
            if !refs.iter().any(|r| r.class == class.as_str()) {
                print_warning(&format!("no reference for configured class \"{}\"", class));
            }
        }
        for r in refs.iter().filter(|r| !r.compatible) {
            print_warning(&format!(
                "reference \"{}\" was built with {}, rebuild it",
                r.class, r.tag
            ));
        }

        output_result(&refs, cli.output.as_deref(), cli.json)
    }
}
