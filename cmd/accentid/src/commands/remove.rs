use clap::Args;

use super::{open, print_success, print_warning};
use crate::Cli;

/// Delete the stored reference for a class.
#[derive(Args)]
pub struct RemoveCommand {
    /// Accent class
    class: String,
}

impl RemoveCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let id = open(cli)?;
        if id.remove_reference(&self.class)? {
            print_success(&format!("Reference \"{}\" removed", self.class));
        } else {
            print_warning(&format!("No reference stored for \"{}\"", self.class));
        }
        Ok(())
    }
}
