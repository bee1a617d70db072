//! CLI commands module.

mod build;
mod classify;
mod config;
mod list;
mod remove;
mod seed;
mod util;

pub use build::BuildCommand;
pub use classify::ClassifyCommand;
pub use config::ConfigCommand;
pub use list::ListCommand;
pub use remove::RemoveCommand;
pub use seed::SeedCommand;

pub(crate) use util::*;
