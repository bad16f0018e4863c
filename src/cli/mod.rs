//! Command-line interface module.

mod args;
pub mod generate;
pub mod init;
pub mod plan;

pub use args::{Cli, Commands, RunArgs};
