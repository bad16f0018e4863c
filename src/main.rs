//! densify - density-scaled asset variants for multi-density UI frameworks.

mod asset;
mod cli;
mod config;
mod core;
mod freshness;
mod logger;
mod pipeline;
mod raster;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init => {
            let cwd = std::env::current_dir().context("failed to get current working directory")?;
            cli::init::init_project(&cwd, &cli.config)
        }
        Commands::Generate { clean, .. } => {
            let config = Config::load(&cli)?;
            let report = cli::generate::generate(&config, *clean)?;
            if report.has_failures() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Plan { pretty, .. } => {
            let config = Config::load(&cli)?;
            cli::plan::print_plan(&config, *pretty)
        }
    }
}
