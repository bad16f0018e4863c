//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_NAME;
use crate::freshness::GatePolicy;

/// Generate density-scaled variants of image assets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CONFIG_NAME, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Log every generated and skipped asset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default densify.toml and create the source directory
    #[command(visible_alias = "i")]
    Init,

    /// Generate variants for every new or changed asset
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: RunArgs,

        /// Delete the destination directory before generating
        #[arg(short, long)]
        clean: bool,
    },

    /// Print the outputs a run would produce as JSON, without writing
    #[command(visible_alias = "p")]
    Plan {
        #[command(flatten)]
        args: RunArgs,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Overrides shared by `generate` and `plan`.
///
/// Every flag falls back to `densify.toml`, then to the built-in default.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Source directory with the original assets
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub src: Option<PathBuf>,

    /// Destination directory for generated variants
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub dest: Option<PathBuf>,

    /// Pixel width of the base (1.0x) variant
    #[arg(short = 'w', long)]
    pub base_width: Option<u32>,

    /// Comma-separated density scales, e.g. `2,3,4`
    #[arg(long, value_name = "LIST")]
    pub scales: Option<String>,

    /// Which outputs decide whether a raster is up to date
    #[arg(long, value_enum)]
    pub gate: Option<GatePolicy>,

    /// Worker threads (0 = one per CPU core)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    pub quality: Option<u8>,
}

impl Cli {
    /// Run overrides for commands that load a config.
    pub const fn run_args(&self) -> Option<&RunArgs> {
        match &self.command {
            Commands::Generate { args, .. } | Commands::Plan { args, .. } => Some(args),
            Commands::Init => None,
        }
    }
}
