//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CompressFailure;

/// Convert and compress web assets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true, disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: (),

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: assetline.toml, optional)
    #[arg(short = 'C', long, global = true, default_value = "assetline.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Process assets into the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// List registered converters and compressors
    #[command(visible_alias = "l")]
    List,

    /// Validate configuration and capability registration
    #[command(visible_alias = "c")]
    Check,
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Files or directories to process. Directories are not walked recursively.
    #[arg(value_name = "PATH", required = true, value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Insert a content hash into output file names (`style.1a2b3c4d.css`)
    #[arg(short, long)]
    pub fingerprint: bool,

    /// Skip the compression stage
    #[arg(long)]
    pub no_compress: bool,

    /// What to do when a compressor fails
    #[arg(long, value_enum)]
    pub on_compress_error: Option<CompressFailure>,
}
