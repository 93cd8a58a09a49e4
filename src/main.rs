//! Assetline command-line entry point.

use anyhow::Result;
use assetline::cli::{self, Cli, Commands};
use assetline::config::AssetlineConfig;
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = AssetlineConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { build_args } => cli::build::run(&config, build_args),
        Commands::List => cli::list::run(&config),
        Commands::Check => cli::check::run(&config),
    }
}
