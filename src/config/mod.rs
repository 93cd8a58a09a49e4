//! Configuration management for `assetline.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── builtin    # [builtin]
//! │   ├── external   # [[converter]], [[compressor]]
//! │   ├── output     # [build]
//! │   └── pipeline   # [pipeline]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # AssetlineConfig (this file)
//! ```
//!
//! The config file is optional: without one, every section takes its
//! defaults and the project root is the current directory.

pub mod section;
pub mod types;
mod util;

pub use section::{
    BuildConfig, BuiltinConfig, CompressFailure, CompressorEntry, ConverterEntry, PipelineConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::{BuildArgs, Cli, Commands};
use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::{find_config_file, resolve_under};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assetline.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetlineConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Stage toggles and failure policy
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Output settings for the build command
    #[serde(default)]
    pub build: BuildConfig,

    /// Built-in capability toggles
    #[serde(default)]
    pub builtin: BuiltinConfig,

    /// Command-backed converters
    #[serde(default, rename = "converter")]
    pub converters: Vec<ConverterEntry>,

    /// Command-backed compressors
    #[serde(default, rename = "compressor")]
    pub compressors: Vec<CompressorEntry>,
}

impl AssetlineConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// Searches upward from cwd for the config file. A missing file is not
    /// an error; defaults apply and the root is cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.clone());
                config.config_path = Some(path);
                config
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        config.build.output = resolve_under(&config.build.output, &config.root);
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::List | Commands::Check => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        if let Some(output) = &args.output {
            self.build.output = output.clone();
        }
        if args.fingerprint {
            self.build.fingerprint = true;
        }
        if args.no_compress {
            self.pipeline.compress = false;
        }
        Self::update_option(
            &mut self.pipeline.on_compress_error,
            args.on_compress_error.as_ref(),
        );
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole configuration.
    ///
    /// Collects all validation errors and returns them at once; warnings are
    /// printed immediately.
    pub fn validate(&self) -> Result<()> {
        let diag = self.diagnostics();
        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Run every section validator.
    pub fn diagnostics(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        for (i, entry) in self.converters.iter().enumerate() {
            entry.validate(i, &mut diag);
        }
        for (i, entry) in self.compressors.iter().enumerate() {
            entry.validate(i, &mut diag);
        }
        diag
    }
}

#[cfg(test)]
pub fn test_parse_config(extra: &str) -> AssetlineConfig {
    let (parsed, ignored) = AssetlineConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("assetline.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = AssetlineConfig::parse("").unwrap();
        assert!(config.converters.is_empty());
        assert!(config.compressors.is_empty());
        assert!(config.pipeline.compress);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            AssetlineConfig::parse_with_ignored("[build]\nfingerprnt = true\n").unwrap();
        assert_eq!(ignored, vec!["build.fingerprnt".to_string()]);
    }

    #[test]
    fn test_update_option() {
        let mut policy = CompressFailure::Abort;
        AssetlineConfig::update_option(&mut policy, Some(&CompressFailure::Fallback));
        assert_eq!(policy, CompressFailure::Fallback);
        AssetlineConfig::update_option(&mut policy, None);
        assert_eq!(policy, CompressFailure::Fallback);
    }

    #[test]
    fn test_diagnostics_cover_entries() {
        let config = test_parse_config(
            r#"
[[compressor]]
name = "bad"
extension = "svg"
command = ["assetline-no-such-program"]
"#,
        );
        let diag = config.diagnostics();
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_cli_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[pipeline]
compress = true
on_compress_error = "abort"

[build]
fingerprint = false
"#,
        );

        let cli = Cli::parse_from([
            "assetline",
            "-C",
            path.to_str().unwrap(),
            "build",
            "x",
            "--no-compress",
            "--fingerprint",
            "--on-compress-error",
            "fallback",
            "-o",
            "public",
        ]);
        let config = AssetlineConfig::load(&cli).unwrap();

        assert!(!config.pipeline.compress);
        assert!(config.build.fingerprint);
        assert_eq!(config.pipeline.on_compress_error, CompressFailure::Fallback);
        assert_eq!(config.root, dir.path());
        assert_eq!(config.build.output, dir.path().join("public"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_file_values_kept_without_flags() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[pipeline]
compress = false
on_compress_error = "fallback"

[build]
output = "dist"
fingerprint = true
"#,
        );

        let cli = Cli::parse_from(["assetline", "-C", path.to_str().unwrap(), "build", "x"]);
        let config = AssetlineConfig::load(&cli).unwrap();

        assert!(!config.pipeline.compress);
        assert!(config.build.fingerprint);
        assert_eq!(config.pipeline.on_compress_error, CompressFailure::Fallback);
        assert_eq!(config.build.output, dir.path().join("dist"));
    }

    #[test]
    fn test_missing_config_uses_defaults_in_cwd() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("assetline.toml");

        let cli = Cli::parse_from(["assetline", "-C", missing.to_str().unwrap(), "list"]);
        let config = AssetlineConfig::load(&cli).unwrap();

        let cwd = std::env::current_dir().unwrap();
        assert!(config.config_path.is_none());
        assert_eq!(config.root, cwd);
        assert!(config.pipeline.compress);
        assert!(!config.build.fingerprint);
        assert_eq!(config.pipeline.on_compress_error, CompressFailure::Abort);
        assert_eq!(config.build.output, cwd.join("_site/assets"));
    }
}
