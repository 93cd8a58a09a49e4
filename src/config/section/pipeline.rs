//! `[pipeline]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [pipeline]
//! compress = true               # Run stage 2 (compressors)
//! on_compress_error = "abort"   # abort | fallback
//! ```

use serde::{Deserialize, Serialize};

/// What the build does when a compressor fails.
///
/// The pipeline always reports the failure; this only decides whether the
/// converted-but-uncompressed content is written anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressFailure {
    /// Treat the asset as failed; nothing is written.
    #[default]
    Abort,
    /// Write the uncompressed content and log a warning.
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run compressors after conversion.
    pub compress: bool,
    /// Compression failure policy.
    pub on_compress_error: CompressFailure,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            compress: true,
            on_compress_error: CompressFailure::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.pipeline.compress);
        assert_eq!(config.pipeline.on_compress_error, CompressFailure::Abort);
    }

    #[test]
    fn test_fallback_policy() {
        let config = test_parse_config("[pipeline]\non_compress_error = \"fallback\"");
        assert_eq!(config.pipeline.on_compress_error, CompressFailure::Fallback);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = crate::config::AssetlineConfig::parse(
            "[pipeline]\non_compress_error = \"ignore\"",
        );
        assert!(err.is_err());
    }
}
