//! Pipeline-level errors: a `TransformError` plus stage context.

use std::fmt;

use thiserror::Error;

use crate::capability::{Extension, TransformError};

use super::Asset;

/// Pipeline stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Convert,
    Compress,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Convert => "convert",
            Self::Compress => "compress",
        })
    }
}

/// An asset's pipeline run failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Stage 1 failed; no compressor ran.
    #[error("`{asset}` ({extension}): conversion failed")]
    ConversionFailed {
        asset: String,
        extension: Extension,
        #[source]
        source: TransformError,
    },

    /// Stage 2 failed. `partial` holds the converted-but-uncompressed asset.
    #[error("`{asset}` ({extension}): compression failed", asset = .partial.name(), extension = .partial.extension())]
    CompressionFailed {
        #[source]
        source: TransformError,
        partial: Box<Asset>,
    },
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::ConversionFailed { .. } => Stage::Convert,
            Self::CompressionFailed { .. } => Stage::Compress,
        }
    }

    /// Name of the failing asset.
    pub fn asset(&self) -> &str {
        match self {
            Self::ConversionFailed { asset, .. } => asset,
            Self::CompressionFailed { partial, .. } => partial.name(),
        }
    }

    /// Underlying capability failure.
    pub fn transform_error(&self) -> &TransformError {
        match self {
            Self::ConversionFailed { source, .. } | Self::CompressionFailed { source, .. } => {
                source
            }
        }
    }

    /// Converted-but-uncompressed asset, for callers that fall back on
    /// compression failure. `None` for conversion failures.
    pub fn into_partial(self) -> Option<Asset> {
        match self {
            Self::ConversionFailed { .. } => None,
            Self::CompressionFailed { partial, .. } => Some(*partial),
        }
    }
}
