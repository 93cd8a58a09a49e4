//! Capability implementations: converters and compressors.
//!
//! A capability is one transformation bound to one declared extension:
//!
//! | Kind         | Input dialect  | Output dialect           | Stage |
//! |--------------|----------------|--------------------------|-------|
//! | `Converter`  | `extension()`  | `target()` (different)   | 1     |
//! | `Compressor` | `extension()`  | same extension, smaller  | 2     |
//!
//! Implementations hold no per-call state and must be `Send + Sync`, so a
//! single registered instance can serve many assets in parallel.
//!
//! Built-in implementations:
//! - [`scss`]: `.scss` / `.sass` → `.css` (grass)
//! - [`css`]: `.css` minification (lightningcss)
//! - [`js`]: `.js` minification (oxc)
//! - [`command`]: external programs declared in `assetline.toml`

pub mod command;
pub mod css;
mod extension;
pub mod js;
pub mod scss;

use std::fmt;

use thiserror::Error;

pub use extension::{Extension, ExtensionError};

/// Role a capability plays in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Converter,
    Compressor,
}

impl CapabilityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Converter => "converter",
            Self::Compressor => "compressor",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capability could not process its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{capability}: {message}")]
pub struct TransformError {
    /// Name of the failing implementation.
    pub capability: String,
    /// Underlying diagnostic.
    pub message: String,
}

impl TransformError {
    pub fn new(capability: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            message: message.into(),
        }
    }
}

/// Stage 1: rewrite content from one dialect into another.
pub trait Converter: Send + Sync {
    /// Name used in listings and error messages.
    fn name(&self) -> &str;

    /// Extension this converter accepts.
    fn extension(&self) -> &Extension;

    /// Extension of the produced content. Fixed per implementation.
    fn target(&self) -> &Extension;

    fn convert(&self, content: &[u8]) -> Result<Vec<u8>, TransformError>;
}

/// Stage 2: shrink content without changing its dialect.
///
/// Running a compressor on its own output must yield valid output again.
pub trait Compressor: Send + Sync {
    fn name(&self) -> &str;

    fn extension(&self) -> &Extension;

    fn compress(&self, content: &[u8]) -> Result<Vec<u8>, TransformError>;
}

/// Decode UTF-8 input for text-based capabilities.
pub(crate) fn utf8<'a>(capability: &str, content: &'a [u8]) -> Result<&'a str, TransformError> {
    std::str::from_utf8(content)
        .map_err(|e| TransformError::new(capability, format!("input is not valid UTF-8: {e}")))
}
