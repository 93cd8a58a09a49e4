//! Two-stage asset pipeline: convert, then compress.
//!
//! # Flow
//!
//! ```text
//! Asset(.scss) ──find_converter(.scss)──▶ convert ──▶ Asset(.css)
//!              (none: unchanged)                          │
//!                                                         ▼
//!              ──find_compressor(.css)──▶ compress ──▶ Asset(.css)
//!              (none: unchanged)
//! ```
//!
//! - Conversion always runs before compression, and the compressor lookup
//!   uses the *converted* extension.
//! - At most one converter and one compressor run per asset.
//! - A missing capability is a pass-through, not an error.
//! - A failing capability ends the asset's run with a [`PipelineError`].
//!   Compression failures carry the converted content so the caller can
//!   choose to write it anyway.
//!
//! The orchestrator holds the registry behind an `Arc` and no other state,
//! so one `Pipeline` can process any number of assets from any thread.

mod asset;
mod error;

use std::sync::Arc;

use rayon::prelude::*;

use crate::registry::Registry;

pub use asset::{Asset, AssetState};
pub use error::{PipelineError, Stage};

/// Runs assets through the registered converters and compressors.
#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: Arc<Registry>,
    compress: bool,
}

impl Pipeline {
    /// Pipeline over a fully populated registry.
    pub fn new(registry: Registry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    /// Pipeline sharing an existing registry.
    pub fn from_shared(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            compress: true,
        }
    }

    /// Skip stage 2 entirely. Conversion is unaffected.
    pub fn without_compression(mut self) -> Self {
        self.compress = false;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run one asset through both stages.
    pub fn process(&self, mut asset: Asset) -> Result<Asset, PipelineError> {
        // Stage 1: convert
        match self.registry.find_converter(asset.extension()) {
            Some(converter) => {
                crate::debug!(
                    "convert";
                    "{}: {} -> {} via `{}`",
                    asset.name(),
                    asset.extension(),
                    converter.target(),
                    converter.name()
                );
                let converted = converter.convert(asset.content()).map_err(|source| {
                    PipelineError::ConversionFailed {
                        asset: asset.name().to_string(),
                        extension: asset.extension().clone(),
                        source,
                    }
                })?;
                asset.apply_conversion(converted, converter.target().clone());
            }
            None => {
                crate::debug!("convert"; "{}: no converter for {}", asset.name(), asset.extension());
            }
        }

        if !self.compress {
            return Ok(asset);
        }

        // Stage 2: compress, keyed by the extension stage 1 produced
        match self.registry.find_compressor(asset.extension()) {
            Some(compressor) => match compressor.compress(asset.content()) {
                Ok(compressed) => {
                    crate::debug!(
                        "compress";
                        "{}: {} -> {} bytes via `{}`",
                        asset.name(),
                        asset.content().len(),
                        compressed.len(),
                        compressor.name()
                    );
                    asset.apply_compression(compressed);
                }
                Err(source) => {
                    return Err(PipelineError::CompressionFailed {
                        source,
                        partial: Box::new(asset),
                    });
                }
            },
            None => {
                crate::debug!("compress"; "{}: no compressor for {}", asset.name(), asset.extension());
            }
        }

        Ok(asset)
    }

    /// Process many assets in parallel.
    ///
    /// Returns one result per input, in input order. A failure only affects
    /// its own asset.
    pub fn process_all(&self, assets: Vec<Asset>) -> Vec<Result<Asset, PipelineError>> {
        assets
            .into_par_iter()
            .map(|asset| self.process(asset))
            .collect()
    }
}

#[cfg(test)]
mod tests;
