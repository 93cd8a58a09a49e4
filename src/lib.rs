//! Assetline - a pluggable two-stage asset pipeline.
//!
//! Assets are converted from a source dialect (`.scss`) into a target one
//! (`.css`), then compressed within that dialect. Both stages are looked up
//! by extension in a [`Registry`] filled once at startup.
//!
//! ```ignore
//! use assetline::{Asset, Extension, Pipeline, registry};
//!
//! let pipeline = Pipeline::new(registry::builtin(&config)?);
//! let asset = Asset::new("main.scss", Extension::new(".scss")?, "body { color: red; }");
//! let out = pipeline.process(asset)?;
//! assert_eq!(out.content(), b"body{color:red}");
//! ```

pub mod capability;
pub mod cli;
pub mod config;
pub mod logger;
pub mod pipeline;
pub mod registry;
pub mod utils;

pub use capability::{
    CapabilityKind, Compressor, Converter, Extension, ExtensionError, TransformError,
};
pub use pipeline::{Asset, AssetState, Pipeline, PipelineError, Stage};
pub use registry::{CapabilityInfo, DuplicateCapabilityError, Registry, RegistryError};
