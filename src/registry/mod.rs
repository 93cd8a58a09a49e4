//! Capability registry: extension → converter / compressor.
//!
//! The registry is filled once at startup and read-only afterwards, so it can
//! be shared across worker threads without locking.
//!
//! # Duplicate policy
//!
//! At most one converter and one compressor per extension. A second
//! registration for the same `(kind, extension)` is rejected with
//! [`DuplicateCapabilityError`] and the registry keeps the first entry.
//! To replace a built-in, disable it in `[builtin]` first.
//!
//! Lookups are exact and case-sensitive on the extension string,
//! including its leading dot.

mod builtin;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::capability::{
    CapabilityKind, Compressor, Converter, Extension, ExtensionError,
};

pub use builtin::builtin;

/// Two capabilities of the same kind claimed the same extension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate {kind} for `{extension}`: `{incoming}` conflicts with `{existing}`")]
pub struct DuplicateCapabilityError {
    pub kind: CapabilityKind,
    pub extension: Extension,
    /// Name of the capability already registered.
    pub existing: String,
    /// Name of the rejected capability.
    pub incoming: String,
}

/// Registry misconfiguration, fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateCapabilityError),

    #[error("converter `{name}` targets its own extension `{extension}`")]
    SelfTarget { name: String, extension: Extension },

    #[error("capability `{name}`: {source}")]
    InvalidExtension {
        name: String,
        #[source]
        source: ExtensionError,
    },
}

/// One registered capability, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityInfo {
    pub kind: CapabilityKind,
    pub extension: Extension,
    /// Output extension (converters only).
    pub target: Option<Extension>,
    pub name: String,
}

/// Known converters and compressors, keyed by handled extension.
#[derive(Default)]
pub struct Registry {
    converters: FxHashMap<Extension, Box<dyn Converter>>,
    compressors: FxHashMap<Extension, Box<dyn Compressor>>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter under its declared extension.
    pub fn register_converter<C: Converter + 'static>(
        &mut self,
        converter: C,
    ) -> Result<(), RegistryError> {
        let extension = converter.extension().clone();
        if converter.target() == &extension {
            return Err(RegistryError::SelfTarget {
                name: converter.name().to_string(),
                extension,
            });
        }
        if let Some(existing) = self.converters.get(&extension) {
            return Err(DuplicateCapabilityError {
                kind: CapabilityKind::Converter,
                extension,
                existing: existing.name().to_string(),
                incoming: converter.name().to_string(),
            }
            .into());
        }

        crate::debug!(
            "registry";
            "converter `{}`: {} -> {}",
            converter.name(),
            extension,
            converter.target()
        );
        self.converters.insert(extension, Box::new(converter));
        Ok(())
    }

    /// Register a compressor under its declared extension.
    pub fn register_compressor<C: Compressor + 'static>(
        &mut self,
        compressor: C,
    ) -> Result<(), RegistryError> {
        let extension = compressor.extension().clone();
        if let Some(existing) = self.compressors.get(&extension) {
            return Err(DuplicateCapabilityError {
                kind: CapabilityKind::Compressor,
                extension,
                existing: existing.name().to_string(),
                incoming: compressor.name().to_string(),
            }
            .into());
        }

        crate::debug!("registry"; "compressor `{}`: {}", compressor.name(), extension);
        self.compressors.insert(extension, Box::new(compressor));
        Ok(())
    }

    /// Converter handling `extension`, if any.
    #[inline]
    pub fn find_converter(&self, extension: &Extension) -> Option<&dyn Converter> {
        self.converters.get(extension).map(Box::as_ref)
    }

    /// Compressor handling `extension`, if any.
    #[inline]
    pub fn find_compressor(&self, extension: &Extension) -> Option<&dyn Compressor> {
        self.compressors.get(extension).map(Box::as_ref)
    }

    /// Number of registered capabilities of both kinds.
    pub fn len(&self) -> usize {
        self.converters.len() + self.compressors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty() && self.compressors.is_empty()
    }

    /// Registered converters, sorted by extension.
    pub fn converters(&self) -> Vec<&dyn Converter> {
        let mut all: Vec<_> = self.converters.values().map(Box::as_ref).collect();
        all.sort_by(|a, b| a.extension().cmp(b.extension()));
        all
    }

    /// Registered compressors, sorted by extension.
    pub fn compressors(&self) -> Vec<&dyn Compressor> {
        let mut all: Vec<_> = self.compressors.values().map(Box::as_ref).collect();
        all.sort_by(|a, b| a.extension().cmp(b.extension()));
        all
    }

    /// All registered capabilities, sorted by extension then kind.
    pub fn capabilities(&self) -> Vec<CapabilityInfo> {
        let converters = self.converters().into_iter().map(|c| CapabilityInfo {
            kind: CapabilityKind::Converter,
            extension: c.extension().clone(),
            target: Some(c.target().clone()),
            name: c.name().to_string(),
        });
        let compressors = self.compressors().into_iter().map(|c| CapabilityInfo {
            kind: CapabilityKind::Compressor,
            extension: c.extension().clone(),
            target: None,
            name: c.name().to_string(),
        });

        let mut all: Vec<_> = converters.chain(compressors).collect();
        // stable: converters stay ahead of compressors on the same extension
        all.sort_by(|a, b| a.extension.cmp(&b.extension));
        all
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.capabilities()).finish()
    }
}
