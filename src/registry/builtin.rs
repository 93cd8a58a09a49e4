//! Startup registration.
//!
//! Builds the registry from configuration in a fixed order:
//!
//! 1. built-in converters (`scss`, `sass`)
//! 2. `[[converter]]` entries, in file order
//! 3. built-in compressors (`css`, `js`)
//! 4. `[[compressor]]` entries, in file order
//!
//! The first conflicting registration aborts startup.

use crate::capability::command::{CommandCompressor, CommandConverter};
use crate::capability::css::CssCompressor;
use crate::capability::js::JsCompressor;
use crate::capability::scss::SassConverter;
use crate::capability::Extension;
use crate::config::AssetlineConfig;

use super::{Registry, RegistryError};

/// Construct the registry for `config`.
pub fn builtin(config: &AssetlineConfig) -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    let builtin = &config.builtin;

    if builtin.scss {
        registry.register_converter(SassConverter::scss())?;
    }
    if builtin.sass {
        registry.register_converter(SassConverter::sass())?;
    }

    for entry in &config.converters {
        let extension = parse_extension(&entry.name, &entry.extension)?;
        let target = parse_extension(&entry.name, &entry.target)?;
        let converter =
            CommandConverter::new(&entry.name, extension, target, entry.command.clone())
                .with_cwd(&config.root);
        registry.register_converter(converter)?;
    }

    if builtin.css {
        registry.register_compressor(CssCompressor::new())?;
    }
    if builtin.js {
        registry.register_compressor(JsCompressor::new())?;
    }

    for entry in &config.compressors {
        let extension = parse_extension(&entry.name, &entry.extension)?;
        let compressor = CommandCompressor::new(&entry.name, extension, entry.command.clone())
            .with_cwd(&config.root);
        registry.register_compressor(compressor)?;
    }

    crate::debug!("registry"; "{} capabilities registered", registry.len());
    Ok(registry)
}

fn parse_extension(name: &str, raw: &str) -> Result<Extension, RegistryError> {
    Extension::new(raw).map_err(|source| RegistryError::InvalidExtension {
        name: name.to_string(),
        source,
    })
}
