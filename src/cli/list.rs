//! Capability listing command.

use anyhow::{Context, Result};

use crate::{config::AssetlineConfig, log, registry, registry::CapabilityInfo};

/// Print every registered capability, one per line, sorted by extension.
pub fn run(config: &AssetlineConfig) -> Result<()> {
    let registry = registry::builtin(config).context("Failed to register capabilities")?;

    if registry.is_empty() {
        log!("list"; "no capabilities registered");
        return Ok(());
    }

    for info in registry.capabilities() {
        log!("list"; "{}", format_row(&info));
    }
    Ok(())
}

/// `converter  .scss    -> .css    scss`
fn format_row(info: &CapabilityInfo) -> String {
    let target = info
        .target
        .as_ref()
        .map(|t| format!("-> {t}"))
        .unwrap_or_default();
    format!(
        "{:<10} {:<8} {:<10} {}",
        info.kind.as_str(),
        info.extension.as_str(),
        target,
        info.name
    )
}
