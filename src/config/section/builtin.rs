//! `[builtin]` section configuration.
//!
//! Toggles for the capabilities shipped with assetline. Disable one to
//! register a `[[converter]]` or `[[compressor]]` for the same extension.
//!
//! # Example
//!
//! ```toml
//! [builtin]
//! scss = true   # .scss -> .css (grass)
//! sass = true   # .sass -> .css (grass)
//! css = true    # .css minification (lightningcss)
//! js = true     # .js minification (oxc)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinConfig {
    pub scss: bool,
    pub sass: bool,
    pub css: bool,
    pub js: bool,
}

impl Default for BuiltinConfig {
    fn default() -> Self {
        Self {
            scss: true,
            sass: true,
            css: true,
            js: true,
        }
    }
}
