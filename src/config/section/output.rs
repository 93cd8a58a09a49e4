//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "_site/assets"   # Output directory (relative to config file)
//! fingerprint = false       # Insert content hash: style.1a2b3c4d.css
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory for processed assets.
    pub output: PathBuf,
    /// Add a content fingerprint to output file names.
    pub fingerprint: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "_site/assets".into(),
            fingerprint: false,
        }
    }
}

impl BuildConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::OUTPUT,
                "output directory is empty",
                "set a directory such as \"_site/assets\"",
            );
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
        assert_eq!(config.build.output, PathBuf::from("_site/assets"));
        assert!(!config.build.fingerprint);
    }

    #[test]
    fn test_empty_output_is_error() {
        let config = test_parse_config("[build]\noutput = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
