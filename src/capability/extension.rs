//! File extension newtype used as the registry key.
//!
//! An extension always carries its leading separator (`.scss`, not `scss`)
//! and is compared exactly, byte for byte. `.SCSS` and `.scss` are different
//! keys.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Reasons an extension string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    #[error("extension is empty")]
    Empty,

    #[error("extension `{0}` must start with `.`")]
    MissingDot(String),

    #[error("extension `{0}` has nothing after the `.`")]
    DotOnly(String),

    #[error("extension `{0}` contains a path separator or whitespace")]
    InvalidChar(String),
}

/// A validated file extension such as `.css`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Extension(String);

impl Extension {
    /// Validate and wrap an extension string.
    pub fn new(ext: impl Into<String>) -> Result<Self, ExtensionError> {
        let ext = ext.into();
        if ext.is_empty() {
            return Err(ExtensionError::Empty);
        }
        if !ext.starts_with('.') {
            return Err(ExtensionError::MissingDot(ext));
        }
        if ext.len() == 1 {
            return Err(ExtensionError::DotOnly(ext));
        }
        if ext
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
        {
            return Err(ExtensionError::InvalidChar(ext));
        }
        Ok(Self(ext))
    }

    /// Wrap a literal known to be valid (built-in capability declarations).
    pub(crate) fn known(ext: &'static str) -> Self {
        debug_assert!(Self::new(ext).is_ok(), "invalid built-in extension {ext}");
        Self(ext.to_owned())
    }

    /// Extension of a path, with the leading dot (`style.scss` → `.scss`).
    ///
    /// Only the last component counts: `app.min.js` → `.js`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::new(format!(".{ext}")).ok()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Extension {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Extension {
    type Error = ExtensionError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for Extension {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Extension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
