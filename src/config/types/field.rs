//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path to a config field, e.g. `pipeline.on_compress_error`.
///
/// Array tables get an index: `converter[1].extension`.
///
/// # Example
///
/// ```ignore
/// diag.error(PipelineConfig::ON_COMPRESS_ERROR, "unknown policy");
/// diag.error(FieldPath::indexed("converter", 1, "command"), "empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path to a field inside an array-of-tables entry.
    pub fn indexed(section: &str, index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("{section}[{index}].{field}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
