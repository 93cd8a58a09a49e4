//! The unit of content flowing through the pipeline.

use std::fmt;

use crate::capability::Extension;

/// Pipeline progress of an asset.
///
/// ```text
/// Raw ──convert──▶ Converted ──compress──▶ Compressed
///  └─────────────compress─────────────────▶ Compressed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    /// As read from the source.
    Raw,
    /// Stage 1 ran; no compressor has run yet.
    Converted,
    /// Stage 2 ran.
    Compressed,
}

impl fmt::Display for AssetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "raw",
            Self::Converted => "converted",
            Self::Compressed => "compressed",
        })
    }
}

/// Content plus the extension describing its current dialect.
///
/// `extension` always matches `content`: after conversion it is the
/// converter's target, not the source file's extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    name: String,
    extension: Extension,
    content: Vec<u8>,
    converted: bool,
    state: AssetState,
}

impl Asset {
    /// A raw asset. `name` identifies it in logs and errors (usually the
    /// source path).
    pub fn new(name: impl Into<String>, extension: Extension, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            extension,
            content: content.into(),
            converted: false,
            state: AssetState::Raw,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Whether stage 1 replaced the content.
    #[inline]
    pub fn converted(&self) -> bool {
        self.converted
    }

    #[inline]
    pub fn state(&self) -> AssetState {
        self.state
    }

    /// Take the final payload and its extension.
    pub fn into_parts(self) -> (Extension, Vec<u8>) {
        (self.extension, self.content)
    }

    pub(super) fn apply_conversion(&mut self, content: Vec<u8>, target: Extension) {
        self.content = content;
        self.extension = target;
        self.converted = true;
        self.state = AssetState::Converted;
    }

    pub(super) fn apply_compression(&mut self, content: Vec<u8>) {
        self.content = content;
        self.state = AssetState::Compressed;
    }
}
