//! CSS minification with lightningcss.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

use super::{Compressor, Extension, TransformError, utf8};

const NAME: &str = "css";

/// Minifies `.css` through lightningcss's printer.
#[derive(Debug, Clone)]
pub struct CssCompressor {
    extension: Extension,
}

impl CssCompressor {
    pub fn new() -> Self {
        Self {
            extension: Extension::known(".css"),
        }
    }
}

impl Default for CssCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, TransformError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| TransformError::new(NAME, e.to_string()))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| TransformError::new(NAME, e.to_string()))?;
    Ok(result.code)
}

impl Compressor for CssCompressor {
    fn name(&self) -> &str {
        NAME
    }

    fn extension(&self) -> &Extension {
        &self.extension
    }

    fn compress(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        let source = utf8(NAME, content)?;
        minify_css(source).map(String::into_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_strips_whitespace() {
        let out = minify_css("body {\n  color: red;\n}\n").unwrap();
        assert_eq!(out, "body{color:red}");
    }

    #[test]
    fn test_minify_is_rerunnable() {
        let source = "a:hover { color: #ff0000; margin: 0px 0px 0px 0px; }\n/* note */\n";
        let once = minify_css(source).unwrap();
        let twice = minify_css(&once).unwrap();
        assert_eq!(once, twice);
        assert!(once.len() < source.len());
    }

    #[test]
    fn test_compress_bytes() {
        let out = CssCompressor::new().compress(b"p { margin: 0; }").unwrap();
        assert_eq!(out, b"p{margin:0}");
    }

    #[test]
    fn test_compress_rejects_binary() {
        let err = CssCompressor::new().compress(&[0xff, 0x00]).unwrap_err();
        assert_eq!(err.capability, "css");
    }
}
