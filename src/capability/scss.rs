//! Sass and SCSS conversion to plain CSS.
//!
//! Uses grass, a pure-Rust Sass compiler. Output is expanded CSS; shrinking
//! it is left to the `.css` compressor.

use grass::{InputSyntax, Options, OutputStyle};

use super::{Converter, Extension, TransformError, utf8};

/// Sass dialect accepted by a [`SassConverter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SassSyntax {
    /// Brace syntax, `.scss`.
    Scss,
    /// Indented syntax, `.sass`.
    Indented,
}

/// Compiles `.scss` or `.sass` into `.css`.
#[derive(Debug, Clone)]
pub struct SassConverter {
    syntax: SassSyntax,
    extension: Extension,
    target: Extension,
}

impl SassConverter {
    /// SCSS (brace syntax) converter.
    pub fn scss() -> Self {
        Self::with_syntax(SassSyntax::Scss)
    }

    /// Indented-syntax converter.
    pub fn sass() -> Self {
        Self::with_syntax(SassSyntax::Indented)
    }

    fn with_syntax(syntax: SassSyntax) -> Self {
        let ext = match syntax {
            SassSyntax::Scss => ".scss",
            SassSyntax::Indented => ".sass",
        };
        Self {
            syntax,
            extension: Extension::known(ext),
            target: Extension::known(".css"),
        }
    }

    fn options(&self) -> Options<'static> {
        let input_syntax = match self.syntax {
            SassSyntax::Scss => InputSyntax::Scss,
            SassSyntax::Indented => InputSyntax::Sass,
        };
        Options::default()
            .style(OutputStyle::Expanded)
            .input_syntax(input_syntax)
            .quiet(true)
    }
}

impl Converter for SassConverter {
    fn name(&self) -> &str {
        match self.syntax {
            SassSyntax::Scss => "scss",
            SassSyntax::Indented => "sass",
        }
    }

    fn extension(&self) -> &Extension {
        &self.extension
    }

    fn target(&self) -> &Extension {
        &self.target
    }

    fn convert(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        let source = utf8(self.name(), content)?;
        grass::from_string(source, &self.options())
            .map(String::into_bytes)
            .map_err(|e| TransformError::new(self.name(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(converter: &SassConverter, source: &str) -> Result<String, TransformError> {
        converter
            .convert(source.as_bytes())
            .map(|out| String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_declared_extensions() {
        let scss = SassConverter::scss();
        assert_eq!(scss.extension().as_str(), ".scss");
        assert_eq!(scss.target().as_str(), ".css");

        let sass = SassConverter::sass();
        assert_eq!(sass.extension().as_str(), ".sass");
        assert_eq!(sass.target().as_str(), ".css");
    }

    #[test]
    fn test_scss_nesting_and_variables() {
        let css = convert(
            &SassConverter::scss(),
            "$accent: red;\nnav { a { color: $accent; } }",
        )
        .unwrap();
        assert!(css.contains("nav a"));
        assert!(css.contains("color: red"));
        assert!(!css.contains('$'));
    }

    #[test]
    fn test_indented_syntax() {
        let css = convert(&SassConverter::sass(), "body\n  color: blue\n").unwrap();
        assert!(css.contains("body"));
        assert!(css.contains("color: blue"));
    }

    #[test]
    fn test_unterminated_block_fails() {
        let err = convert(&SassConverter::scss(), "body { invalid").unwrap_err();
        assert_eq!(err.capability, "scss");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_non_utf8_fails() {
        let err = SassConverter::scss().convert(&[0xc3, 0x28]).unwrap_err();
        assert!(err.message.contains("UTF-8"));
    }
}
