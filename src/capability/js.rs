//! JavaScript minification with oxc.

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::{Compressor, Extension, TransformError, utf8};

const NAME: &str = "js";

/// Minifies `.js` modules: parse, compress, mangle, print.
#[derive(Debug, Clone)]
pub struct JsCompressor {
    extension: Extension,
}

impl JsCompressor {
    pub fn new() -> Self {
        Self {
            extension: Extension::known(".js"),
        }
    }
}

impl Default for JsCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Minify JavaScript source code.
///
/// Any parse error fails the whole file.
pub fn minify_js(source: &str) -> Result<String, TransformError> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(err) = ret.errors.first() {
        let more = ret.errors.len() - 1;
        let message = if more == 0 {
            err.to_string()
        } else {
            format!("{err} (and {more} more)")
        };
        return Err(TransformError::new(NAME, message));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

impl Compressor for JsCompressor {
    fn name(&self) -> &str {
        NAME
    }

    fn extension(&self) -> &Extension {
        &self.extension
    }

    fn compress(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        let source = utf8(NAME, content)?;
        minify_js(source).map(String::into_bytes)
    }
}
