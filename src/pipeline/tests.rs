use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::capability::css::CssCompressor;
use crate::capability::scss::SassConverter;
use crate::capability::{Compressor, Converter, Extension, TransformError};
use crate::registry::{RegistryError, builtin};

fn ext(s: &str) -> Extension {
    Extension::new(s).unwrap()
}

/// Converter that uppercases text and counts calls.
struct Upper {
    from: Extension,
    to: Extension,
    calls: Arc<AtomicUsize>,
}

impl Upper {
    fn new(from: &str, to: &str) -> Self {
        Self {
            from: ext(from),
            to: ext(to),
            calls: Arc::default(),
        }
    }
}

impl Converter for Upper {
    fn name(&self) -> &str {
        "upper"
    }
    fn extension(&self) -> &Extension {
        &self.from
    }
    fn target(&self) -> &Extension {
        &self.to
    }
    fn convert(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(content.to_ascii_uppercase())
    }
}

/// Converter that always fails.
struct Broken(Extension, Extension);

impl Converter for Broken {
    fn name(&self) -> &str {
        "broken"
    }
    fn extension(&self) -> &Extension {
        &self.0
    }
    fn target(&self) -> &Extension {
        &self.1
    }
    fn convert(&self, _: &[u8]) -> Result<Vec<u8>, TransformError> {
        Err(TransformError::new("broken", "unexpected end of input"))
    }
}

/// Compressor that strips spaces, or fails when `fail` is set.
struct Squash {
    extension: Extension,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl Squash {
    fn new(extension: &str) -> Self {
        Self {
            extension: ext(extension),
            fail: false,
            calls: Arc::default(),
        }
    }

    fn failing(extension: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(extension)
        }
    }
}

impl Compressor for Squash {
    fn name(&self) -> &str {
        "squash"
    }
    fn extension(&self) -> &Extension {
        &self.extension
    }
    fn compress(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TransformError::new("squash", "refusing to compress"));
        }
        Ok(content.iter().copied().filter(|b| *b != b' ').collect())
    }
}

// ============================================================================
// end-to-end with built-in capabilities
// ============================================================================

#[test]
fn test_scss_converted_then_minified() {
    let mut registry = Registry::new();
    registry.register_converter(SassConverter::scss()).unwrap();
    registry.register_compressor(CssCompressor::new()).unwrap();
    let pipeline = Pipeline::new(registry);

    let asset = Asset::new("main.scss", ext(".scss"), "body { color: red; }");
    let out = pipeline.process(asset).unwrap();

    assert_eq!(out.extension().as_str(), ".css");
    assert_eq!(out.content(), b"body{color:red}");
    assert!(out.converted());
    assert_eq!(out.state(), AssetState::Compressed);
}

#[test]
fn test_default_registry_handles_scss() {
    let registry = builtin(&crate::config::test_parse_config("")).unwrap();
    let pipeline = Pipeline::new(registry);

    let out = pipeline
        .process(Asset::new("main.scss", ext(".scss"), "$c: red;\nbody { color: $c; }"))
        .unwrap();
    assert_eq!(out.extension().as_str(), ".css");
    assert_eq!(out.content(), b"body{color:red}");
}

#[test]
fn test_invalid_scss_fails_conversion() {
    let registry = builtin(&crate::config::test_parse_config("")).unwrap();
    let pipeline = Pipeline::new(registry);

    let err = pipeline
        .process(Asset::new("main.scss", ext(".scss"), "body { invalid"))
        .unwrap_err();
    assert_eq!(err.stage(), Stage::Convert);
    assert_eq!(err.asset(), "main.scss");
    assert_eq!(err.transform_error().capability, "scss");
}

// ============================================================================
// pass-through
// ============================================================================

#[test]
fn test_unregistered_extension_passes_through() {
    let pipeline = Pipeline::new(Registry::new());
    let bytes = vec![0x89, b'P', b'N', b'G', 0x00, 0xff];

    let out = pipeline
        .process(Asset::new("logo.png", ext(".png"), bytes.clone()))
        .unwrap();
    assert_eq!(out.content(), bytes.as_slice());
    assert_eq!(out.extension().as_str(), ".png");
    assert!(!out.converted());
    assert_eq!(out.state(), AssetState::Raw);
}

#[test]
fn test_compress_only() {
    let mut registry = Registry::new();
    registry.register_compressor(Squash::new(".css")).unwrap();
    let pipeline = Pipeline::new(registry);

    let out = pipeline
        .process(Asset::new("site.css", ext(".css"), "a { b: c }"))
        .unwrap();
    assert_eq!(out.content(), b"a{b:c}");
    assert!(!out.converted());
    assert_eq!(out.state(), AssetState::Compressed);
}

#[test]
fn test_convert_only() {
    let mut registry = Registry::new();
    registry.register_converter(Upper::new(".txt", ".shout")).unwrap();
    let pipeline = Pipeline::new(registry);

    let out = pipeline
        .process(Asset::new("note.txt", ext(".txt"), "hi there"))
        .unwrap();
    assert_eq!(out.extension().as_str(), ".shout");
    assert_eq!(out.content(), b"HI THERE");
    assert_eq!(out.state(), AssetState::Converted);
}

// ============================================================================
// stage ordering and failures
// ============================================================================

#[test]
fn test_compressor_keyed_by_converted_extension() {
    let source_side = Squash::new(".txt");
    let source_calls = Arc::clone(&source_side.calls);
    let target_side = Squash::new(".shout");
    let target_calls = Arc::clone(&target_side.calls);

    let mut registry = Registry::new();
    registry.register_converter(Upper::new(".txt", ".shout")).unwrap();
    registry.register_compressor(source_side).unwrap();
    registry.register_compressor(target_side).unwrap();
    let pipeline = Pipeline::new(registry);

    let out = pipeline
        .process(Asset::new("note.txt", ext(".txt"), "a b"))
        .unwrap();
    assert_eq!(out.content(), b"AB");
    assert_eq!(source_calls.load(Ordering::SeqCst), 0);
    assert_eq!(target_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_conversion_failure_skips_compression() {
    let squash = Squash::new(".css");
    let calls = Arc::clone(&squash.calls);

    let mut registry = Registry::new();
    registry
        .register_converter(Broken(ext(".scss"), ext(".css")))
        .unwrap();
    registry.register_compressor(squash).unwrap();
    let pipeline = Pipeline::new(registry);

    let err = pipeline
        .process(Asset::new("main.scss", ext(".scss"), "body { invalid"))
        .unwrap_err();
    match &err {
        PipelineError::ConversionFailed {
            asset,
            extension,
            source,
        } => {
            assert_eq!(asset, "main.scss");
            assert_eq!(extension.as_str(), ".scss");
            assert_eq!(source.capability, "broken");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_compression_failure_carries_converted_asset() {
    let mut registry = Registry::new();
    registry.register_converter(Upper::new(".txt", ".shout")).unwrap();
    registry.register_compressor(Squash::failing(".shout")).unwrap();
    let pipeline = Pipeline::new(registry);

    let err = pipeline
        .process(Asset::new("note.txt", ext(".txt"), "a b"))
        .unwrap_err();
    assert_eq!(err.stage(), Stage::Compress);
    assert_eq!(err.transform_error().capability, "squash");

    let partial = err.into_partial().unwrap();
    assert_eq!(partial.extension().as_str(), ".shout");
    assert_eq!(partial.content(), b"A B");
    assert_eq!(partial.state(), AssetState::Converted);
}

#[test]
fn test_without_compression() {
    let squash = Squash::new(".shout");
    let calls = Arc::clone(&squash.calls);

    let mut registry = Registry::new();
    registry.register_converter(Upper::new(".txt", ".shout")).unwrap();
    registry.register_compressor(squash).unwrap();
    let pipeline = Pipeline::new(registry).without_compression();

    let out = pipeline
        .process(Asset::new("note.txt", ext(".txt"), "a b"))
        .unwrap();
    assert_eq!(out.content(), b"A B");
    assert_eq!(out.state(), AssetState::Converted);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_duplicate_converter_rejected() {
    let mut registry = Registry::new();
    registry.register_converter(SassConverter::scss()).unwrap();
    let err = registry
        .register_converter(Upper::new(".scss", ".css"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate(_)));

    // first registration still in effect
    let pipeline = Pipeline::new(registry);
    let out = pipeline
        .process(Asset::new("a.scss", ext(".scss"), "a { b: c; }"))
        .unwrap();
    assert_eq!(pipeline.registry().find_converter(&ext(".scss")).unwrap().name(), "scss");
    assert!(String::from_utf8_lossy(out.content()).contains("b: c"));
}

// ============================================================================
// batches
// ============================================================================

#[test]
fn test_process_all_preserves_order() {
    let upper = Upper::new(".txt", ".shout");
    let calls = Arc::clone(&upper.calls);

    let mut registry = Registry::new();
    registry.register_converter(upper).unwrap();
    registry.register_converter(Broken(ext(".bad"), ext(".txt"))).unwrap();
    let pipeline = Pipeline::new(registry);

    let assets: Vec<_> = (0..64)
        .map(|i| {
            if i % 10 == 3 {
                Asset::new(format!("{i}.bad"), ext(".bad"), "x")
            } else {
                Asset::new(format!("{i}.txt"), ext(".txt"), format!("n{i}"))
            }
        })
        .collect();

    let results = pipeline.process_all(assets);
    assert_eq!(results.len(), 64);
    for (i, result) in results.iter().enumerate() {
        if i % 10 == 3 {
            let err = result.as_ref().unwrap_err();
            assert_eq!(err.asset(), format!("{i}.bad"));
        } else {
            let asset = result.as_ref().unwrap();
            assert_eq!(asset.name(), format!("{i}.txt"));
            assert_eq!(asset.content(), format!("N{i}").as_bytes());
        }
    }
    assert_eq!(calls.load(Ordering::SeqCst), 57);
}

#[test]
fn test_shared_registry() {
    let mut registry = Registry::new();
    registry.register_compressor(Squash::new(".css")).unwrap();
    let shared = Arc::new(registry);

    let a = Pipeline::from_shared(Arc::clone(&shared));
    let b = Pipeline::from_shared(shared).without_compression();
    let input = || Asset::new("a.css", ext(".css"), "a { }");

    assert_eq!(a.process(input()).unwrap().content(), b"a{}");
    assert_eq!(b.process(input()).unwrap().content(), b"a { }");
    assert_eq!(a.registry().len(), 1);
}
