//! Asset build command.
//!
//! Phases:
//! - **Collect** - Expand CLI paths into files (directories: one level)
//! - **Read** - Load each file as a raw asset keyed by its extension
//! - **Process** - Run every asset through the pipeline in parallel
//! - **Write** - Apply the compression failure policy, write outputs
//!
//! Every failure is logged with its asset, stage and cause. The command
//! fails if any asset did.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;

use crate::{
    capability::Extension,
    cli::BuildArgs,
    config::{AssetlineConfig, CompressFailure},
    log,
    logger::ProgressLine,
    pipeline::{Asset, Pipeline, PipelineError},
    registry,
    utils::{hash, plural_count},
};

/// Build the given paths into the configured output directory.
pub fn run(config: &AssetlineConfig, args: &BuildArgs) -> Result<()> {
    let files = collect_asset_files(&args.paths)?;
    let (sources, assets) = read_assets(files)?;
    if assets.is_empty() {
        log!("build"; "no assets found");
        return Ok(());
    }

    let pipeline = create_pipeline(config)?;
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    log!("build"; "processing {}", plural_count(assets.len(), "asset"));
    let results = pipeline.process_all(assets);

    let report = write_results(config, &sources, results);
    if report.failed > 0 {
        bail!(
            "{} failed, {} written",
            plural_count(report.failed, "asset"),
            report.written
        );
    }

    log!("build"; "done: {} in {}", plural_count(report.written, "file"), output.display());
    Ok(())
}

/// Registry and orchestrator for `config`.
pub fn create_pipeline(config: &AssetlineConfig) -> Result<Pipeline> {
    let registry = registry::builtin(config).context("Failed to register capabilities")?;
    let pipeline = Pipeline::new(registry);
    Ok(if config.pipeline.compress {
        pipeline
    } else {
        pipeline.without_compression()
    })
}

// ============================================================================
// collect
// ============================================================================

/// Expand CLI paths: files as given, directories one level deep (sorted).
pub fn collect_asset_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
                .map(|entry| entry.path())
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            bail!("Path not found: {}", path.display());
        }
    }

    Ok(files)
}

/// Load files as raw assets. Files without a usable extension are skipped.
fn read_assets(files: Vec<PathBuf>) -> Result<(Vec<PathBuf>, Vec<Asset>)> {
    let mut sources = Vec::with_capacity(files.len());
    let mut assets = Vec::with_capacity(files.len());

    for path in files {
        let Some(extension) = Extension::from_path(&path) else {
            log!("warning"; "{}: no file extension, skipping", path.display());
            continue;
        };
        let content =
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        assets.push(Asset::new(path.display().to_string(), extension, content));
        sources.push(path);
    }

    Ok((sources, assets))
}

// ============================================================================
// write
// ============================================================================

#[derive(Debug, Default, PartialEq, Eq)]
struct BuildReport {
    written: usize,
    failed: usize,
}

/// Apply the failure policy to each result and write what survives.
///
/// `sources` and `results` are index-aligned.
fn write_results(
    config: &AssetlineConfig,
    sources: &[PathBuf],
    results: Vec<Result<Asset, PipelineError>>,
) -> BuildReport {
    let policy = config.pipeline.on_compress_error;
    let progress = ProgressLine::new(&[("written", results.len()), ("failed", results.len())]);
    let mut claimed = FxHashSet::default();
    let mut report = BuildReport::default();

    for (source, result) in sources.iter().zip(results) {
        let written = settle(result, policy).and_then(|asset| {
            let state = asset.state();
            write_asset(config, source, asset, &mut claimed).map(|path| (path, state))
        });

        match written {
            Ok((path, state)) => {
                crate::debug!("write"; "{} -> {} ({})", source.display(), path.display(), state);
                report.written += 1;
                progress.inc("written");
            }
            Err(e) => {
                log!("error"; "{}", describe_failure(&e));
                report.failed += 1;
                progress.inc("failed");
            }
        }
    }

    progress.finish();
    report
}

/// One log line for a failed asset, naming the stage for pipeline errors.
fn describe_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PipelineError>() {
        Some(pipeline_err) => format!("{}: {:#}", pipeline_err.stage(), err),
        None => format!("{err:#}"),
    }
}

/// Turn a pipeline result into an asset to write, honoring `policy`.
fn settle(result: Result<Asset, PipelineError>, policy: CompressFailure) -> Result<Asset> {
    match result {
        Ok(asset) => Ok(asset),
        Err(PipelineError::CompressionFailed { source, partial })
            if policy == CompressFailure::Fallback =>
        {
            log!(
                "warning";
                "`{}` ({}): compression failed, writing uncompressed: {}",
                partial.name(),
                partial.extension(),
                source
            );
            Ok(*partial)
        }
        Err(err) => Err(err.into()),
    }
}

/// Write `asset` as `<stem>[.<fingerprint>]<ext>` under the output directory.
fn write_asset(
    config: &AssetlineConfig,
    source: &Path,
    asset: Asset,
    claimed: &mut FxHashSet<String>,
) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .and_then(OsStr::to_str)
        .with_context(|| format!("{}: file name is not valid UTF-8", source.display()))?;

    let (extension, content) = asset.into_parts();
    let fingerprint = if config.build.fingerprint {
        hash::fingerprint(&content)
    } else {
        String::new()
    };
    let name = hash::fingerprinted_name(stem, &fingerprint, extension.as_str());

    if !claimed.insert(name.clone()) {
        bail!(
            "{}: output `{}` already produced by another asset",
            source.display(),
            name
        );
    }

    let path = config.build.output.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
