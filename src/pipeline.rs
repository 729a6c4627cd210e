//! Build entry point.
//!
//! A build decodes the source once, runs one layer job per filter group,
//! and hands the surviving layers to the compositor. Each build is a pure
//! function of its request and options.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::jobs::{self, JobOutcome};
use crate::render::{compose, decode_grey, Strategy};
use crate::types::{FilterMode, Region};

/// Input to a single build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    /// Source image.
    pub src: PathBuf,
    /// Output file, or a directory to write `<source file name>` into.
    pub dest: PathBuf,
    pub regions: Vec<Region>,
}

impl BuildRequest {
    pub fn new(src: impl Into<PathBuf>, dest: impl Into<PathBuf>, regions: Vec<Region>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
            regions,
        }
    }
}

/// What to do when some layer jobs fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingLayerPolicy {
    /// Composite the layers that were written.
    #[default]
    Degrade,
    /// Fail the build with the first job error.
    Fail,
}

/// Build options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub missing_layer: MissingLayerPolicy,
}

impl BuildOptions {
    /// Options that fail the build on any missing layer.
    pub fn strict() -> Self {
        Self {
            missing_layer: MissingLayerPolicy::Fail,
        }
    }
}

/// Per-job summary kept in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub mode: FilterMode,
    pub regions: usize,
    pub layer: PathBuf,
    /// Failure message, if the job failed.
    pub error: Option<String>,
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    pub output: PathBuf,
    pub strategy: Strategy,
    pub jobs: Vec<JobSummary>,
    /// Intermediate files that could not be removed.
    pub cleanup_failures: Vec<StrataError>,
}

impl BuildReport {
    /// Number of jobs that failed and were left out of the output.
    pub fn failed_jobs(&self) -> usize {
        self.jobs.iter().filter(|j| j.error.is_some()).count()
    }
}

/// Resolve the output path for a request.
///
/// An existing directory, or a path without an extension, receives the
/// source's file name.
pub fn resolve_destination(src: &Path, dest: &Path) -> Result<PathBuf> {
    if dest.is_dir() || dest.extension().is_none() {
        let name = src.file_name().ok_or_else(|| StrataError::Build {
            message: format!("source path {} has no file name", src.display()),
            help: None,
        })?;
        return Ok(dest.join(name));
    }
    Ok(dest.to_path_buf())
}

/// Split an image into filtered region layers and recomposite them.
#[tracing::instrument(skip_all, fields(src = %request.src.display()))]
pub fn build(request: &BuildRequest, options: &BuildOptions) -> Result<BuildReport> {
    let output = resolve_destination(&request.src, &request.dest)?;
    let out_dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    if !out_dir.exists() {
        fs::create_dir_all(&out_dir).map_err(|e| StrataError::Io {
            path: out_dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let source = decode_grey(&request.src)?;
    tracing::debug!(
        width = source.width(),
        height = source.height(),
        regions = request.regions.len(),
        "decoded source"
    );

    let stem = output
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("layer")
        .to_string();
    let planned = jobs::plan(&request.regions, &out_dir, &stem);
    if planned.len() > 1 {
        check_output_format(&output)?;
    }
    let outcomes = jobs::run_all(&source, &planned);

    let summaries: Vec<JobSummary> = planned
        .iter()
        .zip(&outcomes)
        .map(|(job, outcome)| JobSummary {
            mode: job.mode,
            regions: job.regions.len(),
            layer: outcome.output.clone(),
            error: outcome.result.as_ref().err().map(ToString::to_string),
        })
        .collect();

    let layers = settle(outcomes, options.missing_layer)?;
    let composed = compose(&request.src, &layers, &output)?;

    Ok(BuildReport {
        output: composed.path,
        strategy: composed.strategy,
        jobs: summaries,
        cleanup_failures: composed.cleanup_failures,
    })
}

/// Fail early when the compositor could not encode `output`.
///
/// Copies and single-layer moves never encode, so only multi-layer builds
/// need a known format.
fn check_output_format(output: &Path) -> Result<()> {
    ImageFormat::from_path(output)
        .map(|_| ())
        .map_err(|e| StrataError::Build {
            message: format!("Cannot write {}: {}", output.display(), e),
            help: Some("Use an image extension such as .png or .jpg for the output".to_string()),
        })
}

/// Collect the written layers in stacking order, applying the policy.
///
/// When every job failed there is nothing to composite and the first error
/// is returned under either policy.
fn settle(outcomes: Vec<JobOutcome>, policy: MissingLayerPolicy) -> Result<Vec<PathBuf>> {
    let total = outcomes.len();
    let mut layers = Vec::with_capacity(total);
    let mut first_error = None;

    for outcome in outcomes {
        match outcome.result {
            Ok(path) => layers.push(path),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) if policy == MissingLayerPolicy::Fail || layers.is_empty() => Err(e),
        Some(_) => {
            tracing::warn!(
                written = layers.len(),
                planned = total,
                "compositing without failed layers"
            );
            Ok(layers)
        }
        None => Ok(layers),
    }
}
