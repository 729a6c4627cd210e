//! Build command implementation.
//!
//! Splits each source image into filtered region layers and writes the
//! composited result to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::config::load_manifest;
use crate::error::{Result, StrataError};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{build, BuildOptions, BuildReport, BuildRequest, MissingLayerPolicy};
use crate::render::Strategy;
use crate::types::{FilterMode, Region};
use crate::validation::{print_diagnostics, validate_regions};

/// Extensions picked up when a directory is passed as input.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// Extract region layers from images and composite them
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Source images, or directories to scan for images
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Region file (.json, .yaml)
    #[arg(long)]
    pub regions: Option<PathBuf>,

    /// Builtin region preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Fail when any layer cannot be written
    #[arg(long)]
    pub strict: bool,

    /// Manifest file (default: ./strata.yaml when present)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Skip region checks against each image
    #[arg(long)]
    pub no_validate: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let (manifest, _) = load_manifest(args.manifest.as_deref(), Path::new("."))?;
    let regions = super::select_regions(args.regions.as_deref(), args.preset.as_deref(), &manifest)?;

    let output = args.output.clone().unwrap_or_else(|| manifest.output.clone());
    if !output.exists() {
        fs::create_dir_all(&output).map_err(|e| StrataError::Io {
            path: output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let mut options = manifest.build_options();
    if args.strict {
        options.missing_layer = MissingLayerPolicy::Fail;
    }

    let sources = collect_sources(&args.files, &output);
    if sources.is_empty() {
        return Err(StrataError::Build {
            message: "No source images found".to_string(),
            help: Some(format!("Supported extensions: {}", IMAGE_EXTENSIONS.join(", "))),
        });
    }

    if regions.is_empty() {
        printer.warning("Warning", "no regions configured; sources are copied unchanged");
    }

    for source in &sources {
        build_one(source, &regions, &options, !args.no_validate, printer)?;
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(sources.len(), "image", "images"),
            display_path(&output)
        ),
    );

    Ok(())
}

fn build_one(
    source: &Source,
    regions: &[Region],
    options: &BuildOptions,
    validate: bool,
    printer: &Printer,
) -> Result<()> {
    let src = source.path.as_path();
    if validate {
        let (width, height) = image::image_dimensions(src).map_err(|e| StrataError::Decode {
            path: src.to_path_buf(),
            message: e.to_string(),
        })?;
        let result = validate_regions(regions, width, height);
        print_diagnostics(&result, printer);
        if result.has_errors() {
            return Err(StrataError::Build {
                message: format!("Region list does not fit {}", display_path(src)),
                help: Some("Run `strata validate` for details, or pass --no-validate".to_string()),
            });
        }
    }

    let layers = FilterMode::ALL
        .iter()
        .filter(|&&mode| regions.iter().any(|r| r.filter == mode))
        .count();
    printer.status(
        "Extracting",
        &format!(
            "{} ({})",
            display_path(src),
            plural(layers, "layer", "layers")
        ),
    );

    let request = BuildRequest::new(src, &source.out_dir, regions.to_vec());
    let report = build(&request, options)?;
    print_report(&report, printer);
    Ok(())
}

fn print_report(report: &BuildReport, printer: &Printer) {
    for job in &report.jobs {
        if let Some(error) = &job.error {
            printer.warning("Skipped", &format!("{} layer: {}", job.mode, error));
        }
    }
    for failure in &report.cleanup_failures {
        printer.warning("Leftover", &failure.to_string());
    }

    let how = match report.strategy {
        Strategy::Copied => "copied".to_string(),
        Strategy::Moved => "single layer".to_string(),
        Strategy::Composited { layers } => plural(layers, "layer", "layers"),
    };
    printer.info(
        "Wrote",
        &format!("{} {}", display_path(&report.output), printer.dim(&format!("({})", how))),
    );
}

/// A source image and the directory its output goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub out_dir: PathBuf,
}

/// Expand the input list: files are kept, directories are scanned for images.
///
/// Images found under a directory keep their relative sub-directory below
/// `output`, so equal file names in different folders do not collide. The
/// output directory itself and layer files left over from earlier builds are
/// skipped.
pub fn collect_sources(inputs: &[PathBuf], output: &Path) -> Vec<Source> {
    let output_real = fs::canonicalize(output).ok();
    let mut sources = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            sources.push(Source {
                path: input.clone(),
                out_dir: output.to_path_buf(),
            });
            continue;
        }

        let mut found: Vec<Source> = WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir()
                    && output_real.is_some()
                    && fs::canonicalize(e.path()).ok() == output_real)
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_image(p) && !is_layer_file(p))
            .map(|path| {
                let relative = path
                    .strip_prefix(input)
                    .ok()
                    .and_then(Path::parent)
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                Source {
                    out_dir: output.join(relative),
                    path,
                }
            })
            .collect();
        found.sort_by(|a, b| a.path.cmp(&b.path));
        sources.extend(found);
    }

    sources
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Whether a path looks like an intermediate layer (`<stem>.<tag>.png`).
fn is_layer_file(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    FilterMode::ALL
        .iter()
        .any(|mode| stem.ends_with(&format!(".{}", mode.tag())))
}
