//! Validate command implementation.
//!
//! Checks a region list against an image's dimensions without decoding
//! pixels or writing files.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::load_manifest;
use crate::error::{Result, StrataError};
use crate::output::{display_path, plural, Printer};
use crate::types::FilterMode;
use crate::validation::{print_diagnostics, validate_regions};

/// Check a region list against an image without writing anything
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Image whose dimensions the regions are checked against
    #[arg(required = true)]
    pub image: PathBuf,

    /// Region file (.json, .yaml)
    #[arg(long)]
    pub regions: Option<PathBuf>,

    /// Builtin region preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Manifest file (default: ./strata.yaml when present)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let (manifest, _) = load_manifest(args.manifest.as_deref(), Path::new("."))?;
    let regions = super::select_regions(args.regions.as_deref(), args.preset.as_deref(), &manifest)?;

    let (width, height) = image::image_dimensions(&args.image).map_err(|e| StrataError::Decode {
        path: args.image.clone(),
        message: e.to_string(),
    })?;

    let groups: Vec<String> = FilterMode::ALL
        .iter()
        .map(|&mode| (mode, regions.iter().filter(|r| r.filter == mode).count()))
        .filter(|&(_, n)| n > 0)
        .map(|(mode, n)| format!("{} {}", n, mode))
        .collect();
    printer.status(
        "Checking",
        &format!(
            "{} ({}x{}) against {}{}",
            display_path(&args.image),
            width,
            height,
            plural(regions.len(), "region", "regions"),
            if groups.is_empty() {
                String::new()
            } else {
                format!(": {}", groups.join(", "))
            }
        ),
    );

    let result = validate_regions(&regions, width, height);
    print_diagnostics(&result, printer);

    if result.has_errors() {
        return Err(StrataError::Build {
            message: format!(
                "Validation failed: {}, {}",
                plural(result.error_count(), "error", "errors"),
                plural(result.warning_count(), "warning", "warnings")
            ),
            help: None,
        });
    }

    if result.has_warnings() {
        printer.warning(
            "Passed",
            &format!("with {}", plural(result.warning_count(), "warning", "warnings")),
        );
    } else {
        printer.status("Passed", "no issues found");
    }

    Ok(())
}
