//! Configuration for strata builds.
//!
//! Builds are configured from a `strata.yaml` manifest, region files and
//! builtin presets. Everything resolves to plain values passed into
//! [`crate::pipeline::build`].

mod manifest;
mod regions;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::{resolve_preset, Manifest};
pub use regions::{load_regions, parse_regions_json, parse_regions_yaml};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "strata.yaml";

/// Load the manifest at `path`, or `strata.yaml` in `dir` when present.
///
/// Falls back to defaults when no manifest exists. Returns whether one was
/// found.
pub fn load_manifest(path: Option<&Path>, dir: &Path) -> Result<(Manifest, bool)> {
    let candidate: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => dir.join(MANIFEST_FILENAME),
    };

    if path.is_some() || candidate.exists() {
        return Ok((Manifest::load(&candidate)?, true));
    }
    Ok((Manifest::default(), false))
}
