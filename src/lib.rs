//! strata - Region layer extraction and recomposition
//!
//! A library for splitting greyscale scans into region-defined layers,
//! filtering each layer (cut-out, ink threshold, halftone) and stacking
//! the layers back into a single image.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod jobs;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod validation;

pub use config::{load_manifest, load_regions, Manifest, MANIFEST_FILENAME};
pub use error::{Result, StrataError};
pub use filter::{apply, darkest_value, extract, Stages, INK_BAND};
pub use jobs::{partition, plan, run_all, Job, JobOutcome};
pub use pipeline::{
    build, resolve_destination, BuildOptions, BuildReport, BuildRequest, JobSummary,
    MissingLayerPolicy,
};
pub use render::{compose, decode_grey, write_layer, Composed, Strategy};
pub use types::{contains, BuiltinPresets, FilterMode, GreyImage, Preset, Region, BLACK, WHITE};
pub use validation::{validate_regions, Diagnostic, Severity, ValidationResult};
