//! Region file loading.
//!
//! Region files are JSON or YAML, holding either a bare list of regions or
//! a document with a `regions` key.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StrataError};
use crate::types::Region;

#[derive(Deserialize)]
#[serde(untagged)]
enum RegionDocument {
    List(Vec<Region>),
    Document { regions: Vec<Region> },
}

impl RegionDocument {
    fn into_regions(self) -> Vec<Region> {
        match self {
            RegionDocument::List(regions) | RegionDocument::Document { regions } => regions,
        }
    }
}

/// Load regions from a `.json`, `.yaml` or `.yml` file.
pub fn load_regions(path: &Path) -> Result<Vec<Region>> {
    let content = std::fs::read_to_string(path).map_err(|e| StrataError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read region file: {}", e),
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "json" => parse_regions_json(&content),
        "yaml" | "yml" => parse_regions_yaml(&content),
        _ => Err(StrataError::Parse {
            message: format!("Unsupported region file: {}", path.display()),
            help: Some("Use a .json, .yaml or .yml file".to_string()),
        }),
    }
}

/// Parse regions from JSON.
pub fn parse_regions_json(content: &str) -> Result<Vec<Region>> {
    serde_json::from_str::<RegionDocument>(content)
        .map(RegionDocument::into_regions)
        .map_err(|e| StrataError::Parse {
            message: format!("Invalid region list: {}", e),
            help: Some(
                "Expected a list of {x, y, width, height, filter?} objects with non-zero size"
                    .to_string(),
            ),
        })
}

/// Parse regions from YAML.
pub fn parse_regions_yaml(content: &str) -> Result<Vec<Region>> {
    serde_yaml::from_str::<RegionDocument>(content)
        .map(RegionDocument::into_regions)
        .map_err(|e| StrataError::Parse {
            message: format!("Invalid region list: {}", e),
            help: Some(
                "Expected a list of {x, y, width, height, filter?} entries with non-zero size"
                    .to_string(),
            ),
        })
}
