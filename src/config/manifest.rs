//! Project manifest (strata.yaml) parsing.
//!
//! The manifest holds the caller-owned defaults for a build: where output
//! goes, which regions to use and how strictly to treat failed layers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::pipeline::{BuildOptions, MissingLayerPolicy};
use crate::types::{BuiltinPresets, Region};

use super::regions::load_regions;

/// Project manifest loaded from strata.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Output directory for composited images.
    pub output: PathBuf,

    /// Builtin preset name (e.g., "card").
    pub preset: Option<String>,

    /// Region file, relative to the manifest.
    pub regions_file: Option<PathBuf>,

    /// Inline regions.
    pub regions: Vec<Region>,

    /// Fail the build when any layer job fails.
    pub strict: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from("images")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output: default_output(),
            preset: None,
            regions_file: None,
            regions: vec![],
            strict: false,
        }
    }
}

impl Manifest {
    /// Load manifest from a strata.yaml file.
    ///
    /// A relative `regions_file` is rebased onto the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StrataError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        let mut manifest = Self::parse(&content)?;
        if let (Some(file), Some(dir)) = (&manifest.regions_file, path.parent()) {
            if file.is_relative() {
                manifest.regions_file = Some(dir.join(file));
            }
        }
        Ok(manifest)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| StrataError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check strata.yaml syntax".to_string()),
        })
    }

    /// Resolve the region list: region file, then preset, then inline regions.
    ///
    /// Sources are combined in that order when more than one is set.
    pub fn resolve_regions(&self) -> Result<Vec<Region>> {
        let mut regions = Vec::new();

        if let Some(file) = &self.regions_file {
            regions.extend(load_regions(file)?);
        }

        if let Some(name) = &self.preset {
            regions.extend(resolve_preset(name)?);
        }

        regions.extend(self.regions.iter().copied());
        Ok(regions)
    }

    /// Build options implied by the manifest.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            missing_layer: if self.strict {
                MissingLayerPolicy::Fail
            } else {
                MissingLayerPolicy::Degrade
            },
        }
    }
}

/// Look up a builtin preset's regions by name.
pub fn resolve_preset(name: &str) -> Result<Vec<Region>> {
    BuiltinPresets::get(name)
        .map(|preset| preset.regions)
        .ok_or_else(|| StrataError::Build {
            message: format!("Preset not found: {}", name),
            help: Some(format!(
                "Available presets: {}",
                BuiltinPresets::names().join(", ")
            )),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FilterMode;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build").unwrap();

        assert_eq!(manifest.output, PathBuf::from("build"));
        assert!(manifest.preset.is_none());
        assert!(manifest.regions.is_empty());
        assert!(!manifest.strict);
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
output: dist/cards
preset: card
regions_file: regions.json
strict: true
regions:
  - { x: 10, y: 10, width: 5, height: 5, filter: dotted }
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.output, PathBuf::from("dist/cards"));
        assert_eq!(manifest.preset, Some("card".to_string()));
        assert_eq!(manifest.regions_file, Some(PathBuf::from("regions.json")));
        assert!(manifest.strict);
        assert_eq!(manifest.regions[0].filter, FilterMode::Dotted);
        assert_eq!(manifest.build_options(), BuildOptions::strict());
    }

    #[test]
    fn test_default_manifest() {
        let manifest = Manifest::default();
        assert_eq!(manifest.output, PathBuf::from("images"));
        assert_eq!(manifest.build_options(), BuildOptions::default());
        assert!(manifest.resolve_regions().unwrap().is_empty());
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_invalid_manifest() {
        assert!(matches!(
            Manifest::parse("strict: [oops"),
            Err(StrataError::Parse { .. })
        ));
    }

    #[test]
    fn test_resolve_regions_combines_sources() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("regions.json"),
            r#"[{"x": 0, "y": 0, "width": 1, "height": 1, "filter": "darkest"}]"#,
        )
        .unwrap();
        let manifest_path = dir.path().join("strata.yaml");
        std::fs::write(
            &manifest_path,
            "regions_file: regions.json\npreset: card\nregions:\n  - { x: 1, y: 1, width: 1, height: 1 }\n",
        )
        .unwrap();

        let manifest = Manifest::load(&manifest_path).unwrap();
        let regions = manifest.resolve_regions().unwrap();

        assert_eq!(regions.len(), 1 + 29 + 1);
        assert_eq!(regions[0].filter, FilterMode::Darkest);
    }

    #[test]
    fn test_unknown_preset() {
        let manifest = Manifest {
            preset: Some("poster".to_string()),
            ..Default::default()
        };
        let err = manifest.resolve_regions().unwrap_err();
        assert!(err.to_string().contains("poster"));
    }
}
