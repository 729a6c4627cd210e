//! Init command implementation.
//!
//! Generates a `strata.yaml` manifest, and a `regions.json` seeded from a
//! builtin preset when one is requested.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::MANIFEST_FILENAME;
use crate::error::{Result, StrataError};
use crate::output::{display_path, plural, Printer};
use crate::types::{BuiltinPresets, FilterMode, Preset};

/// Region file written when seeding from a preset.
const REGIONS_FILENAME: &str = "regions.json";

/// Initialize a strata project by generating a strata.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Copy a builtin preset into an editable regions.json
    #[arg(long)]
    pub preset: Option<String>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);
    let regions_path = args.path.join(REGIONS_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(StrataError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let preset = match &args.preset {
        Some(name) => Some(BuiltinPresets::get(name).ok_or_else(|| StrataError::Build {
            message: format!("Preset not found: {}", name),
            help: Some(format!(
                "Available presets: {}",
                BuiltinPresets::names().join(", ")
            )),
        })?),
        None => None,
    };

    if preset.is_some() && regions_path.exists() && !args.force {
        return Err(StrataError::Build {
            message: format!("{} already exists", REGIONS_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    if !args.path.exists() {
        fs::create_dir_all(&args.path).map_err(|e| StrataError::Io {
            path: args.path.clone(),
            message: format!("Failed to create project directory: {}", e),
        })?;
    }

    let mut yaml = String::new();
    yaml.push_str("# strata project manifest\n");
    yaml.push_str("output: images\n");

    if let Some(preset) = &preset {
        let json = serde_json::to_string_pretty(&preset.regions).map_err(|e| StrataError::Build {
            message: format!("Failed to serialize regions: {}", e),
            help: None,
        })?;
        fs::write(&regions_path, json + "\n").map_err(|e| StrataError::Io {
            path: regions_path.clone(),
            message: format!("Failed to write regions: {}", e),
        })?;
        printer.status(
            "Created",
            &format!(
                "{} {}",
                display_path(&regions_path),
                printer.dim(&format!("({})", preset_summary(preset)))
            ),
        );

        yaml.push_str(&format!("regions_file: {}\n", REGIONS_FILENAME));
    } else {
        yaml.push_str("# preset: card\n");
        yaml.push_str("# regions_file: regions.json\n");
        yaml.push_str("regions: []\n");
    }
    yaml.push_str("# Fail the build when a layer cannot be written\n");
    yaml.push_str("strict: false\n");

    fs::write(&manifest_path, &yaml).map_err(|e| StrataError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;
    printer.status("Created", &display_path(&manifest_path));

    Ok(())
}

/// "29 regions from preset card: 10 base, 4 dotted, 15 darkest"
fn preset_summary(preset: &Preset) -> String {
    let groups: Vec<String> = FilterMode::ALL
        .iter()
        .map(|&mode| (mode, preset.count(mode)))
        .filter(|&(_, n)| n > 0)
        .map(|(mode, n)| format!("{} {}", n, mode))
        .collect();
    format!(
        "{} from preset {}: {}",
        plural(preset.regions.len(), "region", "regions"),
        preset.name,
        groups.join(", ")
    )
}
