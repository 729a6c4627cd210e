pub mod build;
pub mod completions;
pub mod init;
pub mod validate;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::config::{load_regions, resolve_preset, Manifest};
use crate::error::Result;
use crate::types::Region;

/// strata - Split scanned images into filtered region layers and recomposite them
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log pipeline details to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract region layers from images and composite them
    Build(build::BuildArgs),

    /// Check a region list against an image without writing anything
    Validate(validate::ValidateArgs),

    /// Initialize a strata project (generates strata.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Pick the region list for a command.
///
/// A region file or preset given on the command line replaces the
/// manifest's regions; giving both combines them.
pub(crate) fn select_regions(
    regions_file: Option<&Path>,
    preset: Option<&str>,
    manifest: &Manifest,
) -> Result<Vec<Region>> {
    if regions_file.is_none() && preset.is_none() {
        return manifest.resolve_regions();
    }

    let mut regions = Vec::new();
    if let Some(file) = regions_file {
        regions.extend(load_regions(file)?);
    }
    if let Some(name) = preset {
        regions.extend(resolve_preset(name)?);
    }
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::parse_from([
            "strata", "-v", "build", "card.png", "--preset", "card", "-o", "out", "--strict",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.files.len(), 1);
                assert_eq!(args.preset.as_deref(), Some("card"));
                assert!(args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_regions_replace_manifest_regions() {
        let manifest = Manifest {
            regions: vec![Region::new(0, 0, 1, 1).unwrap()],
            ..Default::default()
        };
        assert_eq!(select_regions(None, None, &manifest).unwrap().len(), 1);
        assert_eq!(select_regions(None, Some("card"), &manifest).unwrap().len(), 29);
    }
}
