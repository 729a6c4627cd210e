//! Validation of region lists against a source image.
//!
//! Runs a suite of checks and reports errors and warnings. Used by both
//! `strata validate` and `strata build` before any layer is written.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::Printer;
use crate::types::Region;

/// Run all validation checks for an image of the given size.
pub fn validate_regions(regions: &[Region], width: u32, height: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_visible(regions, width, height));
    result.merge(checks::check_bounds(regions, width, height));
    result.merge(checks::check_blank_layers(regions, width, height));
    result.merge(checks::check_duplicates(regions));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("{}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuiltinPresets;

    #[test]
    fn test_card_preset_fits_card_scan() {
        let card = BuiltinPresets::card();
        let result = validate_regions(&card.regions, 735, 1025);
        assert!(result.is_ok());
    }

    #[test]
    fn test_card_preset_on_thumbnail() {
        let card = BuiltinPresets::card();
        let result = validate_regions(&card.regions, 100, 100);
        assert!(!result.has_errors());
        assert!(result.has_warnings());
    }

    #[test]
    fn test_empty_region_list() {
        assert!(validate_regions(&[], 10, 10).is_ok());
    }
}
