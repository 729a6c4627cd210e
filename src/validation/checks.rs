//! Validation checks for a region list against an image size.
//!
//! Each check returns a `ValidationResult`. Regions past the image edge are
//! legal (the pipeline clips them) but usually mean the list was written for
//! a different scan.

use std::collections::HashMap;

use crate::types::{FilterMode, Region};

use super::warning::{Diagnostic, ValidationResult};

/// Warn about regions that are clipped or lie wholly outside the image.
pub fn check_bounds(regions: &[Region], width: u32, height: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, region) in regions.iter().enumerate() {
        if region.clip(width, height).is_none() {
            result.push(
                Diagnostic::warning(
                    "strata::validate::outside-image",
                    format!(
                        "Region {} ({}) lies outside the {}x{} image and is ignored",
                        i, region, width, height
                    ),
                )
                .at_region(i)
                .with_help("Check that the region list matches this image's resolution"),
            );
        } else if region.exceeds(width, height) {
            result.push(
                Diagnostic::warning(
                    "strata::validate::clipped",
                    format!(
                        "Region {} ({}) extends past the {}x{} image and is clipped",
                        i, region, width, height
                    ),
                )
                .at_region(i),
            );
        }
    }

    result
}

/// Error when regions were given but none of them touches the image.
pub fn check_visible(regions: &[Region], width: u32, height: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !regions.is_empty() && regions.iter().all(|r| r.clip(width, height).is_none()) {
        result.push(
            Diagnostic::error(
                "strata::validate::nothing-visible",
                format!(
                    "None of the {} regions overlaps the {}x{} image",
                    regions.len(),
                    width,
                    height
                ),
            )
            .with_help("The output would be blank; use a region list made for this image"),
        );
    }

    result
}

/// Warn about filter groups whose regions all fall outside the image.
///
/// Such a group still produces a layer. A base layer comes out blank; a
/// thresholded layer sees only white, so its ink band starts at 255 and the
/// whole layer turns to ink.
pub fn check_blank_layers(regions: &[Region], width: u32, height: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    for mode in FilterMode::ALL {
        let mut group = regions.iter().filter(|r| r.filter == mode).peekable();
        if group.peek().is_none() {
            continue;
        }
        if group.all(|r| r.clip(width, height).is_none()) {
            let effect = if mode.stages().threshold {
                "solid ink"
            } else {
                "blank"
            };
            result.push(Diagnostic::warning(
                "strata::validate::blank-layer",
                format!(
                    "Every {} region is outside the image; the {} layer will be {}",
                    mode, mode, effect
                ),
            ));
        }
    }

    result
}

/// Warn about exact duplicate regions.
pub fn check_duplicates(regions: &[Region]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashMap<&Region, usize> = HashMap::new();

    for (i, region) in regions.iter().enumerate() {
        if let Some(first) = seen.get(region) {
            result.push(
                Diagnostic::warning(
                    "strata::validate::duplicate",
                    format!("Region {} duplicates region {} ({})", i, first, region),
                )
                .at_region(i)
                .with_help("Remove the repeated entry"),
            );
        } else {
            seen.insert(region, i);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: u32, y: u32, w: u32, h: u32) -> Region {
        Region::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_bounds_inside_is_clean() {
        assert!(check_bounds(&[region(0, 0, 10, 10)], 10, 10).is_ok());
    }

    #[test]
    fn test_bounds_clipped_and_outside() {
        let regions = [region(5, 5, 10, 10), region(20, 0, 1, 1)];
        let result = check_bounds(&regions, 10, 10);

        let codes: Vec<&str> = result.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["strata::validate::clipped", "strata::validate::outside-image"]
        );
        assert!(!result.has_errors());
    }

    #[test]
    fn test_visible() {
        assert!(check_visible(&[], 10, 10).is_ok());
        assert!(check_visible(&[region(0, 0, 1, 1), region(50, 50, 1, 1)], 10, 10).is_ok());
        assert!(check_visible(&[region(50, 50, 1, 1)], 10, 10).has_errors());
    }

    #[test]
    fn test_blank_layer() {
        let regions = [
            region(0, 0, 1, 1),
            region(50, 50, 1, 1).with_filter(FilterMode::Darkest),
        ];
        let result = check_blank_layers(&regions, 10, 10);
        assert_eq!(result.warning_count(), 1);
        let message = &result.iter().next().unwrap().message;
        assert!(message.contains("darkest"));
        assert!(message.contains("solid ink"));
    }

    #[test]
    fn test_duplicates() {
        let regions = [region(1, 1, 2, 2), region(3, 3, 1, 1), region(1, 1, 2, 2)];
        let result = check_duplicates(&regions);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.iter().next().unwrap().region, Some(2));
    }

    #[test]
    fn test_same_rect_different_filter_is_not_duplicate() {
        let regions = [
            region(1, 1, 2, 2),
            region(1, 1, 2, 2).with_filter(FilterMode::Dotted),
        ];
        assert!(check_duplicates(&regions).is_ok());
    }
}
