//! Rectangular regions and the filter modes they carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};

/// Filter applied to the pixels of a region.
///
/// The declaration order is the layer stacking order: base layers are drawn
/// first, darkest layers last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Straight cut-out, no pixel transform.
    #[default]
    #[serde(alias = "none")]
    Base,
    /// Darkest-band threshold followed by a halftone fade.
    Dotted,
    /// Darkest-band threshold.
    Darkest,
}

impl FilterMode {
    /// All modes in layer stacking order.
    pub const ALL: [FilterMode; 3] = [FilterMode::Base, FilterMode::Dotted, FilterMode::Darkest];

    /// Tag used in layer file names.
    pub fn tag(self) -> &'static str {
        match self {
            FilterMode::Base => "base",
            FilterMode::Dotted => "dotted",
            FilterMode::Darkest => "darkest",
        }
    }

    /// Whether layers of this mode treat white as transparent when stacked.
    pub fn is_overlay(self) -> bool {
        self != FilterMode::Base
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FilterMode {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" | "none" => Ok(FilterMode::Base),
            "dotted" => Ok(FilterMode::Dotted),
            "darkest" => Ok(FilterMode::Darkest),
            other => Err(StrataError::Parse {
                message: format!("Unknown filter '{}'", other),
                help: Some("Valid filters: none, base, dotted, darkest".to_string()),
            }),
        }
    }
}

/// An axis-aligned rectangle in pixel space.
///
/// Coordinates are allowed to run past the image; consumers clip with
/// [`Region::clip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RegionDef", into = "RegionDef")]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub filter: FilterMode,
}

/// Serialized form of a region, validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionDef {
    #[serde(default, skip_serializing_if = "is_base")]
    filter: FilterMode,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

fn is_base(mode: &FilterMode) -> bool {
    *mode == FilterMode::Base
}

impl TryFrom<RegionDef> for Region {
    type Error = StrataError;

    fn try_from(def: RegionDef) -> Result<Self> {
        Region::new(def.x, def.y, def.width, def.height).map(|r| r.with_filter(def.filter))
    }
}

impl From<Region> for RegionDef {
    fn from(r: Region) -> Self {
        Self {
            filter: r.filter,
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// The on-image part of a region, as half-open pixel ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clipped {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    /// Create an unfiltered region. Width and height must be non-zero.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StrataError::Region {
                message: format!(
                    "region at ({}, {}) has empty size {}x{}",
                    x, y, width, height
                ),
                help: Some("Regions need a width and height of at least 1".to_string()),
            });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
            filter: FilterMode::Base,
        })
    }

    /// Set the filter mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Exclusive right edge, widened so it cannot overflow.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge, widened so it cannot overflow.
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// Check whether a pixel lies inside this region.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && u64::from(x) < self.right() && y >= self.y && u64::from(y) < self.bottom()
    }

    /// Intersect with an image of the given size.
    ///
    /// Returns `None` when the region lies entirely outside the image.
    pub fn clip(&self, width: u32, height: u32) -> Option<Clipped> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let x1 = self.right().min(u64::from(width)) as u32;
        let y1 = self.bottom().min(u64::from(height)) as u32;
        Some(Clipped {
            x0: self.x,
            y0: self.y,
            x1,
            y1,
        })
    }

    /// Whether any part of the region falls outside an image of the given size.
    pub fn exceeds(&self, width: u32, height: u32) -> bool {
        self.right() > u64::from(width) || self.bottom() > u64::from(height)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{} ({})",
            self.width, self.height, self.x, self.y, self.filter
        )
    }
}

/// Check whether a pixel lies inside any region of the set.
pub fn contains(regions: &[Region], x: u32, y: u32) -> bool {
    regions.iter().any(|r| r.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: u32, y: u32, w: u32, h: u32) -> Region {
        Region::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = region(2, 3, 4, 5);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 8));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn test_contains_any_region() {
        let regions = vec![region(0, 0, 2, 2), region(10, 10, 2, 2)];
        assert!(contains(&regions, 1, 1));
        assert!(contains(&regions, 11, 10));
        assert!(!contains(&regions, 5, 5));
        assert!(!contains(&[], 0, 0));
    }

    #[test]
    fn test_contains_near_u32_max() {
        let r = region(u32::MAX - 1, 0, 10, 1);
        assert!(r.contains(u32::MAX, 0));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Region::new(0, 0, 0, 5).is_err());
        assert!(Region::new(0, 0, 5, 0).is_err());
    }

    #[test]
    fn test_clip_inside_partial_outside() {
        assert_eq!(
            region(1, 1, 2, 2).clip(10, 10),
            Some(Clipped { x0: 1, y0: 1, x1: 3, y1: 3 })
        );
        assert_eq!(
            region(8, 9, 5, 5).clip(10, 10),
            Some(Clipped { x0: 8, y0: 9, x1: 10, y1: 10 })
        );
        assert_eq!(region(10, 0, 5, 5).clip(10, 10), None);
    }


    #[test]
    fn test_deserialize_filter_defaults_to_base() {
        let r: Region = serde_json::from_str(r#"{"x": 1, "y": 2, "width": 3, "height": 4}"#).unwrap();
        assert_eq!(r.filter, FilterMode::Base);

        let r: Region =
            serde_json::from_str(r#"{"filter": "none", "x": 1, "y": 2, "width": 3, "height": 4}"#)
                .unwrap();
        assert_eq!(r.filter, FilterMode::Base);

        let r: Region =
            serde_json::from_str(r#"{"filter": "dotted", "x": 1, "y": 2, "width": 3, "height": 4}"#)
                .unwrap();
        assert_eq!(r.filter, FilterMode::Dotted);
    }

    #[test]
    fn test_deserialize_rejects_empty_region() {
        let result: std::result::Result<Region, _> =
            serde_json::from_str(r#"{"x": 1, "y": 2, "width": 0, "height": 4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("none".parse::<FilterMode>().unwrap(), FilterMode::Base);
        assert_eq!("Darkest".parse::<FilterMode>().unwrap(), FilterMode::Darkest);
        assert!("sepia".parse::<FilterMode>().is_err());
    }

    #[test]
    fn test_filter_order_is_stacking_order() {
        let mut modes = vec![FilterMode::Darkest, FilterMode::Base, FilterMode::Dotted];
        modes.sort();
        assert_eq!(modes, FilterMode::ALL.to_vec());
    }
}
