//! Builtin region presets.
//!
//! Presets are plain values handed to the build by the caller; nothing here
//! is global state.

use super::{FilterMode, Region};

/// A named, reusable region layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub regions: Vec<Region>,
}

impl Preset {
    /// Number of regions using the given filter.
    pub fn count(&self, filter: FilterMode) -> usize {
        self.regions.iter().filter(|r| r.filter == filter).count()
    }
}

/// Builtin presets.
pub struct BuiltinPresets;

impl BuiltinPresets {
    /// Trading card scan at 735x1025.
    pub fn card() -> Preset {
        use FilterMode::{Base, Darkest, Dotted};

        #[rustfmt::skip]
        let table: &[(FilterMode, u32, u32, u32, u32)] = &[
            // Card edges
            (Base, 0, 0, 735, 39),
            (Base, 0, 986, 735, 39),
            (Base, 0, 0, 33, 1025),
            (Base, 702, 0, 33, 1025),
            // Previous stage
            (Base, 63, 60, 93, 25),
            (Base, 38, 85, 25, 78),
            (Base, 156, 85, 25, 78),
            (Base, 63, 85, 93, 78),
            (Base, 63, 163, 93, 25),
            // Artwork
            (Base, 74, 118, 585, 421),
            // Name and HP
            (Dotted, 191, 70, 420, 50),
            // Second attack
            (Dotted, 150, 740, 515, 80),
            // Weakness, resistance and retreat cost
            (Dotted, 70, 842, 630, 20),
            // Power name
            (Dotted, 0, 552, 720, 174),
            // Evolution details
            (Darkest, 162, 46, 558, 20),
            (Darkest, 75, 67, 70, 16),
            // Stats and power text
            (Darkest, 0, 552, 720, 40),
            (Darkest, 470, 600, 190, 28),
            (Darkest, 0, 628, 720, 96),
            // Type
            (Darkest, 615, 65, 50, 55),
            // Second attack energy
            (Darkest, 50, 735, 90, 90),
            // Bottom line
            (Darkest, 50, 832, 640, 5),
            // Weakness, resistance, retreat cost
            (Darkest, 100, 862, 70, 35),
            (Darkest, 350, 862, 70, 35),
            (Darkest, 550, 862, 110, 35),
            // Description
            (Darkest, 85, 910, 6, 40),
            (Darkest, 91, 910, 575, 42),
            // Illustrator
            (Darkest, 535, 964, 150, 20),
            // Copyright
            (Darkest, 91, 995, 575, 15),
        ];

        let regions = table
            .iter()
            .map(|&(filter, x, y, width, height)| Region {
                x,
                y,
                width,
                height,
                filter,
            })
            .collect();

        Preset {
            name: "card".to_string(),
            description: "Trading card scan (735x1025): artwork cut out, text thresholded".to_string(),
            regions,
        }
    }

    /// Get all builtin presets.
    pub fn all() -> Vec<Preset> {
        vec![Self::card()]
    }

    /// Get a builtin preset by name.
    pub fn get(name: &str) -> Option<Preset> {
        Self::all().into_iter().find(|p| p.name == name)
    }

    /// Names of all builtin presets.
    pub fn names() -> Vec<String> {
        Self::all().into_iter().map(|p| p.name).collect()
    }
}
