//! Region filter pipeline.
//!
//! Every filter mode runs the same three-step pipeline: mask the source to
//! the mode's regions, optionally threshold to the ink band, optionally fade
//! to a dot pattern. The mode only decides which optional steps run.

mod fade;
mod mask;
mod threshold;

pub use fade::fade;
pub use mask::extract;
pub use threshold::{darkest_value, ink_band, threshold, INK_BAND};

use crate::types::{FilterMode, GreyImage, Region};

/// Which optional pipeline steps a filter mode runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stages {
    pub threshold: bool,
    pub fade: bool,
}

impl FilterMode {
    /// Pipeline steps for this mode.
    pub fn stages(self) -> Stages {
        match self {
            FilterMode::Base => Stages {
                threshold: false,
                fade: false,
            },
            FilterMode::Darkest => Stages {
                threshold: true,
                fade: false,
            },
            FilterMode::Dotted => Stages {
                threshold: true,
                fade: true,
            },
        }
    }
}

/// Run the pipeline for `mode` over the pixels covered by `regions`.
pub fn apply(source: &GreyImage, regions: &[Region], mode: FilterMode) -> GreyImage {
    let stages = mode.stages();
    let mut layer = extract(source, regions);
    if stages.threshold {
        threshold(&mut layer);
    }
    if stages.fade {
        fade(&mut layer);
    }
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BLACK, WHITE};
    use pretty_assertions::assert_eq;

    fn region(x: u32, y: u32, w: u32, h: u32) -> Region {
        Region::new(x, y, w, h).unwrap()
    }

    /// 8x8 image: a light grey field with a dark 2x2 stroke at (2, 2).
    fn sample() -> GreyImage {
        let mut img = GreyImage::filled(8, 8, 220);
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            img.set(x, y, 30);
        }
        img
    }

    #[test]
    fn test_base_is_plain_mask() {
        let source = sample();
        let regions = [region(0, 0, 4, 4)];
        assert_eq!(apply(&source, &regions, FilterMode::Base), extract(&source, &regions));
    }

    #[test]
    fn test_darkest_isolates_ink() {
        let source = sample();
        let out = apply(&source, &[region(0, 0, 8, 8)], FilterMode::Darkest);

        // Band is [30, 150]: only the stroke is ink, the 220 field is paper.
        for y in 0..8 {
            for x in 0..8 {
                let ink = (2..4).contains(&x) && (2..4).contains(&y);
                let expected = if ink { BLACK } else { WHITE };
                assert_eq!(out.get(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_darkest_ignores_ink_outside_regions() {
        let mut source = GreyImage::filled(6, 6, 100);
        source.set(5, 5, 0);
        let out = apply(&source, &[region(0, 0, 3, 3)], FilterMode::Darkest);

        // The band comes from the masked pixels only: [100, 220]. The stray
        // 0 at (5, 5) is masked to white, which is outside the band.
        assert_eq!(out.get(1, 1), Some(BLACK));
        assert_eq!(out.get(5, 5), Some(WHITE));
        assert_eq!(out.get(3, 0), Some(WHITE));
    }

    #[test]
    fn test_pale_darkest_region_floods_layer() {
        let source = GreyImage::filled(4, 4, 200);
        let out = apply(&source, &[region(0, 0, 2, 2)], FilterMode::Darkest);

        // Band [200, 320] includes the white fill around the region.
        assert_eq!(out, GreyImage::filled(4, 4, BLACK));
    }

    #[test]
    fn test_dotted_black_square() {
        let source = GreyImage::filled(4, 4, BLACK);
        let out = apply(&source, &[region(0, 0, 4, 4)], FilterMode::Dotted);

        let black: Vec<(u32, u32)> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| out.get(x, y) == Some(BLACK))
            .collect();
        assert_eq!(black, vec![(1, 1), (3, 1), (1, 3), (3, 3)]);
    }

    #[test]
    fn test_dotted_uses_absolute_coordinates() {
        let source = GreyImage::filled(6, 6, BLACK);
        let out = apply(&source, &[region(2, 2, 2, 2)], FilterMode::Dotted);

        // Only (3, 3) has both coordinates odd inside the 2x2 region at (2, 2).
        let black = out.pixels().iter().filter(|&&v| v == BLACK).count();
        assert_eq!(black, 1);
        assert_eq!(out.get(3, 3), Some(BLACK));
    }

    #[test]
    fn test_stages_per_mode() {
        assert_eq!(FilterMode::Base.stages(), Stages { threshold: false, fade: false });
        assert_eq!(FilterMode::Darkest.stages(), Stages { threshold: true, fade: false });
        assert_eq!(FilterMode::Dotted.stages(), Stages { threshold: true, fade: true });
    }
}
