//! Adaptive ink thresholding.
//!
//! The band starts at the darkest tone present and spans [`INK_BAND`] levels
//! above it, so faded print on a bright background thresholds the same way
//! as crisp print on a darker one.

use crate::types::{GreyImage, BLACK, WHITE};

/// Width of the ink band above the darkest tone.
pub const INK_BAND: u8 = 120;

/// Find the darkest value in a buffer. Stops early on pure black.
///
/// An empty buffer reads as white.
pub fn darkest_value(pixels: &[u8]) -> u8 {
    let mut min = WHITE;
    for &v in pixels {
        if v < min {
            min = v;
            if min == BLACK {
                break;
            }
        }
    }
    min
}

/// Inclusive intensity band treated as ink for a given darkest value.
pub fn ink_band(darkest: u8) -> (u16, u16) {
    let min = u16::from(darkest);
    (min, min + u16::from(INK_BAND))
}

/// Turn every pixel inside the ink band black and every other pixel white.
///
/// The band is inclusive, so once the darkest tone is 135 or lighter it
/// reaches 255 and the white background is inked too.
pub fn threshold(image: &mut GreyImage) {
    let (min, max) = ink_band(darkest_value(image.pixels()));

    for v in image.pixels_mut() {
        let level = u16::from(*v);
        if level >= min && level <= max {
            *v = BLACK;
        } else if *v != WHITE {
            *v = WHITE;
        }
    }
}
