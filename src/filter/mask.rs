//! Region masking.

use crate::types::{GreyImage, Region, WHITE};

/// Keep the pixels covered by any region and paint the rest white.
///
/// Regions are clipped to the image, so coordinates past the edge are
/// harmless. Overlapping regions copy the same source value twice.
pub fn extract(source: &GreyImage, regions: &[Region]) -> GreyImage {
    let width = source.width();
    let height = source.height();
    let mut out = GreyImage::filled(width, height, WHITE);

    let src = source.pixels();
    let dst = out.pixels_mut();
    for clipped in regions.iter().filter_map(|r| r.clip(width, height)) {
        for y in clipped.y0..clipped.y1 {
            let row = y as usize * width as usize;
            let span = row + clipped.x0 as usize..row + clipped.x1 as usize;
            dst[span.clone()].copy_from_slice(&src[span]);
        }
    }

    out
}
