//! Halftone fade.

use crate::types::{GreyImage, BLACK, WHITE};

/// Thin black areas to a sparse dot pattern.
///
/// A black pixel survives only when both of its absolute coordinates are
/// odd, leaving one dot in every 2x2 cell.
pub fn fade(image: &mut GreyImage) {
    for (y, row) in image.rows_mut() {
        let even_row = y % 2 == 0;
        for (x, v) in row.iter_mut().enumerate() {
            if *v == BLACK && (even_row || x % 2 == 0) {
                *v = WHITE;
            }
        }
    }
}
