//! Layer compositor.
//!
//! Stacks layer files into the final output. The number of layers picks
//! the strategy: no layers copies the source, one layer is moved into
//! place, two or more are overlaid in order and flattened onto white.

use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, GrayImage, Luma, RgbaImage};

use crate::error::{Result, StrataError};
use crate::types::WHITE;

/// How the output file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// No layers; the source was copied verbatim.
    Copied,
    /// A single layer was moved to the destination.
    Moved,
    /// Two or more layers were stacked and flattened.
    Composited { layers: usize },
}

/// Result of a compose step.
#[derive(Debug)]
pub struct Composed {
    pub path: PathBuf,
    pub strategy: Strategy,
    /// Layer files that could not be deleted. The output is still valid.
    pub cleanup_failures: Vec<StrataError>,
}

/// Produce `dest` from the ordered layer files.
///
/// Layers are stacked in slice order: the first is the canvas and each
/// later one is drawn over it. On success every stacked layer is deleted.
/// On failure layers are left on disk.
pub fn compose(source: &Path, layers: &[PathBuf], dest: &Path) -> Result<Composed> {
    match layers {
        [] => {
            if source != dest {
                fs::copy(source, dest).map_err(|e| StrataError::Io {
                    path: dest.to_path_buf(),
                    message: format!("Failed to copy {}: {}", source.display(), e),
                })?;
            }
            tracing::debug!(dest = %dest.display(), "copied source");
            Ok(Composed {
                path: dest.to_path_buf(),
                strategy: Strategy::Copied,
                cleanup_failures: Vec::new(),
            })
        }
        [only] => {
            if only != dest {
                fs::rename(only, dest).map_err(|e| StrataError::Io {
                    path: dest.to_path_buf(),
                    message: format!("Failed to move layer {}: {}", only.display(), e),
                })?;
            }
            tracing::debug!(dest = %dest.display(), "moved single layer");
            Ok(Composed {
                path: dest.to_path_buf(),
                strategy: Strategy::Moved,
                cleanup_failures: Vec::new(),
            })
        }
        [first, rest @ ..] => {
            let mut canvas = open_layer(first)?;
            for layer in rest {
                let top = open_layer(layer)?;
                if top.dimensions() != canvas.dimensions() {
                    return Err(StrataError::Composite {
                        message: format!(
                            "layer {} is {}x{}, expected {}x{}",
                            layer.display(),
                            top.width(),
                            top.height(),
                            canvas.width(),
                            canvas.height()
                        ),
                        help: Some("All layers of one build share the source dimensions".to_string()),
                    });
                }
                imageops::overlay(&mut canvas, &top, 0, 0);
            }

            flatten(&canvas).save(dest).map_err(|e| StrataError::Composite {
                message: format!("Failed to write {}: {}", dest.display(), e),
                help: None,
            })?;
            tracing::debug!(dest = %dest.display(), layers = layers.len(), "composited layers");

            let cleanup_failures = layers
                .iter()
                .filter(|layer| layer.as_path() != dest)
                .filter_map(|layer| {
                    fs::remove_file(layer).err().map(|e| {
                        tracing::warn!(layer = %layer.display(), error = %e, "failed to remove layer");
                        StrataError::Io {
                            path: layer.clone(),
                            message: format!("Failed to remove layer: {}", e),
                        }
                    })
                })
                .collect();

            Ok(Composed {
                path: dest.to_path_buf(),
                strategy: Strategy::Composited {
                    layers: layers.len(),
                },
                cleanup_failures,
            })
        }
    }
}

fn open_layer(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| StrataError::Composite {
            message: format!("Failed to read layer {}: {}", path.display(), e),
            help: None,
        })
}

/// Flatten a stacked canvas onto opaque white.
///
/// Layers are greyscale, so the red channel carries the tone.
pub fn flatten(canvas: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let [v, _, _, a] = canvas.get_pixel(x, y).0;
        let (v, a) = (u32::from(v), u32::from(a));
        let paper = u32::from(WHITE) * (255 - a);
        Luma([((v * a + paper + 127) / 255) as u8])
    })
}
