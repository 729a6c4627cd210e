//! Codec boundary: greyscale decode and layer encode.

use std::path::Path;

use image::{GrayAlphaImage, GrayImage, ImageFormat, LumaA};

use crate::error::{Result, StrataError};
use crate::types::{GreyImage, WHITE};

/// Decode any supported raster file and convert it to greyscale.
pub fn decode_grey(path: &Path) -> Result<GreyImage> {
    let img = image::open(path).map_err(|e| StrataError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    GreyImage::new(width, height, luma.into_raw())
}

/// Write a layer as PNG.
///
/// With `transparent_white`, paper pixels get zero alpha so the layer can be
/// stacked over others; otherwise the layer is written opaque.
pub fn write_layer(layer: &GreyImage, path: &Path, transparent_white: bool) -> Result<()> {
    let io_err = |e: image::ImageError| StrataError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    };

    if transparent_white {
        let img = GrayAlphaImage::from_fn(layer.width(), layer.height(), |x, y| {
            let v = layer.get(x, y).unwrap_or(WHITE);
            let alpha = if v == WHITE { 0 } else { 255 };
            LumaA([v, alpha])
        });
        img.save_with_format(path, ImageFormat::Png).map_err(io_err)
    } else {
        let img = to_gray_image(layer)?;
        img.save_with_format(path, ImageFormat::Png).map_err(io_err)
    }
}

/// Copy a layer into an `image` buffer.
pub fn to_gray_image(layer: &GreyImage) -> Result<GrayImage> {
    GrayImage::from_raw(layer.width(), layer.height(), layer.pixels().to_vec()).ok_or_else(|| {
        StrataError::Build {
            message: format!(
                "pixel buffer does not match {}x{}",
                layer.width(),
                layer.height()
            ),
            help: None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLACK;
    use tempfile::tempdir;

    fn sample() -> GreyImage {
        GreyImage::new(3, 1, vec![BLACK, 128, WHITE]).unwrap()
    }

    #[test]
    fn test_write_opaque_layer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.base.png");

        write_layer(&sample(), &path, false).unwrap();

        let img = image::open(&path).unwrap();
        assert!(!img.color().has_alpha());
        let luma = img.to_luma8();
        assert_eq!(luma.as_raw(), &vec![0u8, 128, 255]);
    }

    #[test]
    fn test_write_overlay_layer_makes_white_transparent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.darkest.png");

        write_layer(&sample(), &path, true).unwrap();

        let img = image::open(&path).unwrap().to_luma_alpha8();
        assert_eq!(img.get_pixel(0, 0).0, [0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [128, 255]);
        assert_eq!(img.get_pixel(2, 0).0, [255, 0]);
    }

    #[test]
    fn test_decode_grey_roundtrips_written_layer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("source.png");
        write_layer(&sample(), &path, false).unwrap();

        let decoded = decode_grey(&path).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_decode_converts_colour_to_grey() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colour.png");
        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]));
        rgb.save(&path).unwrap();

        let decoded = decode_grey(&path).unwrap();
        assert_eq!(decoded.width(), 2);
        assert!(decoded.pixels().iter().all(|&v| v == WHITE));
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempdir().unwrap();
        let err = decode_grey(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, StrataError::Decode { .. }));
    }

    #[test]
    fn test_decode_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(decode_grey(&path), Err(StrataError::Decode { .. })));
    }
}
