//! Single-channel pixel buffers.

use crate::error::{Result, StrataError};

/// Ink.
pub const BLACK: u8 = 0;

/// Paper, and the fill for everything outside a region.
pub const WHITE: u8 = 255;

/// A row-major greyscale image, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreyImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GreyImage {
    /// Wrap raw pixels. The buffer length must be `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(StrataError::Build {
                message: format!(
                    "pixel buffer holds {} bytes, {}x{} needs {}",
                    pixels.len(),
                    width,
                    height,
                    expected
                ),
                help: None,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Get a pixel value (None if out of bounds).
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Set a pixel value. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = value;
        }
    }

    /// Iterate rows as mutable slices, paired with their y coordinate.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (u32, &mut [u8])> {
        let width = (self.width as usize).max(1);
        self.pixels
            .chunks_exact_mut(width)
            .enumerate()
            .map(|(y, row)| (y as u32, row))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
