use std::path::Path;

use image::{imageops, ImageBuffer, Rgba, RgbaImage};

use crate::error::{FrameError, Result};

/// Represents a single RGBA video frame
///
/// A thin wrapper around an [`RgbaImage`] whose raw bytes are exactly the
/// buffer layout the filter reads and writes.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    buffer: RgbaImage,
}

impl Frame {
    /// Create a new frame from an RGBA image buffer
    pub fn new(buffer: RgbaImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with transparent black
    pub fn new_black(width: u32, height: u32) -> Self {
        Self { buffer: ImageBuffer::new(width, height) }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba(color));
        Self { buffer }
    }

    /// Vertical color bars, the classic test card
    pub fn color_bars(width: u32, height: u32) -> Self {
        const BARS: [[u8; 4]; 8] = [
            [255, 255, 255, 255],
            [255, 255, 0, 255],
            [0, 255, 255, 255],
            [0, 255, 0, 255],
            [255, 0, 255, 255],
            [255, 0, 0, 255],
            [0, 0, 255, 255],
            [0, 0, 0, 255],
        ];

        let buffer = ImageBuffer::from_fn(width, height, |x, _| {
            let bar = (x as usize * BARS.len()) / width.max(1) as usize;
            Rgba(BARS[bar.min(BARS.len() - 1)])
        });
        Self { buffer }
    }

    /// Create a frame from raw RGBA bytes
    pub fn from_rgba_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data).map(|buffer| Self { buffer })
    }

    /// Load a PNG or JPEG file as an RGBA frame
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(path.as_ref()).map_err(|_| FrameError::LoadFailed {
            path: path.as_ref().display().to_string(),
        })?;

        let rgba_image = match image {
            image::DynamicImage::ImageRgba8(img) => img,
            _ => image.to_rgba8(),
        };

        Ok(Self::new(rgba_image))
    }

    /// Save the frame; the format follows the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.buffer.save(path.as_ref()).map_err(|e| FrameError::SaveFailed {
            path: path.as_ref().display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Get the width of the frame
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the frame
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        self.buffer.put_pixel(x, y, Rgba(color));
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Mutable raw RGBA bytes, row-major
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Whether both dimensions are non-zero and even
    pub fn has_even_dimensions(&self) -> bool {
        let (w, h) = self.buffer.dimensions();
        w > 0 && h > 0 && w % 2 == 0 && h % 2 == 0
    }

    /// Drop the last column and/or row so both dimensions are even
    pub fn crop_to_even(&self) -> Result<Self> {
        let width = self.width() & !1;
        let height = self.height() & !1;

        if width == 0 || height == 0 {
            return Err(FrameError::TooSmall { width, height }.into());
        }

        if width == self.width() && height == self.height() {
            return Ok(self.clone());
        }

        let cropped = imageops::crop_imm(&self.buffer, 0, 0, width, height).to_image();
        Ok(Self::new(cropped))
    }
}
