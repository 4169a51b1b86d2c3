//! Pixel surfaces the rasterizer and region fills paint onto
//!
//! The engine only needs single-pixel reads and writes, a rectangular clear
//! and the surface dimensions. `PixelBuffer` is the in-memory implementation
//! used by sessions, the CLI and tests; hosts with their own framebuffer
//! implement `PixelSurface` directly.

use crate::{Color, Error, Result};
use sha2::{Digest, Sha256};

pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Read a pixel. Fails with `OutOfBounds` outside the surface.
    fn get(&self, x: i32, y: i32) -> Result<Color>;

    /// Write a pixel. Writes outside the surface are discarded.
    fn set(&mut self, x: i32, y: i32, color: Color);

    /// Fill a rectangle with `color`, clipped to the surface
    fn clear(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width() as i64 && (y as i64) < self.height() as i64
    }

    fn clear_all(&mut self, color: Color) {
        let (w, h) = (self.width(), self.height());
        self.clear(0, 0, w, h, color);
    }
}

/// Row-major RGBA buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a buffer filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "surface size must be non-zero, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        })
    }

    /// Wrap existing row-major pixels
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(Error::InvalidArgument(format!(
                "{} pixels do not form a {}x{} surface",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Flatten to RGBA8 bytes, row-major
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Content-addressed hex digest (SHA-256 over dimensions and pixels)
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.to_rgba_bytes());
        hex::encode(hasher.finalize())
    }

    /// Encode the buffer as an 8-bit RGBA PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.to_rgba_bytes())?;
            writer.finish()?;
        }
        Ok(out)
    }

    /// Count pixels equal to `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}

impl PixelSurface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get(&self, x: i32, y: i32) -> Result<Color> {
        self.index(x, y)
            .map(|i| self.pixels[i])
            .ok_or(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn clear(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let x0 = (x as i64).clamp(0, self.width as i64) as usize;
        let y0 = (y as i64).clamp(0, self.height as i64) as usize;
        let x1 = (x as i64 + width as i64).clamp(0, self.width as i64) as usize;
        let y1 = (y as i64 + height as i64).clamp(0, self.height as i64) as usize;
        let stride = self.width as usize;
        for row in y0..y1 {
            self.pixels[row * stride + x0..row * stride + x1].fill(color);
        }
    }
}
