//! Pixel-level drawing algorithms

pub mod fill;
pub mod pattern;
pub mod raster;

use crate::surface::{PixelBuffer, PixelSurface};
use crate::Result;

/// PNG-encoded capture of a rendered surface, as written by the CLI.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
    /// Hex SHA-256 of the raw pixels (see `PixelBuffer::digest`)
    pub digest: String,
}

impl Screenshot {
    pub fn capture(buffer: &PixelBuffer) -> Result<Self> {
        Ok(Self {
            width: buffer.width(),
            height: buffer.height(),
            png_data: buffer.encode_png()?,
            digest: buffer.digest(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn capture_returns_screenshot() {
        let b = PixelBuffer::new(128, 64, Color::WHITE).unwrap();
        let s = Screenshot::capture(&b).unwrap();
        assert_eq!(s.width, 128);
        assert_eq!(s.height, 64);
        assert_eq!(s.digest, b.digest());
        assert!(s.png_data.len() > 8);
    }
}
