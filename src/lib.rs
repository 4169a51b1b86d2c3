//! RFox Canvas
//!
//! A small raster drawing engine: lines, circles and quadratic Bezier curves
//! are rasterized into exact integer pixel writes, bounded regions are
//! recolored with flood or pattern fills, and every committed shape is kept
//! in an ordered [`Scene`] that can be replayed onto a cleared surface.
//!
//! # Features
//!
//! - **Rasterizer**: Bresenham lines, midpoint circles, sampled quadratic curves
//! - **Region fills**: scanline and pixel-stack flood fills, 8x8 pattern fills
//! - **Scene replay**: deterministic, idempotent redraw of recorded shapes
//!
//! # Example
//!
//! ```
//! use rfcanvas::{CanvasConfig, CanvasSize, Color, PixelSurface, Point};
//!
//! # fn main() -> rfcanvas::Result<()> {
//! let config = CanvasConfig {
//!     size: CanvasSize { width: 16, height: 16 },
//!     ..Default::default()
//! };
//!
//! let mut session = rfcanvas::new_session(config)?;
//! session.set_color(Color::BLACK);
//! session.begin(Point::new(1, 1));
//! session.commit(Point::new(10, 1))?;
//! assert_eq!(session.surface().get(5, 1)?, Color::BLACK);
//! assert_eq!(session.scene().len(), 1);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

// Pixel-level algorithms: rasterizer, region fills, fill patterns
pub mod rendering;
pub use rendering::fill::{FillReport, FillStrategy};
pub use rendering::pattern::PatternMatrix;

// Recorded shapes and their replay
pub mod scene;
pub use scene::{Scene, Shape, ShapeKind};

// Pointer-driven drawing session (preview + commit)
pub mod session;
pub use session::{DrawMode, Session};

// Pixel surfaces the engine paints onto
pub mod surface;
pub use surface::{PixelBuffer, PixelSurface};

/// An integer pixel coordinate in buffer space.
///
/// Coordinates may be negative or exceed the surface; callers painting a
/// point are responsible for discarding writes outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a pointer position to a pixel coordinate.
    ///
    /// Finite values are floored onto the pixel grid; NaN or infinite
    /// values are rejected.
    pub fn from_f64(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "non-finite coordinate ({}, {})",
                x, y
            )));
        }
        let (fx, fy) = (x.floor(), y.floor());
        let range = i32::MIN as f64..=i32::MAX as f64;
        if !range.contains(&fx) || !range.contains(&fy) {
            return Err(Error::InvalidArgument(format!(
                "coordinate ({}, {}) does not fit the pixel grid",
                x, y
            )));
        }
        Ok(Self::new(fx as i32, fy as i32))
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        let dx = (other.x as f64) - (self.x as f64);
        let dy = (other.y as f64) - (self.y as f64);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An 8-bit RGBA color.
///
/// Equality is exact per channel: fills never treat two colors as the same
/// unless every channel matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let bytes = match digits.len() {
            6 | 8 => hex::decode(digits)
                .map_err(|e| Error::InvalidArgument(format!("bad color '{}': {}", s, e)))?,
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "bad color '{}': expected #rrggbb or #rrggbbaa",
                    s
                )))
            }
        };
        let a = bytes.get(3).copied().unwrap_or(255);
        Ok(Self::rgba(bytes[0], bytes[1], bytes[2], a))
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Configuration for a drawing session
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it overrides.
///
/// # Examples
///
/// ```
/// let cfg = rfcanvas::CanvasConfig::default();
/// assert_eq!(cfg.size.width, 640);
/// assert_eq!(cfg.bezier_steps, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface dimensions
    pub size: CanvasSize,
    /// Color the surface is cleared to before every replay
    pub background: Color,
    /// Algorithm used for solid flood fills
    pub fill_strategy: FillStrategy,
    /// Mask tiled by pattern fills
    pub pattern: PatternMatrix,
    /// Number of uniform parameter steps used to sample Bezier curves
    pub bezier_steps: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: CanvasSize::default(),
            background: Color::WHITE,
            fill_strategy: FillStrategy::default(),
            pattern: PatternMatrix::default(),
            bezier_steps: rendering::raster::BEZIER_STEPS,
        }
    }
}

impl CanvasConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let cfg: CanvasConfig = serde_json::from_str(&data)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(Error::ConfigError(format!(
                "canvas size must be non-zero, got {}x{}",
                self.size.width, self.size.height
            )));
        }
        if self.bezier_steps == 0 {
            return Err(Error::ConfigError("bezier_steps must be at least 1".into()));
        }
        Ok(())
    }
}

/// Create a drawing session backed by an in-memory [`PixelBuffer`]
pub fn new_session(config: CanvasConfig) -> Result<Session<PixelBuffer>> {
    config.validate()?;
    let surface = PixelBuffer::new(config.size.width, config.size.height, config.background)?;
    Ok(Session::new(surface, config))
}
