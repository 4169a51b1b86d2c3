//! Recorded drawing operations and their replay
//!
//! A `Scene` is the durable state of a canvas: an ordered list of shapes,
//! where insertion order is both z-order and replay order. Replaying onto a
//! surface of unchanged size always yields the same pixels, no matter how
//! often it is repeated.

use crate::rendering::fill::{flood_fill_with, pattern_fill_with};
use crate::rendering::raster::{self, BezierPoints};
use crate::surface::PixelSurface;
use crate::{CanvasConfig, Color, Error, Point, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Line,
    /// Centered on `start`, radius is the rounded distance to `end`
    Circle,
    /// Quadratic curve from `start` to `end`, control point at their midpoint
    Bezier,
    /// Solid flood fill seeded at `start`
    Fill,
    /// Two-color pattern fill seeded at `start`
    PatternFill,
}

impl ShapeKind {
    pub fn is_fill(self) -> bool {
        matches!(self, ShapeKind::Fill | ShapeKind::PatternFill)
    }
}

/// A committed drawing operation. Fill kinds have no `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub start: Point,
    #[serde(default)]
    pub end: Option<Point>,
    pub color: Color,
    #[serde(
        default,
        alias = "secondaryColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_color: Option<Color>,
}

impl Shape {
    fn stroke(kind: ShapeKind, start: Point, end: Point, color: Color) -> Self {
        Self {
            kind,
            start,
            end: Some(end),
            color,
            secondary_color: None,
        }
    }

    pub fn line(start: Point, end: Point, color: Color) -> Self {
        Self::stroke(ShapeKind::Line, start, end, color)
    }

    pub fn circle(center: Point, rim: Point, color: Color) -> Self {
        Self::stroke(ShapeKind::Circle, center, rim, color)
    }

    pub fn bezier(start: Point, end: Point, color: Color) -> Self {
        Self::stroke(ShapeKind::Bezier, start, end, color)
    }

    pub fn fill(seed: Point, color: Color) -> Self {
        Self {
            kind: ShapeKind::Fill,
            start: seed,
            end: None,
            color,
            secondary_color: None,
        }
    }

    pub fn pattern_fill(seed: Point, primary: Color, secondary: Color) -> Self {
        Self {
            kind: ShapeKind::PatternFill,
            start: seed,
            end: None,
            color: primary,
            secondary_color: Some(secondary),
        }
    }

    /// Check the fields required by the shape's kind
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            ShapeKind::Line | ShapeKind::Circle | ShapeKind::Bezier if self.end.is_none() => {
                Err(Error::InvalidArgument(format!(
                    "{:?} shape at ({}, {}) has no end point",
                    self.kind, self.start.x, self.start.y
                )))
            }
            ShapeKind::Fill | ShapeKind::PatternFill if self.end.is_some() => {
                Err(Error::InvalidArgument(format!(
                    "{:?} shape at ({}, {}) cannot have an end point",
                    self.kind, self.start.x, self.start.y
                )))
            }
            ShapeKind::PatternFill if self.secondary_color.is_none() => Err(
                Error::InvalidArgument("pattern fill has no secondary color".into()),
            ),
            _ => Ok(()),
        }
    }

    /// Inclusive axis-aligned box spanning `start` and `end`.
    /// A fill is hit only at its seed.
    pub fn bounding_box(&self) -> (Point, Point) {
        let end = match self.end {
            Some(end) if !self.kind.is_fill() => end,
            _ => self.start,
        };
        (
            Point::new(self.start.x.min(end.x), self.start.y.min(end.y)),
            Point::new(self.start.x.max(end.x), self.start.y.max(end.y)),
        )
    }

    pub fn hit(&self, p: Point) -> bool {
        let (min, max) = self.bounding_box();
        (min.x..=max.x).contains(&p.x) && (min.y..=max.y).contains(&p.y)
    }

    /// Paint the shape onto `surface`, returning the number of pixels written.
    ///
    /// Shapes that cannot be drawn (an oversized radius, a missing end point)
    /// are skipped with a warning; drawing never fails half-way.
    pub fn draw<S>(&self, surface: &mut S, config: &CanvasConfig) -> usize
    where
        S: PixelSurface + ?Sized,
    {
        let end = self.end.unwrap_or(self.start);
        match self.kind {
            ShapeKind::Line => raster::paint(
                surface,
                raster::rasterize_line(self.start, end),
                self.color,
            ),
            ShapeKind::Circle => {
                let circle = raster::radius_from_distance(self.start.distance(end))
                    .and_then(|r| raster::rasterize_circle(self.start, r));
                match circle {
                    Ok(points) => raster::paint(surface, points, self.color),
                    Err(e) => {
                        warn!("skipping circle at ({}, {}): {}", self.start.x, self.start.y, e);
                        0
                    }
                }
            }
            ShapeKind::Bezier => {
                let p0 = [self.start.x as f64, self.start.y as f64];
                let p2 = [end.x as f64, end.y as f64];
                let control = [(p0[0] + p2[0]) / 2.0, (p0[1] + p2[1]) / 2.0];
                match BezierPoints::new(p0, control, p2, config.bezier_steps) {
                    Ok(points) => raster::paint(surface, points, self.color),
                    Err(e) => {
                        warn!("skipping curve at ({}, {}): {}", self.start.x, self.start.y, e);
                        0
                    }
                }
            }
            ShapeKind::Fill => {
                flood_fill_with(surface, self.start, self.color, config.fill_strategy).painted
            }
            ShapeKind::PatternFill => {
                let Some(secondary) = self.secondary_color else {
                    warn!("skipping pattern fill without a secondary color");
                    return 0;
                };
                pattern_fill_with(
                    surface,
                    self.start,
                    self.color,
                    secondary,
                    &config.pattern,
                    config.fill_strategy,
                )
                .painted
            }
        }
    }
}

/// Ordered, exclusively owned list of shapes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of the scene
    pub fn record(&mut self, shape: Shape) -> Result<()> {
        shape.validate()?;
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove every shape whose bounding box contains `point`.
    /// Returns the number of shapes removed.
    pub fn erase(&mut self, point: Point) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !s.hit(point));
        let removed = before - self.shapes.len();
        debug!("erase at ({}, {}) removed {} shapes", point.x, point.y, removed);
        removed
    }

    /// Clear `surface` to the configured background and redraw every shape in order
    pub fn replay<S>(&self, surface: &mut S, config: &CanvasConfig)
    where
        S: PixelSurface + ?Sized,
    {
        surface.clear_all(config.background);
        let mut painted = 0;
        for shape in &self.shapes {
            painted += shape.draw(&mut *surface, config);
        }
        debug!(
            "replayed {} shapes ({} pixel writes)",
            self.shapes.len(),
            painted
        );
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SceneFormat(e.to_string()))
    }

    /// Parse a scene document, rejecting shapes missing fields their kind needs
    pub fn from_json(data: &str) -> Result<Self> {
        let scene: Scene =
            serde_json::from_str(data).map_err(|e| Error::SceneFormat(e.to_string()))?;
        for (i, shape) in scene.shapes.iter().enumerate() {
            shape
                .validate()
                .map_err(|e| Error::SceneFormat(format!("shape {}: {}", i, e)))?;
        }
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Warn about fill seeds that would replay as no-ops on a surface of this size
    pub fn check_bounds(&self, width: u32, height: u32) -> usize {
        let mut outside = 0;
        for s in self.shapes.iter().filter(|s| s.kind.is_fill()) {
            let inside = s.start.x >= 0
                && s.start.y >= 0
                && (s.start.x as i64) < width as i64
                && (s.start.y as i64) < height as i64;
            if !inside {
                warn!(
                    "{:?} seed ({}, {}) is outside the {}x{} surface",
                    s.kind, s.start.x, s.start.y, width, height
                );
                outside += 1;
            }
        }
        outside
    }
}
