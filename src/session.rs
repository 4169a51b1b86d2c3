//! Pointer-driven drawing session
//!
//! A `Session` turns pointer events into drawing: `begin` anchors a stroke,
//! `move_to` previews it on top of the replayed scene without recording it,
//! and `commit` records the finished shape. Fill modes act on the commit
//! point only. The active mode and colors live on the session and are copied
//! into every shape, so replay never depends on the session's current state.

use crate::scene::{Scene, Shape};
use crate::surface::PixelSurface;
use crate::{CanvasConfig, Color, Point, Result};
use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    #[default]
    Line,
    Circle,
    Bezier,
    Fill,
    PatternFill,
}

impl DrawMode {
    pub fn is_fill(self) -> bool {
        matches!(self, DrawMode::Fill | DrawMode::PatternFill)
    }
}

pub struct Session<S: PixelSurface> {
    surface: S,
    scene: Scene,
    config: CanvasConfig,
    mode: DrawMode,
    color: Color,
    secondary_color: Color,
    anchor: Option<Point>,
    // an unrecorded stroke is drawn over the replayed scene
    preview: bool,
}

impl<S: PixelSurface> Session<S> {
    /// Start a session on `surface`, cleared to the configured background
    pub fn new(mut surface: S, config: CanvasConfig) -> Self {
        surface.clear_all(config.background);
        Self {
            surface,
            scene: Scene::new(),
            config,
            mode: DrawMode::default(),
            color: Color::BLACK,
            secondary_color: Color::WHITE,
            anchor: None,
            preview: false,
        }
    }

    /// Start a session from a previously saved scene
    pub fn with_scene(surface: S, config: CanvasConfig, scene: Scene) -> Self {
        let mut session = Self::new(surface, config);
        let (w, h) = (session.surface.width(), session.surface.height());
        scene.check_bounds(w, h);
        session.scene = scene;
        session.redraw();
        session
    }

    /// Switch tools. An abandoned stroke preview is wiped from the surface.
    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
        self.anchor = None;
        self.clear_preview();
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Second color used by pattern fills
    pub fn set_secondary_color(&mut self, color: Color) {
        self.secondary_color = color;
    }

    pub fn secondary_color(&self) -> Color {
        self.secondary_color
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn into_parts(self) -> (S, Scene) {
        (self.surface, self.scene)
    }

    /// Pointer down
    pub fn begin(&mut self, point: Point) {
        self.anchor = Some(point);
    }

    pub fn is_drawing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Pointer move: redraw the scene with the in-progress stroke on top.
    /// Returns whether a preview was drawn.
    pub fn move_to(&mut self, point: Point) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let Some(shape) = self.stroke(anchor, point) else {
            return false;
        };
        self.redraw();
        let painted = shape.draw(&mut self.surface, &self.config);
        self.preview = true;
        trace!("preview {:?} painted {} pixels", shape.kind, painted);
        true
    }

    /// Pointer up: record the shape for the current mode.
    /// Returns whether a shape was recorded.
    pub fn commit(&mut self, point: Point) -> Result<bool> {
        let anchor = self.anchor.take();
        let shape = match self.mode {
            DrawMode::Fill => Shape::fill(point, self.color),
            DrawMode::PatternFill => Shape::pattern_fill(point, self.color, self.secondary_color),
            _ => match anchor.and_then(|a| self.stroke(a, point)) {
                Some(shape) => shape,
                None => return Ok(false),
            },
        };

        if shape.kind.is_fill() {
            // fills read the surface, which must hold exactly the replayed scene
            self.clear_preview();
            shape.draw(&mut self.surface, &self.config);
            self.scene.record(shape)?;
        } else {
            self.scene.record(shape)?;
            self.redraw();
        }
        Ok(true)
    }

    /// Remove every shape whose bounding box contains `point` and redraw.
    /// Returns the number of shapes removed.
    pub fn erase(&mut self, point: Point) -> usize {
        let removed = self.scene.erase(point);
        if removed > 0 {
            self.redraw();
        } else {
            self.clear_preview();
        }
        removed
    }

    /// Replay the scene onto the surface
    pub fn redraw(&mut self) {
        self.scene.replay(&mut self.surface, &self.config);
        self.preview = false;
    }

    fn clear_preview(&mut self) {
        if self.preview {
            self.redraw();
        }
    }

    fn stroke(&self, start: Point, end: Point) -> Option<Shape> {
        match self.mode {
            DrawMode::Line => Some(Shape::line(start, end, self.color)),
            DrawMode::Circle => Some(Shape::circle(start, end, self.color)),
            DrawMode::Bezier => Some(Shape::bezier(start, end, self.color)),
            DrawMode::Fill | DrawMode::PatternFill => None,
        }
    }
}
