/// Integer rasterization of lines, circles and quadratic Bezier curves
///
/// Every rasterizer is a lazy iterator over pixel coordinates. The iterators
/// are `Clone`, so a caller can restart a sequence by cloning it before
/// consuming; nothing is shared between two iterators.

use crate::surface::PixelSurface;
use crate::{Color, Error, Point, Result};

/// Default number of parameter steps used to sample a Bezier curve
pub const BEZIER_STEPS: u32 = 1000;

/// Bresenham line between two points, endpoints included.
///
/// The walk always starts at the endpoint with the smaller `(x, y)` so that
/// `line(a, b)` and `line(b, a)` cover exactly the same pixels.
pub fn rasterize_line(p0: Point, p1: Point) -> LinePoints {
    LinePoints::new(p0, p1)
}

/// Midpoint circle of integer `radius` around `center`.
///
/// A negative radius is rejected before any point is produced. Radius 0
/// yields the center pixel once.
pub fn rasterize_circle(center: Point, radius: i32) -> Result<CirclePoints> {
    if radius < 0 {
        return Err(Error::InvalidArgument(format!(
            "circle radius must be non-negative, got {}",
            radius
        )));
    }
    Ok(CirclePoints::new(center, radius))
}

/// Quadratic Bezier curve sampled at `BEZIER_STEPS` uniform steps of `t`
pub fn rasterize_quadratic_bezier(p0: Point, p1: Point, p2: Point) -> BezierPoints {
    BezierPoints {
        p0: to_f64(p0),
        p1: to_f64(p1),
        p2: to_f64(p2),
        steps: BEZIER_STEPS,
        step: 0,
        last: None,
    }
}

/// Round a floating distance to a circle radius (half away from zero)
pub fn radius_from_distance(distance: f64) -> Result<i32> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "radius must be a finite non-negative distance, got {}",
            distance
        )));
    }
    let r = distance.round();
    if r > i32::MAX as f64 {
        return Err(Error::InvalidArgument(format!("radius {} is too large", distance)));
    }
    Ok(r as i32)
}

/// Paint every point of a rasterized primitive, discarding off-surface points
pub fn paint<S, I>(surface: &mut S, points: I, color: Color) -> usize
where
    S: PixelSurface + ?Sized,
    I: IntoIterator<Item = Point>,
{
    let mut painted = 0;
    for p in points {
        if surface.contains(p.x, p.y) {
            surface.set(p.x, p.y, color);
            painted += 1;
        }
    }
    painted
}

fn to_f64(p: Point) -> [f64; 2] {
    [p.x as f64, p.y as f64]
}

#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LinePoints {
    fn new(p0: Point, p1: Point) -> Self {
        let (a, b) = if (p0.x, p0.y) <= (p1.x, p1.y) {
            (p0, p1)
        } else {
            (p1, p0)
        };
        let (x0, y0, x1, y1) = (a.x as i64, a.y as i64, b.x as i64, b.y as i64);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            end_x: x1,
            end_y: y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let current = Point::new(self.x as i32, self.y as i32);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }
}

#[derive(Debug, Clone)]
pub struct CirclePoints {
    cx: i64,
    cy: i64,
    x: i64,
    y: i64,
    d: i64,
    // reflections of the current octant point not yet yielded
    pending: [Point; 8],
    pending_len: usize,
    pending_pos: usize,
}

impl CirclePoints {
    fn new(center: Point, radius: i32) -> Self {
        let r = radius as i64;
        Self {
            cx: center.x as i64,
            cy: center.y as i64,
            x: 0,
            y: r,
            d: 3 - 2 * r,
            pending: [Point::default(); 8],
            pending_len: 0,
            pending_pos: 0,
        }
    }

    /// Collect the distinct reflections of `(x, y)` and advance the octant walk
    fn step_octant(&mut self) -> bool {
        if self.y < self.x {
            return false;
        }
        let (x, y) = (self.x, self.y);
        let offsets = [
            (x, y),
            (x, -y),
            (-x, y),
            (-x, -y),
            (y, x),
            (y, -x),
            (-y, x),
            (-y, -x),
        ];
        self.pending_len = 0;
        self.pending_pos = 0;
        for (ox, oy) in offsets {
            let p = Point::new((self.cx + ox) as i32, (self.cy + oy) as i32);
            if !self.pending[..self.pending_len].contains(&p) {
                self.pending[self.pending_len] = p;
                self.pending_len += 1;
            }
        }

        self.x += 1;
        if self.d > 0 {
            self.y -= 1;
            self.d += 4 * (self.x - self.y) + 10;
        } else {
            self.d += 4 * self.x + 6;
        }
        true
    }
}

impl Iterator for CirclePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.pending_pos >= self.pending_len && !self.step_octant() {
            return None;
        }
        let p = self.pending[self.pending_pos];
        self.pending_pos += 1;
        Some(p)
    }
}

/// Fixed-resolution sampling of `B(t) = (1-t)^2 p0 + 2(1-t)t p1 + t^2 p2`.
///
/// Consecutive samples that land on the same pixel are yielded once; fast
/// curvature may still skip pixels between samples.
#[derive(Debug, Clone)]
pub struct BezierPoints {
    p0: [f64; 2],
    p1: [f64; 2],
    p2: [f64; 2],
    steps: u32,
    step: u32,
    last: Option<Point>,
}

impl BezierPoints {
    /// Build a sampler from floating control points (e.g. a midpoint handle)
    pub fn new(p0: [f64; 2], p1: [f64; 2], p2: [f64; 2], steps: u32) -> Result<Self> {
        if steps == 0 {
            return Err(Error::InvalidArgument("bezier steps must be at least 1".into()));
        }
        if [p0, p1, p2].iter().flatten().any(|v| !v.is_finite()) {
            return Err(Error::InvalidArgument(
                "bezier control points must be finite".into(),
            ));
        }
        Ok(Self {
            p0,
            p1,
            p2,
            steps,
            step: 0,
            last: None,
        })
    }

    fn sample(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c) = (u * u, 2.0 * u * t, t * t);
        let x = a * self.p0[0] + b * self.p1[0] + c * self.p2[0];
        let y = a * self.p0[1] + b * self.p1[1] + c * self.p2[1];
        Point::new(x.round() as i32, y.round() as i32)
    }
}

impl Iterator for BezierPoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.step <= self.steps {
            let t = self.step as f64 / self.steps as f64;
            self.step += 1;
            let p = self.sample(t);
            if self.last != Some(p) {
                self.last = Some(p);
                return Some(p);
            }
        }
        None
    }
}
