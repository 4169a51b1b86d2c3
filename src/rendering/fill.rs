/// Region fills: recolor the 4-connected region of pixels matching the seed
///
/// Two interchangeable work-list strategies are provided. `PixelStack`
/// visits one pixel per pop; `Scanline` paints whole horizontal spans and
/// seeds one pixel per matching run on the rows above and below. Both paint
/// exactly the same pixels.
///
/// The target color is captured from the seed once, before any write. Seeds
/// and neighbours outside the surface are skipped, so a fill never fails.

use crate::rendering::pattern::PatternMatrix;
use crate::surface::PixelSurface;
use crate::{Color, Point};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    #[default]
    Scanline,
    PixelStack,
}

/// Outcome of a fill: number of pixels written and their bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    pub painted: usize,
    /// Inclusive `(min, max)` corners of the painted pixels
    pub bounds: Option<(Point, Point)>,
}

impl FillReport {
    fn include(&mut self, x: i32, y: i32) {
        self.painted += 1;
        let p = Point::new(x, y);
        self.bounds = Some(match self.bounds {
            None => (p, p),
            Some((min, max)) => (
                Point::new(min.x.min(x), min.y.min(y)),
                Point::new(max.x.max(x), max.y.max(y)),
            ),
        });
    }

    fn include_span(&mut self, x0: i32, x1: i32, y: i32) {
        self.include(x0, y);
        if x1 != x0 {
            self.include(x1, y);
            self.painted += (x1 - x0 - 1) as usize;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.painted == 0
    }
}

/// Flood fill with a solid color using the scanline strategy
pub fn flood_fill<S>(surface: &mut S, seed: Point, color: Color) -> FillReport
where
    S: PixelSurface + ?Sized,
{
    flood_fill_with(surface, seed, color, FillStrategy::Scanline)
}

pub fn flood_fill_with<S>(
    surface: &mut S,
    seed: Point,
    color: Color,
    strategy: FillStrategy,
) -> FillReport
where
    S: PixelSurface + ?Sized,
{
    let Some(target) = seed_color(&*surface, seed) else {
        return FillReport::default();
    };
    if target == color {
        trace!("flood fill at ({}, {}) already {:?}", seed.x, seed.y, color);
        return FillReport::default();
    }
    let report = fill_region(surface, seed, target, strategy, false, |_, _| color);
    debug!(
        "flood fill at ({}, {}) painted {} pixels",
        seed.x, seed.y, report.painted
    );
    report
}

/// Fill with a tiled two-color pattern using the scanline strategy
pub fn pattern_fill<S>(
    surface: &mut S,
    seed: Point,
    primary: Color,
    secondary: Color,
    pattern: &PatternMatrix,
) -> FillReport
where
    S: PixelSurface + ?Sized,
{
    pattern_fill_with(
        surface,
        seed,
        primary,
        secondary,
        pattern,
        FillStrategy::Scanline,
    )
}

/// Pattern fill. A seed already in the primary color is left untouched, so
/// re-filling a patterned region is a no-op.
pub fn pattern_fill_with<S>(
    surface: &mut S,
    seed: Point,
    primary: Color,
    secondary: Color,
    pattern: &PatternMatrix,
    strategy: FillStrategy,
) -> FillReport
where
    S: PixelSurface + ?Sized,
{
    let Some(target) = seed_color(&*surface, seed) else {
        return FillReport::default();
    };
    if target == primary {
        trace!("pattern fill at ({}, {}) already patterned", seed.x, seed.y);
        return FillReport::default();
    }
    // secondary cells painted in the target color still match it
    let needs_mask = secondary == target;
    let report = fill_region(surface, seed, target, strategy, needs_mask, |x, y| {
        if pattern.is_primary(x, y) {
            primary
        } else {
            secondary
        }
    });
    debug!(
        "pattern fill at ({}, {}) painted {} pixels",
        seed.x, seed.y, report.painted
    );
    report
}

fn seed_color<S>(surface: &S, seed: Point) -> Option<Color>
where
    S: PixelSurface + ?Sized,
{
    if !surface.contains(seed.x, seed.y) {
        trace!("fill seed ({}, {}) is off the surface", seed.x, seed.y);
        return None;
    }
    surface.get(seed.x, seed.y).ok()
}

/// Pixels already painted by the current fill.
///
/// Without a mask a painted pixel is recognised by no longer matching the
/// target color, which holds whenever no paint color equals the target.
struct Visited {
    mask: Option<Vec<bool>>,
    width: usize,
}

impl Visited {
    fn new(width: u32, height: u32, with_mask: bool) -> Self {
        let width = width as usize;
        Self {
            mask: with_mask.then(|| vec![false; width * height as usize]),
            width,
        }
    }

    #[inline]
    fn seen(&self, x: i32, y: i32) -> bool {
        match &self.mask {
            Some(m) => m[y as usize * self.width + x as usize],
            None => false,
        }
    }

    #[inline]
    fn mark(&mut self, x: i32, y: i32) {
        if let Some(m) = &mut self.mask {
            m[y as usize * self.width + x as usize] = true;
        }
    }
}

fn fill_region<S, F>(
    surface: &mut S,
    seed: Point,
    target: Color,
    strategy: FillStrategy,
    needs_mask: bool,
    color_at: F,
) -> FillReport
where
    S: PixelSurface + ?Sized,
    F: Fn(i32, i32) -> Color,
{
    let mut visited = Visited::new(surface.width(), surface.height(), needs_mask);
    match strategy {
        FillStrategy::PixelStack => pixel_stack(surface, seed, target, &mut visited, color_at),
        FillStrategy::Scanline => scanline(surface, seed, target, &mut visited, color_at),
    }
}

#[inline]
fn is_target<S>(surface: &S, visited: &Visited, target: Color, x: i32, y: i32) -> bool
where
    S: PixelSurface + ?Sized,
{
    surface.contains(x, y)
        && !visited.seen(x, y)
        && matches!(surface.get(x, y), Ok(c) if c == target)
}

fn pixel_stack<S, F>(
    surface: &mut S,
    seed: Point,
    target: Color,
    visited: &mut Visited,
    color_at: F,
) -> FillReport
where
    S: PixelSurface + ?Sized,
    F: Fn(i32, i32) -> Color,
{
    let mut report = FillReport::default();
    let mut stack = vec![(seed.x, seed.y)];

    while let Some((x, y)) = stack.pop() {
        // re-check on pop: duplicates pushed before the first visit are dropped here
        if !is_target(&*surface, visited, target, x, y) {
            continue;
        }
        surface.set(x, y, color_at(x, y));
        visited.mark(x, y);
        report.include(x, y);

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }
    report
}

fn scanline<S, F>(
    surface: &mut S,
    seed: Point,
    target: Color,
    visited: &mut Visited,
    color_at: F,
) -> FillReport
where
    S: PixelSurface + ?Sized,
    F: Fn(i32, i32) -> Color,
{
    let mut report = FillReport::default();
    let mut stack = vec![(seed.x, seed.y)];

    while let Some((x, y)) = stack.pop() {
        if !is_target(&*surface, visited, target, x, y) {
            continue;
        }

        let mut left = x;
        while is_target(&*surface, visited, target, left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while is_target(&*surface, visited, target, right + 1, y) {
            right += 1;
        }

        for px in left..=right {
            surface.set(px, y, color_at(px, y));
            visited.mark(px, y);
        }
        report.include_span(left, right, y);

        for ny in [y - 1, y + 1] {
            let mut in_run = false;
            for px in left..=right {
                if is_target(&*surface, visited, target, px, ny) {
                    if !in_run {
                        stack.push((px, ny));
                        in_run = true;
                    }
                } else {
                    in_run = false;
                }
            }
        }
    }
    report
}
