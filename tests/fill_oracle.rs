//! Region fills checked against a naive recursive reference on small surfaces

use rfcanvas::rendering::fill::{flood_fill_with, pattern_fill_with, FillStrategy};
use rfcanvas::{Color, PatternMatrix, PixelBuffer, PixelSurface, Point, Result};
use std::cell::Cell;
use std::collections::HashSet;

const PALETTE: [Color; 3] = [Color::WHITE, Color::BLACK, Color::RED];
const STRATEGIES: [FillStrategy; 2] = [FillStrategy::Scanline, FillStrategy::PixelStack];

/// Tiny deterministic generator so layouts are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn random_layout(rng: &mut Lcg, w: u32, h: u32) -> PixelBuffer {
    // bias toward white so regions are large and winding
    let pixels = (0..w * h)
        .map(|_| match rng.below(10) {
            0..=5 => PALETTE[0],
            6..=8 => PALETTE[1],
            _ => PALETTE[2],
        })
        .collect();
    PixelBuffer::from_pixels(w, h, pixels).unwrap()
}

/// Recursive 4-connected region of the seed's color
fn oracle_region(buf: &PixelBuffer, seed: Point) -> HashSet<Point> {
    fn visit(buf: &PixelBuffer, p: Point, target: Color, out: &mut HashSet<Point>) {
        if !buf.contains(p.x, p.y) || out.contains(&p) || buf.get(p.x, p.y).unwrap() != target {
            return;
        }
        out.insert(p);
        visit(buf, Point::new(p.x + 1, p.y), target, out);
        visit(buf, Point::new(p.x - 1, p.y), target, out);
        visit(buf, Point::new(p.x, p.y + 1), target, out);
        visit(buf, Point::new(p.x, p.y - 1), target, out);
    }

    let mut out = HashSet::new();
    if let Ok(target) = buf.get(seed.x, seed.y) {
        visit(buf, seed, target, &mut out);
    }
    out
}

fn oracle_flood(buf: &PixelBuffer, seed: Point, color: Color) -> PixelBuffer {
    let mut out = buf.clone();
    if buf.get(seed.x, seed.y).ok() == Some(color) {
        return out;
    }
    for p in oracle_region(buf, seed) {
        out.set(p.x, p.y, color);
    }
    out
}

fn oracle_pattern(
    buf: &PixelBuffer,
    seed: Point,
    primary: Color,
    secondary: Color,
    pattern: &PatternMatrix,
) -> PixelBuffer {
    let mut out = buf.clone();
    if buf.get(seed.x, seed.y).ok() == Some(primary) {
        return out;
    }
    for p in oracle_region(buf, seed) {
        let c = if pattern.is_primary(p.x, p.y) {
            primary
        } else {
            secondary
        };
        out.set(p.x, p.y, c);
    }
    out
}

#[test]
fn flood_fill_matches_oracle() {
    let mut rng = Lcg(7);
    for round in 0..40 {
        let (w, h) = (3 + rng.below(20) as u32, 3 + rng.below(20) as u32);
        let original = random_layout(&mut rng, w, h);
        let seed = Point::new(rng.below(w as u64) as i32, rng.below(h as u64) as i32);
        let color = PALETTE[rng.below(3) as usize];
        let expected = oracle_flood(&original, seed, color);

        for strategy in STRATEGIES {
            let mut buf = original.clone();
            let report = flood_fill_with(&mut buf, seed, color, strategy);
            assert_eq!(buf, expected, "round {} {:?} seed {:?}", round, strategy, seed);
            assert_eq!(
                report.painted,
                buf.pixels()
                    .iter()
                    .zip(original.pixels())
                    .filter(|(a, b)| a != b)
                    .count(),
                "round {} {:?}",
                round,
                strategy
            );
        }
    }
}

#[test]
fn pattern_fill_matches_oracle() {
    let mut rng = Lcg(99);
    let pattern = PatternMatrix::from_rows(&[
        "11001100", "01100110", "00110011", "10011001", "11001100", "01100110", "00110011",
        "10011001",
    ])
    .unwrap();
    for round in 0..40 {
        let (w, h) = (3 + rng.below(20) as u32, 3 + rng.below(20) as u32);
        let original = random_layout(&mut rng, w, h);
        let seed = Point::new(rng.below(w as u64) as i32, rng.below(h as u64) as i32);
        let primary = PALETTE[rng.below(3) as usize];
        let secondary = PALETTE[rng.below(3) as usize];
        let expected = oracle_pattern(&original, seed, primary, secondary, &pattern);

        for strategy in STRATEGIES {
            let mut buf = original.clone();
            pattern_fill_with(&mut buf, seed, primary, secondary, &pattern, strategy);
            assert_eq!(buf, expected, "round {} {:?} seed {:?}", round, strategy, seed);
        }
    }
}

#[test]
fn flood_fill_is_idempotent() {
    let mut rng = Lcg(3);
    for _ in 0..20 {
        let mut once = random_layout(&mut rng, 16, 12);
        let seed = Point::new(rng.below(16) as i32, rng.below(12) as i32);
        flood_fill_with(&mut once, seed, Color::BLUE, FillStrategy::Scanline);
        let mut twice = once.clone();
        flood_fill_with(&mut twice, seed, Color::BLUE, FillStrategy::Scanline);
        assert_eq!(once, twice);
    }
}

#[test]
fn flood_fill_never_crosses_other_colors() {
    let mut rng = Lcg(11);
    for _ in 0..20 {
        let original = random_layout(&mut rng, 14, 14);
        let seed = Point::new(rng.below(14) as i32, rng.below(14) as i32);
        let target = original.get(seed.x, seed.y).unwrap();
        for strategy in STRATEGIES {
            let mut buf = original.clone();
            flood_fill_with(&mut buf, seed, Color::GREEN, strategy);
            for (after, before) in buf.pixels().iter().zip(original.pixels()) {
                if before != &target {
                    assert_eq!(after, before);
                }
            }
        }
    }
}

#[test]
fn pattern_fill_twice_is_noop() {
    let mut buf = PixelBuffer::new(10, 10, Color::WHITE).unwrap();
    let pattern = PatternMatrix::checkerboard();
    // (0, 0) lands on a primary cell of the checkerboard
    pattern_fill_with(
        &mut buf,
        Point::new(0, 0),
        Color::RED,
        Color::BLUE,
        &pattern,
        FillStrategy::Scanline,
    );
    let before = buf.clone();
    let report = pattern_fill_with(
        &mut buf,
        Point::new(0, 0),
        Color::RED,
        Color::BLUE,
        &pattern,
        FillStrategy::PixelStack,
    );
    assert!(report.is_empty());
    assert_eq!(buf, before);
}

/// Surface wrapper counting reads, used to check fill cost
struct CountingSurface {
    inner: PixelBuffer,
    reads: Cell<usize>,
}

impl PixelSurface for CountingSurface {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn get(&self, x: i32, y: i32) -> Result<Color> {
        self.reads.set(self.reads.get() + 1);
        self.inner.get(x, y)
    }

    fn set(&mut self, x: i32, y: i32, color: Color) {
        self.inner.set(x, y, color)
    }

    fn clear(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        self.inner.clear(x, y, width, height, color)
    }
}

#[test]
fn fill_cost_follows_region_size() {
    // a 3x3 pocket enclosed by a black frame inside a large surface
    let mut inner = PixelBuffer::new(1024, 1024, Color::WHITE).unwrap();
    inner.clear(500, 500, 5, 5, Color::BLACK);
    inner.clear(501, 501, 3, 3, Color::WHITE);

    for strategy in STRATEGIES {
        let mut surface = CountingSurface {
            inner: inner.clone(),
            reads: Cell::new(0),
        };
        let report = flood_fill_with(&mut surface, Point::new(502, 502), Color::RED, strategy);
        assert_eq!(report.painted, 9);
        assert_eq!(
            report.bounds,
            Some((Point::new(501, 501), Point::new(503, 503)))
        );
        assert!(
            surface.reads.get() < 100,
            "{:?} read {} pixels for a 9 pixel region",
            strategy,
            surface.reads.get()
        );
    }
}
