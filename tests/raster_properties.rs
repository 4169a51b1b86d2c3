//! Geometric properties of the rasterizers over a grid of inputs

use rfcanvas::rendering::raster::{rasterize_circle, rasterize_line, rasterize_quadratic_bezier};
use rfcanvas::Point;
use std::collections::HashSet;

fn sample_points() -> Vec<Point> {
    let coords = [-7, -3, -1, 0, 1, 2, 5, 11];
    let mut out = Vec::new();
    for &x in &coords {
        for &y in &coords {
            out.push(Point::new(x, y));
        }
    }
    out
}

#[test]
fn line_contains_endpoints_and_is_connected() {
    let points = sample_points();
    for &a in &points {
        for &b in &points {
            let line: Vec<Point> = rasterize_line(a, b).collect();
            assert!(line.contains(&a), "{:?}->{:?} misses start", a, b);
            assert!(line.contains(&b), "{:?}->{:?} misses end", a, b);
            for pair in line.windows(2) {
                let dx = (pair[1].x - pair[0].x).abs();
                let dy = (pair[1].y - pair[0].y).abs();
                assert_eq!(dx.max(dy), 1, "{:?}->{:?} has a gap at {:?}", a, b, pair);
            }
        }
    }
}

#[test]
fn line_content_is_symmetric() {
    let points = sample_points();
    for &a in &points {
        for &b in &points {
            let forward: HashSet<Point> = rasterize_line(a, b).collect();
            let backward: HashSet<Point> = rasterize_line(b, a).collect();
            assert_eq!(forward, backward, "{:?} <-> {:?}", a, b);
        }
    }
}

#[test]
fn long_line_has_expected_length() {
    // one pixel per step along the driving axis
    let line: Vec<Point> = rasterize_line(Point::new(0, 0), Point::new(100, 37)).collect();
    assert_eq!(line.len(), 101);
}

#[test]
fn circle_points_lie_on_radius() {
    for center in [Point::new(0, 0), Point::new(-5, 9), Point::new(40, 40)] {
        for r in 0..40 {
            for p in rasterize_circle(center, r).unwrap() {
                let d = center.distance(p).round() as i32;
                assert!((d - r).abs() <= 1, "r={} point {:?} at distance {}", r, p, d);
            }
        }
    }
}

#[test]
fn circle_is_closed_under_octant_symmetry() {
    let c = Point::new(3, -4);
    for r in 0..30 {
        let set: HashSet<Point> = rasterize_circle(c, r).unwrap().collect();
        for p in &set {
            let (a, b) = (p.x - c.x, p.y - c.y);
            for (ox, oy) in [
                (a, b),
                (a, -b),
                (-a, b),
                (-a, -b),
                (b, a),
                (b, -a),
                (-b, a),
                (-b, -a),
            ] {
                assert!(
                    set.contains(&Point::new(c.x + ox, c.y + oy)),
                    "r={} missing reflection of {:?}",
                    r,
                    p
                );
            }
        }
    }
}

#[test]
fn bezier_degenerate_and_straight() {
    for p in sample_points() {
        let curve: HashSet<Point> = rasterize_quadratic_bezier(p, p, p).collect();
        assert_eq!(curve.len(), 1);
        assert!(curve.contains(&p));
    }

    // control point on the chord gives a straight horizontal run
    let curve: Vec<Point> =
        rasterize_quadratic_bezier(Point::new(0, 5), Point::new(10, 5), Point::new(20, 5)).collect();
    assert_eq!(curve.len(), 21);
    assert!(curve.iter().all(|p| p.y == 5));
}
