//! Vertex cleanup shared by every engine implementation.
//!
//! `clean_shape` follows Clipper's CleanPolygons rules (drop a vertex that is
//! within tolerance of its predecessor, or that lies within tolerance of the line
//! through its neighbours) but repeats the sweep until nothing changes, so the
//! result is a fixed point.

use lettercut_types::{Point, Polygon, Shape};

pub fn clean_shape(shape: &Shape, tolerance: f64) -> Shape {
    let d2 = tolerance * tolerance;
    let polygons = shape
        .polygons
        .iter()
        .filter_map(|poly| {
            let ring = clean_ring(&poly.points, d2);
            (ring.len() >= 3).then(|| Polygon::new(ring))
        })
        .collect();
    Shape::new(polygons)
}

pub fn remove_duplicates(shape: &Shape) -> Shape {
    let polygons = shape
        .polygons
        .iter()
        .filter_map(|poly| {
            let mut ring: Vec<Point> = Vec::with_capacity(poly.points.len());
            for &p in &poly.points {
                if ring.last() != Some(&p) {
                    ring.push(p);
                }
            }
            while ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            (ring.len() >= 3).then(|| Polygon::new(ring))
        })
        .collect();
    Shape::new(polygons)
}

fn clean_ring(points: &[Point], d2: f64) -> Vec<Point> {
    let mut ring = points.to_vec();
    // A repeated closing point would make its corner look collinear.
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    loop {
        if ring.len() < 3 {
            return Vec::new();
        }
        let next = clean_pass(&ring, d2);
        if next.len() == ring.len() {
            return ring;
        }
        ring = next;
    }
}

fn clean_pass(ring: &[Point], d2: f64) -> Vec<Point> {
    let n = ring.len();
    let mut out: Vec<Point> = Vec::with_capacity(n);
    for i in 0..n {
        let cur = ring[i];
        let prev = out.last().copied().unwrap_or(ring[n - 1]);
        let next = ring[(i + 1) % n];
        if cur.distance_squared(&prev) <= d2 {
            continue;
        }
        if slopes_near_collinear(prev, cur, next, d2) {
            continue;
        }
        out.push(cur);
    }
    out
}

/// Whichever of the three points lies between the other two (along the
/// dominant axis) is tested against the line through the outer pair.
fn slopes_near_collinear(a: Point, b: Point, c: Point, d2: f64) -> bool {
    let between = |p: i64, q: i64, r: i64| (p > q) == (p < r);
    if (a.x - b.x).abs() > (a.y - b.y).abs() {
        if between(a.x, b.x, c.x) {
            distance_from_line_squared(a, b, c) < d2
        } else if between(b.x, a.x, c.x) {
            distance_from_line_squared(b, a, c) < d2
        } else {
            distance_from_line_squared(c, a, b) < d2
        }
    } else if between(a.y, b.y, c.y) {
        distance_from_line_squared(a, b, c) < d2
    } else if between(b.y, a.y, c.y) {
        distance_from_line_squared(b, a, c) < d2
    } else {
        distance_from_line_squared(c, a, b) < d2
    }
}

fn distance_from_line_squared(pt: Point, a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return pt.distance_squared(&a);
    }
    let cross = dx * (pt.y - a.y) as f64 - dy * (pt.x - a.x) as f64;
    cross * cross / len2
}
