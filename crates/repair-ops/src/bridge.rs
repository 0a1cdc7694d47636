//! Bridge geometry: closest-point search between components and capsule
//! polygons that connect them.

use std::f64::consts::PI;

use lettercut_types::{Point, Polygon, Shape};

/// Upper bound on points examined per shape in the closest-pair search.
pub const MAX_SAMPLES: usize = 200;

/// Semicircle segments per capsule end.
pub const CAPSULE_STEPS: usize = 12;

/// Minimum distance each capsule end reaches past its anchor point.
const MIN_OVERLAP: f64 = 20.0;

/// Half-size floor of the square emitted for coincident anchors.
const MIN_SQUARE_RADIUS: f64 = 10.0;

/// Nearest sampled points between two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    pub a: Point,
    pub b: Point,
    pub dist2: f64,
}

/// Every `ceil(n / max)`-th point, or all points when there are few enough.
pub fn sample_points(points: &[Point], max_samples: usize) -> Vec<Point> {
    if points.len() <= max_samples || max_samples == 0 {
        return points.to_vec();
    }
    let step = points.len().div_ceil(max_samples);
    points.iter().step_by(step).copied().collect()
}

/// Brute-force nearest pair over the sampled vertices of `a` and `b`.
///
/// Ties keep the first pair found in iteration order.
pub fn closest_point_pair(a: &Shape, b: &Shape) -> Option<ClosestPair> {
    let a_pts = sample_points(&a.points().copied().collect::<Vec<_>>(), MAX_SAMPLES);
    let b_pts = sample_points(&b.points().copied().collect::<Vec<_>>(), MAX_SAMPLES);
    if a_pts.is_empty() || b_pts.is_empty() {
        return None;
    }

    let mut best = ClosestPair {
        a: a_pts[0],
        b: b_pts[0],
        dist2: f64::INFINITY,
    };
    for pa in &a_pts {
        for pb in &b_pts {
            let d2 = pa.distance_squared(pb);
            if d2 < best.dist2 {
                best = ClosestPair {
                    a: *pa,
                    b: *pb,
                    dist2: d2,
                };
            }
        }
    }
    Some(best)
}

/// Rounded-capsule polygon of the given `width` joining `p` and `q`.
///
/// Both ends are pushed outward along the bridge direction so the capsule
/// overlaps the shapes it connects instead of touching them at a point.
/// Anchors less than one unit apart produce a small square around `p`.
pub fn capsule_bridge(p: Point, q: Point, width: f64) -> Polygon {
    let dx = (q.x - p.x) as f64;
    let dy = (q.y - p.y) as f64;
    let len = dx.hypot(dy);

    if !len.is_finite() || len < 1.0 {
        let r = (width / 2.0).max(MIN_SQUARE_RADIUS);
        let (px, py) = (p.x as f64, p.y as f64);
        return Polygon::new(vec![
            round_point(px - r, py - r),
            round_point(px + r, py - r),
            round_point(px + r, py + r),
            round_point(px - r, py + r),
        ]);
    }

    let r = width / 2.0;
    let (ux, uy) = (dx / len, dy / len);
    let overlap = (r * 0.9).max(MIN_OVERLAP);
    let p2 = (p.x as f64 - ux * overlap, p.y as f64 - uy * overlap);
    let q2 = (q.x as f64 + ux * overlap, q.y as f64 + uy * overlap);
    let theta = (q2.1 - p2.1).atan2(q2.0 - p2.0);
    let step = PI / CAPSULE_STEPS as f64;

    let mut points = Vec::with_capacity(2 * (CAPSULE_STEPS + 1));
    for i in 0..=CAPSULE_STEPS {
        let ang = theta + PI / 2.0 - i as f64 * step;
        points.push(round_point(p2.0 + r * ang.cos(), p2.1 + r * ang.sin()));
    }
    for i in 0..=CAPSULE_STEPS {
        let ang = theta - PI / 2.0 + i as f64 * step;
        points.push(round_point(q2.0 + r * ang.cos(), q2.1 + r * ang.sin()));
    }
    Polygon::new(points)
}

fn round_point(x: f64, y: f64) -> Point {
    Point::new(x.round() as i64, y.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_keeps_small_sets() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i, 0)).collect();
        assert_eq!(sample_points(&pts, 200), pts);
    }

    #[test]
    fn sampling_strides_large_sets() {
        let pts: Vec<Point> = (0..450).map(|i| Point::new(i, 0)).collect();
        let sampled = sample_points(&pts, 200);
        // step = ceil(450 / 200) = 3
        assert_eq!(sampled.len(), 150);
        assert_eq!(sampled[1], Point::new(3, 0));
    }

    #[test]
    fn coincident_anchors_give_a_square() {
        let p = Point::new(100, 100);
        let poly = capsule_bridge(p, p, 8.0);
        assert_eq!(poly.len(), 4);
        // radius floors at 10
        assert_eq!(poly.points[0], Point::new(90, 90));
        assert_eq!(poly.points[2], Point::new(110, 110));
    }

    #[test]
    fn capsule_has_two_semicircles() {
        let poly = capsule_bridge(Point::new(0, 0), Point::new(1000, 0), 200.0);
        assert_eq!(poly.len(), 2 * (CAPSULE_STEPS + 1));
        let b = poly.bounds().unwrap();
        // ends extended by 90; both arcs sweep through theta, so the p-end arc
        // bulges toward q and the left extent is the extended anchor itself
        assert_eq!((b.left, b.right), (-90, 1190));
        assert_eq!((b.top, b.bottom), (-100, 100));
    }

    #[test]
    fn closest_pair_prefers_first_on_ties() {
        let a = Shape::new(vec![Polygon::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ])]);
        let b = Shape::new(vec![Polygon::new(vec![
            Point::new(20, 0),
            Point::new(30, 0),
            Point::new(30, 10),
            Point::new(20, 10),
        ])]);
        let pair = closest_point_pair(&a, &b).unwrap();
        assert_eq!(pair.dist2, 100.0);
        assert_eq!(pair.a, Point::new(10, 0));
        assert_eq!(pair.b, Point::new(20, 0));
    }

    #[test]
    fn closest_pair_of_empty_shape_is_none() {
        let a = Shape::new(vec![Polygon::new(vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
        ])]);
        assert!(closest_point_pair(&a, &Shape::empty()).is_none());
    }
}
