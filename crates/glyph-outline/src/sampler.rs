//! Outline sampler: flattens path commands into closed point rings.

use lettercut_types::{OutlinePath, PathCommand};

/// Points closer than this on both axes are considered coincident.
pub const COINCIDENT_EPS: f64 = 1e-3;

const MIN_TOLERANCE: f64 = 0.05;
const MIN_CURVE_STEPS: f64 = 6.0;
const MAX_CURVE_STEPS: f64 = 48.0;

/// Number of straight segments used for a curve whose endpoints are `chord` apart.
pub fn curve_steps(chord: f64, tolerance: f64) -> usize {
    let tol = tolerance.max(MIN_TOLERANCE);
    (chord / tol).ceil().clamp(MIN_CURVE_STEPS, MAX_CURVE_STEPS) as usize
}

/// Flatten `path` into polygons, inverting the Y axis (font Y-up to output Y-down).
///
/// Closed contours repeat their first point at the end.
pub fn flatten(path: &OutlinePath, tolerance: f64) -> Vec<Vec<[f64; 2]>> {
    let mut sampler = Sampler {
        tolerance,
        polygons: Vec::new(),
        current: Vec::new(),
    };
    let mut last = (0.0, 0.0);

    for cmd in &path.commands {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                sampler.flush();
                sampler.add_point(x, y);
                last = (x, y);
            }
            PathCommand::LineTo { x, y } => {
                sampler.add_point(x, y);
                last = (x, y);
            }
            PathCommand::QuadTo { x1, y1, x, y } => {
                sampler.quadratic(last, (x1, y1), (x, y));
                last = (x, y);
            }
            PathCommand::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                sampler.cubic(last, (x1, y1), (x2, y2), (x, y));
                last = (x, y);
            }
            PathCommand::Close => sampler.close(),
        }
    }
    sampler.flush();
    sampler.polygons
}

struct Sampler {
    tolerance: f64,
    polygons: Vec<Vec<[f64; 2]>>,
    current: Vec<[f64; 2]>,
}

impl Sampler {
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.polygons.push(std::mem::take(&mut self.current));
        }
    }

    fn add_point(&mut self, x: f64, y: f64) {
        let p = [x, -y];
        match self.current.last() {
            Some(last) if coincident(last, &p) => {}
            _ => self.current.push(p),
        }
    }

    fn close(&mut self) {
        if let (Some(&first), Some(last)) = (self.current.first(), self.current.last()) {
            if !coincident(last, &first) {
                self.current.push(first);
            }
        }
    }

    fn quadratic(&mut self, p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) {
        let steps = curve_steps((p2.0 - p0.0).hypot(p2.1 - p0.1), self.tolerance);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let mt = 1.0 - t;
            let x = mt * mt * p0.0 + 2.0 * mt * t * p1.0 + t * t * p2.0;
            let y = mt * mt * p0.1 + 2.0 * mt * t * p1.1 + t * t * p2.1;
            self.add_point(x, y);
        }
    }

    fn cubic(&mut self, p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) {
        let steps = curve_steps((p3.0 - p0.0).hypot(p3.1 - p0.1), self.tolerance);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let mt = 1.0 - t;
            let a = mt * mt * mt;
            let b = 3.0 * mt * mt * t;
            let c = 3.0 * mt * t * t;
            let d = t * t * t;
            let x = a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0;
            let y = a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1;
            self.add_point(x, y);
        }
    }
}

fn coincident(a: &[f64; 2], b: &[f64; 2]) -> bool {
    (a[0] - b[0]).abs() <= COINCIDENT_EPS && (a[1] - b[1]).abs() <= COINCIDENT_EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_is_clamped() {
        assert_eq!(curve_steps(0.0, 0.05), 6);
        assert_eq!(curve_steps(1.0, 0.1), 10);
        assert_eq!(curve_steps(1000.0, 0.05), 48);
        // tolerance floors at 0.05
        assert_eq!(curve_steps(2.0, 0.0), curve_steps(2.0, 0.05));
    }

    #[test]
    fn empty_path_yields_no_polygons() {
        assert!(flatten(&OutlinePath::new(), 0.1).is_empty());
    }

    #[test]
    fn line_square_is_closed_and_flipped() {
        let path = OutlinePath {
            commands: vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 10.0, y: 0.0 },
                PathCommand::LineTo { x: 10.0, y: 10.0 },
                PathCommand::LineTo { x: 0.0, y: 10.0 },
                PathCommand::Close,
            ],
        };
        let polys = flatten(&path, 0.1);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].len(), 5);
        assert_eq!(polys[0][2], [10.0, -10.0]);
        assert_eq!(polys[0][0], polys[0][4]);
    }

    #[test]
    fn near_duplicates_are_suppressed() {
        let path = OutlinePath {
            commands: vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 0.0005, y: 0.0 },
                PathCommand::LineTo { x: 5.0, y: 0.0 },
                PathCommand::LineTo { x: 5.0, y: 5.0 },
            ],
        };
        let polys = flatten(&path, 0.1);
        assert_eq!(polys[0].len(), 3);
    }

    #[test]
    fn quadratic_is_sampled_with_minimum_steps() {
        let path = OutlinePath {
            commands: vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::QuadTo {
                    x1: 0.1,
                    y1: 0.1,
                    x: 0.2,
                    y: 0.0,
                },
            ],
        };
        let polys = flatten(&path, 0.05);
        // start point plus 6 samples
        assert_eq!(polys[0].len(), 7);
        let end = polys[0][6];
        assert!((end[0] - 0.2).abs() < 1e-12 && end[1].abs() < 1e-12);
    }

    #[test]
    fn move_flushes_previous_contour() {
        let path = OutlinePath {
            commands: vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 1.0, y: 0.0 },
                PathCommand::MoveTo { x: 5.0, y: 5.0 },
                PathCommand::LineTo { x: 6.0, y: 5.0 },
            ],
        };
        assert_eq!(flatten(&path, 0.1).len(), 2);
    }
}
