use serde::{Deserialize, Serialize};

/// Fixed-point scale between layout units and working units.
/// Every coordinate handed to the boolean engine is multiplied by this.
pub const SCALE: f64 = 1000.0;

/// A point in working units (integer fixed-point space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Round a layout-unit coordinate pair into working units.
    pub fn from_layout(x: f64, y: f64) -> Self {
        Self {
            x: (x * SCALE).round() as i64,
            y: (y * SCALE).round() as i64,
        }
    }

    /// Convert back to layout units.
    pub fn to_layout(self) -> [f64; 2] {
        [self.x as f64 / SCALE, self.y as f64 / SCALE]
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx * dx + dy * dy
    }
}

/// Axis-aligned bounding box in working units. `top` is the minimum Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Bounds {
    /// Bounds of a point set, `None` when the set is empty.
    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds {
            left: first.x,
            right: first.x,
            top: first.y,
            bottom: first.y,
        };
        for p in iter {
            b.left = b.left.min(p.x);
            b.right = b.right.max(p.x);
            b.top = b.top.min(p.y);
            b.bottom = b.bottom.max(p.y);
        }
        Some(b)
    }

    /// True when `inner` lies fully within `self` (edges inclusive).
    pub fn contains(&self, inner: &Bounds) -> bool {
        self.left <= inner.left
            && self.right >= inner.right
            && self.top <= inner.top
            && self.bottom >= inner.bottom
    }
}

/// A closed ring of working-unit points. The last point connects back to the first;
/// the closing point is never stored twice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// At least three points, the minimum for a ring with area.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Shoelace area. The sign depends on winding; use `abs()` for size.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut a = 0.0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            a += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
        }
        a / 2.0
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.points)
    }

    /// Even-odd ray cast. Points lying on an edge count as inside.
    pub fn contains_point(&self, pt: Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let (px, py) = (pt.x as f64, pt.y as f64);
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.points[i].x as f64, self.points[i].y as f64);
            let (xj, yj) = (self.points[j].x as f64, self.points[j].y as f64);

            let dx = xj - xi;
            let dy = yj - yi;
            let rx = px - xi;
            let ry = py - yi;
            let cross = dx * ry - dy * rx;
            if cross.abs() < 1e-6 {
                let dot = rx * dx + ry * dy;
                if dot >= 0.0 && dot <= dx * dx + dy * dy {
                    return true;
                }
            }

            if (yi > py) != (yj > py) && px < dx * (py - yi) / dy + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// A set of rings interpreted together under the nonzero fill rule:
/// outer contours and holes live side by side in one flat list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub polygons: Vec<Polygon>,
}

impl Shape {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a shape from layout-unit polylines, dropping rings with fewer than 3 points.
    pub fn from_layout_polygons(polys: &[Vec<[f64; 2]>]) -> Self {
        let polygons = polys
            .iter()
            .filter(|poly| poly.len() >= 3)
            .map(|poly| Polygon::new(poly.iter().map(|p| Point::from_layout(p[0], p[1])).collect()))
            .collect();
        Self { polygons }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// All vertices of all rings in ring order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.polygons.iter().flat_map(|p| p.points.iter())
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(self.points())
    }

    /// Sum of signed ring areas; holes wound opposite their outer subtract.
    pub fn net_area(&self) -> f64 {
        self.polygons.iter().map(Polygon::signed_area).sum()
    }

    /// Downscale to layout units.
    pub fn to_layout_polygons(&self) -> Vec<Vec<[f64; 2]>> {
        self.polygons
            .iter()
            .map(|poly| poly.points.iter().map(|p| p.to_layout()).collect())
            .collect()
    }
}
