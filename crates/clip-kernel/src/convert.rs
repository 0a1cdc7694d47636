//! Conversion between working-unit shapes and `geo` geometry.

use geo::{Coord, LineString, MultiPolygon, Polygon as GeoPolygon};
use lettercut_types::{Point, Polygon, Shape};

use crate::types::ClipError;

/// Every ring becomes its own exterior; the fill rule resolves holes.
pub fn shape_to_geo(shape: &Shape) -> MultiPolygon<f64> {
    let polygons = shape
        .polygons
        .iter()
        .filter(|poly| poly.is_valid())
        .map(|poly| {
            let coords: Vec<Coord<f64>> = poly
                .points
                .iter()
                .map(|p| Coord {
                    x: p.x as f64,
                    y: p.y as f64,
                })
                .collect();
            // Polygon::new closes the ring
            GeoPolygon::new(LineString::new(coords), vec![])
        })
        .collect();
    MultiPolygon::new(polygons)
}

/// Flatten a multipolygon back into a ring list, exteriors followed by their holes.
pub fn geo_to_shape(multi: &MultiPolygon<f64>) -> Result<Shape, ClipError> {
    let mut polygons = Vec::new();
    for poly in multi.iter() {
        push_region(poly, &mut polygons)?;
    }
    Ok(Shape::new(polygons))
}

/// One connected region per geo polygon.
pub fn geo_to_regions(multi: &MultiPolygon<f64>) -> Result<Vec<Shape>, ClipError> {
    let mut regions = Vec::new();
    for poly in multi.iter() {
        let mut polygons = Vec::new();
        push_region(poly, &mut polygons)?;
        if !polygons.is_empty() {
            regions.push(Shape::new(polygons));
        }
    }
    Ok(regions)
}

fn push_region(poly: &GeoPolygon<f64>, out: &mut Vec<Polygon>) -> Result<(), ClipError> {
    if let Some(ring) = ring_points(poly.exterior())? {
        out.push(ring);
        for hole in poly.interiors() {
            if let Some(ring) = ring_points(hole)? {
                out.push(ring);
            }
        }
    }
    Ok(())
}

fn ring_points(line: &LineString<f64>) -> Result<Option<Polygon>, ClipError> {
    let mut points: Vec<Point> = Vec::with_capacity(line.0.len());
    for c in line.coords() {
        if !c.x.is_finite() || !c.y.is_finite() {
            return Err(ClipError::Backend {
                operation: "conversion".to_string(),
                message: format!("non-finite coordinate ({}, {})", c.x, c.y),
            });
        }
        points.push(Point::new(c.x.round() as i64, c.y.round() as i64));
    }
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    Ok((points.len() >= 3).then(|| Polygon::new(points)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_survive_conversion_without_closing_point() {
        let shape = Shape::new(vec![Polygon::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
        ])]);
        let geo = shape_to_geo(&shape);
        assert_eq!(geo.0.len(), 1);
        let back = geo_to_shape(&geo).unwrap();
        assert_eq!(back, shape);
    }
}
