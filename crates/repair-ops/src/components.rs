//! Containment-based grouping of contours into letter components.
//!
//! Each contour's parent is the smallest larger contour that encloses it, so
//! an outer ring, its holes and any islands inside those holes form one
//! component. This approximates connectivity for ordinary Latin glyphs; the
//! boolean engine's `separate_shapes` is the exact check.

use lettercut_types::{Bounds, Polygon, Shape};

/// Partition the rings of `shape` into components, in order of first appearance.
pub fn text_components(shape: &Shape) -> Vec<Shape> {
    let polys: Vec<&Polygon> = shape.polygons.iter().filter(|p| p.is_valid()).collect();
    let n = polys.len();
    if n == 0 {
        return Vec::new();
    }

    let bounds: Vec<Option<Bounds>> = polys.iter().map(|p| p.bounds()).collect();
    let areas: Vec<f64> = polys.iter().map(|p| p.signed_area().abs()).collect();

    let parent: Vec<Option<usize>> = (0..n)
        .map(|i| {
            let inner = bounds[i]?;
            let mut best: Option<(usize, f64)> = None;
            for j in 0..n {
                if i == j || areas[j] <= areas[i] {
                    continue;
                }
                match bounds[j] {
                    Some(outer) if outer.contains(&inner) => {}
                    _ => continue,
                }
                if !polys[j].contains_point(polys[i].points[0]) {
                    continue;
                }
                if best.map_or(true, |(_, area)| areas[j] < area) {
                    best = Some((j, areas[j]));
                }
            }
            best.map(|(j, _)| j)
        })
        .collect();

    // Parents always have strictly larger area, so the walk terminates.
    let root_of = |mut idx: usize| {
        while let Some(p) = parent[idx] {
            idx = p;
        }
        idx
    };

    let mut groups: Vec<(usize, Vec<Polygon>)> = Vec::new();
    for (i, poly) in polys.iter().enumerate() {
        let root = root_of(i);
        match groups.iter_mut().find(|(r, _)| *r == root) {
            Some((_, members)) => members.push((*poly).clone()),
            None => groups.push((root, vec![(*poly).clone()])),
        }
    }

    groups.into_iter().map(|(_, members)| Shape::new(members)).collect()
}

/// Number of components in `shape`.
pub fn component_count(shape: &Shape) -> usize {
    text_components(shape).len()
}
