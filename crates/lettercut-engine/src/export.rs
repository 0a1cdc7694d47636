//! Path-data formatting and the SVG export document.

use std::path::Path;

use lettercut_types::GeometryResult;

use crate::errors::ExportError;

/// Decimal places used for every coordinate in path data.
pub const PATH_DECIMALS: usize = 2;

/// Padding around the geometry in exported SVG documents, in layout units.
pub const SVG_PADDING: f64 = 10.0;

/// Size of the placeholder box exported for an empty result.
const EMPTY_EXTENT: f64 = 100.0;

/// Round to `decimals` places and print without trailing zeros. Negative
/// zero prints as `0`.
pub fn format_coord(value: f64, decimals: usize) -> String {
    let rounded: f64 = format!("{value:.decimals$}").parse().unwrap_or(value);
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// `M x y L x y ... Z` for every ring, separated by spaces. Empty rings are skipped.
pub fn path_data(polygons: &[Vec<[f64; 2]>], decimals: usize) -> String {
    let mut rings = Vec::with_capacity(polygons.len());
    for poly in polygons {
        let Some((first, rest)) = poly.split_first() else {
            continue;
        };
        let mut d = format!(
            "M {} {}",
            format_coord(first[0], decimals),
            format_coord(first[1], decimals)
        );
        for p in rest {
            d.push_str(&format!(
                " L {} {}",
                format_coord(p[0], decimals),
                format_coord(p[1], decimals)
            ));
        }
        d.push_str(" Z");
        rings.push(d);
    }
    rings.join(" ")
}

/// Axis-aligned extent of the result polygons as `(min_x, min_y, max_x, max_y)`.
pub fn polygon_extent(polygons: &[Vec<[f64; 2]>]) -> Option<(f64, f64, f64, f64)> {
    let mut points = polygons.iter().flatten();
    let first = points.next()?;
    let init = (first[0], first[1], first[0], first[1]);
    Some(points.fold(init, |(x0, y0, x1, y1), p| {
        (x0.min(p[0]), y0.min(p[1]), x1.max(p[0]), y1.max(p[1]))
    }))
}

/// Minimal SVG document wrapping the processed path.
pub fn svg_document(result: &GeometryResult) -> String {
    let (min_x, min_y, max_x, max_y) =
        polygon_extent(&result.polygons).unwrap_or((0.0, 0.0, EMPTY_EXTENT, EMPTY_EXTENT));
    let pad = SVG_PADDING;
    let width = max_x - min_x + 2.0 * pad;
    let height = max_y - min_y + 2.0 * pad;
    let vx = min_x - pad;
    let vy = min_y - pad;

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{vx} {vy} {w} {h}\">\n",
        w = format_coord(width, PATH_DECIMALS),
        h = format_coord(height, PATH_DECIMALS),
        vx = format_coord(vx, PATH_DECIMALS),
        vy = format_coord(vy, PATH_DECIMALS),
    ));
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"#000\" stroke-width=\"1\" fill-rule=\"evenodd\"/>\n",
        result.processed_path
    ));
    svg.push_str("</svg>\n");
    svg
}

/// Write [`svg_document`] to `path`.
pub fn write_svg(result: &GeometryResult, path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, svg_document(result)).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
