use lettercut_types::{Bounds, Shape};

use crate::clean;
use crate::types::{ClipError, OffsetOptions};

/// Polygon boolean capability consumed by the repair engine and the pipeline.
/// Implemented by ClipperEngine (wraps the Clipper library).
///
/// Every operation takes its inputs by reference and returns a new shape.
/// An `Ok` result may be empty; callers decide whether that counts as failure.
pub trait BooleanEngine {
    /// Union of two shapes under the nonzero fill rule.
    fn union(&self, a: &Shape, b: &Shape) -> Result<Shape, ClipError>;

    /// Grow (`delta > 0`) or shrink (`delta < 0`) every ring by `delta` working units.
    fn offset(&self, shape: &Shape, delta: f64, options: &OffsetOptions) -> Result<Shape, ClipError>;

    /// Split a shape into its connected regions, each an outer ring plus its holes.
    fn separate_shapes(&self, shape: &Shape) -> Result<Vec<Shape>, ClipError>;

    /// Merge vertices closer than `tolerance` and drop near-collinear ones.
    fn clean(&self, shape: &Shape, tolerance: f64) -> Result<Shape, ClipError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ClipError::InvalidInput {
                reason: format!("clean tolerance must be a non-negative number, got {tolerance}"),
            });
        }
        Ok(clean::clean_shape(shape, tolerance))
    }

    /// Remove exact consecutive duplicate points.
    fn remove_duplicates(&self, shape: &Shape) -> Shape {
        clean::remove_duplicates(shape)
    }

    fn shape_bounds(&self, shape: &Shape) -> Option<Bounds> {
        shape.bounds()
    }
}
