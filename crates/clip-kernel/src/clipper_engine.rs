//! ClipperEngine: boolean engine backed by the Clipper library via `geo-clipper`.

use std::panic::{self, AssertUnwindSafe};

use geo::MultiPolygon;
use geo_clipper::{Clipper, EndType, JoinType};
use lettercut_types::Shape;
use tracing::debug;

use crate::convert::{geo_to_regions, geo_to_shape, shape_to_geo};
use crate::traits::BooleanEngine;
use crate::types::{ClipError, JoinStyle, OffsetOptions};

/// Coordinates are already integral working units, so no extra scaling is
/// applied on the way into Clipper's integer space.
const CLIPPER_FACTOR: f64 = 1.0;

/// Largest coordinate magnitude Clipper accepts without losing integer precision.
const MAX_COORD: i64 = 1 << 52;

#[derive(Debug, Clone, Copy, Default)]
pub struct ClipperEngine;

impl ClipperEngine {
    pub fn new() -> Self {
        Self
    }
}

impl BooleanEngine for ClipperEngine {
    fn union(&self, a: &Shape, b: &Shape) -> Result<Shape, ClipError> {
        check_range(a)?;
        check_range(b)?;
        let subject = shape_to_geo(a);
        let clip = shape_to_geo(b);
        let result = guarded("union", || subject.union(&clip, CLIPPER_FACTOR))?;
        geo_to_shape(&result)
    }

    fn offset(&self, shape: &Shape, delta: f64, options: &OffsetOptions) -> Result<Shape, ClipError> {
        if !delta.is_finite() {
            return Err(ClipError::InvalidInput {
                reason: format!("offset distance must be finite, got {delta}"),
            });
        }
        check_range(shape)?;
        let join = match options.join {
            JoinStyle::Round => JoinType::Round(options.round_precision.max(f64::EPSILON)),
            JoinStyle::Miter => JoinType::Miter(2.0),
        };
        let subject = shape_to_geo(shape);
        let result = guarded("offset", || {
            subject.offset(delta, join, EndType::ClosedPolygon, CLIPPER_FACTOR)
        })?;
        geo_to_shape(&result)
    }

    fn separate_shapes(&self, shape: &Shape) -> Result<Vec<Shape>, ClipError> {
        check_range(shape)?;
        let subject = shape_to_geo(shape);
        let nothing: MultiPolygon<f64> = MultiPolygon::new(Vec::new());
        // A union against nothing resolves the fill rule into disjoint regions.
        let result = guarded("separate", || subject.union(&nothing, CLIPPER_FACTOR))?;
        geo_to_regions(&result)
    }
}

fn check_range(shape: &Shape) -> Result<(), ClipError> {
    match shape
        .points()
        .find(|p| p.x.abs() > MAX_COORD || p.y.abs() > MAX_COORD)
    {
        Some(p) => Err(ClipError::InvalidInput {
            reason: format!("coordinate ({}, {}) exceeds the clipping range", p.x, p.y),
        }),
        None => Ok(()),
    }
}

/// Run a backend call, turning a panic inside it into an error value.
fn guarded<T>(operation: &str, f: impl FnOnce() -> T) -> Result<T, ClipError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        debug!(operation, %message, "clipping backend panicked");
        ClipError::Backend {
            operation: operation.to_string(),
            message,
        }
    })
}
