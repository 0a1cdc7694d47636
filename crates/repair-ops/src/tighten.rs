//! Auto-tighten: search smaller letter spacings for a layout that connects
//! on its own, before any bridge is added.

use clip_kernel::BooleanEngine;
use lettercut_types::Shape;
use tracing::{debug, info, instrument};

use crate::repair::CLEAN_TOLERANCE;

/// Equal steps between the base spacing and the full tighten budget.
pub const TIGHTEN_STEPS: usize = 6;

/// A candidate layout that came out as a single region.
#[derive(Debug, Clone)]
pub struct Tightened<T> {
    /// Spacing that produced it, in layout units.
    pub spacing: f64,
    /// Whatever the builder returned alongside the shape.
    pub layout: T,
    /// The candidate's outline as resolved by the engine.
    pub shape: Shape,
}

/// Try `base - max_tighten * i / 6` for `i = 1..=6` and return the first
/// candidate whose cleaned shape separates into at most one region.
///
/// `build` rebuilds the layout for a spacing and returns its raw shape.
#[instrument(skip(engine, build))]
pub fn auto_tighten<T>(
    engine: &dyn BooleanEngine,
    base_spacing: f64,
    max_tighten: f64,
    mut build: impl FnMut(f64) -> (T, Shape),
) -> Option<Tightened<T>> {
    if max_tighten <= 0.0 {
        return None;
    }

    for i in 1..=TIGHTEN_STEPS {
        let spacing = base_spacing - max_tighten * i as f64 / TIGHTEN_STEPS as f64;
        let (layout, raw) = build(spacing);

        let cleaned = engine
            .clean(&raw, CLEAN_TOLERANCE)
            .map(|c| engine.remove_duplicates(&c))
            .ok()
            .filter(|c| !c.is_empty())
            .unwrap_or(raw);

        let regions = match engine.separate_shapes(&cleaned) {
            Ok(regions) => regions,
            Err(e) => {
                debug!(step = i, error = %e, "separate failed for candidate");
                continue;
            }
        };
        debug!(step = i, spacing, regions = regions.len(), "tighten candidate");
        if regions.len() <= 1 {
            info!(spacing, step = i, "auto-tighten connected the layout");
            // Overlapping glyph rings are resolved into one outline here,
            // otherwise the containment count would still see them apart.
            let shape = match regions.into_iter().next() {
                Some(region) if !region.is_empty() => region,
                _ => cleaned,
            };
            return Some(Tightened {
                spacing,
                layout,
                shape,
            });
        }
    }
    None
}
