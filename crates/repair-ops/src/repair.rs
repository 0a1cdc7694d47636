//! Connectivity repair: bridges disjoint components until the shape is one piece.
//!
//! Three passes of increasing force: gap-bounded bridging between
//! left-to-right neighbours, unconditional bridging of the globally closest
//! pair, and a morphological closing. No pass ever replaces a non-empty shape
//! with an empty one.

use clip_kernel::{BooleanEngine, OffsetOptions};
use lettercut_types::{Shape, SCALE};
use tracing::{debug, info, instrument, warn};

use crate::bridge::{capsule_bridge, closest_point_pair, ClosestPair};
use crate::components::text_components;

/// Outer iterations of the gap-bounded pass.
pub const SOFT_PASSES: usize = 4;
/// Attempts of the unconditional pass.
pub const HARD_ATTEMPTS: usize = 30;
/// Arc precision for round joins, in working units.
pub const ROUND_PRECISION: f64 = 0.25 * SCALE;
/// Tolerance handed to `clean` after every union.
pub const CLEAN_TOLERANCE: f64 = 1.0;

const MIN_CLOSING_RADIUS: f64 = 20.0;

/// Repair parameters in working units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairParams {
    pub bridge_width: f64,
    pub max_gap: f64,
    pub force_bridge: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    pub shape: Shape,
    pub bridges_used: usize,
}

/// `clean` then `remove_duplicates`, keeping `shape` (or `fallback` when
/// `shape` is itself empty) if cleaning wipes it out or fails.
pub fn safe_clean_dedupe(engine: &dyn BooleanEngine, shape: &Shape, fallback: &Shape) -> Shape {
    let keep = || if shape.is_empty() { fallback.clone() } else { shape.clone() };
    match engine.clean(shape, CLEAN_TOLERANCE) {
        Ok(cleaned) => {
            let deduped = engine.remove_duplicates(&cleaned);
            if deduped.is_empty() {
                keep()
            } else {
                deduped
            }
        }
        Err(e) => {
            debug!(error = %e, "clean failed, keeping shape");
            keep()
        }
    }
}

/// Union a capsule between `pair`'s anchors into `shape`.
/// `Ok(None)` when the union comes back empty.
fn apply_bridge(
    engine: &dyn BooleanEngine,
    shape: &Shape,
    pair: &ClosestPair,
    width: f64,
) -> Result<Option<Shape>, clip_kernel::ClipError> {
    let capsule = capsule_bridge(pair.a, pair.b, width);
    if !capsule.is_valid() {
        return Ok(None);
    }
    let united = engine.union(shape, &Shape::new(vec![capsule]))?;
    if united.is_empty() {
        return Ok(None);
    }
    Ok(Some(safe_clean_dedupe(engine, &united, shape)))
}

/// Run all repair passes on `shape`.
#[instrument(skip(engine, shape), fields(rings = shape.len()))]
pub fn repair_connectivity(
    engine: &dyn BooleanEngine,
    shape: &Shape,
    params: &RepairParams,
) -> RepairOutcome {
    let mut merged = shape.clone();
    let mut bridges_used = soft_bridge_pass(engine, &mut merged, params);

    if params.force_bridge {
        bridges_used += hard_bridge_pass(engine, &mut merged, params);
        closing_pass(engine, &mut merged, params);
    }

    if merged.is_empty() {
        warn!("repair produced an empty shape, keeping input");
        merged = shape.clone();
    }

    info!(
        bridges_used,
        components = text_components(&merged).len(),
        "connectivity repair finished"
    );
    RepairOutcome {
        shape: merged,
        bridges_used,
    }
}

/// Bridge neighbouring components (sorted by left edge) whose closest
/// sampled points lie within `max_gap`.
pub fn soft_bridge_pass(engine: &dyn BooleanEngine, merged: &mut Shape, params: &RepairParams) -> usize {
    let max_gap2 = params.max_gap * params.max_gap;
    let mut used = 0;

    for pass in 0..SOFT_PASSES {
        let mut parts: Vec<(i64, Shape)> = text_components(merged)
            .into_iter()
            .map(|part| (part.bounds().map_or(i64::MAX, |b| b.left), part))
            .collect();
        if parts.len() <= 1 {
            break;
        }
        parts.sort_by_key(|(left, _)| *left);

        let mut any_bridge = false;
        for window in parts.windows(2) {
            let Some(pair) = closest_point_pair(&window[0].1, &window[1].1) else {
                continue;
            };
            if pair.dist2 > max_gap2 {
                debug!(pass, dist2 = pair.dist2, "gap too wide for soft bridge");
                continue;
            }
            match apply_bridge(engine, merged, &pair, params.bridge_width) {
                Ok(Some(next)) => {
                    *merged = next;
                    used += 1;
                    any_bridge = true;
                    debug!(pass, dist2 = pair.dist2, "soft bridge applied");
                }
                Ok(None) => debug!(pass, "soft bridge union was empty"),
                Err(e) => warn!(pass, error = %e, "soft bridge union failed"),
            }
        }

        if !any_bridge {
            break;
        }
    }
    used
}

/// Repeatedly bridge the globally closest pair of components, ignoring the gap limit.
pub fn hard_bridge_pass(engine: &dyn BooleanEngine, merged: &mut Shape, params: &RepairParams) -> usize {
    let mut used = 0;

    for attempt in 0..HARD_ATTEMPTS {
        let parts = text_components(merged);
        if parts.len() <= 1 {
            break;
        }

        let mut best: Option<ClosestPair> = None;
        for i in 0..parts.len() {
            for j in (i + 1)..parts.len() {
                if let Some(pair) = closest_point_pair(&parts[i], &parts[j]) {
                    if best.map_or(true, |b| pair.dist2 < b.dist2) {
                        best = Some(pair);
                    }
                }
            }
        }
        let Some(pair) = best else {
            break;
        };

        match apply_bridge(engine, merged, &pair, params.bridge_width) {
            Ok(Some(next)) => {
                *merged = next;
                used += 1;
                debug!(attempt, dist2 = pair.dist2, "forced bridge applied");
            }
            Ok(None) => {
                debug!(attempt, "forced bridge union was empty");
                break;
            }
            Err(e) => {
                warn!(attempt, error = %e, "forced bridge union failed");
                break;
            }
        }
    }
    used
}

/// Grow then shrink by the closing radius, fusing parts that almost touch.
/// Runs only while more than one component remains.
pub fn closing_pass(engine: &dyn BooleanEngine, merged: &mut Shape, params: &RepairParams) {
    if merged.is_empty() || text_components(merged).len() <= 1 {
        return;
    }
    let radius = (params.bridge_width * 0.6).max(MIN_CLOSING_RADIUS);
    let options = OffsetOptions::round(ROUND_PRECISION);

    let closed = engine
        .offset(merged, radius, &options)
        .and_then(|grown| {
            if grown.is_empty() {
                return Ok(grown);
            }
            engine.offset(&grown, -radius, &options)
        });
    match closed {
        Ok(shrunk) if !shrunk.is_empty() => {
            *merged = safe_clean_dedupe(engine, &shrunk, merged);
            debug!(radius, "closing adopted");
        }
        Ok(_) => debug!(radius, "closing produced nothing"),
        Err(e) => warn!(radius, error = %e, "closing failed"),
    }
}
