//! The text-to-geometry pipeline.
//!
//! layout → flatten → clean → auto-tighten → repair → offset → format.
//! Every stage takes a shape and returns a new one; a failed or empty boolean
//! result falls back to the last good shape, so the pipeline itself never errors.

use clip_kernel::{BooleanEngine, ClipperEngine, OffsetOptions};
use glyph_outline::{build_text_path, flatten, normalize_text, FontFace};
use lettercut_types::{
    Diagnostics, GeometryResult, ProcessingConfig, Shape, WorkingParams,
};
use repair_ops::{
    auto_tighten, component_count, repair_connectivity, safe_clean_dedupe, RepairParams,
    ROUND_PRECISION,
};
use tracing::{debug, info, instrument, warn};

use crate::export::{path_data, PATH_DECIMALS};

/// One flattened layout at a given letter spacing.
#[derive(Debug, Clone)]
pub struct LayoutBuild {
    /// Letter spacing in layout units.
    pub spacing: f64,
    /// Flattened rings in layout units.
    pub raw: Vec<Vec<[f64; 2]>>,
    /// `raw` formatted as path data.
    pub original_path: String,
    /// `raw` in working units, degenerate rings dropped.
    pub shape: Shape,
}

/// Lay out and flatten `text` at `spacing`.
pub fn build_layout(
    font: &dyn FontFace,
    text: &str,
    size: f64,
    spacing: f64,
    tolerance: f64,
) -> LayoutBuild {
    let path = build_text_path(font, text, size, spacing);
    let raw = flatten(&path, tolerance);
    LayoutBuild {
        spacing,
        original_path: path_data(&raw, PATH_DECIMALS),
        shape: Shape::from_layout_polygons(&raw),
        raw,
    }
}

/// Run the pipeline with the Clipper-backed engine.
pub fn generate_geometry(
    text: &str,
    font: &dyn FontFace,
    size: f64,
    config: &ProcessingConfig,
) -> GeometryResult {
    generate_geometry_with(&ClipperEngine::new(), text, font, size, config)
}

/// Run the pipeline against any boolean engine.
#[instrument(skip(engine, font, config), fields(chars = text.chars().count()))]
pub fn generate_geometry_with(
    engine: &dyn BooleanEngine,
    text: &str,
    font: &dyn FontFace,
    size: f64,
    config: &ProcessingConfig,
) -> GeometryResult {
    let text = normalize_text(text);
    if text.is_empty() {
        return GeometryResult::empty(config.letter_spacing_mm);
    }
    let wp = config.working_params();

    let initial = build_layout(font, &text, size, wp.letter_spacing, wp.flatten_tolerance);
    if initial.raw.is_empty() || initial.shape.is_empty() {
        debug!("layout produced no rings");
        return GeometryResult {
            original_path: initial.original_path,
            ..GeometryResult::empty(config.letter_spacing_mm)
        };
    }

    let mut adopted = initial.clone();
    let mut merged = safe_clean_dedupe(engine, &initial.shape, &initial.shape);
    let components_before = component_count(&merged);
    info!(components_before, "layout cleaned");

    if wp.auto_tighten && components_before > 1 && wp.max_tighten > 0.0 {
        let tightened = auto_tighten(engine, wp.letter_spacing, wp.max_tighten, |spacing| {
            let build = build_layout(font, &text, size, spacing, wp.flatten_tolerance);
            let shape = build.shape.clone();
            (build, shape)
        });
        if let Some(found) = tightened {
            adopted = found.layout;
            merged = found.shape;
        }
    }

    let repaired = repair_connectivity(engine, &merged, &repair_params(&wp));
    let mut merged = repaired.shape;
    if merged.is_empty() {
        merged = initial.shape.clone();
    }
    let components_after = component_count(&merged);

    let thickened = thicken(engine, &merged, wp.offset);
    let polygons = if !thickened.is_empty() {
        thickened.to_layout_polygons()
    } else if !merged.is_empty() {
        merged.to_layout_polygons()
    } else {
        adopted.raw.clone()
    };

    let applied_letter_spacing_mm = wp.spacing_to_mm(adopted.spacing);
    info!(
        components_before,
        components_after,
        bridges = repaired.bridges_used,
        applied_letter_spacing_mm,
        "geometry generated"
    );

    GeometryResult {
        original_path: adopted.original_path,
        processed_path: path_data(&polygons, PATH_DECIMALS),
        polygons,
        diagnostics: Diagnostics {
            components_before_repair: components_before,
            components_after_repair: components_after,
            applied_letter_spacing_mm,
            used_bridge_count: repaired.bridges_used,
        },
    }
}

fn repair_params(wp: &WorkingParams) -> RepairParams {
    RepairParams {
        bridge_width: wp.bridge_width,
        max_gap: wp.max_gap,
        force_bridge: wp.force_bridge,
    }
}

/// Grow `shape` by `offset` working units with round joins. Returns `shape`
/// unchanged when the offset is zero, fails, or empties the shape.
fn thicken(engine: &dyn BooleanEngine, shape: &Shape, offset: f64) -> Shape {
    if offset <= 0.0 || shape.is_empty() {
        return shape.clone();
    }
    match engine.offset(shape, offset, &OffsetOptions::round(ROUND_PRECISION)) {
        Ok(grown) if !grown.is_empty() => safe_clean_dedupe(engine, &grown, shape),
        Ok(_) => {
            debug!(offset, "offset produced nothing, keeping repaired shape");
            shape.clone()
        }
        Err(e) => {
            warn!(offset, error = %e, "offset failed, keeping repaired shape");
            shape.clone()
        }
    }
}
