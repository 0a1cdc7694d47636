use approx::assert_relative_eq;
use clip_kernel::{BooleanEngine, ClipError, ClipperEngine, OffsetOptions};
use glyph_outline::BlockFont;
use lettercut_engine::{generate_geometry, generate_geometry_with, svg_document};
use lettercut_types::{ProcessingConfig, Shape};
use proptest::prelude::*;

fn no_offset() -> ProcessingConfig {
    ProcessingConfig {
        offset_mm: 0.0,
        ..ProcessingConfig::default()
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────

#[test]
fn two_letters_are_bridged_into_one() {
    let config = ProcessingConfig {
        units_per_mm: 3.78,
        offset_mm: 0.0,
        min_bridge_mm: 1.0,
        bridge_max_gap_mm: 20.0,
        auto_tighten: false,
        force_bridge_if_still_disconnected: Some(true),
        ..ProcessingConfig::default()
    };
    let result = generate_geometry("AB", &BlockFont::new(), 100.0, &config);
    let d = &result.diagnostics;
    assert_eq!(d.components_before_repair, 2);
    assert_eq!(d.components_after_repair, 1);
    assert!(d.used_bridge_count >= 1);
    assert_eq!(d.applied_letter_spacing_mm, 0.0);
}

#[test]
fn empty_text_gives_empty_result() {
    let config = ProcessingConfig {
        letter_spacing_mm: 0.4,
        ..ProcessingConfig::default()
    };
    for text in ["", "  \r\n  "] {
        let result = generate_geometry(text, &BlockFont::new(), 100.0, &config);
        assert_eq!(result.original_path, "");
        assert_eq!(result.processed_path, "");
        assert!(result.polygons.is_empty());
        assert_eq!(result.diagnostics.components_after_repair, 0);
        assert_eq!(result.diagnostics.applied_letter_spacing_mm, 0.4);
    }
}

#[test]
fn single_bar_needs_no_bridge() {
    let result = generate_geometry("I", &BlockFont::new(), 100.0, &no_offset());
    assert_eq!(result.diagnostics.components_before_repair, 1);
    assert_eq!(result.diagnostics.components_after_repair, 1);
    assert_eq!(result.diagnostics.used_bridge_count, 0);
    // 10 x 70 layout units
    let shape = Shape::from_layout_polygons(&result.polygons);
    assert_relative_eq!(shape.net_area().abs(), 700.0e6, max_relative = 1e-6);
}

#[test]
fn word_with_defaults_connects() {
    let result = generate_geometry("ALVIN", &BlockFont::new(), 100.0, &ProcessingConfig::default());
    assert!(result.diagnostics.components_before_repair > 1);
    assert_eq!(result.diagnostics.components_after_repair, 1);
    assert!(!result.processed_path.is_empty());
}

#[test]
fn two_stroke_glyph_is_joined() {
    let result = generate_geometry("i", &BlockFont::new(), 100.0, &no_offset());
    assert_eq!(result.diagnostics.components_before_repair, 2);
    assert_eq!(result.diagnostics.components_after_repair, 1);
    assert_eq!(result.diagnostics.used_bridge_count, 1);
}

#[test]
fn multi_line_text_connects() {
    let result = generate_geometry("AB\nCD", &BlockFont::new(), 100.0, &ProcessingConfig::default());
    assert_eq!(result.diagnostics.components_before_repair, 4);
    assert_eq!(result.diagnostics.components_after_repair, 1);
}

#[test]
fn without_force_bridge_far_letters_stay_apart() {
    let config = ProcessingConfig {
        offset_mm: 0.0,
        bridge_max_gap_mm: 0.5,
        auto_tighten: false,
        force_bridge_if_still_disconnected: Some(false),
        ..ProcessingConfig::default()
    };
    let result = generate_geometry("HH", &BlockFont::new(), 100.0, &config);
    assert_eq!(result.diagnostics.used_bridge_count, 0);
    assert_eq!(result.diagnostics.components_after_repair, 2);
}

#[test]
fn auto_tighten_closes_small_gaps() {
    // Gap between block glyphs is 10 layout units at size 100.
    let config = ProcessingConfig {
        units_per_mm: 4.0,
        offset_mm: 0.0,
        auto_tighten: true,
        auto_tighten_max_mm: 2.75,
        ..ProcessingConfig::default()
    };
    let result = generate_geometry("HH", &BlockFont::new(), 100.0, &config);
    let d = &result.diagnostics;
    assert_eq!(d.components_before_repair, 2);
    assert_eq!(d.used_bridge_count, 0);
    assert_eq!(d.components_after_repair, 1);
    // Budget is 11 layout units in six steps; only the last one overlaps.
    assert_relative_eq!(d.applied_letter_spacing_mm, -2.75, epsilon = 1e-9);
}

#[test]
fn offset_thickens_the_outline() {
    let thin = generate_geometry("I", &BlockFont::new(), 100.0, &no_offset());
    let thick = generate_geometry("I", &BlockFont::new(), 100.0, &ProcessingConfig::default());
    let area = |polys: &[Vec<[f64; 2]>]| Shape::from_layout_polygons(polys).net_area().abs();
    assert!(area(&thick.polygons) > area(&thin.polygons));
    // original path is the pre-repair layout in both cases
    assert_eq!(thin.original_path, thick.original_path);
}

#[test]
fn original_path_is_formatted_layout() {
    let result = generate_geometry("I", &BlockFont::new(), 100.0, &no_offset());
    assert_eq!(result.original_path, "M 25 100 L 35 100 L 35 30 L 25 30 L 25 100 Z");
}

#[test]
fn svg_wraps_processed_path_with_padding() {
    let result = generate_geometry("I", &BlockFont::new(), 100.0, &no_offset());
    let svg = svg_document(&result);
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("viewBox=\"15 20 30 90\""));
    assert!(svg.contains(&format!("d=\"{}\"", result.processed_path)));
    assert!(svg.contains("fill-rule=\"evenodd\""));
}

#[test]
fn svg_of_empty_result_uses_placeholder_box() {
    let result = generate_geometry("", &BlockFont::new(), 100.0, &ProcessingConfig::default());
    let svg = svg_document(&result);
    assert!(svg.contains("width=\"120\" height=\"120\" viewBox=\"-10 -10 120 120\""));
}

#[test]
fn diagnostics_serialize_camel_case() {
    let result = generate_geometry("AB", &BlockFont::new(), 100.0, &ProcessingConfig::default());
    let json = serde_json::to_string(&result.diagnostics).unwrap();
    assert!(json.contains("\"componentsBeforeRepair\":2"));
    assert!(json.contains("\"usedBridgeCount\""));
}

// ── Engine failure recovery ───────────────────────────────────────────────

/// Delegates to Clipper but fails every offset.
struct NoOffsetEngine(ClipperEngine);

impl BooleanEngine for NoOffsetEngine {
    fn union(&self, a: &Shape, b: &Shape) -> Result<Shape, ClipError> {
        self.0.union(a, b)
    }

    fn offset(&self, _: &Shape, _: f64, _: &OffsetOptions) -> Result<Shape, ClipError> {
        Err(ClipError::Backend {
            operation: "offset".into(),
            message: "offset unavailable".into(),
        })
    }

    fn separate_shapes(&self, shape: &Shape) -> Result<Vec<Shape>, ClipError> {
        self.0.separate_shapes(shape)
    }
}

#[test]
fn failed_offset_falls_back_to_repaired_shape() {
    let engine = NoOffsetEngine(ClipperEngine::new());
    let config = ProcessingConfig::default();
    let recovered = generate_geometry_with(&engine, "I", &BlockFont::new(), 100.0, &config);
    let unthickened = generate_geometry("I", &BlockFont::new(), 100.0, &no_offset());
    assert_eq!(recovered.polygons, unthickened.polygons);
    assert!(!recovered.processed_path.is_empty());
}

// ── Properties ────────────────────────────────────────────────────────────

#[test]
fn doubling_units_while_halving_lengths_is_equivalent() {
    let base = ProcessingConfig {
        units_per_mm: 2.0,
        offset_mm: 0.4,
        min_bridge_mm: 2.0,
        bridge_max_gap_mm: 24.0,
        flatten_tolerance_mm: 0.1,
        auto_tighten_max_mm: 3.0,
        ..ProcessingConfig::default()
    };
    let doubled = ProcessingConfig {
        units_per_mm: 4.0,
        offset_mm: 0.2,
        min_bridge_mm: 1.0,
        bridge_max_gap_mm: 12.0,
        flatten_tolerance_mm: 0.05,
        auto_tighten_max_mm: 1.5,
        ..ProcessingConfig::default()
    };
    let a = generate_geometry("ALVIN", &BlockFont::new(), 100.0, &base);
    let b = generate_geometry("ALVIN", &BlockFont::new(), 100.0, &doubled);
    assert_eq!(a.processed_path, b.processed_path);
    assert_eq!(a.diagnostics.used_bridge_count, b.diagnostics.used_bridge_count);
    assert_relative_eq!(
        a.diagnostics.applied_letter_spacing_mm,
        2.0 * b.diagnostics.applied_letter_spacing_mm,
        epsilon = 1e-9
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn non_empty_text_never_yields_empty_geometry(
        text in "[A-Za-z0-9.:!?]{1,5}",
        offset_mm in 0.0f64..0.5,
        auto_tighten in any::<bool>(),
    ) {
        let config = ProcessingConfig {
            offset_mm,
            auto_tighten,
            ..ProcessingConfig::default()
        };
        let result = generate_geometry(&text, &BlockFont::new(), 100.0, &config);
        prop_assert!(!result.processed_path.is_empty());
        prop_assert!(!result.polygons.is_empty());
    }
}
