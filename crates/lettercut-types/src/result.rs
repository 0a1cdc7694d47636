use serde::{Deserialize, Serialize};

/// Counters describing what the pipeline did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Components of the cleaned layout before any repair.
    pub components_before_repair: usize,
    /// Components of the repaired shape (before thickening).
    pub components_after_repair: usize,
    /// Letter spacing finally used, in millimetres.
    pub applied_letter_spacing_mm: f64,
    /// Bridges unioned into the shape.
    pub used_bridge_count: usize,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryResult {
    /// Path data of the flattened layout, before repair.
    pub original_path: String,
    /// Path data of the final geometry.
    pub processed_path: String,
    /// Final polygons in layout units.
    pub polygons: Vec<Vec<[f64; 2]>>,
    pub diagnostics: Diagnostics,
}

impl GeometryResult {
    /// The degenerate result returned for empty input.
    pub fn empty(letter_spacing_mm: f64) -> Self {
        Self {
            diagnostics: Diagnostics {
                applied_letter_spacing_mm: letter_spacing_mm,
                ..Diagnostics::default()
            },
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
