use serde::{Deserialize, Serialize};

use crate::geom::SCALE;

/// Parameters for one geometry pass. Millimetre values are converted to
/// layout units through `units_per_mm`, then to working units through [`SCALE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingConfig {
    /// Layout units per millimetre.
    pub units_per_mm: f64,
    /// Cutting tool width. Carried through, not consumed by any pass.
    pub kerf_mm: f64,
    /// Outward thickening applied after repair.
    pub offset_mm: f64,
    /// Width of synthesized bridges.
    pub min_bridge_mm: f64,
    /// Largest gap the soft bridging pass may span.
    pub bridge_max_gap_mm: f64,
    /// Curve flattening tolerance.
    pub flatten_tolerance_mm: f64,
    /// Extra advance added between consecutive glyphs.
    pub letter_spacing_mm: f64,
    /// Search tighter spacing before bridging.
    pub auto_tighten: bool,
    /// Largest spacing reduction the tighten search may try.
    pub auto_tighten_max_mm: f64,
    /// Run the unconditional passes when soft bridging leaves the shape split.
    /// `None` means enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_bridge_if_still_disconnected: Option<bool>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            units_per_mm: 3.78,
            kerf_mm: 0.3,
            offset_mm: 0.2,
            min_bridge_mm: 1.0,
            bridge_max_gap_mm: 12.0,
            flatten_tolerance_mm: 0.05,
            letter_spacing_mm: 0.0,
            auto_tighten: true,
            auto_tighten_max_mm: 1.5,
            force_bridge_if_still_disconnected: None,
        }
    }
}

impl ProcessingConfig {
    pub fn force_bridge(&self) -> bool {
        self.force_bridge_if_still_disconnected.unwrap_or(true)
    }

    /// Clamp and convert into the units each stage works in.
    pub fn working_params(&self) -> WorkingParams {
        let units_per_mm = self.units_per_mm.max(0.1);
        WorkingParams {
            units_per_mm,
            flatten_tolerance: (self.flatten_tolerance_mm * units_per_mm).max(0.05),
            letter_spacing: self.letter_spacing_mm * units_per_mm,
            max_tighten: (self.auto_tighten_max_mm * units_per_mm).max(0.0),
            max_gap: self.bridge_max_gap_mm.max(0.0) * units_per_mm * SCALE,
            bridge_width: self.min_bridge_mm.max(0.1) * units_per_mm * SCALE,
            offset: self.offset_mm.max(0.0) * units_per_mm * SCALE,
            auto_tighten: self.auto_tighten,
            force_bridge: self.force_bridge(),
        }
    }
}

/// Derived, clamped parameters.
///
/// `flatten_tolerance`, `letter_spacing` and `max_tighten` are in layout units;
/// `max_gap`, `bridge_width` and `offset` are in working units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingParams {
    pub units_per_mm: f64,
    pub flatten_tolerance: f64,
    pub letter_spacing: f64,
    pub max_tighten: f64,
    pub max_gap: f64,
    pub bridge_width: f64,
    pub offset: f64,
    pub auto_tighten: bool,
    pub force_bridge: bool,
}

impl WorkingParams {
    /// Convert a layout-unit spacing back to millimetres for reporting.
    pub fn spacing_to_mm(&self, spacing: f64) -> f64 {
        spacing / self.units_per_mm
    }
}
