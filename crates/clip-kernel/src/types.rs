/// Errors from boolean engine operations.
///
/// Callers treat every variant as "this step failed, keep the previous shape".
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClipError {
    #[error("invalid input geometry: {reason}")]
    InvalidInput { reason: String },

    #[error("{operation} failed inside the clipping backend: {message}")]
    Backend { operation: String, message: String },
}

/// Corner treatment when growing or shrinking a shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum JoinStyle {
    /// Arcs approximated within `round_precision` working units.
    #[default]
    Round,
    /// Mitered corners, clipped at twice the offset distance.
    Miter,
}

/// Options for [`crate::BooleanEngine::offset`]. Paths are always treated as closed polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetOptions {
    pub join: JoinStyle,
    /// Maximum deviation of round joins from the true arc, in working units.
    pub round_precision: f64,
}

impl OffsetOptions {
    pub fn round(round_precision: f64) -> Self {
        Self {
            join: JoinStyle::Round,
            round_precision,
        }
    }
}

impl Default for OffsetOptions {
    fn default() -> Self {
        // 0.25 layout units
        Self::round(250.0)
    }
}
