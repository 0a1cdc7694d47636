use lettercut_types::PathCommand;

/// Font-local glyph index. Index 0 is `.notdef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphId(pub u16);

impl GlyphId {
    pub const NOTDEF: GlyphId = GlyphId(0);
}

/// Read-only font capability consumed by the layout builder.
/// Implemented by TtfFont (parsed font file) and BlockFont (deterministic test double).
///
/// All metrics are in font design units.
pub trait FontFace {
    fn units_per_em(&self) -> f64;

    /// Map one line of text to glyphs, one per `char`. No shaping is applied.
    fn glyphs_for_line(&self, line: &str) -> Vec<GlyphId>;

    /// Horizontal advance, `None` when the font has no metric for the glyph.
    fn advance_width(&self, glyph: GlyphId) -> Option<f64>;

    /// Pair adjustment added to the advance of `left` when followed by `right`.
    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64;

    /// Outline commands relative to the glyph origin, Y growing upward.
    fn glyph_outline(&self, glyph: GlyphId) -> Vec<PathCommand>;
}

/// Errors while loading a font file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FontError {
    #[error("font data too small: {len} bytes")]
    TooShort { len: usize },

    #[error("compressed web font ({signature}) must be decompressed before parsing")]
    CompressedWebFont { signature: String },

    #[error("unsupported font signature {signature:?}; head={head:?}")]
    UnsupportedSignature { signature: String, head: String },

    #[error("failed to parse font: {0}")]
    Parse(String),
}
