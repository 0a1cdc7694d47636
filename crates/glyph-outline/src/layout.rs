//! Text layout: places glyph outlines along baselines and concatenates them
//! into one unflattened path.

use lettercut_types::OutlinePath;
use tracing::trace;

use crate::font::FontFace;

/// Line advance as a multiple of the nominal size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Normalize line endings and drop trailing whitespace.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end().to_string()
}

/// Lay out `text` at `size` layout units per em.
///
/// `letter_spacing` is added after every glyph, in layout units. Commands
/// keep font orientation (Y-up); line `i` sits on baseline `-(size + i * 1.2 * size)`
/// so that the sampler's Y inversion puts the first baseline at `y = size`.
pub fn build_text_path(font: &dyn FontFace, text: &str, size: f64, letter_spacing: f64) -> OutlinePath {
    let mut path = OutlinePath::new();
    let upem = font.units_per_em();
    if upem <= 0.0 || !upem.is_finite() {
        return path;
    }
    let scale = size / upem;
    let normalized = text.replace("\r\n", "\n");

    let mut baseline = size;
    for line in normalized.split('\n') {
        let glyphs = font.glyphs_for_line(line);
        let mut x = 0.0;
        for (i, &glyph) in glyphs.iter().enumerate() {
            path.extend(
                font.glyph_outline(glyph)
                    .iter()
                    .map(|cmd| cmd.transformed(scale, x, -baseline)),
            );

            let advance = font.advance_width(glyph).unwrap_or(upem) * scale;
            let kerning = glyphs
                .get(i + 1)
                .map(|&next| font.kerning(glyph, next) * scale)
                .unwrap_or(0.0);
            x += advance + kerning + letter_spacing;
        }
        trace!(glyphs = glyphs.len(), baseline, width = x, "laid out line");
        baseline += size * LINE_HEIGHT;
    }
    path
}
