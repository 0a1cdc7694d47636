//! BlockFont: a deterministic monospace font built from boxes.
//!
//! Used in tests and demos where a real font file is unavailable. Every
//! printable ASCII glyph occupies x ∈ [50, 550], y ∈ [0, 700] inside a
//! 600-unit advance, leaving a 100-unit gap between neighbours. Outer
//! contours run counter-clockwise, holes clockwise.

use lettercut_types::PathCommand;

use crate::font::{FontFace, GlyphId};

pub const BLOCK_UNITS_PER_EM: f64 = 1000.0;
pub const BLOCK_ADVANCE: f64 = 600.0;

const LEFT: f64 = 50.0;
const RIGHT: f64 = 550.0;
const TOP: f64 = 700.0;
const CORNER: f64 = 100.0;
/// Cubic control-point fraction approximating a quarter circle.
const KAPPA: f64 = 0.55;

const FIRST_PRINTABLE: u32 = 0x20;
const LAST_PRINTABLE: u32 = 0x7e;

/// Pairs tightened by 80 units.
const KERN_PAIRS: &[(char, char)] = &[('A', 'V'), ('V', 'A'), ('L', 'T'), ('T', 'o')];
const KERN_VALUE: f64 = -80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlyphKind {
    Blank,
    Bar,
    Dot,
    TwoStrokes,
    RoundedRing,
    Rounded,
    OneHole,
    TwoHoles,
    Solid,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFont;

impl BlockFont {
    pub fn new() -> Self {
        Self
    }

    fn glyph_char(glyph: GlyphId) -> Option<char> {
        if glyph == GlyphId::NOTDEF {
            return None;
        }
        char::from_u32(u32::from(glyph.0) - 1 + FIRST_PRINTABLE)
    }

    fn kind_of(c: char) -> GlyphKind {
        match c {
            ' ' => GlyphKind::Blank,
            'I' | 'l' | '1' => GlyphKind::Bar,
            '.' => GlyphKind::Dot,
            'i' | 'j' | ':' | ';' | '!' | '?' => GlyphKind::TwoStrokes,
            'O' | 'D' | 'Q' | 'o' | '0' => GlyphKind::RoundedRing,
            'C' | 'G' | 'J' | 'S' | 'U' | 'c' | 's' | 'u' | '2' | '3' | '5' | '7' => {
                GlyphKind::Rounded
            }
            'A' | 'P' | 'R' | 'a' | 'b' | 'd' | 'e' | 'g' | 'p' | 'q' | '4' | '6' | '9' => {
                GlyphKind::OneHole
            }
            'B' | '8' => GlyphKind::TwoHoles,
            _ => GlyphKind::Solid,
        }
    }
}

impl FontFace for BlockFont {
    fn units_per_em(&self) -> f64 {
        BLOCK_UNITS_PER_EM
    }

    fn glyphs_for_line(&self, line: &str) -> Vec<GlyphId> {
        line.chars()
            .map(|c| {
                let code = u32::from(c);
                if (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&code) {
                    GlyphId((code - FIRST_PRINTABLE + 1) as u16)
                } else {
                    GlyphId::NOTDEF
                }
            })
            .collect()
    }

    fn advance_width(&self, _glyph: GlyphId) -> Option<f64> {
        Some(BLOCK_ADVANCE)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        match (Self::glyph_char(left), Self::glyph_char(right)) {
            (Some(l), Some(r)) if KERN_PAIRS.contains(&(l, r)) => KERN_VALUE,
            _ => 0.0,
        }
    }

    fn glyph_outline(&self, glyph: GlyphId) -> Vec<PathCommand> {
        let kind = match Self::glyph_char(glyph) {
            Some(c) => Self::kind_of(c),
            None => GlyphKind::OneHole,
        };
        let mut out = Vec::new();
        match kind {
            GlyphKind::Blank => {}
            GlyphKind::Bar => rect(&mut out, 250.0, 0.0, 350.0, TOP),
            GlyphKind::Dot => rect(&mut out, 250.0, 0.0, 350.0, 100.0),
            GlyphKind::TwoStrokes => {
                rect(&mut out, 250.0, 0.0, 350.0, 450.0);
                rect(&mut out, 250.0, 550.0, 350.0, TOP);
            }
            GlyphKind::RoundedRing => {
                quad_rounded_rect(&mut out);
                hole(&mut out, 200.0, 200.0, 400.0, 500.0);
            }
            GlyphKind::Rounded => cubic_rounded_rect(&mut out),
            GlyphKind::OneHole => {
                rect(&mut out, LEFT, 0.0, RIGHT, TOP);
                hole(&mut out, 200.0, 250.0, 400.0, 550.0);
            }
            GlyphKind::TwoHoles => {
                rect(&mut out, LEFT, 0.0, RIGHT, TOP);
                hole(&mut out, 200.0, 100.0, 400.0, 300.0);
                hole(&mut out, 200.0, 400.0, 400.0, 600.0);
            }
            GlyphKind::Solid => rect(&mut out, LEFT, 0.0, RIGHT, TOP),
        }
        out
    }
}

fn rect(out: &mut Vec<PathCommand>, x0: f64, y0: f64, x1: f64, y1: f64) {
    out.extend([
        PathCommand::MoveTo { x: x0, y: y0 },
        PathCommand::LineTo { x: x1, y: y0 },
        PathCommand::LineTo { x: x1, y: y1 },
        PathCommand::LineTo { x: x0, y: y1 },
        PathCommand::Close,
    ]);
}

fn hole(out: &mut Vec<PathCommand>, x0: f64, y0: f64, x1: f64, y1: f64) {
    out.extend([
        PathCommand::MoveTo { x: x0, y: y0 },
        PathCommand::LineTo { x: x0, y: y1 },
        PathCommand::LineTo { x: x1, y: y1 },
        PathCommand::LineTo { x: x1, y: y0 },
        PathCommand::Close,
    ]);
}

fn quad_rounded_rect(out: &mut Vec<PathCommand>) {
    let (l, r, t, c) = (LEFT, RIGHT, TOP, CORNER);
    out.extend([
        PathCommand::MoveTo { x: l + c, y: 0.0 },
        PathCommand::LineTo { x: r - c, y: 0.0 },
        PathCommand::QuadTo { x1: r, y1: 0.0, x: r, y: c },
        PathCommand::LineTo { x: r, y: t - c },
        PathCommand::QuadTo { x1: r, y1: t, x: r - c, y: t },
        PathCommand::LineTo { x: l + c, y: t },
        PathCommand::QuadTo { x1: l, y1: t, x: l, y: t - c },
        PathCommand::LineTo { x: l, y: c },
        PathCommand::QuadTo { x1: l, y1: 0.0, x: l + c, y: 0.0 },
        PathCommand::Close,
    ]);
}

fn cubic_rounded_rect(out: &mut Vec<PathCommand>) {
    let (l, r, t, c) = (LEFT, RIGHT, TOP, CORNER);
    let k = c * KAPPA;
    out.extend([
        PathCommand::MoveTo { x: l + c, y: 0.0 },
        PathCommand::LineTo { x: r - c, y: 0.0 },
        PathCommand::CurveTo { x1: r - c + k, y1: 0.0, x2: r, y2: c - k, x: r, y: c },
        PathCommand::LineTo { x: r, y: t - c },
        PathCommand::CurveTo { x1: r, y1: t - c + k, x2: r - c + k, y2: t, x: r - c, y: t },
        PathCommand::LineTo { x: l + c, y: t },
        PathCommand::CurveTo { x1: l + c - k, y1: t, x2: l, y2: t - c + k, x: l, y: t - c },
        PathCommand::LineTo { x: l, y: c },
        PathCommand::CurveTo { x1: l, y1: c - k, x2: l + c - k, y2: 0.0, x: l + c, y: 0.0 },
        PathCommand::Close,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour_count(commands: &[PathCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo { .. }))
            .count()
    }

    #[test]
    fn printable_ascii_maps_to_glyphs() {
        let font = BlockFont::new();
        let ids = font.glyphs_for_line("A é");
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], GlyphId::NOTDEF);
        assert_eq!(ids[2], GlyphId::NOTDEF);
        assert_eq!(BlockFont::glyph_char(ids[0]), Some('A'));
    }

    #[test]
    fn contour_counts_follow_glyph_kind() {
        let font = BlockFont::new();
        let count = |c: &str| contour_count(&font.glyph_outline(font.glyphs_for_line(c)[0]));
        assert_eq!(count(" "), 0);
        assert_eq!(count("I"), 1);
        assert_eq!(count("i"), 2);
        assert_eq!(count("A"), 2);
        assert_eq!(count("B"), 3);
        assert_eq!(count("O"), 2);
        assert_eq!(count("S"), 1);
        assert_eq!(count("X"), 1);
    }

    #[test]
    fn notdef_has_a_counter() {
        let font = BlockFont::new();
        assert_eq!(contour_count(&font.glyph_outline(GlyphId::NOTDEF)), 2);
    }

    #[test]
    fn kerning_applies_to_listed_pairs_only() {
        let font = BlockFont::new();
        let ids = font.glyphs_for_line("AVB");
        assert_eq!(font.kerning(ids[0], ids[1]), KERN_VALUE);
        assert_eq!(font.kerning(ids[1], ids[0]), KERN_VALUE);
        assert_eq!(font.kerning(ids[1], ids[2]), 0.0);
    }
}
