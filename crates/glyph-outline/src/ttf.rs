//! TtfFont: font capability backed by a parsed TrueType/OpenType face.

use lettercut_types::PathCommand;
use ttf_parser::{Face, OutlineBuilder};

use crate::font::{FontError, FontFace, GlyphId};

pub struct TtfFont<'a> {
    face: Face<'a>,
}

impl<'a> TtfFont<'a> {
    /// Parse the first face in `data` after checking the container signature.
    pub fn parse(data: &'a [u8]) -> Result<Self, FontError> {
        check_signature(data)?;
        let face = Face::parse(data, 0).map_err(|e| FontError::Parse(e.to_string()))?;
        Ok(Self { face })
    }
}

/// Reject payloads that are obviously not a font, such as an HTML error page.
pub fn check_signature(data: &[u8]) -> Result<(), FontError> {
    if data.len() < 4 {
        return Err(FontError::TooShort { len: data.len() });
    }
    let tag = &data[..4];
    match tag {
        [0x00, 0x01, 0x00, 0x00] | b"OTTO" | b"true" | b"ttcf" => Ok(()),
        b"wOFF" | b"wOF2" => Err(FontError::CompressedWebFont {
            signature: String::from_utf8_lossy(tag).into_owned(),
        }),
        _ => Err(FontError::UnsupportedSignature {
            signature: String::from_utf8_lossy(tag).into_owned(),
            head: String::from_utf8_lossy(&data[..data.len().min(32)]).into_owned(),
        }),
    }
}

impl FontFace for TtfFont<'_> {
    fn units_per_em(&self) -> f64 {
        f64::from(self.face.units_per_em())
    }

    fn glyphs_for_line(&self, line: &str) -> Vec<GlyphId> {
        line.chars()
            .map(|c| {
                self.face
                    .glyph_index(c)
                    .map(|g| GlyphId(g.0))
                    .unwrap_or(GlyphId::NOTDEF)
            })
            .collect()
    }

    fn advance_width(&self, glyph: GlyphId) -> Option<f64> {
        self.face
            .glyph_hor_advance(ttf_parser::GlyphId(glyph.0))
            .map(f64::from)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f64 {
        let Some(kern) = self.face.tables().kern else {
            return 0.0;
        };
        let (l, r) = (ttf_parser::GlyphId(left.0), ttf_parser::GlyphId(right.0));
        for subtable in kern.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(l, r) {
                return f64::from(value);
            }
        }
        0.0
    }

    fn glyph_outline(&self, glyph: GlyphId) -> Vec<PathCommand> {
        let mut collector = CommandCollector::default();
        self.face
            .outline_glyph(ttf_parser::GlyphId(glyph.0), &mut collector);
        collector.commands
    }
}

/// Records `OutlineBuilder` callbacks as path commands in font units.
#[derive(Default)]
struct CommandCollector {
    commands: Vec<PathCommand>,
}

impl OutlineBuilder for CommandCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo {
            x: x.into(),
            y: y.into(),
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo {
            x: x.into(),
            y: y.into(),
        });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo {
            x1: x1.into(),
            y1: y1.into(),
            x: x.into(),
            y: y.into(),
        });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CurveTo {
            x1: x1.into(),
            y1: y1.into(),
            x2: x2.into(),
            y2: y2.into(),
            x: x.into(),
            y: y.into(),
        });
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_accepts_sfnt_variants() {
        assert!(check_signature(&[0, 1, 0, 0, 9]).is_ok());
        assert!(check_signature(b"OTTO....").is_ok());
        assert!(check_signature(b"ttcf").is_ok());
    }

    #[test]
    fn signature_rejects_short_payload() {
        assert!(matches!(
            check_signature(&[0, 1]),
            Err(FontError::TooShort { len: 2 })
        ));
    }

    #[test]
    fn signature_rejects_html_with_head() {
        let err = check_signature(b"<!DOCTYPE html><html>not a font</html>").unwrap_err();
        match err {
            FontError::UnsupportedSignature { signature, head } => {
                assert_eq!(signature, "<!DO");
                assert_eq!(head.len(), 32);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn signature_flags_woff() {
        assert!(matches!(
            check_signature(b"wOF2rest"),
            Err(FontError::CompressedWebFont { .. })
        ));
    }

    #[test]
    fn parse_reports_truncated_font() {
        let data = [0u8, 1, 0, 0, 0, 0];
        assert!(matches!(TtfFont::parse(&data), Err(FontError::Parse(_))));
    }
}
