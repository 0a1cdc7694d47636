pub mod block_font;
pub mod font;
pub mod layout;
pub mod sampler;
pub mod ttf;

pub use block_font::BlockFont;
pub use font::{FontError, FontFace, GlyphId};
pub use layout::{build_text_path, normalize_text, LINE_HEIGHT};
pub use sampler::flatten;
pub use ttf::TtfFont;
