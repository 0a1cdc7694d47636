use serde::{Deserialize, Serialize};

/// One outline drawing command in font orientation (Y grows upward).
/// Coordinates are already placed and scaled to layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { x1: f64, y1: f64, x: f64, y: f64 },
    CurveTo { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
    Close,
}

impl PathCommand {
    /// Apply `p * scale + offset` to every coordinate of the command.
    pub fn transformed(&self, scale: f64, dx: f64, dy: f64) -> PathCommand {
        let tx = |x: f64| x * scale + dx;
        let ty = |y: f64| y * scale + dy;
        match *self {
            PathCommand::MoveTo { x, y } => PathCommand::MoveTo { x: tx(x), y: ty(y) },
            PathCommand::LineTo { x, y } => PathCommand::LineTo { x: tx(x), y: ty(y) },
            PathCommand::QuadTo { x1, y1, x, y } => PathCommand::QuadTo {
                x1: tx(x1),
                y1: ty(y1),
                x: tx(x),
                y: ty(y),
            },
            PathCommand::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => PathCommand::CurveTo {
                x1: tx(x1),
                y1: ty(y1),
                x2: tx(x2),
                y2: ty(y2),
                x: tx(x),
                y: ty(y),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// An unflattened outline: the concatenated commands of every placed glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlinePath {
    pub commands: Vec<PathCommand>,
}

impl OutlinePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = PathCommand>) {
        self.commands.extend(commands);
    }
}
