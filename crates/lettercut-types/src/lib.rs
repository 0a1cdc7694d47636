pub mod config;
pub mod geom;
pub mod path;
pub mod result;

pub use config::*;
pub use geom::*;
pub use path::*;
pub use result::*;
