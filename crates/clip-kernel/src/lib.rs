pub mod clean;
pub mod clipper_engine;
pub mod convert;
pub mod traits;
pub mod types;

pub use clipper_engine::ClipperEngine;
pub use traits::*;
pub use types::*;
