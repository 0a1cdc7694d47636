pub mod config;
pub mod errors;
pub mod export;
pub mod pipeline;

pub use config::{config_to_json, load_config, validate_config};
pub use errors::{ConfigError, ExportError};
pub use export::{path_data, svg_document, write_svg};
pub use pipeline::{build_layout, generate_geometry, generate_geometry_with, LayoutBuild};
