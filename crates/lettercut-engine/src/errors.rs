/// Errors while reading a processing config.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("config field {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Errors while writing export files.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {message}")]
    Io { path: String, message: String },
}
