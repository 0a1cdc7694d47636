use lettercut_types::ProcessingConfig;

use crate::errors::ConfigError;

/// Deserialize a processing config from JSON. Missing fields take their defaults.
pub fn load_config(json: &str) -> Result<ProcessingConfig, ConfigError> {
    let config: ProcessingConfig =
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Serialize a config back to pretty JSON.
pub fn config_to_json(config: &ProcessingConfig) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(config).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Reject non-finite numeric fields.
pub fn validate_config(config: &ProcessingConfig) -> Result<(), ConfigError> {
    let fields = [
        ("unitsPerMm", config.units_per_mm),
        ("kerfMm", config.kerf_mm),
        ("offsetMm", config.offset_mm),
        ("minBridgeMm", config.min_bridge_mm),
        ("bridgeMaxGapMm", config.bridge_max_gap_mm),
        ("flattenToleranceMm", config.flatten_tolerance_mm),
        ("letterSpacingMm", config.letter_spacing_mm),
        ("autoTightenMaxMm", config.auto_tighten_max_mm),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field, value });
        }
    }
    Ok(())
}
