//! Fusion configuration files
//!
//! Every field is optional; missing sections and fields fall back to the
//! greenhouse defaults. A configuration is always validated after loading.
//!
//! ```json
//! {
//!   "bins": {"min_nm": 280, "max_nm": 850, "width_nm": 20},
//!   "geometry": {"light_height_ft": 6.0, "sensor_height_ft": 3.0},
//!   "mapper": {"rgb_default_calibration": 0.3545},
//!   "histogram": {"min_confidence_fraction": 0.1}
//! }
//! ```

use std::fs;
use std::path::Path;

use lumenfuse_core::FusionConfig;

use crate::SchemaError;

/// Parse and validate a configuration
pub fn load_config(json: &str) -> Result<FusionConfig, SchemaError> {
    let config: FusionConfig = serde_json::from_str(json)?;
    config.validate().map_err(SchemaError::InvalidConfig)?;
    Ok(config)
}

/// Read, parse and validate a configuration file
pub fn load_config_file(path: impl AsRef<Path>) -> Result<FusionConfig, SchemaError> {
    let text = fs::read_to_string(path.as_ref())?;
    let config = load_config(&text)?;
    log::debug!("loaded fusion config from {}", path.as_ref().display());
    Ok(config)
}

/// Validate and write a configuration as pretty JSON
pub fn save_config_file(path: impl AsRef<Path>, config: &FusionConfig) -> Result<(), SchemaError> {
    config.validate().map_err(SchemaError::InvalidConfig)?;
    let text = serde_json::to_string_pretty(config)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumenfuse_core::FusionError;

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(load_config("{}").unwrap(), FusionConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = load_config(r#"{"geometry": {"light_height_ft": 4.5}, "bins": {"width_nm": 10}}"#).unwrap();
        assert_eq!(config.geometry.light_height_ft, 4.5);
        assert_eq!(config.geometry.sensor_height_ft, 3.0);
        assert_eq!(config.bins.width_nm, 10.0);
        assert_eq!(config.bins.min_nm, 280.0);
        assert_eq!(config.bins.bins().len(), 57);
    }

    #[test]
    fn null_calibration_disables_default() {
        let config = load_config(r#"{"mapper": {"rgb_default_calibration": null}}"#).unwrap();
        assert_eq!(config.mapper.rgb_default_calibration, None);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = load_config(r#"{"bins": {"min_nm": 900, "max_nm": 400}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConfig(FusionError::InvalidConfig { .. })));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fusion.json");
        let config = FusionConfig::bench().with_min_confidence_fraction(0.25);

        save_config_file(&path, &config).unwrap();
        assert_eq!(load_config_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
