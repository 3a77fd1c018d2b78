//! JSON Interchange for LumenFuse
//!
//! ## Overview
//!
//! The fusion engine works on typed readings and returns typed spectra. The
//! systems around it (pollers, dashboards, analysis scripts) exchange plain
//! JSON dictionaries instead. This crate translates between the two without
//! changing field names existing callers depend on.
//!
//! ## Reading Dictionaries
//!
//! A reading names its sensor type and carries exactly one payload object:
//!
//! ```json
//! {"sensor_type": "TCS34725",
//!  "raw_color_data": {"red_raw": 1200, "green_raw": 1800, "blue_raw": 800,
//!                     "clear_raw": 4000, "lux": 450.5},
//!  "lux_calibration": 1.0}
//!
//! {"sensor_type": "TSL2591",
//!  "raw_spectrum_data": {"visible": 340.0, "infrared": 180.0, "lux": 425.3}}
//!
//! {"sensor_type": "AS7262",
//!  "raw_spectrum_data": {"raw_values": {"violet": 120, "blue": 240}},
//!  "estimated_lux": 480.0}
//!
//! {"sensor_type": "BH1750", "raw_lux_data": {"lux": 520.8}}
//! ```
//!
//! `raw_spectrum_data` is read as visible/infrared counts when it has those
//! keys, otherwise as named channels (nested under `raw_values` or flat).
//!
//! ## Reports
//!
//! Fused spectra are written with the historical layout: a `fused_spectrum`
//! object keyed `bin_<center>nm` in wavelength order, plus the flat
//! `wavelength_centers` / `intensities` / `confidences` arrays.
//!
//! ## Usage Example
//!
//! ```rust
//! use lumenfuse_schemas::fuse_json;
//!
//! let request = r#"{
//!     "sensors": [{"sensor_type": "BH1750", "raw_lux_data": {"lux": 300.0}}],
//!     "positions": [[0.0, 0.0]],
//!     "target_position": [1.0, 1.0]
//! }"#;
//! let report = fuse_json(request)?;
//! assert!(report.contains("\"bin_550nm\""));
//! # Ok::<(), lumenfuse_schemas::SchemaError>(())
//! ```

use serde::{Deserialize, Serialize};

use lumenfuse_core::{FusionConfig, FusionEngine, FusionError, Position};

pub mod config;
pub mod readings;
pub mod report;

pub use config::{load_config, load_config_file, save_config_file};
pub use readings::{decode_reading, decode_readings, LegacyReading};
pub use report::{FusionReport, MidpointReport};

/// Schema-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum SchemaError {
    /// Malformed JSON or a field of the wrong type
    #[error("Failed to parse JSON: {0}")]
    ParseError(String),

    /// A payload field that cannot be read as the expected type
    #[error("Reading for {sensor_type} has unusable {field}: {reason}")]
    InvalidPayload {
        /// Tag of the offending reading
        sensor_type: String,
        /// Field name inside the payload
        field: &'static str,
        /// What was expected
        reason: &'static str,
    },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(FusionError),

    /// Fusion rejected the request (length mismatch)
    #[error("Fusion failed: {0}")]
    Fusion(FusionError),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::ParseError(e.to_string())
    }
}

impl From<std::io::Error> for SchemaError {
    fn from(e: std::io::Error) -> Self {
        SchemaError::Io(e.to_string())
    }
}

/// One fusion request as sent by callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionRequest {
    /// Reading dictionaries
    pub sensors: Vec<LegacyReading>,
    /// `[x, y]` per sensor, same order as `sensors`
    pub positions: Vec<(f64, f64)>,
    /// Where to estimate the spectrum
    pub target_position: (f64, f64),
    /// Engine configuration; defaults when absent
    #[serde(default)]
    pub config: Option<FusionConfig>,
}

impl FusionRequest {
    /// Decode, validate, fuse and build the report
    pub fn run(&self) -> Result<FusionReport, SchemaError> {
        let config = self.config.unwrap_or_default();
        config.validate().map_err(SchemaError::InvalidConfig)?;

        let readings = self
            .sensors
            .iter()
            .map(LegacyReading::to_reading)
            .collect::<Result<Vec<_>, _>>()?;
        let positions: Vec<Position> = self.positions.iter().copied().map(Position::from).collect();

        let engine = FusionEngine::new(config);
        let fused = engine
            .fuse_sensor_spectra(&readings, &positions, Position::from(self.target_position))
            .map_err(SchemaError::Fusion)?;
        Ok(FusionReport::from_spectrum(&fused))
    }
}

/// Fuse a JSON request and return the JSON report
pub fn fuse_json(request: &str) -> Result<String, SchemaError> {
    let request: FusionRequest = serde_json::from_str(request)?;
    let report = request.run()?;
    Ok(serde_json::to_string(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_request_is_a_fusion_error() {
        let request = r#"{
            "sensors": [{"sensor_type": "BH1750", "raw_lux_data": {"lux": 300.0}}],
            "positions": [],
            "target_position": [0.0, 0.0]
        }"#;
        match fuse_json(request) {
            Err(SchemaError::Fusion(FusionError::LengthMismatch { readings: 1, positions: 0 })) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn request_config_is_validated() {
        let request = r#"{
            "sensors": [],
            "positions": [],
            "target_position": [0.0, 0.0],
            "config": {"bins": {"width_nm": 0.0}}
        }"#;
        assert!(matches!(fuse_json(request), Err(SchemaError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(fuse_json("{not json"), Err(SchemaError::ParseError(_))));
    }
}
