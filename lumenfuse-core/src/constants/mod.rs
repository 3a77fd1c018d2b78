//! Constants for LumenFuse Core
//!
//! Centralized, documented constants used throughout the fusion engine. All
//! tunables that a deployment may want to change are mirrored as fields of
//! [`FusionConfig`](crate::config::FusionConfig); the values here are their
//! defaults.
//!
//! ## Organization
//!
//! - **Spectrum**: Bin layout and wavelength ranges
//! - **Geometry**: Light and sensor mounting heights
//! - **Sensors**: Channel wavelength windows and calibration defaults
//! - **Quality**: Per-sensor-type accuracy scores and wavelength boosts
//! - **Lux**: Photopic curve data and lux-blending confidences

/// Bin layout defaults and wavelength ranges.
pub mod spectrum;

/// Light/sensor mounting geometry for spatial weighting.
pub mod geometry;

/// Channel wavelength windows and sensor calibration defaults.
pub mod sensors;

/// Base accuracy scores and wavelength-specific quality factors.
pub mod quality;

/// Photopic luminosity data and lux blending parameters.
pub mod lux;

// Re-export commonly used constants for convenience
pub use spectrum::{
    DEFAULT_MIN_WAVELENGTH_NM, DEFAULT_MAX_WAVELENGTH_NM, DEFAULT_BIN_WIDTH_NM,
    VISIBLE_MIN_NM, VISIBLE_MAX_NM,
};

pub use geometry::{
    DEFAULT_LIGHT_HEIGHT_FT, DEFAULT_SENSOR_HEIGHT_FT, SPATIAL_EPSILON,
};

pub use quality::{UNKNOWN_SENSOR_QUALITY, MIN_CONFIDENCE_FRACTION};
