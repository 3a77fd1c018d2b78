//! Spectral fusion engine for LumenFuse
//!
//! Turns readings from heterogeneous ambient-light sensors (lux meters, RGB
//! color sensors, narrowband spectral sensors) mounted around a grow area into
//! one confidence-weighted spectral histogram at any target position.
//!
//! Data flow for one fusion call:
//!
//! ```text
//! readings ──► mapping (per sensor)  ──► bin contributions ─┐
//!          ──► quality (per sensor)  ──► quality weights   ─┼─► FusionEngine ─► FusedSpectrum
//! positions ─► spatial (all sensors) ──► spatial weights   ─┘         │
//!                                                                     ├─► histogram
//!                                                                     └─► lux (photopic)
//! ```
//!
//! The engine is a pure function of its inputs: no I/O, no shared mutable
//! state, safe to call from any number of threads at once.
//!
//! ```no_run
//! use lumenfuse_core::{FusionEngine, FusionConfig, Position, SensorReading};
//! use lumenfuse_core::sensors::{ColorCounts, SensorKind};
//!
//! let engine = FusionEngine::new(FusionConfig::default());
//! let readings = [
//!     SensorReading::color(SensorKind::Tcs34725, ColorCounts::rgbc(1200.0, 1800.0, 800.0, 4000.0).with_lux(450.5))
//!         .with_calibration(1.0),
//!     SensorReading::lux(SensorKind::Bh1750, 520.8),
//! ];
//! let positions = [Position::new(0.0, 0.0), Position::new(0.0, 3.0)];
//!
//! let fused = engine.fuse_sensor_spectra(&readings, &positions, Position::new(1.0, 1.0))?;
//! let histogram = engine.histogram(&fused);
//! # Ok::<(), lumenfuse_core::FusionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Optional logging; compiles away without the `log` feature.
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod bins;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fusion;
pub mod histogram;
pub mod lux;
pub mod mapping;
pub mod numeric;
pub mod quality;
pub mod sensors;
pub mod spatial;

// Public API
pub use bins::{create_spectrum_bins, WavelengthBin};
pub use config::{BinLayout, FusionConfig, HistogramConfig, LightGeometry, MapperConfig};
pub use errors::{FusionError, FusionResult};
pub use fusion::{
    BinSource, FusedBin, FusedSpectrum, FusionEngine, MidpointEstimate, MidpointSummary, TargetEstimate,
};
pub use histogram::{create_histogram_data, create_histogram_data_with, HistogramData};
pub use lux::{estimate_lux_from_spectrum, photopic_lux, LuminosityCurve, ZoneLux, ZoneLuxEstimator};
pub use mapping::BinContribution;
pub use quality::{QualityProfile, QualityWeight};
pub use sensors::{Position, RawData, SensorKind, SensorReading, SensorRegistry, SpectralMapper};
pub use spatial::{calculate_light_intensity_weights, interpolate_pair, PairInterpolation};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
