//! Error Types for Spectral Fusion
//!
//! ## Design Philosophy
//!
//! Fusion is built to keep producing a best-effort spectrum while sensors drop
//! in and out, so almost nothing is an error:
//!
//! - **Missing or partial sensor data** (absent channel, no calibration factor)
//!   defaults to zero or a documented fallback constant.
//! - **Unknown sensor types** contribute nothing and get minimal quality.
//! - **Degenerate geometry** is absorbed by the epsilon guard and the
//!   equal-weight fallback.
//! - **Bins without signal** report zero intensity and zero confidence.
//!
//! What remains is caller misuse, reported fast and before any computation:
//!
//! - `LengthMismatch`: readings and positions are paired by index, so their
//!   lengths must agree. The engine never truncates silently.
//! - `InvalidConfig`: produced only by [`FusionConfig::validate`], never by a
//!   fusion call.
//!
//! Errors stay small and `Copy` (reasons are `&'static str`) so they can be
//! returned from hot paths and stored without allocation.
//!
//! ```rust
//! use lumenfuse_core::{FusionEngine, FusionConfig, FusionError, Position};
//!
//! let engine = FusionEngine::new(FusionConfig::default());
//! match engine.fuse_sensor_spectra(&[], &[Position::new(0.0, 0.0)], Position::new(0.0, 0.0)) {
//!     Err(FusionError::LengthMismatch { readings, positions }) => {
//!         assert_eq!((readings, positions), (0, 1));
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! [`FusionConfig::validate`]: crate::config::FusionConfig::validate

use thiserror_no_std::Error;

/// Result type for fusion operations
pub type FusionResult<T> = Result<T, FusionError>;

/// Fusion errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FusionError {
    /// Readings and positions are paired by index but differ in length
    #[error("Number of sensors ({readings}) must match number of positions ({positions})")]
    LengthMismatch {
        /// Number of sensor readings supplied
        readings: usize,
        /// Number of sensor positions supplied
        positions: usize,
    },

    /// Configuration rejected by validation
    #[error("Invalid fusion configuration: {reason}")]
    InvalidConfig {
        /// Which constraint the configuration violates
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for FusionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::LengthMismatch { readings, positions } =>
                defmt::write!(fmt, "{} readings vs {} positions", readings, positions),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_copy_and_small() {
        let err = FusionError::LengthMismatch { readings: 3, positions: 2 };
        let copy = err;
        assert_eq!(err, copy);
        assert!(core::mem::size_of::<FusionError>() <= 24);
    }

    #[cfg(feature = "std")]
    #[test]
    fn error_messages_name_the_counts() {
        let err = FusionError::LengthMismatch { readings: 3, positions: 2 };
        let msg = std::format!("{}", err);
        assert!(msg.contains('3') && msg.contains('2'));
    }
}
