//! Quality Scores for Light Sensors
//!
//! Each sensor type carries three base accuracy scores in [0, 1]. The
//! per-bin quality weight is one of these scores, scaled by where the bin
//! falls relative to what the sensor physically measures.

use crate::quality::QualityProfile;

// ===== BASE ACCURACY PROFILES =====

/// AS7265X: 18-channel triad, best spectral resolution available.
pub const AS7265X_PROFILE: QualityProfile = QualityProfile::new(1.0, 0.7, 0.8);

/// AS7341: 11-channel spectral, slightly wider filters than the triad.
pub const AS7341_PROFILE: QualityProfile = QualityProfile::new(0.9, 0.6, 0.7);

/// AS7262: six visible channels with 40 nm filters.
pub const AS7262_PROFILE: QualityProfile = QualityProfile::new(0.8, 0.7, 0.6);

/// TSL2591: two broad channels, good broadband, strong in IR.
pub const TSL2591_PROFILE: QualityProfile = QualityProfile::new(0.4, 0.6, 0.8);

/// TCS34725: basic RGB, lux derived from color counts.
pub const TCS34725_PROFILE: QualityProfile = QualityProfile::new(0.3, 0.3, 0.4);

/// BH1750: dedicated photopic lux meter, no spectral information.
pub const BH1750_PROFILE: QualityProfile = QualityProfile::new(0.0, 1.0, 0.5);

/// TSL2561: lux meter with a crude IR channel.
pub const TSL2561_PROFILE: QualityProfile = QualityProfile::new(0.1, 0.8, 0.6);

/// VEML7700: high-accuracy lux meter.
pub const VEML7700_PROFILE: QualityProfile = QualityProfile::new(0.1, 0.9, 0.6);

// ===== WAVELENGTH FACTORS =====

/// Flat weight for every bin of an unknown sensor type.
pub const UNKNOWN_SENSOR_QUALITY: f64 = 0.1;

/// Weight outside the range a sensor is trusted in.
pub const OUT_OF_BAND_QUALITY: f64 = 0.1;

/// Weight of a dual-channel sensor outside both its channels.
pub const DUAL_OUT_OF_BAND_QUALITY: f64 = 0.2;

/// BH1750 lux accuracy scale inside the visible band.
///
/// Not a spectral measurement, so only part of its lux accuracy counts.
pub const BH1750_VISIBLE_SCALE: f64 = 0.6;

/// TSL2561 / VEML7700 lux accuracy scale inside the visible band.
pub const LUX_METER_VISIBLE_SCALE: f64 = 0.4;

/// RGB boost inside the red window (620-700 nm).
pub const RGB_RED_BOOST: f64 = 1.2;

/// RGB boost inside the green window (500-580 nm); the strongest filter.
pub const RGB_GREEN_BOOST: f64 = 1.3;

/// RGB boost inside the blue window (430-490 nm).
pub const RGB_BLUE_BOOST: f64 = 1.1;

/// RGB scale elsewhere in the visible band.
pub const RGB_OTHER_VISIBLE_SCALE: f64 = 0.8;

/// Dual-channel boost in the infrared band, its differentiating strength.
pub const DUAL_INFRARED_BOOST: f64 = 1.5;

/// Overlap fraction above which a narrowband channel fully covers a bin.
pub const NARROWBAND_FULL_OVERLAP: f64 = 0.5;

/// Overlap fraction above which a narrowband channel partially covers a bin.
pub const NARROWBAND_PARTIAL_OVERLAP: f64 = 0.1;

/// Spectral accuracy scale for partial overlap.
pub const NARROWBAND_PARTIAL_SCALE: f64 = 0.7;

/// Spectral accuracy scale for bins between channels (interpolated).
pub const NARROWBAND_INTERPOLATED_SCALE: f64 = 0.3;

// ===== HISTOGRAM =====

/// Bins below this fraction of the peak confidence are dropped from display.
pub const MIN_CONFIDENCE_FRACTION: f64 = 0.1;
