//! Lux Estimation Constants
//!
//! Photopic luminosity data for turning a fused spectrum back into lux, and
//! the per-sensor confidences used when blending sensors' own lux readings.

// ===== CIE 1924 PHOTOPIC LUMINOSITY FUNCTION =====

/// First wavelength of [`PHOTOPIC_V_LAMBDA`] (nm).
pub const PHOTOPIC_TABLE_START_NM: f64 = 380.0;

/// Sampling step of [`PHOTOPIC_V_LAMBDA`] (nm).
pub const PHOTOPIC_TABLE_STEP_NM: f64 = 10.0;

/// CIE 1924 photopic luminous efficiency V(λ), 380-780 nm in 10 nm steps.
///
/// Source: CIE 018:2019, Table 1
pub const PHOTOPIC_V_LAMBDA: [f64; 41] = [
    0.000039, 0.000120, 0.000396, 0.001210, 0.004000, // 380-420
    0.011600, 0.023000, 0.038000, 0.060000, 0.090980, // 430-470
    0.139020, 0.208020, 0.323000, 0.503000, 0.710000, // 480-520
    0.862000, 0.954000, 0.994950, 0.995000, 0.952000, // 530-570
    0.870000, 0.757000, 0.631000, 0.503000, 0.381000, // 580-620
    0.265000, 0.175000, 0.107000, 0.061000, 0.032000, // 630-670
    0.017000, 0.008210, 0.004102, 0.002091, 0.001047, // 680-720
    0.000520, 0.000249, 0.000120, 0.000060, 0.000030, // 730-770
    0.000015,                                         // 780
];

/// Peak of the triangular photopic approximation (nm).
pub const TRIANGULAR_PEAK_NM: f64 = 555.0;

/// Half-width of the triangular photopic approximation (nm).
pub const TRIANGULAR_HALF_WIDTH_NM: f64 = 155.0;

// ===== ZONE LUX BLENDING =====

/// Default weight of the photopic estimate against the sensor average.
pub const DEFAULT_BLEND_ALPHA: f64 = 0.5;

/// Planar distance at which a sensor's own lux is used outright (grid units).
pub const COLOCATED_SENSOR_DISTANCE: f64 = 0.01;

/// Upper clamp for lux confidence overrides.
pub const MAX_LUX_CONFIDENCE: f64 = 5.0;

/// Lux confidence for sensor types without an explicit entry.
pub const DEFAULT_LUX_CONFIDENCE: f64 = 0.5;

/// TSL2591: high-confidence lux meter.
pub const TSL2591_LUX_CONFIDENCE: f64 = 1.0;

/// BH1750 / VEML7700: dedicated lux meters.
pub const LUX_METER_LUX_CONFIDENCE: f64 = 0.9;

/// TCS34725: lux derived from color counts is coarse.
pub const TCS34725_LUX_CONFIDENCE: f64 = 0.2;

/// AS7262: lux estimated from six channels.
pub const AS7262_LUX_CONFIDENCE: f64 = 0.7;

/// AS7341 / AS7265X: lux estimated from many channels.
pub const MULTICHANNEL_LUX_CONFIDENCE: f64 = 0.6;
