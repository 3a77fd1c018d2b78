//! Sensor Channel Tables
//!
//! Nominal wavelength windows for each supported sensor's native channels,
//! plus calibration defaults. Windows are half-open `[low, high)` in nm and
//! are listed in declaration order; that order breaks ties in the
//! narrowest-channel rule.

use crate::sensors::ChannelWindow;

/// Upper bound on channels per sensor wavelength map.
///
/// The AS7265X triad has 18 channels; leaves room for custom sensors.
pub const MAX_SENSOR_CHANNELS: usize = 24;

// ===== TCS34725 (RGB + CLEAR) =====

/// TCS34725 channel windows.
///
/// Color windows do not overlap each other, so distributing a lux budget
/// across them conserves energy. Clear overlaps all three and only fills
/// the gaps between them in uncalibrated mode.
///
/// Source: TCS34725 datasheet, spectral responsivity (FWHM points)
pub const TCS34725_CHANNELS: [ChannelWindow; 4] = [
    ChannelWindow::new("red_raw", 600.0, 700.0),
    ChannelWindow::new("green_raw", 500.0, 580.0),
    ChannelWindow::new("blue_raw", 430.0, 490.0),
    ChannelWindow::broadband("clear_raw", 400.0, 700.0),
];

/// Default TCS34725 lux calibration multiplier.
///
/// Applied when a reading carries no per-sensor factor. The stock lux
/// formula over-reads under LED grow lights by roughly 2.8x.
///
/// Source: bench calibration against a BH1750 under full-spectrum LEDs
pub const TCS34725_DEFAULT_LUX_CALIBRATION: f64 = 0.3545;

// ===== TSL2591 (VISIBLE + INFRARED) =====

/// TSL2591 channel windows.
///
/// Source: TSL2591 datasheet, CH0 (full) minus CH1 (IR) response
pub const TSL2591_CHANNELS: [ChannelWindow; 2] = [
    ChannelWindow::new("visible", 400.0, 700.0),
    ChannelWindow::new("infrared", 700.0, 1100.0),
];

/// Span used to turn the visible lux share into a density (nm).
pub const DUAL_VISIBLE_SPAN_NM: f64 = 300.0;

/// Span used to turn the infrared lux share into a density (nm).
pub const DUAL_INFRARED_SPAN_NM: f64 = 400.0;

// ===== AS7262 (SIX NARROWBAND VISIBLE) =====

/// AS7262 channel windows, each 40 nm wide around its nominal center.
///
/// Used for quality overlap scoring; the contribution model itself treats
/// each channel as a Gaussian around the window center.
///
/// Source: AS7262 datasheet (450/500/550/570/600/650 nm, FWHM 40 nm)
pub const AS7262_CHANNELS: [ChannelWindow; 6] = [
    ChannelWindow::new("violet", 430.0, 470.0),
    ChannelWindow::new("blue", 480.0, 520.0),
    ChannelWindow::new("green", 530.0, 570.0),
    ChannelWindow::new("yellow", 550.0, 590.0),
    ChannelWindow::new("orange", 580.0, 620.0),
    ChannelWindow::new("red", 630.0, 670.0),
];

/// Full width at half maximum of AS7262 filters (nm).
pub const NARROWBAND_FWHM_NM: f64 = 40.0;

/// FWHM to standard deviation divisor for a Gaussian (2·√(2·ln 2)).
pub const FWHM_TO_SIGMA: f64 = 2.355;

/// Lux budget distributed by the narrowband model when no estimated lux is
/// supplied.
///
/// Deployment dependent; mirrored as `MapperConfig::narrowband_default_lux`.
pub const NARROWBAND_DEFAULT_LUX: f64 = 500.0;

// ===== BROADBAND LUX SENSORS =====

/// Single broadband channel of dedicated lux meters.
///
/// Source: BH1750 / TSL2561 / VEML7700 datasheets (photopic-matched response)
pub const BROADBAND_CHANNELS: [ChannelWindow; 1] = [
    ChannelWindow::broadband("broadband", 400.0, 700.0),
];

// ===== AS7341 (11-CHANNEL SPECTRAL) =====

/// AS7341 channel windows (±10 nm around nominal centers, plus clear).
///
/// Source: AS7341 datasheet, F1-F8 and NIR channel centers
pub const AS7341_CHANNELS: [ChannelWindow; 11] = [
    ChannelWindow::new("violet", 405.0, 425.0),
    ChannelWindow::new("indigo", 435.0, 455.0),
    ChannelWindow::new("blue", 470.0, 490.0),
    ChannelWindow::new("cyan", 505.0, 525.0),
    ChannelWindow::new("green", 545.0, 565.0),
    ChannelWindow::new("yellow", 580.0, 600.0),
    ChannelWindow::new("orange", 620.0, 640.0),
    ChannelWindow::new("red", 670.0, 690.0),
    ChannelWindow::new("nir_1", 720.0, 740.0),
    ChannelWindow::new("nir_2", 840.0, 860.0),
    ChannelWindow::broadband("clear", 400.0, 700.0),
];

// ===== AS7265X (18-CHANNEL TRIAD) =====

/// AS7265X channel windows (±10 nm around nominal centers).
///
/// Channel letters follow the datasheet, ordered by wavelength.
///
/// Source: AS7265X datasheet, AS72651/2/3 channel table
pub const AS7265X_CHANNELS: [ChannelWindow; 18] = [
    ChannelWindow::new("a", 400.0, 420.0),
    ChannelWindow::new("b", 425.0, 445.0),
    ChannelWindow::new("c", 450.0, 470.0),
    ChannelWindow::new("d", 475.0, 495.0),
    ChannelWindow::new("e", 500.0, 520.0),
    ChannelWindow::new("f", 525.0, 545.0),
    ChannelWindow::new("g", 550.0, 570.0),
    ChannelWindow::new("h", 575.0, 595.0),
    ChannelWindow::new("r", 600.0, 620.0),
    ChannelWindow::new("i", 635.0, 655.0),
    ChannelWindow::new("s", 670.0, 690.0),
    ChannelWindow::new("j", 695.0, 715.0),
    ChannelWindow::new("t", 720.0, 740.0),
    ChannelWindow::new("u", 750.0, 770.0),
    ChannelWindow::new("v", 800.0, 820.0),
    ChannelWindow::new("w", 850.0, 870.0),
    ChannelWindow::new("k", 890.0, 910.0),
    ChannelWindow::new("l", 930.0, 950.0),
];
