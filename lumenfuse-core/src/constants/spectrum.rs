//! Spectrum Layout Constants
//!
//! Wavelength ranges and the canonical bin layout shared by every sensor in a
//! fusion run.

// ===== CANONICAL BIN LAYOUT =====

/// Lower edge of the first output bin (nm).
///
/// Covers UV-B/UV-A so UV-capable sensors have somewhere to land.
pub const DEFAULT_MIN_WAVELENGTH_NM: f64 = 280.0;

/// Bins are generated while their lower edge is below this wavelength (nm).
///
/// The last bin may extend past it (840-860 nm with the defaults).
pub const DEFAULT_MAX_WAVELENGTH_NM: f64 = 850.0;

/// Width of every output bin (nm).
pub const DEFAULT_BIN_WIDTH_NM: f64 = 20.0;

// ===== WAVELENGTH RANGES =====

/// Lower edge of the visible / PAR band (nm).
///
/// Source: CIE photopic range, McCree PAR definition
pub const VISIBLE_MIN_NM: f64 = 400.0;

/// Upper edge of the visible / PAR band (nm).
pub const VISIBLE_MAX_NM: f64 = 700.0;

/// Upper edge of the near-infrared band covered by silicon photodiodes (nm).
///
/// Source: TSL2591 datasheet, channel 1 response
pub const INFRARED_MAX_NM: f64 = 1100.0;

/// Display unit of fused intensities.
pub const INTENSITY_UNITS: &str = "lux_per_nm";
