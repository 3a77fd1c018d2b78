//! Fusion configuration
//!
//! Every tunable is an explicit value handed to the engine at construction.
//! Defaults come from [`constants`](crate::constants); deployments override
//! them with the `with_*` setters or by deserializing a partial document
//! (every field optional, missing fields keep their default).
//!
//! ```rust
//! use lumenfuse_core::FusionConfig;
//!
//! let config = FusionConfig::greenhouse()
//!     .with_narrowband_default_lux(350.0)
//!     .with_min_confidence_fraction(0.05);
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::{create_spectrum_bins, WavelengthBin};
use crate::constants::{geometry, quality, sensors, spectrum};
use crate::errors::{FusionError, FusionResult};

/// Canonical bin layout
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BinLayout {
    /// Lower edge of the first bin (nm)
    pub min_nm: f64,
    /// Bins start while below this wavelength (nm)
    pub max_nm: f64,
    /// Width of each bin (nm)
    pub width_nm: f64,
}

impl Default for BinLayout {
    fn default() -> Self {
        Self {
            min_nm: spectrum::DEFAULT_MIN_WAVELENGTH_NM,
            max_nm: spectrum::DEFAULT_MAX_WAVELENGTH_NM,
            width_nm: spectrum::DEFAULT_BIN_WIDTH_NM,
        }
    }
}

impl BinLayout {
    /// Materialize the bins
    pub fn bins(&self) -> Vec<WavelengthBin> {
        create_spectrum_bins(self.min_nm, self.max_nm, self.width_nm)
    }
}

/// Light and sensor mounting heights for the 3D distance model
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightGeometry {
    /// Height of the light plane (ft)
    pub light_height_ft: f64,
    /// Height of the sensor plane (ft)
    pub sensor_height_ft: f64,
    /// Added to squared distance before inversion
    pub epsilon: f64,
}

impl Default for LightGeometry {
    fn default() -> Self {
        Self {
            light_height_ft: geometry::DEFAULT_LIGHT_HEIGHT_FT,
            sensor_height_ft: geometry::DEFAULT_SENSOR_HEIGHT_FT,
            epsilon: geometry::SPATIAL_EPSILON,
        }
    }
}

impl LightGeometry {
    /// Geometry with explicit heights and the default epsilon
    pub fn new(light_height_ft: f64, sensor_height_ft: f64) -> Self {
        Self { light_height_ft, sensor_height_ft, ..Self::default() }
    }

    /// Vertical separation between lights and sensors (ft)
    #[inline]
    pub fn vertical_offset(&self) -> f64 {
        self.light_height_ft - self.sensor_height_ft
    }
}

/// Parameters of the per-sensor channel mappers
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapperConfig {
    /// RGB lux calibration used when a reading carries none
    ///
    /// `None` sends uncalibrated RGB readings down the count path.
    pub rgb_default_calibration: Option<f64>,
    /// Visible span of dual-channel sensors (nm)
    pub visible_span_nm: f64,
    /// Infrared span of dual-channel sensors (nm)
    pub infrared_span_nm: f64,
    /// Filter FWHM of narrowband sensors (nm)
    pub narrowband_fwhm_nm: f64,
    /// Lux budget for narrowband sensors without an estimated lux
    pub narrowband_default_lux: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            rgb_default_calibration: Some(sensors::TCS34725_DEFAULT_LUX_CALIBRATION),
            visible_span_nm: sensors::DUAL_VISIBLE_SPAN_NM,
            infrared_span_nm: sensors::DUAL_INFRARED_SPAN_NM,
            narrowband_fwhm_nm: sensors::NARROWBAND_FWHM_NM,
            narrowband_default_lux: sensors::NARROWBAND_DEFAULT_LUX,
        }
    }
}

/// Display histogram filtering
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HistogramConfig {
    /// Bins below this fraction of the peak confidence are dropped
    pub min_confidence_fraction: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self { min_confidence_fraction: quality::MIN_CONFIDENCE_FRACTION }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FusionConfig {
    /// Output bin layout
    pub bins: BinLayout,
    /// Mounting geometry
    pub geometry: LightGeometry,
    /// Mapper parameters
    pub mapper: MapperConfig,
    /// Histogram filtering
    pub histogram: HistogramConfig,
}

impl FusionConfig {
    /// Greenhouse rig: lights at 6 ft, sensors at canopy height 3 ft
    pub fn greenhouse() -> Self {
        Self::default()
    }

    /// Bench rig: lamps 1.5 ft above the sensors
    pub fn bench() -> Self {
        Self::default().with_geometry(LightGeometry::new(
            geometry::BENCH_LIGHT_HEIGHT_FT,
            geometry::BENCH_SENSOR_HEIGHT_FT,
        ))
    }

    /// Replace the bin layout
    pub fn with_bins(mut self, min_nm: f64, max_nm: f64, width_nm: f64) -> Self {
        self.bins = BinLayout { min_nm, max_nm, width_nm };
        self
    }

    /// Replace the mounting geometry
    pub fn with_geometry(mut self, geometry: LightGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set light and sensor heights
    pub fn with_heights(mut self, light_height_ft: f64, sensor_height_ft: f64) -> Self {
        self.geometry.light_height_ft = light_height_ft;
        self.geometry.sensor_height_ft = sensor_height_ft;
        self
    }

    /// Replace the mapper parameters
    pub fn with_mapper(mut self, mapper: MapperConfig) -> Self {
        self.mapper = mapper;
        self
    }

    /// Set the default RGB calibration (`None` disables it)
    pub fn with_rgb_default_calibration(mut self, factor: Option<f64>) -> Self {
        self.mapper.rgb_default_calibration = factor;
        self
    }

    /// Set the narrowband fallback lux budget
    pub fn with_narrowband_default_lux(mut self, lux: f64) -> Self {
        self.mapper.narrowband_default_lux = lux;
        self
    }

    /// Set the histogram confidence cut-off
    pub fn with_min_confidence_fraction(mut self, fraction: f64) -> Self {
        self.histogram.min_confidence_fraction = fraction;
        self
    }

    /// Check every field for physically meaningful values
    pub fn validate(&self) -> FusionResult<()> {
        let b = &self.bins;
        if !(b.min_nm.is_finite() && b.max_nm.is_finite() && b.width_nm.is_finite()) {
            return Err(invalid("bin layout must be finite"));
        }
        if b.width_nm <= 0.0 {
            return Err(invalid("bin width must be positive"));
        }
        if b.max_nm <= b.min_nm {
            return Err(invalid("bin range is empty or inverted"));
        }

        let g = &self.geometry;
        if !(g.light_height_ft.is_finite() && g.sensor_height_ft.is_finite() && g.epsilon.is_finite()) {
            return Err(invalid("geometry must be finite"));
        }
        if g.light_height_ft < 0.0 || g.sensor_height_ft < 0.0 {
            return Err(invalid("mounting heights must be non-negative"));
        }
        if g.epsilon < 0.0 {
            return Err(invalid("spatial epsilon must be non-negative"));
        }

        let m = &self.mapper;
        if let Some(factor) = m.rgb_default_calibration {
            if !factor.is_finite() || factor < 0.0 {
                return Err(invalid("rgb calibration must be finite and non-negative"));
            }
        }
        if !(m.visible_span_nm > 0.0 && m.infrared_span_nm > 0.0) {
            return Err(invalid("dual-channel spans must be positive"));
        }
        if !(m.narrowband_fwhm_nm > 0.0 && m.narrowband_fwhm_nm.is_finite()) {
            return Err(invalid("narrowband FWHM must be positive"));
        }
        if !m.narrowband_default_lux.is_finite() || m.narrowband_default_lux < 0.0 {
            return Err(invalid("narrowband default lux must be non-negative"));
        }

        let f = self.histogram.min_confidence_fraction;
        if !(0.0..=1.0).contains(&f) {
            return Err(invalid("confidence fraction must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(reason: &'static str) -> FusionError {
    FusionError::InvalidConfig { reason }
}
