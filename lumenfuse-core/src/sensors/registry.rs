//! Mapper dispatch by sensor kind
//!
//! ## Registration
//!
//! ```rust
//! use lumenfuse_core::{MapperConfig, SensorRegistry, SensorKind};
//! use lumenfuse_core::mapping::GenericSpectralMapper;
//! use lumenfuse_core::constants::{quality::AS7341_PROFILE, sensors::AS7341_CHANNELS};
//!
//! let mut registry = SensorRegistry::builtin(&MapperConfig::default());
//! registry.register(
//!     SensorKind::from_tag("AS7341_BOARD_B"),
//!     GenericSpectralMapper::new(&AS7341_CHANNELS, AS7341_PROFILE),
//! );
//! assert!(registry.get(&SensorKind::from_tag("AS7341_BOARD_B")).is_some());
//! ```
//!
//! Kinds without a mapper contribute nothing and get a flat minimal quality.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use core::fmt;

use crate::bins::WavelengthBin;
use crate::config::MapperConfig;
use crate::constants::{quality as q, sensors as s};
use crate::mapping::{
    BinContribution, BroadbandMapper, DualChannelMapper, GenericSpectralMapper, NarrowbandMapper,
    RgbMapper,
};
use crate::quality::QualityWeight;

use super::{SensorKind, SensorReading, SensorWavelengthMap};

/// Per-kind spectral model
///
/// Implementations are stateless with respect to readings: the same reading
/// and bins always produce the same output.
pub trait SpectralMapper: Send + Sync {
    /// Static channel table of this sensor type
    fn wavelength_map(&self) -> &SensorWavelengthMap;

    /// Spectral density (lux/nm) per bin
    fn map_to_bins(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> BinContribution;

    /// Trust in [0, 1] per bin, independent of distance
    fn quality(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> QualityWeight;
}

/// Sensor kind → mapper table
pub struct SensorRegistry {
    mappers: Vec<(SensorKind, Box<dyn SpectralMapper>)>,
}

impl SensorRegistry {
    /// Registry with no mappers
    pub fn empty() -> Self {
        Self { mappers: Vec::new() }
    }

    /// Registry with a mapper for every built-in kind
    pub fn builtin(config: &MapperConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(
            SensorKind::Tcs34725,
            RgbMapper::new(&s::TCS34725_CHANNELS, q::TCS34725_PROFILE, config.rgb_default_calibration),
        );
        registry.register(
            SensorKind::Tsl2591,
            DualChannelMapper::new(
                &s::TSL2591_CHANNELS,
                q::TSL2591_PROFILE,
                config.visible_span_nm,
                config.infrared_span_nm,
            ),
        );
        registry.register(
            SensorKind::As7262,
            NarrowbandMapper::new(
                &s::AS7262_CHANNELS,
                q::AS7262_PROFILE,
                config.narrowband_fwhm_nm,
                config.narrowband_default_lux,
            ),
        );
        registry.register(
            SensorKind::Bh1750,
            BroadbandMapper::new(q::BH1750_PROFILE, q::BH1750_VISIBLE_SCALE),
        );
        registry.register(
            SensorKind::Tsl2561,
            BroadbandMapper::new(q::TSL2561_PROFILE, q::LUX_METER_VISIBLE_SCALE),
        );
        registry.register(
            SensorKind::Veml7700,
            BroadbandMapper::new(q::VEML7700_PROFILE, q::LUX_METER_VISIBLE_SCALE),
        );
        registry.register(
            SensorKind::As7341,
            GenericSpectralMapper::new(&s::AS7341_CHANNELS, q::AS7341_PROFILE),
        );
        registry.register(
            SensorKind::As7265x,
            GenericSpectralMapper::new(&s::AS7265X_CHANNELS, q::AS7265X_PROFILE),
        );
        registry
    }

    /// Add a mapper, replacing any existing one for `kind`
    pub fn register<M: SpectralMapper + 'static>(&mut self, kind: SensorKind, mapper: M) {
        let boxed: Box<dyn SpectralMapper> = Box::new(mapper);
        match self.mappers.iter_mut().find(|(k, _)| *k == kind) {
            Some(slot) => slot.1 = boxed,
            None => self.mappers.push((kind, boxed)),
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<M: SpectralMapper + 'static>(mut self, kind: SensorKind, mapper: M) -> Self {
        self.register(kind, mapper);
        self
    }

    /// Mapper for a kind
    pub fn get(&self, kind: &SensorKind) -> Option<&dyn SpectralMapper> {
        self.mappers
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, m)| &**m)
    }

    /// Whether a mapper is registered for `kind`
    pub fn contains(&self, kind: &SensorKind) -> bool {
        self.get(kind).is_some()
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &SensorKind> {
        self.mappers.iter().map(|(k, _)| k)
    }

    /// Contribution of a reading; all zeros for unregistered kinds
    pub fn map_to_bins(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> BinContribution {
        match self.get(&reading.kind) {
            Some(mapper) => mapper.map_to_bins(reading, bins),
            None => {
                log_warn!("no mapper registered for sensor type {}", reading.kind);
                BinContribution::zeros(bins.len())
            }
        }
    }

    /// Quality of a reading; flat minimal weight for unregistered kinds
    pub fn quality(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> QualityWeight {
        match self.get(&reading.kind) {
            Some(mapper) => mapper.quality(reading, bins),
            None => QualityWeight::uniform(bins.len(), q::UNKNOWN_SENSOR_QUALITY),
        }
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::builtin(&MapperConfig::default())
    }
}

impl fmt::Debug for SensorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::create_spectrum_bins;

    #[test]
    fn builtin_covers_every_known_kind() {
        let registry = SensorRegistry::default();
        for kind in SensorKind::known() {
            let mapper = registry.get(&kind);
            assert!(mapper.is_some(), "missing mapper for {}", kind);
            assert!(!mapper.map(|m| m.wavelength_map().is_empty()).unwrap_or(true));
        }
    }

    #[test]
    fn unknown_kind_is_ignored() {
        let registry = SensorRegistry::default();
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let reading = SensorReading::lux(SensorKind::from_tag("MYSTERY"), 1000.0);

        let contribution = registry.map_to_bins(&reading, &bins);
        assert_eq!(contribution.len(), bins.len());
        assert!(contribution.iter().all(|d| d == 0.0));

        let quality = registry.quality(&reading, &bins);
        assert!(quality.iter().all(|w| w == 0.1));
    }

    #[test]
    fn as7341_quality_drops_in_channel_gaps() {
        let registry = SensorRegistry::default();
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let counts = crate::sensors::ChannelCounts::new().with_channel("clear", 900.0);
        let quality = registry.quality(&SensorReading::channels(SensorKind::As7341, counts), &bins);

        let at = |low: f64| quality.get(bins.iter().position(|b| b.low_nm == low).unwrap());
        assert!((at(460.0) - 0.63).abs() < 1e-12);
        assert!((at(520.0) - 0.63).abs() < 1e-12);
        assert!((at(640.0) - 0.27).abs() < 1e-12);
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = SensorRegistry::empty();
        registry.register(SensorKind::Bh1750, BroadbandMapper::new(q::BH1750_PROFILE, 0.6));
        registry.register(SensorKind::Bh1750, BroadbandMapper::new(q::VEML7700_PROFILE, 0.4));
        assert_eq!(registry.kinds().count(), 1);
    }
}
