//! Many-channel spectral sensors (AS7341, AS7265X)
//!
//! Each reported channel is taken as a flat density over its window, after
//! gain and integration time normalization. Channels the map does not know
//! are ignored; channels the reading does not carry never win a bin.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::WavelengthBin;
use crate::quality::{narrowband_quality, QualityProfile, QualityWeight};
use crate::sensors::{ChannelWindow, RawData, SensorReading, SensorWavelengthMap, SpectralMapper};

use super::{count_normalization, narrowest_channel_contribution, normalize_count, BinContribution};

/// Fallback mapper for multi-channel spectral sensors
#[derive(Debug, Clone)]
pub struct GenericSpectralMapper {
    map: SensorWavelengthMap,
    profile: QualityProfile,
}

impl GenericSpectralMapper {
    /// Mapper over the given channel table
    pub fn new(channels: &[ChannelWindow], profile: QualityProfile) -> Self {
        Self { map: SensorWavelengthMap::from_channels(channels), profile }
    }
}

impl SpectralMapper for GenericSpectralMapper {
    fn wavelength_map(&self) -> &SensorWavelengthMap {
        &self.map
    }

    fn map_to_bins(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> BinContribution {
        let RawData::Channels(counts) = &reading.data else {
            log_warn!("{} reading has {} payload, expected channels", reading.kind, reading.data.shape());
            return BinContribution::zeros(bins.len());
        };
        let divisor = count_normalization(counts.gain, counts.integration_time_ms);
        let densities: Vec<Option<f64>> = self
            .map
            .channels()
            .iter()
            .map(|window| {
                counts
                    .contains(window.name)
                    .then(|| normalize_count(counts.get(window.name), divisor))
            })
            .collect();
        narrowest_channel_contribution(&self.map, &densities, bins)
    }

    fn quality(&self, _reading: &SensorReading, bins: &[WavelengthBin]) -> QualityWeight {
        narrowband_quality(&self.profile, &self.map, bins)
    }
}
