//! Single-value lux meters (BH1750, TSL2561, VEML7700)
//!
//! No spectral detail: the calibrated lux is spread evenly over the one
//! declared broadband channel, so the contribution integrates back to the
//! meter's own reading.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::WavelengthBin;
use crate::constants::sensors::BROADBAND_CHANNELS;
use crate::numeric::non_negative;
use crate::quality::{lux_meter_quality, QualityProfile, QualityWeight};
use crate::sensors::{ChannelWindow, RawData, SensorReading, SensorWavelengthMap, SpectralMapper};

use super::{narrowest_channel_contribution, BinContribution};

/// Mapper for broadband lux meters
#[derive(Debug, Clone)]
pub struct BroadbandMapper {
    map: SensorWavelengthMap,
    profile: QualityProfile,
    visible_scale: f64,
}

impl BroadbandMapper {
    /// Lux meter over the default 400-700 nm broadband channel
    pub fn new(profile: QualityProfile, visible_scale: f64) -> Self {
        Self::with_channel(BROADBAND_CHANNELS[0], profile, visible_scale)
    }

    /// Lux meter over a custom channel
    pub fn with_channel(channel: ChannelWindow, profile: QualityProfile, visible_scale: f64) -> Self {
        Self {
            map: SensorWavelengthMap::from_channels(&[channel]),
            profile,
            visible_scale,
        }
    }
}

impl SpectralMapper for BroadbandMapper {
    fn wavelength_map(&self) -> &SensorWavelengthMap {
        &self.map
    }

    fn map_to_bins(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> BinContribution {
        let lux = match &reading.data {
            RawData::Channels(_) | RawData::Empty => {
                log_warn!("{} reading has {} payload, expected lux", reading.kind, reading.data.shape());
                None
            }
            data => data.lux(),
        };
        let lux = non_negative(lux.unwrap_or(0.0) * reading.lux_calibration.unwrap_or(1.0));
        if lux <= 0.0 {
            return BinContribution::zeros(bins.len());
        }
        let densities: Vec<Option<f64>> = self
            .map
            .channels()
            .iter()
            .map(|window| (window.width() > 0.0).then(|| lux / window.width()))
            .collect();
        narrowest_channel_contribution(&self.map, &densities, bins)
    }

    fn quality(&self, _reading: &SensorReading, bins: &[WavelengthBin]) -> QualityWeight {
        lux_meter_quality(&self.profile, self.visible_scale, bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::create_spectrum_bins;
    use crate::constants::quality::{BH1750_PROFILE, BH1750_VISIBLE_SCALE};
    use crate::sensors::{ColorCounts, SensorKind};

    fn mapper() -> BroadbandMapper {
        BroadbandMapper::new(BH1750_PROFILE, BH1750_VISIBLE_SCALE)
    }

    #[test]
    fn lux_spreads_evenly_over_visible() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let c = mapper().map_to_bins(&SensorReading::lux(SensorKind::Bh1750, 520.8), &bins);
        let visible = bins.iter().position(|b| b.low_nm == 540.0).unwrap();
        assert!((c.get(visible) - 520.8 / 300.0).abs() < 1e-12);
        assert_eq!(c.get(0), 0.0);
        assert!((c.integrate(&bins) - 520.8).abs() < 1e-9);
    }

    #[test]
    fn calibration_and_color_payload() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let r = SensorReading::color(SensorKind::Veml7700, ColorCounts::default().with_lux(100.0))
            .with_calibration(1.5);
        let c = mapper().map_to_bins(&r, &bins);
        assert!((c.integrate(&bins) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn zero_or_negative_lux_gives_zeros() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        assert!(!mapper().map_to_bins(&SensorReading::lux(SensorKind::Bh1750, 0.0), &bins).has_signal());
        assert!(!mapper().map_to_bins(&SensorReading::lux(SensorKind::Bh1750, -4.0), &bins).has_signal());
    }
}
