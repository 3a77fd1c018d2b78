//! Visible + infrared dual-channel sensors (TSL2591)
//!
//! The driver's lux (times an optional calibration, default 1.0) is split by
//! the visible/infrared count share and each share spread over its span:
//!
//! ```text
//! visible density  = lux × vis / (vis + ir) / visible_span   (300 nm)
//! infrared density = lux × ir  / (vis + ir) / infrared_span  (400 nm)
//! ```
//!
//! Without a lux value or counts there is nothing to distribute and the
//! contribution is all zeros.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::WavelengthBin;
use crate::numeric::non_negative;
use crate::quality::{dual_quality, QualityProfile, QualityWeight};
use crate::sensors::{ChannelWindow, RawData, SensorReading, SensorWavelengthMap, SpectralMapper};

use super::{narrowest_channel_contribution, BinContribution};

/// Mapper for dual visible/infrared sensors
#[derive(Debug, Clone)]
pub struct DualChannelMapper {
    map: SensorWavelengthMap,
    profile: QualityProfile,
    visible_span_nm: f64,
    infrared_span_nm: f64,
}

impl DualChannelMapper {
    /// Channels are matched by name: `visible`, `infrared`.
    pub fn new(
        channels: &[ChannelWindow],
        profile: QualityProfile,
        visible_span_nm: f64,
        infrared_span_nm: f64,
    ) -> Self {
        Self {
            map: SensorWavelengthMap::from_channels(channels),
            profile,
            visible_span_nm,
            infrared_span_nm,
        }
    }

    /// Visible and infrared densities (lux/nm), if the reading carries both
    /// a lux value and counts
    pub fn densities(&self, reading: &SensorReading) -> Option<(f64, f64)> {
        let RawData::DualBroadband(counts) = &reading.data else {
            log_warn!("{} reading has {} payload, expected dual_broadband", reading.kind, reading.data.shape());
            return None;
        };
        let lux = non_negative(counts.lux? * reading.lux_calibration.unwrap_or(1.0));
        let visible = non_negative(counts.visible);
        let infrared = non_negative(counts.infrared);
        let total = visible + infrared;
        if lux <= 0.0 || total <= 0.0 || self.visible_span_nm <= 0.0 || self.infrared_span_nm <= 0.0 {
            return None;
        }
        Some((
            lux * (visible / total) / self.visible_span_nm,
            lux * (infrared / total) / self.infrared_span_nm,
        ))
    }
}

impl SpectralMapper for DualChannelMapper {
    fn wavelength_map(&self) -> &SensorWavelengthMap {
        &self.map
    }

    fn map_to_bins(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> BinContribution {
        let Some((visible, infrared)) = self.densities(reading) else {
            return BinContribution::zeros(bins.len());
        };
        let densities: Vec<Option<f64>> = self
            .map
            .channels()
            .iter()
            .map(|window| match window.name {
                "visible" => Some(visible),
                "infrared" => Some(infrared),
                _ => None,
            })
            .collect();
        narrowest_channel_contribution(&self.map, &densities, bins)
    }

    fn quality(&self, _reading: &SensorReading, bins: &[WavelengthBin]) -> QualityWeight {
        dual_quality(&self.profile, bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::create_spectrum_bins;
    use crate::constants::quality::TSL2591_PROFILE;
    use crate::constants::sensors::TSL2591_CHANNELS;
    use crate::sensors::{BroadbandCounts, SensorKind};

    fn mapper() -> DualChannelMapper {
        DualChannelMapper::new(&TSL2591_CHANNELS, TSL2591_PROFILE, 300.0, 400.0)
    }

    #[test]
    fn full_range_conserves_lux() {
        let bins = create_spectrum_bins(280.0, 1100.0, 20.0);
        let r = SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(340.0, 180.0, Some(425.3)));
        let c = mapper().map_to_bins(&r, &bins);
        assert!((c.integrate(&bins) - 425.3).abs() < 1e-9);
    }

    #[test]
    fn calibration_scales_lux() {
        let bins = create_spectrum_bins(280.0, 1100.0, 20.0);
        let r = SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(1.0, 1.0, Some(100.0)))
            .with_calibration(2.0);
        let c = mapper().map_to_bins(&r, &bins);
        assert!((c.integrate(&bins) - 200.0).abs() < 1e-9);
        assert!((c.integrate_range(&bins, 400.0, 700.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn infrared_reaches_past_700() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let r = SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(340.0, 180.0, Some(425.3)));
        let c = mapper().map_to_bins(&r, &bins);
        let ir = bins.iter().position(|b| b.low_nm == 760.0).unwrap();
        let expected = 425.3 * (180.0 / 520.0) / 400.0;
        assert!((c.get(ir) - expected).abs() < 1e-12);
        assert_eq!(c.get(0), 0.0);
    }

    #[test]
    fn missing_lux_gives_zeros() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let r = SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(340.0, 180.0, None));
        assert!(!mapper().map_to_bins(&r, &bins).has_signal());

        let dark = SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(0.0, 0.0, Some(10.0)));
        assert!(!mapper().map_to_bins(&dark, &bins).has_signal());
    }
}
