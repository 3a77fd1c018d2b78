//! RGB + clear color sensors (TCS34725)
//!
//! Two paths:
//!
//! - **Calibrated**: `lux × factor` is split across red, green and blue by
//!   each channel's share of `r + g + b`, then spread over the channel's
//!   window as a density. Clear is left out so the three non-overlapping
//!   windows integrate back to exactly the calibrated lux.
//! - **Counts**: without a usable lux budget every channel (clear included)
//!   is normalized to `count / (gain × integration_time_ms)`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::WavelengthBin;
use crate::numeric::non_negative;
use crate::quality::{rgb_quality, QualityProfile, QualityWeight};
use crate::sensors::{ChannelWindow, ColorCounts, RawData, SensorReading, SensorWavelengthMap, SpectralMapper};

use super::{count_normalization, narrowest_channel_contribution, normalize_count, BinContribution};

/// Mapper for RGB + clear sensors
#[derive(Debug, Clone)]
pub struct RgbMapper {
    map: SensorWavelengthMap,
    profile: QualityProfile,
    default_calibration: Option<f64>,
}

impl RgbMapper {
    /// Channels are matched by name: `red_raw`, `green_raw`, `blue_raw`,
    /// `clear_raw`.
    pub fn new(channels: &[ChannelWindow], profile: QualityProfile, default_calibration: Option<f64>) -> Self {
        Self {
            map: SensorWavelengthMap::from_channels(channels),
            profile,
            default_calibration,
        }
    }

    /// Calibration factor in effect for a reading
    pub fn calibration_for(&self, reading: &SensorReading) -> Option<f64> {
        reading.lux_calibration.or(self.default_calibration)
    }

    fn channel_densities(&self, counts: &ColorCounts, calibration: Option<f64>) -> Vec<Option<f64>> {
        let red = non_negative(counts.red);
        let green = non_negative(counts.green);
        let blue = non_negative(counts.blue);
        let rgb_total = red + green + blue;
        let lux = non_negative(counts.lux.unwrap_or(0.0) * calibration.unwrap_or(0.0));

        if lux > 0.0 && rgb_total > 0.0 {
            return self
                .map
                .channels()
                .iter()
                .map(|window| {
                    let share = match window.name {
                        "red_raw" => red,
                        "green_raw" => green,
                        "blue_raw" => blue,
                        _ => return None,
                    } / rgb_total;
                    let width = window.width();
                    (width > 0.0).then(|| lux * share / width)
                })
                .collect();
        }

        let divisor = count_normalization(counts.gain, counts.integration_time_ms);
        self.map
            .channels()
            .iter()
            .map(|window| {
                let raw = match window.name {
                    "red_raw" => counts.red,
                    "green_raw" => counts.green,
                    "blue_raw" => counts.blue,
                    "clear_raw" => counts.clear,
                    _ => return None,
                };
                Some(normalize_count(raw, divisor))
            })
            .collect()
    }
}

impl SpectralMapper for RgbMapper {
    fn wavelength_map(&self) -> &SensorWavelengthMap {
        &self.map
    }

    fn map_to_bins(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> BinContribution {
        let RawData::Color(counts) = &reading.data else {
            log_warn!("{} reading has {} payload, expected color", reading.kind, reading.data.shape());
            return BinContribution::zeros(bins.len());
        };
        let densities = self.channel_densities(counts, self.calibration_for(reading));
        narrowest_channel_contribution(&self.map, &densities, bins)
    }

    fn quality(&self, _reading: &SensorReading, bins: &[WavelengthBin]) -> QualityWeight {
        rgb_quality(&self.profile, bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::create_spectrum_bins;
    use crate::constants::quality::TCS34725_PROFILE;
    use crate::constants::sensors::TCS34725_CHANNELS;
    use crate::sensors::SensorKind;

    fn mapper(default: Option<f64>) -> RgbMapper {
        RgbMapper::new(&TCS34725_CHANNELS, TCS34725_PROFILE, default)
    }

    fn reading(lux: Option<f64>) -> SensorReading {
        let mut counts = ColorCounts::rgbc(1200.0, 1800.0, 800.0, 4000.0);
        counts.lux = lux;
        SensorReading::color(SensorKind::Tcs34725, counts)
    }

    #[test]
    fn calibrated_path_conserves_lux() {
        let bins = create_spectrum_bins(280.0, 1100.0, 20.0);
        let c = mapper(None).map_to_bins(&reading(Some(450.5)).with_calibration(1.0), &bins);
        assert!((c.integrate(&bins) - 450.5).abs() < 1e-9);
    }

    #[test]
    fn default_calibration_applies() {
        let bins = create_spectrum_bins(280.0, 1100.0, 20.0);
        let c = mapper(Some(0.3545)).map_to_bins(&reading(Some(1000.0)), &bins);
        assert!((c.integrate(&bins) - 354.5).abs() < 1e-9);
    }

    #[test]
    fn green_density_follows_share() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let c = mapper(None).map_to_bins(&reading(Some(380.0)).with_calibration(1.0), &bins);
        // green share 1800/3800 of 380 lux over 80 nm
        let index = bins.iter().position(|b| b.low_nm == 520.0).unwrap();
        assert!((c.get(index) - 180.0 / 80.0).abs() < 1e-12);
        // 490-500 is only covered by clear, which the calibrated path skips
        let gap = bins.iter().position(|b| b.low_nm == 480.0).unwrap();
        assert!((c.get(gap) - (380.0 * 800.0 / 3800.0) / 60.0 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn count_path_without_lux() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let counts = ColorCounts::rgbc(1200.0, 1800.0, 800.0, 4000.0).with_timing(4.0, 2.5);
        let r = SensorReading::color(SensorKind::Tcs34725, counts);
        let c = mapper(Some(0.3545)).map_to_bins(&r, &bins);
        let green = bins.iter().position(|b| b.low_nm == 520.0).unwrap();
        assert!((c.get(green) - 180.0).abs() < 1e-9);
        // clear fills 400-420 in count mode
        let clear = bins.iter().position(|b| b.low_nm == 400.0).unwrap();
        assert!((c.get(clear) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn wrong_payload_gives_zeros() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let r = SensorReading::lux(SensorKind::Tcs34725, 100.0);
        assert!(!mapper(None).map_to_bins(&r, &bins).has_signal());
    }
}
