//! Six-channel narrowband visible sensors (AS7262)
//!
//! ## Gaussian Channel Model
//!
//! Each channel is a Gaussian around its window center with the filter's
//! FWHM (`σ = FWHM / 2.355`). A lux budget is split across channels by their
//! share of the channel sum; the fraction of each channel falling in a bin
//! comes from the CDF difference:
//!
//! ```text
//! density(bin) = Σ_ch lux_ch × (Φ(hi; μ_ch, σ) − Φ(lo; μ_ch, σ)) / bin_width
//! ```
//!
//! The budget is the reading's estimated lux when positive, otherwise the
//! configured default. With an estimated lux the result is then rescaled so
//! the visible bins (centers 400-700 nm) integrate to exactly that value.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::WavelengthBin;
use crate::constants::sensors::FWHM_TO_SIGMA;
use crate::constants::spectrum::{VISIBLE_MAX_NM, VISIBLE_MIN_NM};
use crate::numeric::{compensated_sum, non_negative, normal_cdf};
use crate::quality::{narrowband_quality, QualityProfile, QualityWeight};
use crate::sensors::{ChannelWindow, RawData, SensorReading, SensorWavelengthMap, SpectralMapper};

use super::BinContribution;

/// Mapper for narrowband Gaussian-filter sensors
#[derive(Debug, Clone)]
pub struct NarrowbandMapper {
    map: SensorWavelengthMap,
    profile: QualityProfile,
    fwhm_nm: f64,
    default_lux: f64,
}

impl NarrowbandMapper {
    /// Channel values are looked up by the window names.
    pub fn new(channels: &[ChannelWindow], profile: QualityProfile, fwhm_nm: f64, default_lux: f64) -> Self {
        Self {
            map: SensorWavelengthMap::from_channels(channels),
            profile,
            fwhm_nm,
            default_lux,
        }
    }

    /// Gaussian standard deviation of every channel (nm)
    pub fn sigma(&self) -> f64 {
        self.fwhm_nm / FWHM_TO_SIGMA
    }

    fn gaussian_bins(&self, values: &[f64], total_lux: f64, bins: &[WavelengthBin]) -> BinContribution {
        let total: f64 = compensated_sum(values.iter().copied());
        let sigma = self.sigma();
        if total <= 0.0 || !(sigma > 0.0) {
            return BinContribution::zeros(bins.len());
        }

        let channel_lux: Vec<(f64, f64)> = self
            .map
            .channels()
            .iter()
            .zip(values)
            .map(|(window, value)| (window.center(), value / total * total_lux))
            .collect();

        BinContribution::from_densities(bins.iter().map(|bin| {
            let width = bin.width();
            if width <= 0.0 {
                return 0.0;
            }
            compensated_sum(channel_lux.iter().filter_map(|&(mu, lux)| {
                let fraction = normal_cdf(bin.high_nm, mu, sigma) - normal_cdf(bin.low_nm, mu, sigma);
                (fraction > 0.0).then(|| lux * fraction / width)
            }))
        }))
    }
}

/// Rescale a contribution so its visible bins integrate to `target_lux`.
///
/// Returns the input unchanged when either side is not positive.
pub fn rescale_to_lux(contribution: &BinContribution, bins: &[WavelengthBin], target_lux: f64) -> BinContribution {
    let current = contribution.integrate_range(bins, VISIBLE_MIN_NM, VISIBLE_MAX_NM);
    if current > 0.0 && target_lux > 0.0 && target_lux.is_finite() {
        contribution.scaled(target_lux / current)
    } else {
        contribution.clone()
    }
}

impl SpectralMapper for NarrowbandMapper {
    fn wavelength_map(&self) -> &SensorWavelengthMap {
        &self.map
    }

    fn map_to_bins(&self, reading: &SensorReading, bins: &[WavelengthBin]) -> BinContribution {
        let RawData::Channels(counts) = &reading.data else {
            log_warn!("{} reading has {} payload, expected channels", reading.kind, reading.data.shape());
            return BinContribution::zeros(bins.len());
        };
        let values: Vec<f64> = self
            .map
            .channels()
            .iter()
            .map(|window| non_negative(counts.get(window.name)))
            .collect();

        let estimated = reading.estimated_lux.filter(|lux| lux.is_finite() && *lux > 0.0);
        let total_lux = estimated.unwrap_or(self.default_lux);
        let contribution = self.gaussian_bins(&values, total_lux, bins);

        match estimated {
            Some(lux) => rescale_to_lux(&contribution, bins, lux),
            None => contribution,
        }
    }

    fn quality(&self, _reading: &SensorReading, bins: &[WavelengthBin]) -> QualityWeight {
        narrowband_quality(&self.profile, &self.map, bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::create_spectrum_bins;
    use crate::constants::quality::AS7262_PROFILE;
    use crate::constants::sensors::AS7262_CHANNELS;
    use crate::sensors::{ChannelCounts, SensorKind};

    fn mapper() -> NarrowbandMapper {
        NarrowbandMapper::new(&AS7262_CHANNELS, AS7262_PROFILE, 40.0, 500.0)
    }

    fn counts() -> ChannelCounts {
        [
            ("violet", 120.0),
            ("blue", 340.0),
            ("green", 510.0),
            ("yellow", 480.0),
            ("orange", 390.0),
            ("red", 260.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn estimated_lux_is_preserved_over_visible() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let r = SensorReading::channels(SensorKind::As7262, counts()).with_estimated_lux(612.0);
        let c = mapper().map_to_bins(&r, &bins);
        assert!((c.integrate_range(&bins, 400.0, 700.0) - 612.0).abs() < 1e-9);
    }

    #[test]
    fn default_budget_without_estimate() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let r = SensorReading::channels(SensorKind::As7262, counts());
        let c = mapper().map_to_bins(&r, &bins);
        // Channels sit well inside the bin range; nearly all of 500 lux lands
        assert!((c.integrate(&bins) - 500.0).abs() < 0.5);
        let peak = bins.iter().position(|b| b.low_nm == 540.0).unwrap();
        assert!(c.get(peak) > c.get(0));
    }

    #[test]
    fn dark_sensor_gives_zeros() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        let dark = SensorReading::channels(SensorKind::As7262, ChannelCounts::new()).with_estimated_lux(300.0);
        assert!(!mapper().map_to_bins(&dark, &bins).has_signal());
    }

    #[test]
    fn rescale_is_pure() {
        let bins = create_spectrum_bins(400.0, 700.0, 20.0);
        let c = BinContribution::from_densities(bins.iter().map(|_| 1.0));
        let scaled = rescale_to_lux(&c, &bins, 600.0);
        assert_eq!(c.get(0), 1.0);
        assert!((scaled.get(0) - 2.0).abs() < 1e-12);
        assert_eq!(rescale_to_lux(&BinContribution::zeros(bins.len()), &bins, 600.0).get(0), 0.0);
    }

    #[test]
    fn sigma_from_fwhm() {
        assert!((mapper().sigma() - 40.0 / 2.355).abs() < 1e-12);
    }
}
