//! Sensor Channel Mapping
//!
//! ## Overview
//!
//! Every mapper turns one reading into a spectral density (lux/nm) per
//! canonical bin, scaled so that `Σ density × bin_width` over a range
//! approximates what the sensor itself measured there.
//!
//! ```text
//! RGB        lux × cal split by r/g/b share ─┐
//! dual       lux × cal split by vis/ir share ┼─► channel density ─► narrowest channel per bin
//! broadband  lux × cal over one channel     ─┤
//! generic    count / (gain × integration)   ─┘
//! narrowband Gaussian per channel, integrated per bin via erf ─► optional rescale to estimated lux
//! ```
//!
//! ## Narrowest Channel Rule
//!
//! When several channel windows overlap a bin, only the narrowest one
//! contributes, as `density × overlap / bin_width`. This avoids counting the
//! same light twice when a broad channel (clear, visible) encloses narrow
//! ones. Equal widths keep the channel declared first in the wavelength map.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::WavelengthBin;
use crate::numeric::{compensated_sum, non_negative};
use crate::sensors::SensorWavelengthMap;

pub mod broadband;
pub mod dual;
pub mod generic;
pub mod narrowband;
pub mod rgb;

pub use broadband::BroadbandMapper;
pub use dual::DualChannelMapper;
pub use generic::GenericSpectralMapper;
pub use narrowband::{rescale_to_lux, NarrowbandMapper};
pub use rgb::RgbMapper;

/// Non-negative spectral density (lux/nm) per bin for one sensor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinContribution(Vec<f64>);

impl BinContribution {
    /// All-zero contribution
    pub fn zeros(len: usize) -> Self {
        let mut v = Vec::with_capacity(len);
        v.resize(len, 0.0);
        Self(v)
    }

    /// Wrap densities, replacing negative or non-finite values with 0
    pub fn from_densities(densities: impl IntoIterator<Item = f64>) -> Self {
        Self(densities.into_iter().map(non_negative).collect())
    }

    /// Density of bin `index`, 0 past the end
    pub fn get(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bins
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Densities in bin order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Densities as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Whether any bin carries signal
    pub fn has_signal(&self) -> bool {
        self.0.iter().any(|d| *d > 0.0)
    }

    /// `Σ density × width` over all bins
    pub fn integrate(&self, bins: &[WavelengthBin]) -> f64 {
        compensated_sum(self.0.iter().zip(bins).map(|(d, b)| d * b.width()))
    }

    /// `Σ density × width` over bins whose center lies in `[low_nm, high_nm]`
    pub fn integrate_range(&self, bins: &[WavelengthBin], low_nm: f64, high_nm: f64) -> f64 {
        compensated_sum(
            self.0
                .iter()
                .zip(bins)
                .filter(|(_, b)| b.center_within(low_nm, high_nm))
                .map(|(d, b)| d * b.width()),
        )
    }

    /// Multiply every bin by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_densities(self.0.iter().map(|d| d * factor))
    }
}

/// Apply the narrowest-channel rule.
///
/// `densities[i]` is the density of channel `i` of `map`; `None` marks a
/// channel the reading did not report, which never takes part.
pub fn narrowest_channel_contribution(
    map: &SensorWavelengthMap,
    densities: &[Option<f64>],
    bins: &[WavelengthBin],
) -> BinContribution {
    BinContribution::from_densities(bins.iter().map(|bin| {
        let width = bin.width();
        if width <= 0.0 {
            return 0.0;
        }
        let eligible = |index: usize, window: &crate::sensors::ChannelWindow| {
            window.width() > 0.0 && densities.get(index).copied().flatten().is_some()
        };
        match map.narrowest_overlapping(bin, eligible) {
            Some((index, overlap)) => {
                densities.get(index).copied().flatten().unwrap_or(0.0) * overlap / width
            }
            None => 0.0,
        }
    }))
}

/// Count normalization divisor `gain × integration_time_ms`.
///
/// Missing values count as 1. Returns `None` when the product is not
/// positive, in which case counts are used as-is.
pub fn count_normalization(gain: Option<f64>, integration_time_ms: Option<f64>) -> Option<f64> {
    let product = gain.unwrap_or(1.0) * integration_time_ms.unwrap_or(1.0);
    (product.is_finite() && product > 0.0).then_some(product)
}

/// Normalize one raw count
#[inline]
pub fn normalize_count(raw: f64, divisor: Option<f64>) -> f64 {
    let raw = non_negative(raw);
    match divisor {
        Some(d) => raw / d,
        None => raw,
    }
}
