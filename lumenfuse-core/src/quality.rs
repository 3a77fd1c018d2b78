//! Per-bin measurement quality
//!
//! ## Model
//!
//! Each sensor type has three base accuracy scores ([`QualityProfile`]).
//! For every bin one of them is picked and scaled according to where the
//! bin center falls relative to what the sensor measures:
//!
//! | Rule        | In its bands           | Elsewhere visible | Outside visible |
//! |-------------|------------------------|-------------------|-----------------|
//! | lux meter   | lux × scale            | lux × scale       | 0.1             |
//! | RGB         | spectral × 1.2/1.3/1.1 | spectral × 0.8    | 0.1             |
//! | dual        | spectral (visible)     | spectral × 1.5 IR | 0.2             |
//! | narrowband  | by channel overlap fraction of the bin                       |
//!
//! Weights are independent of distance and always clamped to [0, 1].

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::bins::WavelengthBin;
use crate::constants::quality as q;
use crate::constants::spectrum::{INFRARED_MAX_NM, VISIBLE_MAX_NM, VISIBLE_MIN_NM};
use crate::numeric::clamp_unit;
use crate::sensors::SensorWavelengthMap;

/// Base accuracy scores of a sensor type, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityProfile {
    /// Accuracy of per-wavelength measurements
    pub spectral: f64,
    /// Accuracy of total illuminance
    pub lux: f64,
    /// Accuracy of broadband estimation
    pub broadband: f64,
}

impl QualityProfile {
    /// Create a profile
    pub const fn new(spectral: f64, lux: f64, broadband: f64) -> Self {
        Self { spectral, lux, broadband }
    }
}

/// Quality weight in [0, 1] per bin for one sensor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualityWeight(Vec<f64>);

impl QualityWeight {
    /// Same weight for every bin
    pub fn uniform(len: usize, weight: f64) -> Self {
        Self(vec_of(len, clamp_unit(weight)))
    }

    /// Clamp raw per-bin weights into [0, 1]
    pub fn from_raw(weights: impl IntoIterator<Item = f64>) -> Self {
        Self(weights.into_iter().map(clamp_unit).collect())
    }

    /// Weight of bin `index`, 0 past the end
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

    /// Weights in bin order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Weights as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

fn vec_of(len: usize, value: f64) -> Vec<f64> {
    let mut v = Vec::with_capacity(len);
    v.resize(len, value);
    v
}

#[inline]
fn visible(bin: &WavelengthBin) -> bool {
    bin.center_within(VISIBLE_MIN_NM, VISIBLE_MAX_NM)
}

/// Dedicated lux meters: scaled lux accuracy over visible bins
pub fn lux_meter_quality(profile: &QualityProfile, visible_scale: f64, bins: &[WavelengthBin]) -> QualityWeight {
    QualityWeight::from_raw(bins.iter().map(|bin| {
        if visible(bin) {
            profile.lux * visible_scale
        } else {
            q::OUT_OF_BAND_QUALITY
        }
    }))
}

/// RGB sensors: boosted inside the red, green and blue windows
pub fn rgb_quality(profile: &QualityProfile, bins: &[WavelengthBin]) -> QualityWeight {
    QualityWeight::from_raw(bins.iter().map(|bin| {
        let boost = if bin.center_within(620.0, 700.0) {
            q::RGB_RED_BOOST
        } else if bin.center_within(500.0, 580.0) {
            q::RGB_GREEN_BOOST
        } else if bin.center_within(430.0, 490.0) {
            q::RGB_BLUE_BOOST
        } else if visible(bin) {
            q::RGB_OTHER_VISIBLE_SCALE
        } else {
            return q::OUT_OF_BAND_QUALITY;
        };
        profile.spectral * boost
    }))
}

/// Visible + infrared sensors: boosted in the infrared band
pub fn dual_quality(profile: &QualityProfile, bins: &[WavelengthBin]) -> QualityWeight {
    QualityWeight::from_raw(bins.iter().map(|bin| {
        if visible(bin) {
            profile.spectral
        } else if bin.center_within(VISIBLE_MAX_NM, INFRARED_MAX_NM) {
            profile.spectral * q::DUAL_INFRARED_BOOST
        } else {
            q::DUAL_OUT_OF_BAND_QUALITY
        }
    }))
}

/// Multi-channel narrowband sensors: by best channel overlap with the bin
pub fn narrowband_quality(
    profile: &QualityProfile,
    map: &SensorWavelengthMap,
    bins: &[WavelengthBin],
) -> QualityWeight {
    QualityWeight::from_raw(bins.iter().map(|bin| {
        let overlap = map.max_overlap_fraction(bin);
        if overlap > q::NARROWBAND_FULL_OVERLAP {
            profile.spectral
        } else if overlap > q::NARROWBAND_PARTIAL_OVERLAP {
            profile.spectral * q::NARROWBAND_PARTIAL_SCALE
        } else {
            profile.spectral * q::NARROWBAND_INTERPOLATED_SCALE
        }
    }))
}
