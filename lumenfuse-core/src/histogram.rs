//! Display histogram
//!
//! Drops bins whose confidence falls below a fraction (default 10%) of the
//! peak confidence, and reports the mean confidence of what remains as the
//! interpolation quality.
//!
//! Bins with zero confidence carry no signal and are always dropped, so an
//! all-dark spectrum produces an empty histogram with quality 0.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::quality::MIN_CONFIDENCE_FRACTION;
use crate::constants::spectrum::INTENSITY_UNITS;
use crate::fusion::FusedSpectrum;
use crate::numeric::compensated_sum;

/// Histogram ready for plotting
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistogramData {
    /// Bin centers (nm)
    pub wavelengths: Vec<f64>,
    /// Intensities (lux/nm)
    pub intensities: Vec<f64>,
    /// Confidences
    pub confidences: Vec<f64>,
    /// Bin width (nm)
    pub bin_width: f64,
    /// Intensity unit
    pub units: String,
    /// Mean confidence of the kept bins
    pub interpolation_quality: f64,
}

impl HistogramData {
    /// Number of kept bins
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    /// Whether every bin was dropped
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

/// Histogram with the default 10% confidence cut-off
pub fn create_histogram_data(fused: &FusedSpectrum) -> HistogramData {
    create_histogram_data_with(fused, MIN_CONFIDENCE_FRACTION)
}

/// Histogram keeping bins with confidence ≥ `min_fraction` × peak
pub fn create_histogram_data_with(fused: &FusedSpectrum, min_fraction: f64) -> HistogramData {
    let bin_width = fused.bins.first().map(|b| b.range.width()).unwrap_or(0.0);
    let peak = fused.bins.iter().map(|b| b.confidence).fold(0.0, f64::max);
    let threshold = peak * min_fraction.max(0.0);

    let kept: Vec<_> = fused
        .bins
        .iter()
        .filter(|b| b.confidence > 0.0 && b.confidence >= threshold)
        .collect();

    let interpolation_quality = if kept.is_empty() {
        0.0
    } else {
        compensated_sum(kept.iter().map(|b| b.confidence)) / kept.len() as f64
    };

    HistogramData {
        wavelengths: kept.iter().map(|b| b.center).collect(),
        intensities: kept.iter().map(|b| b.intensity).collect(),
        confidences: kept.iter().map(|b| b.confidence).collect(),
        bin_width,
        units: String::from(INTENSITY_UNITS),
        interpolation_quality,
    }
}
