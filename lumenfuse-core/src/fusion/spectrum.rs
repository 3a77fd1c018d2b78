//! Fused spectrum output types

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bins::WavelengthBin;
use crate::numeric::{compensated_sum, CompensatedSum};
use crate::sensors::{Position, SensorKind};

/// One sensor's share of one bin
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinSource {
    /// Index of the sensor in the fusion input
    pub sensor_index: usize,
    /// Sensor type tag
    pub sensor_type: SensorKind,
    /// Spectral density reported for this bin (lux/nm)
    pub contribution: f64,
    /// Spatial weight renormalized over this bin's contributors
    pub spatial_weight: f64,
    /// Quality weight for this bin
    pub quality_weight: f64,
}

impl BinSource {
    /// `spatial_weight × quality_weight`
    #[inline]
    pub fn combined_weight(&self) -> f64 {
        self.spatial_weight * self.quality_weight
    }
}

/// Fused value of one wavelength bin
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusedBin {
    /// Bin edges
    pub range: WavelengthBin,
    /// Bin center (nm)
    pub center: f64,
    /// Confidence-weighted mean density (lux/nm)
    pub intensity: f64,
    /// Total combined weight behind the value; 0 means no signal
    pub confidence: f64,
    /// Contributing sensors in input order
    pub sources: Vec<BinSource>,
}

impl FusedBin {
    /// Bin with no contributors
    pub fn empty(range: WavelengthBin) -> Self {
        Self { range, center: range.center(), intensity: 0.0, confidence: 0.0, sources: Vec::new() }
    }

    /// Collapse contributors into intensity and confidence.
    ///
    /// `sources` must carry renormalized spatial weights.
    pub fn from_sources(range: WavelengthBin, sources: Vec<BinSource>) -> Self {
        let mut weighted = CompensatedSum::new();
        let mut total = CompensatedSum::new();
        for source in &sources {
            let w = source.combined_weight();
            weighted.add(source.contribution * w);
            total.add(w);
        }
        let confidence = total.total();
        let intensity = if confidence > 0.0 { weighted.total() / confidence } else { 0.0 };
        Self {
            range,
            center: range.center(),
            intensity: intensity.max(0.0),
            confidence: confidence.max(0.0),
            sources,
        }
    }

    /// Whether any sensor backs this bin
    pub fn has_signal(&self) -> bool {
        self.confidence > 0.0
    }

    /// Whether the sensor at `sensor_index` takes part in this bin
    pub fn involves(&self, sensor_index: usize) -> bool {
        self.sources.iter().any(|s| s.sensor_index == sensor_index)
    }
}

/// Fusion output at one target position
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusedSpectrum {
    /// One entry per canonical bin, in wavelength order
    pub bins: Vec<FusedBin>,
    /// Where the spectrum was estimated
    pub target_position: Position,
    /// Sensor type of each input, in input order
    pub source_sensors: Vec<SensorKind>,
    /// Global spatial weights before per-bin renormalization
    pub spatial_weights: Vec<f64>,
}

impl FusedSpectrum {
    /// Bin centers (nm)
    pub fn wavelength_centers(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.center).collect()
    }

    /// Bin intensities (lux/nm)
    pub fn intensities(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.intensity).collect()
    }

    /// Bin confidences
    pub fn confidences(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.confidence).collect()
    }

    /// Bin edges
    pub fn spectrum_bins(&self) -> Vec<WavelengthBin> {
        self.bins.iter().map(|b| b.range).collect()
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the spectrum has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of bins with signal
    pub fn signal_bins(&self) -> usize {
        self.bins.iter().filter(|b| b.has_signal()).count()
    }

    /// `Σ intensity × width` over bins whose center lies in `[low_nm, high_nm]`
    pub fn integrate_range(&self, low_nm: f64, high_nm: f64) -> f64 {
        compensated_sum(
            self.bins
                .iter()
                .filter(|b| b.range.center_within(low_nm, high_nm))
                .map(|b| b.intensity * b.range.width()),
        )
    }

    /// Bin containing `wavelength_nm`
    pub fn bin_at(&self, wavelength_nm: f64) -> Option<&FusedBin> {
        self.bins
            .iter()
            .find(|b| wavelength_nm >= b.range.low_nm && wavelength_nm < b.range.high_nm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(index: usize, contribution: f64, spatial: f64, quality: f64) -> BinSource {
        BinSource {
            sensor_index: index,
            sensor_type: SensorKind::Bh1750,
            contribution,
            spatial_weight: spatial,
            quality_weight: quality,
        }
    }

    #[test]
    fn weighted_mean_of_sources() {
        let bin = FusedBin::from_sources(
            WavelengthBin::new(540.0, 560.0),
            vec![source(0, 2.0, 0.75, 0.4), source(1, 4.0, 0.25, 0.8)],
        );
        // weights 0.3 and 0.2
        assert!((bin.confidence - 0.5).abs() < 1e-12);
        assert!((bin.intensity - (2.0 * 0.3 + 4.0 * 0.2) / 0.5).abs() < 1e-12);
        assert_eq!(bin.center, 550.0);
        assert!(bin.involves(1) && !bin.involves(2));
    }

    #[test]
    fn zero_quality_means_no_signal() {
        let bin = FusedBin::from_sources(WavelengthBin::new(540.0, 560.0), vec![source(0, 2.0, 1.0, 0.0)]);
        assert_eq!(bin.intensity, 0.0);
        assert_eq!(bin.confidence, 0.0);
        assert!(!bin.has_signal());
    }

    #[test]
    fn empty_bin() {
        let bin = FusedBin::empty(WavelengthBin::new(280.0, 300.0));
        assert_eq!(bin.center, 290.0);
        assert!(bin.sources.is_empty());
    }
}
