//! Fused spectrum reports
//!
//! ```json
//! {
//!   "fused_spectrum": {
//!     "bin_290nm": {"wavelength_range": [280, 300], "intensity": 0.0,
//!                   "confidence": 0.0, "sources": []},
//!     ...
//!   },
//!   "wavelength_centers": [290, ...],
//!   "intensities": [...],
//!   "confidences": [...],
//!   "target_position": [1, 1],
//!   "source_sensors": ["TCS34725", "TSL2591"],
//!   "spatial_weights": [...],
//!   "spectrum_bins": [[280, 300], ...]
//! }
//! ```
//!
//! `fused_spectrum` keys are written in wavelength order, which a sorted map
//! would break (`bin_1010nm` < `bin_290nm`).

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use lumenfuse_core::fusion::{FusedBin, MidpointEstimate};
use lumenfuse_core::{FusedSpectrum, HistogramData};

use crate::SchemaError;

/// One contributor of one bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Sensor type tag
    pub sensor_type: String,
    /// Density the sensor reported for the bin
    pub contribution: f64,
    /// Spatial weight of the sensor at the target
    pub spatial_weight: f64,
    /// Quality weight of the sensor for the bin
    pub quality_weight: f64,
    /// Position of the sensor in the request
    pub sensor_index: usize,
}

/// One entry of `fused_spectrum`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinReport {
    /// `[low, high)` edges (nm)
    pub wavelength_range: (f64, f64),
    /// Fused density (lux/nm)
    pub intensity: f64,
    /// Total weight behind the intensity
    pub confidence: f64,
    /// Contributing sensors
    pub sources: Vec<SourceReport>,
}

impl From<&FusedBin> for BinReport {
    fn from(bin: &FusedBin) -> Self {
        BinReport {
            wavelength_range: (bin.range.low_nm, bin.range.high_nm),
            intensity: bin.intensity,
            confidence: bin.confidence,
            sources: bin
                .sources
                .iter()
                .map(|s| SourceReport {
                    sensor_type: s.sensor_type.tag().to_string(),
                    contribution: s.contribution,
                    spatial_weight: s.spatial_weight,
                    quality_weight: s.quality_weight,
                    sensor_index: s.sensor_index,
                })
                .collect(),
        }
    }
}

/// `bin_<center>nm` keyed bins in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinMap(pub Vec<(String, BinReport)>);

impl BinMap {
    /// Bin by key, e.g. `"bin_550nm"`
    pub fn get(&self, key: &str) -> Option<&BinReport> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, b)| b)
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bins
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for BinMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for BinMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BinMapVisitor;

        impl<'de> Visitor<'de> for BinMapVisitor {
            type Value = BinMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of bin_<center>nm keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BinMap, A::Error> {
                let mut bins = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, BinReport>()? {
                    bins.push(entry);
                }
                Ok(BinMap(bins))
            }
        }

        deserializer.deserialize_map(BinMapVisitor)
    }
}

/// Key of a bin in `fused_spectrum`
pub fn bin_key(center_nm: f64) -> String {
    format!("bin_{:.0}nm", center_nm)
}

/// Fused spectrum in the historical report layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionReport {
    /// Bins keyed `bin_<center>nm`
    pub fused_spectrum: BinMap,
    /// Bin centers (nm)
    pub wavelength_centers: Vec<f64>,
    /// Fused density per bin (lux/nm)
    pub intensities: Vec<f64>,
    /// Combined weight per bin
    pub confidences: Vec<f64>,
    /// `[x, y]` of the estimate
    pub target_position: (f64, f64),
    /// Sensor type tags in input order
    pub source_sensors: Vec<String>,
    /// Spatial weight per sensor, summing to 1
    pub spatial_weights: Vec<f64>,
    /// `[low, high)` edges per bin (nm)
    pub spectrum_bins: Vec<(f64, f64)>,
}

impl FusionReport {
    /// Report for a fused spectrum
    pub fn from_spectrum(fused: &FusedSpectrum) -> Self {
        FusionReport {
            fused_spectrum: BinMap(fused.bins.iter().map(|b| (bin_key(b.center), BinReport::from(b))).collect()),
            wavelength_centers: fused.wavelength_centers(),
            intensities: fused.intensities(),
            confidences: fused.confidences(),
            target_position: fused.target_position.into(),
            source_sensors: fused.source_sensors.iter().map(|k| k.tag().to_string()).collect(),
            spatial_weights: fused.spatial_weights.clone(),
            spectrum_bins: fused.bins.iter().map(|b| (b.range.low_nm, b.range.high_nm)).collect(),
        }
    }

    /// Compact JSON
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a report written by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&FusedSpectrum> for FusionReport {
    fn from(fused: &FusedSpectrum) -> Self {
        FusionReport::from_spectrum(fused)
    }
}

/// `fusion_summary` of a midpoint report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionSummary {
    /// Midpoint between the two sensors
    pub target_position: (f64, f64),
    /// Sensor type tags of the pair
    pub source_sensors: Vec<String>,
    /// Name of the fusion method
    pub fusion_method: String,
    /// Histogram interpolation quality
    pub quality_score: f64,
}

/// Midpoint estimate in the historical report layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidpointReport {
    /// Fused spectrum at the midpoint
    pub fused_spectrum: FusionReport,
    /// Display histogram
    pub histogram: HistogramData,
    /// Target, sensors, method and quality
    pub fusion_summary: FusionSummary,
}

impl From<&MidpointEstimate> for MidpointReport {
    fn from(estimate: &MidpointEstimate) -> Self {
        let summary = &estimate.summary;
        MidpointReport {
            fused_spectrum: FusionReport::from_spectrum(&estimate.spectrum),
            histogram: estimate.histogram.clone(),
            fusion_summary: FusionSummary {
                target_position: summary.target_position.into(),
                source_sensors: summary.source_sensors.iter().map(|k| k.tag().to_string()).collect(),
                fusion_method: summary.fusion_method.to_string(),
                quality_score: summary.quality_score,
            },
        }
    }
}

/// Histogram as JSON (`wavelengths`, `intensities`, `confidences`,
/// `bin_width`, `units`, `interpolation_quality`)
pub fn histogram_to_json(histogram: &HistogramData) -> Result<String, SchemaError> {
    Ok(serde_json::to_string(histogram)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumenfuse_core::{FusionEngine, Position, SensorKind, SensorReading};

    fn fused() -> FusedSpectrum {
        FusionEngine::default()
            .fuse_sensor_spectra(
                &[SensorReading::lux(SensorKind::Bh1750, 300.0)],
                &[Position::new(0.0, 0.0)],
                Position::new(1.0, 1.0),
            )
            .unwrap()
    }

    #[test]
    fn bin_keys_round_the_center() {
        assert_eq!(bin_key(290.0), "bin_290nm");
        assert_eq!(bin_key(1010.0), "bin_1010nm");
    }

    #[test]
    fn report_keeps_wavelength_order() {
        let json = FusionReport::from_spectrum(&fused()).to_json().unwrap();
        let first = json.find("\"bin_290nm\"").unwrap();
        let last = json.find("\"bin_850nm\"").unwrap();
        assert!(first < last);
        assert!(json.contains("\"target_position\":[1.0,1.0]"));
        assert!(json.contains("\"source_sensors\":[\"BH1750\"]"));
    }

    #[test]
    fn report_round_trips() {
        let report = FusionReport::from_spectrum(&fused());
        let parsed = FusionReport::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed.fused_spectrum.len(), report.fused_spectrum.len());
        assert_eq!(parsed.spectrum_bins, report.spectrum_bins);
        assert_eq!(parsed.source_sensors, report.source_sensors);
        for (a, b) in parsed.intensities.iter().zip(&report.intensities) {
            assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
        }
        let green = parsed.fused_spectrum.get("bin_550nm").unwrap();
        assert_eq!(green.wavelength_range, (540.0, 560.0));
        assert_eq!(green.sources[0].sensor_type, "BH1750");
    }

    #[test]
    fn histogram_field_names() {
        let histogram = lumenfuse_core::create_histogram_data(&fused());
        let json = histogram_to_json(&histogram).unwrap();
        for field in ["wavelengths", "intensities", "confidences", "bin_width", "units", "interpolation_quality"] {
            assert!(json.contains(&format!("\"{}\"", field)), "missing {}", field);
        }
        assert!(json.contains("\"lux_per_nm\""));
    }
}
