//! Spectral Fusion Engine
//!
//! ## Overview
//!
//! Combines per-sensor bin contributions into one confidence-weighted
//! spectrum at a target position. Each sensor is weighted twice: once for
//! where it is (spatial) and once for how well it measures each wavelength
//! (quality).
//!
//! ## Two-Phase Data Flow
//!
//! ```text
//! phase 1  for each sensor s, bin k with contribution > 0:
//!              observation(s, k, contribution, spatial_weight[s], quality[s][k])
//!
//! phase 2  for each bin k, over its observations only:
//!              sw'      = sw / Σ sw                 (per-bin renormalization)
//!              w        = sw' × quality
//!              intensity  = Σ(contribution × w) / Σ w
//!              confidence = Σ w
//! ```
//!
//! Renormalizing per bin keeps a sensor that cannot see a wavelength from
//! diluting the sensors that can. A bin without observations reports zero
//! intensity and zero confidence.
//!
//! ## Purity
//!
//! The engine holds only configuration and stateless mappers. Every call
//! allocates its own working data, so one engine can serve any number of
//! threads without locking and identical inputs give identical outputs.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

mod spectrum;

pub use spectrum::{BinSource, FusedBin, FusedSpectrum};

use crate::bins::WavelengthBin;
use crate::config::FusionConfig;
use crate::errors::{FusionError, FusionResult};
use crate::histogram::{create_histogram_data_with, HistogramData};
use crate::mapping::BinContribution;
use crate::quality::QualityWeight;
use crate::sensors::{Position, SensorKind, SensorReading, SensorRegistry};
use crate::spatial::calculate_light_intensity_weights;

/// Method name reported by midpoint estimates
pub const MIDPOINT_FUSION_METHOD: &str = "inverse_distance_weighted_spectral_mapping";

/// Phase-1 record: one sensor with signal in one bin
#[derive(Debug, Clone, Copy, PartialEq)]
struct Observation {
    sensor_index: usize,
    bin_index: usize,
    contribution: f64,
    spatial_weight: f64,
    quality_weight: f64,
}

/// Spectrum and histogram at one target
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEstimate {
    /// Fused spectrum
    pub spectrum: FusedSpectrum,
    /// Display histogram of the spectrum
    pub histogram: HistogramData,
}

/// Summary of a midpoint estimate
#[derive(Debug, Clone, PartialEq)]
pub struct MidpointSummary {
    /// Midpoint between the two sensors
    pub target_position: Position,
    /// Sensor types of the pair
    pub source_sensors: [SensorKind; 2],
    /// Fusion method name
    pub fusion_method: &'static str,
    /// Histogram interpolation quality
    pub quality_score: f64,
}

/// Spectrum estimate halfway between two sensors
#[derive(Debug, Clone, PartialEq)]
pub struct MidpointEstimate {
    /// Fused spectrum at the midpoint
    pub spectrum: FusedSpectrum,
    /// Display histogram
    pub histogram: HistogramData,
    /// Summary
    pub summary: MidpointSummary,
}

/// Confidence-weighted spectral fusion
#[derive(Debug)]
pub struct FusionEngine {
    config: FusionConfig,
    registry: SensorRegistry,
    bins: Vec<WavelengthBin>,
}

impl FusionEngine {
    /// Engine with the built-in mappers
    pub fn new(config: FusionConfig) -> Self {
        let registry = SensorRegistry::builtin(&config.mapper);
        Self::with_registry(config, registry)
    }

    /// Engine with a custom mapper registry
    pub fn with_registry(config: FusionConfig, registry: SensorRegistry) -> Self {
        let bins = config.bins.bins();
        Self { config, registry, bins }
    }

    /// Active configuration
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Mapper registry
    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Canonical bins shared by every fusion call
    pub fn bins(&self) -> &[WavelengthBin] {
        &self.bins
    }

    /// One sensor's spectral density per bin
    pub fn map_sensor_to_bins(&self, reading: &SensorReading) -> BinContribution {
        self.registry.map_to_bins(reading, &self.bins)
    }

    /// One sensor's quality weight per bin
    pub fn sensor_quality(&self, reading: &SensorReading) -> QualityWeight {
        self.registry.quality(reading, &self.bins)
    }

    /// Normalized spatial weight of each position at `target`
    pub fn spatial_weights(&self, positions: &[Position], target: Position) -> Vec<f64> {
        calculate_light_intensity_weights(positions, &target, &self.config.geometry)
    }

    /// Fuse all readings into one spectrum at `target`.
    ///
    /// Readings and positions are paired by index; differing lengths fail
    /// before any work is done.
    pub fn fuse_sensor_spectra(
        &self,
        readings: &[SensorReading],
        positions: &[Position],
        target: Position,
    ) -> FusionResult<FusedSpectrum> {
        if readings.len() != positions.len() {
            return Err(FusionError::LengthMismatch {
                readings: readings.len(),
                positions: positions.len(),
            });
        }

        let spatial_weights = self.spatial_weights(positions, target);
        let observations = self.observe(readings, &spatial_weights);
        let bins = self.aggregate(readings, &observations);

        let spectrum = FusedSpectrum {
            bins,
            target_position: target,
            source_sensors: readings.iter().map(|r| r.kind.clone()).collect(),
            spatial_weights,
        };
        log_debug!(
            "fused {} sensors at ({}, {}): {} of {} bins with signal",
            readings.len(),
            target.x,
            target.y,
            spectrum.signal_bins(),
            spectrum.len()
        );
        Ok(spectrum)
    }

    /// Phase 1: every (sensor, bin) pair with positive contribution
    fn observe(&self, readings: &[SensorReading], spatial_weights: &[f64]) -> Vec<Observation> {
        let mut observations = Vec::new();
        for (sensor_index, (reading, &spatial_weight)) in readings.iter().zip(spatial_weights).enumerate() {
            let contribution = self.map_sensor_to_bins(reading);
            let quality = self.sensor_quality(reading);
            observations.extend(
                contribution
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| *c > 0.0)
                    .map(|(bin_index, c)| Observation {
                        sensor_index,
                        bin_index,
                        contribution: c,
                        spatial_weight,
                        quality_weight: quality.get(bin_index),
                    }),
            );
        }
        observations
    }

    /// Phase 2: group by bin, renormalize spatial weights, collapse
    fn aggregate(&self, readings: &[SensorReading], observations: &[Observation]) -> Vec<FusedBin> {
        let mut grouped: Vec<Vec<&Observation>> = self.bins.iter().map(|_| Vec::new()).collect();
        for obs in observations {
            if let Some(group) = grouped.get_mut(obs.bin_index) {
                group.push(obs);
            }
        }

        self.bins
            .iter()
            .zip(grouped)
            .map(|(range, group)| {
                if group.is_empty() {
                    return FusedBin::empty(*range);
                }
                let spatial_total = crate::numeric::compensated_sum(group.iter().map(|o| o.spatial_weight));
                let sources = group
                    .iter()
                    .map(|o| BinSource {
                        sensor_index: o.sensor_index,
                        sensor_type: readings[o.sensor_index].kind.clone(),
                        contribution: o.contribution,
                        spatial_weight: if spatial_total > 0.0 { o.spatial_weight / spatial_total } else { 0.0 },
                        quality_weight: o.quality_weight,
                    })
                    .collect();
                FusedBin::from_sources(*range, sources)
            })
            .collect()
    }

    /// Display histogram with the configured confidence cut-off
    pub fn histogram(&self, fused: &FusedSpectrum) -> HistogramData {
        create_histogram_data_with(fused, self.config.histogram.min_confidence_fraction)
    }

    /// Fuse at several targets
    pub fn fuse_targets(
        &self,
        readings: &[SensorReading],
        positions: &[Position],
        targets: &[Position],
    ) -> FusionResult<Vec<TargetEstimate>> {
        targets
            .iter()
            .map(|&target| {
                let spectrum = self.fuse_sensor_spectra(readings, positions, target)?;
                let histogram = self.histogram(&spectrum);
                Ok(TargetEstimate { spectrum, histogram })
            })
            .collect()
    }

    /// Fuse two sensors at their midpoint
    pub fn estimate_midpoint_spectrum(
        &self,
        a: &SensorReading,
        position_a: Position,
        b: &SensorReading,
        position_b: Position,
    ) -> FusionResult<MidpointEstimate> {
        let target = position_a.midpoint(&position_b);
        let readings = [a.clone(), b.clone()];
        let spectrum = self.fuse_sensor_spectra(&readings, &[position_a, position_b], target)?;
        let histogram = self.histogram(&spectrum);
        let [kind_a, kind_b] = readings.map(|r| r.kind);
        let summary = MidpointSummary {
            target_position: target,
            source_sensors: [kind_a, kind_b],
            fusion_method: MIDPOINT_FUSION_METHOD,
            quality_score: histogram.interpolation_quality,
        };
        Ok(MidpointEstimate { spectrum, histogram, summary })
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new(FusionConfig::default())
    }
}
