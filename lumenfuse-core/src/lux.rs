//! Lux estimation
//!
//! ## Photopic Integration
//!
//! A fused spectrum is turned back into one lux figure by weighting its
//! visible bins (centers 400-700 nm) with a photopic luminosity curve:
//!
//! ```text
//! lux = Σ(density × width × V(λ)) × Σ width / Σ(V(λ) × width)
//! ```
//!
//! The normalization makes a flat spectrum integrate to its own lux, so a
//! spectrum dominated by one lux meter reproduces that meter's reading. The
//! estimate is for validation and display only and never feeds back into
//! fusion.
//!
//! ## Zone Blending
//!
//! [`ZoneLuxEstimator`] blends the photopic estimate with an inverse-square
//! average of the sensors' own lux readings, each weighted by how much its
//! sensor type is trusted for lux.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bins::WavelengthBin;
use crate::constants::lux as c;
use crate::constants::spectrum::{VISIBLE_MAX_NM, VISIBLE_MIN_NM};
use crate::fusion::FusedSpectrum;
use crate::numeric::CompensatedSum;
use crate::sensors::{Position, SensorKind, SensorReading};

/// Photopic luminous efficiency model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LuminosityCurve {
    /// Tabulated CIE 1924 V(λ), linearly interpolated
    #[default]
    Cie1924,
    /// Triangle peaking at 555 nm, 155 nm half-width
    Triangular,
}

impl LuminosityCurve {
    /// Relative efficiency in [0, 1] at `wavelength_nm`
    pub fn efficiency(&self, wavelength_nm: f64) -> f64 {
        match self {
            LuminosityCurve::Cie1924 => cie_1924(wavelength_nm),
            LuminosityCurve::Triangular => {
                let distance = libm::fabs(wavelength_nm - c::TRIANGULAR_PEAK_NM);
                (1.0 - distance / c::TRIANGULAR_HALF_WIDTH_NM).max(0.0)
            }
        }
    }
}

fn cie_1924(wavelength_nm: f64) -> f64 {
    let table = &c::PHOTOPIC_V_LAMBDA;
    let position = (wavelength_nm - c::PHOTOPIC_TABLE_START_NM) / c::PHOTOPIC_TABLE_STEP_NM;
    if !position.is_finite() || position < 0.0 || position > (table.len() - 1) as f64 {
        return 0.0;
    }
    let index = libm::floor(position) as usize;
    let fraction = position - index as f64;
    match table.get(index + 1) {
        Some(next) => table[index] + (next - table[index]) * fraction,
        None => table[index],
    }
}

/// Photopic lux from bins and their densities.
///
/// Returns `None` when no visible bin has positive curve weight.
pub fn estimate_lux_from_spectrum(
    bins: &[WavelengthBin],
    intensities: &[f64],
    curve: LuminosityCurve,
) -> Option<f64> {
    let mut weighted = CompensatedSum::new();
    let mut weights = CompensatedSum::new();
    let mut total_width = CompensatedSum::new();

    for (bin, &density) in bins.iter().zip(intensities) {
        if !bin.center_within(VISIBLE_MIN_NM, VISIBLE_MAX_NM) {
            continue;
        }
        let width = bin.width();
        let v = curve.efficiency(bin.center());
        let density = if density.is_finite() { density.max(0.0) } else { 0.0 };
        weighted.add(density * width * v);
        weights.add(v * width);
        total_width.add(width);
    }

    let (weight_sum, total_width) = (weights.total(), total_width.total());
    (weight_sum > 0.0 && total_width > 0.0).then(|| weighted.total() * total_width / weight_sum)
}

/// Photopic lux of a fused spectrum
pub fn photopic_lux(fused: &FusedSpectrum, curve: LuminosityCurve) -> Option<f64> {
    estimate_lux_from_spectrum(&fused.spectrum_bins(), &fused.intensities(), curve)
}

/// Zone lux components
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneLux {
    /// Photopic estimate from the fused spectrum
    pub photopic: Option<f64>,
    /// Confidence-weighted inverse-square average of sensor lux
    pub sensor_average: Option<f64>,
    /// Final blended value
    pub blended: f64,
}

/// Blends photopic and sensor-average lux for a zone
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLuxEstimator {
    blend_alpha: f64,
    curve: LuminosityCurve,
    overrides: Vec<(SensorKind, f64)>,
}

impl Default for ZoneLuxEstimator {
    fn default() -> Self {
        Self {
            blend_alpha: c::DEFAULT_BLEND_ALPHA,
            curve: LuminosityCurve::default(),
            overrides: Vec::new(),
        }
    }
}

impl ZoneLuxEstimator {
    /// Estimator with default alpha (0.5) and the CIE 1924 curve
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight of the photopic estimate, clamped to [0, 1]
    pub fn with_blend_alpha(mut self, alpha: f64) -> Self {
        self.blend_alpha = crate::numeric::clamp_unit(alpha);
        self
    }

    /// Photopic curve
    pub fn with_curve(mut self, curve: LuminosityCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Override one sensor type's lux confidence, clamped to [0, 5]
    pub fn with_confidence(mut self, kind: SensorKind, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.max(0.0).min(c::MAX_LUX_CONFIDENCE)
        } else {
            0.0
        };
        match self.overrides.iter_mut().find(|(k, _)| *k == kind) {
            Some(slot) => slot.1 = confidence,
            None => self.overrides.push((kind, confidence)),
        }
        self
    }

    /// Blend weight of the photopic estimate
    pub fn blend_alpha(&self) -> f64 {
        self.blend_alpha
    }

    /// Lux confidence of a sensor type
    pub fn lux_confidence(&self, kind: &SensorKind) -> f64 {
        if let Some((_, confidence)) = self.overrides.iter().find(|(k, _)| k == kind) {
            return *confidence;
        }
        match kind {
            SensorKind::Tsl2591 => c::TSL2591_LUX_CONFIDENCE,
            SensorKind::Bh1750 | SensorKind::Veml7700 => c::LUX_METER_LUX_CONFIDENCE,
            SensorKind::Tcs34725 => c::TCS34725_LUX_CONFIDENCE,
            SensorKind::As7262 => c::AS7262_LUX_CONFIDENCE,
            SensorKind::As7265x | SensorKind::As7341 => c::MULTICHANNEL_LUX_CONFIDENCE,
            SensorKind::Tsl2561 | SensorKind::Other(_) => c::DEFAULT_LUX_CONFIDENCE,
        }
    }

    /// Confidence-weighted inverse-square average of the sensors' own lux.
    ///
    /// A sensor within 0.01 units of `target` is returned outright. Sensors
    /// without a lux figure are skipped.
    pub fn sensor_average(
        &self,
        readings: &[SensorReading],
        positions: &[Position],
        target: &Position,
    ) -> Option<f64> {
        let mut accum = CompensatedSum::new();
        let mut total = CompensatedSum::new();
        for (reading, position) in readings.iter().zip(positions) {
            let Some(lux) = reading.own_lux() else { continue };
            let distance = position.planar_distance(target);
            if distance <= c::COLOCATED_SENSOR_DISTANCE {
                return Some(lux);
            }
            let w = self.lux_confidence(&reading.kind) / (distance * distance);
            accum.add(lux * w);
            total.add(w);
        }
        let total = total.total();
        (total > 0.0).then(|| accum.total() / total)
    }

    /// Combine the two estimates.
    ///
    /// Both present: `α × photopic + (1 − α) × average`. Otherwise a positive
    /// photopic value, then the average, then 0.
    pub fn blend(&self, photopic: Option<f64>, sensor_average: Option<f64>) -> f64 {
        match (photopic, sensor_average) {
            (Some(p), Some(a)) => self.blend_alpha * p + (1.0 - self.blend_alpha) * a,
            (Some(p), None) if p > 0.0 => p,
            (_, a) => a.unwrap_or(0.0),
        }
    }

    /// Blended lux for the zone a fused spectrum was computed for
    pub fn estimate(&self, fused: &FusedSpectrum, readings: &[SensorReading], positions: &[Position]) -> ZoneLux {
        let photopic = photopic_lux(fused, self.curve);
        let sensor_average = self.sensor_average(readings, positions, &fused.target_position);
        ZoneLux { photopic, sensor_average, blended: self.blend(photopic, sensor_average) }
    }
}
