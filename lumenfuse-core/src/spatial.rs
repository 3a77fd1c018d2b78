//! Spatial weighting from light geometry
//!
//! Lights hang at a fixed height above the sensor plane, so the light a
//! sensor sees travels a 3D path even when the sensor sits right under the
//! target:
//!
//! ```text
//!   light ─────●─────────────
//!              │╲
//!   vertical   │  ╲  d = √(horizontal² + vertical²)
//!              │    ╲
//!   sensors ───●──────●──────
//!           target  sensor
//! ```
//!
//! Weights follow the inverse-square law, `1 / (d² + ε)`, normalized to sum
//! to 1 across the sensor set.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::config::LightGeometry;
use crate::constants::geometry::COLOCATED_DISTANCE_FT;
use crate::numeric::compensated_sum;
use crate::sensors::Position;

/// 3D distance between a sensor and the light above `target` (ft)
pub fn light_distance_3d(sensor: &Position, target: &Position, geometry: &LightGeometry) -> f64 {
    let horizontal = sensor.planar_distance(target);
    libm::hypot(horizontal, geometry.vertical_offset())
}

/// Normalized inverse-square weight per sensor position.
///
/// Weights sum to 1 for any non-empty input. Sensors at zero distance with
/// no epsilon share the whole weight between them. If the total is zero or
/// NaN every sensor gets an equal share.
pub fn calculate_light_intensity_weights(
    positions: &[Position],
    target: &Position,
    geometry: &LightGeometry,
) -> Vec<f64> {
    if positions.is_empty() {
        return Vec::new();
    }

    let raw: Vec<f64> = positions
        .iter()
        .map(|p| {
            let d = light_distance_3d(p, target, geometry);
            1.0 / (d * d + geometry.epsilon)
        })
        .collect();

    let infinite = raw.iter().filter(|w| w.is_infinite()).count();
    if infinite > 0 {
        let share = 1.0 / infinite as f64;
        return raw.iter().map(|w| if w.is_infinite() { share } else { 0.0 }).collect();
    }

    let total = compensated_sum(raw.iter().copied());
    if total > 0.0 && total.is_finite() {
        raw.iter().map(|w| w / total).collect()
    } else {
        log_warn!("degenerate spatial weights for {} sensors, using equal weights", positions.len());
        let share = 1.0 / positions.len() as f64;
        raw.iter().map(|_| share).collect()
    }
}

/// Outcome of interpolating between two sensors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairInterpolation {
    /// Target coincides with the first sensor
    First,
    /// Target coincides with the second sensor
    Second,
    /// Inverse-square blend of both sensors
    Blend {
        /// Normalized weight of the first sensor
        weight_a: f64,
        /// Normalized weight of the second sensor
        weight_b: f64,
        /// 3D distance of the first sensor (ft)
        distance_a: f64,
        /// 3D distance of the second sensor (ft)
        distance_b: f64,
    },
}

impl PairInterpolation {
    /// Method name for reports
    pub fn method(&self) -> &'static str {
        match self {
            PairInterpolation::First | PairInterpolation::Second => "nearest_sensor",
            PairInterpolation::Blend { .. } => "inverse_distance_weighting_3d",
        }
    }

    /// Weights of (first, second)
    pub fn weights(&self) -> (f64, f64) {
        match *self {
            PairInterpolation::First => (1.0, 0.0),
            PairInterpolation::Second => (0.0, 1.0),
            PairInterpolation::Blend { weight_a, weight_b, .. } => (weight_a, weight_b),
        }
    }
}

/// Interpolate between two sensors at `target`.
///
/// A sensor closer than 0.01 ft in 3D is returned outright. This only
/// happens when lights and sensors share a height.
pub fn interpolate_pair(a: &Position, b: &Position, target: &Position, geometry: &LightGeometry) -> PairInterpolation {
    let distance_a = light_distance_3d(a, target, geometry);
    let distance_b = light_distance_3d(b, target, geometry);
    if distance_a < COLOCATED_DISTANCE_FT {
        return PairInterpolation::First;
    }
    if distance_b < COLOCATED_DISTANCE_FT {
        return PairInterpolation::Second;
    }
    let wa = 1.0 / (distance_a * distance_a);
    let wb = 1.0 / (distance_b * distance_b);
    let total = wa + wb;
    PairInterpolation::Blend {
        weight_a: wa / total,
        weight_b: wb / total,
        distance_a,
        distance_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colocated_sensor_keeps_baseline_distance() {
        let geometry = LightGeometry::default();
        let p = Position::new(1.0, 1.0);
        assert_eq!(light_distance_3d(&p, &p, &geometry), 3.0);
        let w = calculate_light_intensity_weights(&[p], &p, &geometry);
        assert_eq!(w, [1.0]);
    }

    #[test]
    fn weights_sum_to_one_and_favour_near() {
        let geometry = LightGeometry::default();
        let positions = [Position::new(0.0, 0.0), Position::new(2.0, 0.0), Position::new(0.0, 3.0)];
        let w = calculate_light_intensity_weights(&positions, &Position::new(1.0, 1.0), &geometry);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // (0,0) and (2,0) are both √2 away in the plane; (0,3) is √5 away
        assert!((w[0] - w[1]).abs() < 1e-12);
        assert!(w[0] > w[2]);
    }

    #[test]
    fn raw_weight_formula() {
        let geometry = LightGeometry::default();
        let target = Position::new(0.0, 0.0);
        let positions = [Position::new(0.0, 0.0), Position::new(4.0, 0.0)];
        let w = calculate_light_intensity_weights(&positions, &target, &geometry);
        let near = 1.0 / (9.0 + 0.01);
        let far = 1.0 / (25.0 + 0.01);
        assert!((w[0] - near / (near + far)).abs() < 1e-12);
    }

    #[test]
    fn colocated_sensors_split_the_weight() {
        let geometry = LightGeometry { light_height_ft: 3.0, sensor_height_ft: 3.0, epsilon: 0.0 };
        let p = Position::new(0.0, 0.0);
        let w = calculate_light_intensity_weights(&[p, p], &p, &geometry);
        assert_eq!(w, [0.5, 0.5]);
    }

    #[test]
    fn colocated_sensor_takes_all_weight_from_far_ones() {
        let geometry = LightGeometry { light_height_ft: 3.0, sensor_height_ft: 3.0, epsilon: 0.0 };
        let target = Position::new(1.0, 1.0);
        let positions = [Position::new(4.0, 1.0), target, Position::new(1.0, 7.0)];
        let w = calculate_light_intensity_weights(&positions, &target, &geometry);
        assert_eq!(w, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn nan_total_falls_back_to_equal() {
        let geometry = LightGeometry::default();
        let positions = [Position::new(f64::NAN, 0.0), Position::new(2.0, 0.0)];
        let w = calculate_light_intensity_weights(&positions, &Position::new(0.0, 0.0), &geometry);
        assert_eq!(w, [0.5, 0.5]);
    }

    #[test]
    fn empty_input_gives_no_weights() {
        assert!(calculate_light_intensity_weights(&[], &Position::default(), &LightGeometry::default()).is_empty());
    }

    #[test]
    fn pair_blend_and_nearest() {
        let geometry = LightGeometry::default();
        let a = Position::new(0.0, 0.0);
        let b = Position::new(2.0, 0.0);
        let mid = a.midpoint(&b);
        let result = interpolate_pair(&a, &b, &mid, &geometry);
        assert_eq!(result.method(), "inverse_distance_weighting_3d");
        let (wa, wb) = result.weights();
        assert!((wa - 0.5).abs() < 1e-12 && (wb - 0.5).abs() < 1e-12);

        let flat = LightGeometry::new(3.0, 3.0);
        assert_eq!(interpolate_pair(&a, &b, &b, &flat), PairInterpolation::Second);
    }
}
