//! Property tests for bins, weights and fusion
//!
//! - Bin layout covers exact ranges without gaps
//! - Spatial weights always form a distribution
//! - Calibrated mappers conserve lux over the full range
//! - Sensors never leak into bins they cannot see

#![cfg(test)]

mod common;

use lumenfuse_core::sensors::{BroadbandCounts, ColorCounts};
use lumenfuse_core::{
    calculate_light_intensity_weights, create_histogram_data_with, create_spectrum_bins, FusionConfig,
    FusionEngine, LightGeometry, Position, SensorKind, SensorReading,
};
use proptest::prelude::*;

fn position() -> impl Strategy<Value = Position> {
    (-50.0..50.0f64, -50.0..50.0f64).prop_map(|(x, y)| Position::new(x, y))
}

fn full_range_engine() -> FusionEngine {
    FusionEngine::new(FusionConfig::default().with_bins(280.0, 1100.0, 20.0))
}

proptest! {
    #[test]
    fn bins_tile_exact_ranges(min in 200u32..400, width in 1u32..50, count in 1usize..60) {
        let (min, width) = (min as f64, width as f64);
        let max = min + width * count as f64;
        let bins = create_spectrum_bins(min, max, width);

        prop_assert_eq!(bins.len(), count);
        prop_assert_eq!(bins[0].low_nm, min);
        prop_assert_eq!(bins[count - 1].high_nm, max);
        for pair in bins.windows(2) {
            prop_assert_eq!(pair[0].high_nm, pair[1].low_nm);
        }
    }

    #[test]
    fn spatial_weights_form_a_distribution(
        positions in prop::collection::vec(position(), 1..12),
        target in position(),
        light in 0.0..10.0f64,
    ) {
        let geometry = LightGeometry::new(light, 0.0);
        let weights = calculate_light_intensity_weights(&positions, &target, &geometry);
        prop_assert_eq!(weights.len(), positions.len());
        prop_assert!(weights.iter().all(|w| *w >= 0.0 && w.is_finite()));
        let total: f64 = weights.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn calibrated_rgb_conserves_lux(
        red in 1.0..10_000.0f64,
        green in 1.0..10_000.0f64,
        blue in 1.0..10_000.0f64,
        lux in 1.0..50_000.0f64,
        calibration in 0.1..3.0f64,
    ) {
        let engine = full_range_engine();
        let reading = SensorReading::color(
            SensorKind::Tcs34725,
            ColorCounts::rgbc(red, green, blue, red + green + blue).with_lux(lux),
        )
        .with_calibration(calibration);
        let integrated = engine.map_sensor_to_bins(&reading).integrate(engine.bins());
        prop_assert!((integrated - lux * calibration).abs() < 1e-9 * lux * calibration);
    }

    #[test]
    fn dual_channel_conserves_lux(
        visible in 0.0..10_000.0f64,
        infrared in 0.0..10_000.0f64,
        lux in 1.0..50_000.0f64,
    ) {
        prop_assume!(visible + infrared > 0.0);
        let engine = full_range_engine();
        let reading = SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(visible, infrared, Some(lux)));
        let integrated = engine.map_sensor_to_bins(&reading).integrate(engine.bins());
        prop_assert!((integrated - lux).abs() < 1e-9 * lux);
    }

    #[test]
    fn lux_meters_stay_out_of_infrared(
        meter in position(),
        dual in position(),
        target in position(),
        lux in 1.0..5_000.0f64,
    ) {
        let engine = FusionEngine::default();
        let readings = [
            common::dual_reading(),
            SensorReading::lux(SensorKind::Veml7700, lux),
        ];
        let fused = engine.fuse_sensor_spectra(&readings, &[dual, meter], target).unwrap();
        let alone = engine.fuse_sensor_spectra(&readings[..1], &[dual], target).unwrap();

        for (mixed, single) in fused.bins.iter().zip(&alone.bins) {
            if mixed.range.low_nm >= 700.0 {
                prop_assert!(!mixed.involves(1));
                prop_assert_eq!(mixed.intensity, single.intensity);
            }
        }
    }

    #[test]
    fn histogram_respects_cutoff(fraction in 0.0..1.0f64, lux in 1.0..5_000.0f64) {
        let engine = FusionEngine::default();
        let s = common::Scenario::three_sensor_bench();
        let mut readings = s.readings.clone();
        readings[2] = SensorReading::lux(SensorKind::Bh1750, lux);
        let fused = engine.fuse_sensor_spectra(&readings, &s.positions, s.target).unwrap();
        let peak = fused.confidences().into_iter().fold(0.0, f64::max);

        let histogram = create_histogram_data_with(&fused, fraction);
        prop_assert!(histogram.confidences.iter().all(|c| *c > 0.0 && *c >= peak * fraction));
        prop_assert!(histogram.interpolation_quality <= peak + 1e-12);
    }
}
