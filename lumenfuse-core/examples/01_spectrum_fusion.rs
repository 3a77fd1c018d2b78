//! Greenhouse Spectrum Fusion Example
//!
//! This example fuses three different light sensors into one spectrum at a
//! point none of them measures directly.
//!
//! ## What You'll Learn
//!
//! - Building readings for RGB, dual-channel and lux-meter sensors
//! - Fusing them at a target position
//! - Reading per-bin confidence and contributing sensors
//! - Turning the spectrum back into lux
//!
//! ## Sensor Layout
//!
//! ```text
//!   y
//!   3  BH1750
//!   2
//!   1       x target
//!   0  TCS34725    TSL2591
//!      0    1      2      x
//! ```
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_spectrum_fusion
//! ```

use lumenfuse_core::sensors::{BroadbandCounts, ColorCounts};
use lumenfuse_core::{
    create_histogram_data, FusionConfig, FusionEngine, Position, SensorKind, SensorReading, ZoneLuxEstimator,
};

fn main() {
    println!("LumenFuse Spectrum Fusion Example");
    println!("=================================\n");

    let engine = FusionEngine::new(FusionConfig::greenhouse());

    let readings = [
        SensorReading::color(
            SensorKind::Tcs34725,
            ColorCounts::rgbc(1200.0, 1800.0, 800.0, 4000.0).with_lux(450.5),
        )
        .with_calibration(1.0),
        SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(340.0, 180.0, Some(425.3))),
        SensorReading::lux(SensorKind::Bh1750, 520.8),
    ];
    let positions = [Position::new(0.0, 0.0), Position::new(2.0, 0.0), Position::new(0.0, 3.0)];
    let target = Position::new(1.0, 1.0);

    let fused = match engine.fuse_sensor_spectra(&readings, &positions, target) {
        Ok(fused) => fused,
        Err(e) => {
            println!("Fusion failed: {}", e);
            return;
        }
    };

    println!("Spatial weights at ({}, {}):", target.x, target.y);
    for (kind, weight) in fused.source_sensors.iter().zip(&fused.spatial_weights) {
        println!("  {:<10} {:.3}", kind, weight);
    }

    println!("\nFused bins with signal:");
    println!("  {:>7}  {:>10}  {:>10}  sources", "nm", "lux/nm", "confidence");
    for bin in fused.bins.iter().filter(|b| b.has_signal()) {
        let sources: Vec<String> = bin.sources.iter().map(|s| s.sensor_type.to_string()).collect();
        println!(
            "  {:>7.0}  {:>10.4}  {:>10.3}  {}",
            bin.center,
            bin.intensity,
            bin.confidence,
            sources.join(", ")
        );
    }

    let histogram = create_histogram_data(&fused);
    println!("\nHistogram: {} of {} bins kept", histogram.len(), fused.len());
    println!("Interpolation quality: {:.3}", histogram.interpolation_quality);

    let zone = ZoneLuxEstimator::new().estimate(&fused, &readings, &positions);
    println!("\nZone lux:");
    match zone.photopic {
        Some(lux) => println!("  photopic:       {:.1}", lux),
        None => println!("  photopic:       n/a"),
    }
    match zone.sensor_average {
        Some(lux) => println!("  sensor average: {:.1}", lux),
        None => println!("  sensor average: n/a"),
    }
    println!("  blended:        {:.1}", zone.blended);

    let midpoint = match engine.estimate_midpoint_spectrum(&readings[0], positions[0], &readings[1], positions[1]) {
        Ok(m) => m,
        Err(e) => {
            println!("Midpoint estimate failed: {}", e);
            return;
        }
    };
    println!(
        "\nMidpoint of {} and {} at ({}, {}): quality {:.3} via {}",
        midpoint.summary.source_sensors[0],
        midpoint.summary.source_sensors[1],
        midpoint.summary.target_position.x,
        midpoint.summary.target_position.y,
        midpoint.summary.quality_score,
        midpoint.summary.fusion_method
    );
}
