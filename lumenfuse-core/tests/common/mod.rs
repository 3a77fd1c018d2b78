//! Shared fixtures for integration tests
//!
//! - Sensor layouts used across test files
//! - Reading builders with realistic greenhouse values
//! - Tolerance assertion helper

#![allow(dead_code)]

use lumenfuse_core::sensors::{BroadbandCounts, ChannelCounts, ColorCounts};
use lumenfuse_core::{Position, SensorKind, SensorReading};

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}

/// RGB sensor under LED grow lights, calibrated 1:1
pub fn rgb_reading() -> SensorReading {
    SensorReading::color(
        SensorKind::Tcs34725,
        ColorCounts::rgbc(1200.0, 1800.0, 800.0, 4000.0).with_lux(450.5),
    )
    .with_calibration(1.0)
}

/// Visible + IR sensor
pub fn dual_reading() -> SensorReading {
    SensorReading::dual(SensorKind::Tsl2591, BroadbandCounts::new(340.0, 180.0, Some(425.3)))
}

/// Plain lux meter
pub fn lux_reading() -> SensorReading {
    SensorReading::lux(SensorKind::Bh1750, 520.8)
}

/// Six-channel narrowband sensor with a flat-ish response
pub fn narrowband_reading() -> SensorReading {
    let counts = ChannelCounts::new()
        .with_channel("violet", 120.0)
        .with_channel("blue", 240.0)
        .with_channel("green", 410.0)
        .with_channel("yellow", 380.0)
        .with_channel("orange", 300.0)
        .with_channel("red", 260.0);
    SensorReading::channels(SensorKind::As7262, counts).with_estimated_lux(480.0)
}

/// Three-sensor greenhouse bench
pub struct Scenario {
    pub readings: Vec<SensorReading>,
    pub positions: Vec<Position>,
    pub target: Position,
}

impl Scenario {
    /// RGB at (0,0), dual at (2,0), lux meter at (0,3), target (1,1)
    pub fn three_sensor_bench() -> Self {
        Self {
            readings: vec![rgb_reading(), dual_reading(), lux_reading()],
            positions: vec![Position::new(0.0, 0.0), Position::new(2.0, 0.0), Position::new(0.0, 3.0)],
            target: Position::new(1.0, 1.0),
        }
    }

    /// Same bench plus a narrowband sensor at (3,3)
    pub fn four_sensor_bench() -> Self {
        let mut scenario = Self::three_sensor_bench();
        scenario.readings.push(narrowband_reading());
        scenario.positions.push(Position::new(3.0, 3.0));
        scenario
    }

    /// Sensor type of the reading at `index`
    pub fn kind(&self, index: usize) -> &SensorKind {
        &self.readings[index].kind
    }
}
