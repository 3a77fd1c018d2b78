//! Mounting Geometry Constants
//!
//! The spatial model treats every light as hanging at a fixed height above a
//! plane of sensors. Planar grid units are treated as feet.

/// Height of grow lights above the floor (ft).
///
/// Source: typical greenhouse rig, fixtures on 6 ft rails
pub const DEFAULT_LIGHT_HEIGHT_FT: f64 = 6.0;

/// Height of light sensors above the floor (ft).
///
/// Sensors sit at canopy height, 3 ft below the fixtures. A sensor directly
/// under the target is therefore still 3 ft from the light.
pub const DEFAULT_SENSOR_HEIGHT_FT: f64 = 3.0;

/// Light height for a bench rig with lamps close over the sensors (ft).
pub const BENCH_LIGHT_HEIGHT_FT: f64 = 2.5;

/// Sensor height for a bench rig (ft).
pub const BENCH_SENSOR_HEIGHT_FT: f64 = 1.0;

/// Added to squared distances before inversion.
///
/// Keeps `1 / (d² + ε)` finite even with zero vertical offset.
pub const SPATIAL_EPSILON: f64 = 0.01;

/// 3D distance below which two-sensor interpolation returns the nearer
/// sensor outright instead of blending (ft).
pub const COLOCATED_DISTANCE_FT: f64 = 0.01;
