//! Sensor Readings, Kinds and Positions
//!
//! ## Reading Model
//!
//! A [`SensorReading`] is a snapshot produced once per poll by a driver and
//! consumed once by the engine. It pairs a [`SensorKind`] tag with the
//! sensor's native payload ([`RawData`]) and optional calibration metadata:
//!
//! ```text
//! SensorReading
//! ├── kind:             TCS34725 | TSL2591 | AS7262 | BH1750 | ... | Other("...")
//! ├── data:             Color | DualBroadband | Channels | Lux | Empty
//! ├── lux_calibration:  per-sensor lux multiplier (optional)
//! └── estimated_lux:    externally trusted total lux (optional)
//! ```
//!
//! Missing fields are the expected case with intermittent hardware. Mappers
//! read them through accessors that default to zero rather than failing.
//!
//! ## Dispatch
//!
//! The kind selects a [`SpectralMapper`] from a [`SensorRegistry`]. New
//! sensor types are supported by registering another mapper, not by editing
//! the engine.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod registry;
pub mod wavelength_map;

pub use registry::{SensorRegistry, SpectralMapper};
pub use wavelength_map::{ChannelWindow, SensorWavelengthMap};

/// Planar sensor or target position in grid units (treated as feet)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Position {
    /// Create a position
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar (x, y) distance to another position
    #[inline]
    pub fn planar_distance(&self, other: &Position) -> f64 {
        libm::hypot(self.x - other.x, self.y - other.y)
    }

    /// Point halfway between two positions
    pub fn midpoint(&self, other: &Position) -> Position {
        Position::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (f64, f64) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

/// Sensor type tag
///
/// Tags parse case-insensitively; anything unrecognised is kept verbatim in
/// [`SensorKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// RGB + clear color sensor
    Tcs34725,
    /// Visible + infrared dual-channel lux sensor
    Tsl2591,
    /// Six-channel narrowband visible spectral sensor
    As7262,
    /// Photopic lux meter
    Bh1750,
    /// Broadband + IR lux meter
    Tsl2561,
    /// High-accuracy lux meter
    Veml7700,
    /// 11-channel spectral sensor
    As7341,
    /// 18-channel spectral triad
    As7265x,
    /// Any other tag
    Other(String),
}

impl SensorKind {
    /// Every built-in kind
    pub fn known() -> [SensorKind; 8] {
        [
            SensorKind::Tcs34725,
            SensorKind::Tsl2591,
            SensorKind::As7262,
            SensorKind::Bh1750,
            SensorKind::Tsl2561,
            SensorKind::Veml7700,
            SensorKind::As7341,
            SensorKind::As7265x,
        ]
    }

    /// Canonical tag string
    pub fn tag(&self) -> &str {
        match self {
            SensorKind::Tcs34725 => "TCS34725",
            SensorKind::Tsl2591 => "TSL2591",
            SensorKind::As7262 => "AS7262",
            SensorKind::Bh1750 => "BH1750",
            SensorKind::Tsl2561 => "TSL2561",
            SensorKind::Veml7700 => "VEML7700",
            SensorKind::As7341 => "AS7341",
            SensorKind::As7265x => "AS7265X",
            SensorKind::Other(tag) => tag.as_str(),
        }
    }

    /// Parse a tag, case-insensitively
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::known()
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
            .unwrap_or_else(|| SensorKind::Other(String::from(tag)))
    }

    /// Whether this kind has a built-in mapper
    pub fn is_known(&self) -> bool {
        !matches!(self, SensorKind::Other(_))
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SensorKind {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<&str> for SensorKind {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

#[cfg(feature = "serde")]
impl Serialize for SensorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SensorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// RGB + clear counts from a color sensor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorCounts {
    /// Red channel raw count
    pub red: f64,
    /// Green channel raw count
    pub green: f64,
    /// Blue channel raw count
    pub blue: f64,
    /// Clear channel raw count
    pub clear: f64,
    /// Lux computed by the driver
    pub lux: Option<f64>,
    /// Analog gain multiplier
    pub gain: Option<f64>,
    /// Integration time (ms)
    pub integration_time_ms: Option<f64>,
}

impl ColorCounts {
    /// Counts without lux, gain or integration time
    pub fn rgbc(red: f64, green: f64, blue: f64, clear: f64) -> Self {
        Self { red, green, blue, clear, ..Self::default() }
    }

    /// Attach the driver's lux value
    pub fn with_lux(mut self, lux: f64) -> Self {
        self.lux = Some(lux);
        self
    }

    /// Attach gain and integration time
    pub fn with_timing(mut self, gain: f64, integration_time_ms: f64) -> Self {
        self.gain = Some(gain);
        self.integration_time_ms = Some(integration_time_ms);
        self
    }
}

/// Visible / infrared counts from a dual-channel sensor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BroadbandCounts {
    /// Visible channel count
    pub visible: f64,
    /// Infrared channel count
    pub infrared: f64,
    /// Full-spectrum channel count
    pub full_spectrum: Option<f64>,
    /// Lux computed by the driver
    pub lux: Option<f64>,
}

impl BroadbandCounts {
    /// Counts with the driver's lux value
    pub fn new(visible: f64, infrared: f64, lux: Option<f64>) -> Self {
        Self { visible, infrared, full_spectrum: None, lux }
    }
}

/// Named channel values from a multi-channel spectral sensor
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelCounts {
    /// `(channel name, raw value)` in driver order
    pub values: Vec<(String, f64)>,
    /// Analog gain multiplier
    pub gain: Option<f64>,
    /// Integration time (ms)
    pub integration_time_ms: Option<f64>,
}

impl ChannelCounts {
    /// Empty channel set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one channel
    pub fn with_channel(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Attach gain and integration time
    pub fn with_timing(mut self, gain: f64, integration_time_ms: f64) -> Self {
        self.gain = Some(gain);
        self.integration_time_ms = Some(integration_time_ms);
        self
    }

    /// Add or replace one channel
    pub fn set(&mut self, name: &str, value: f64) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((String::from(name), value)),
        }
    }

    /// Value of a channel, 0 when absent
    pub fn get(&self, name: &str) -> f64 {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    /// Whether the channel was reported
    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(n, _)| n == name)
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ChannelCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut counts = ChannelCounts::new();
        for (name, value) in iter {
            counts.set(name, value);
        }
        counts
    }
}

/// Native payload of a reading
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RawData {
    /// RGB + clear
    Color(ColorCounts),
    /// Visible + infrared
    DualBroadband(BroadbandCounts),
    /// Named narrowband channels
    Channels(ChannelCounts),
    /// Single lux value
    Lux {
        /// Illuminance (lux)
        lux: f64,
    },
    /// Nothing usable
    #[default]
    Empty,
}

impl RawData {
    /// Lux value reported by the driver, if any
    pub fn lux(&self) -> Option<f64> {
        match self {
            RawData::Color(c) => c.lux,
            RawData::DualBroadband(b) => b.lux,
            RawData::Lux { lux } => Some(*lux),
            RawData::Channels(_) | RawData::Empty => None,
        }
    }

    /// Short payload name for diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            RawData::Color(_) => "color",
            RawData::DualBroadband(_) => "dual_broadband",
            RawData::Channels(_) => "channels",
            RawData::Lux { .. } => "lux",
            RawData::Empty => "empty",
        }
    }
}

/// One poll of one sensor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorReading {
    /// Sensor type tag
    pub kind: SensorKind,
    /// Native payload
    pub data: RawData,
    /// Per-sensor lux calibration multiplier
    pub lux_calibration: Option<f64>,
    /// Externally trusted total lux
    pub estimated_lux: Option<f64>,
}

impl SensorReading {
    /// Reading with no calibration metadata
    pub fn new(kind: SensorKind, data: RawData) -> Self {
        Self { kind, data, lux_calibration: None, estimated_lux: None }
    }

    /// RGB + clear reading
    pub fn color(kind: SensorKind, counts: ColorCounts) -> Self {
        Self::new(kind, RawData::Color(counts))
    }

    /// Visible + infrared reading
    pub fn dual(kind: SensorKind, counts: BroadbandCounts) -> Self {
        Self::new(kind, RawData::DualBroadband(counts))
    }

    /// Multi-channel reading
    pub fn channels(kind: SensorKind, counts: ChannelCounts) -> Self {
        Self::new(kind, RawData::Channels(counts))
    }

    /// Single lux value reading
    pub fn lux(kind: SensorKind, lux: f64) -> Self {
        Self::new(kind, RawData::Lux { lux })
    }

    /// Attach a lux calibration multiplier
    pub fn with_calibration(mut self, factor: f64) -> Self {
        self.lux_calibration = Some(factor);
        self
    }

    /// Attach an externally estimated lux
    pub fn with_estimated_lux(mut self, lux: f64) -> Self {
        self.estimated_lux = Some(lux);
        self
    }

    /// Sensor's own lux figure: driver lux, else the estimated lux
    pub fn own_lux(&self) -> Option<f64> {
        self.data
            .lux()
            .or(self.estimated_lux)
            .filter(|lux| lux.is_finite())
    }
}
