//! Reading dictionaries
//!
//! Decodes the per-sensor dictionaries produced by the polling layer into
//! [`SensorReading`]s, and encodes readings back into the same layout.
//!
//! The payload object decides the data shape, not the sensor type, so a
//! new sensor type can be fed through without touching this module.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use lumenfuse_core::sensors::{BroadbandCounts, ChannelCounts, ColorCounts};
use lumenfuse_core::{RawData, SensorKind, SensorReading};

use crate::SchemaError;

/// Keys of `raw_spectrum_data` that are never channels
const RESERVED_SPECTRUM_KEYS: [&str; 7] = [
    "lux",
    "estimated_lux",
    "full_spectrum",
    "gain",
    "integration_time_ms",
    "raw_values",
    "timestamp",
];

/// `raw_color_data` object of RGB sensors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawColorData {
    /// Red channel count
    #[serde(default)]
    pub red_raw: Option<f64>,
    /// Green channel count
    #[serde(default)]
    pub green_raw: Option<f64>,
    /// Blue channel count
    #[serde(default)]
    pub blue_raw: Option<f64>,
    /// Clear (unfiltered) channel count
    #[serde(default)]
    pub clear_raw: Option<f64>,
    /// Lux computed by the driver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lux: Option<f64>,
    /// Analog gain multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
    /// Integration time (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_time_ms: Option<f64>,
    /// Reported by some drivers; not used by fusion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_temperature_k: Option<f64>,
}

impl From<&RawColorData> for ColorCounts {
    fn from(raw: &RawColorData) -> Self {
        ColorCounts {
            red: raw.red_raw.unwrap_or(0.0),
            green: raw.green_raw.unwrap_or(0.0),
            blue: raw.blue_raw.unwrap_or(0.0),
            clear: raw.clear_raw.unwrap_or(0.0),
            lux: raw.lux,
            gain: raw.gain,
            integration_time_ms: raw.integration_time_ms,
        }
    }
}

impl From<&ColorCounts> for RawColorData {
    fn from(counts: &ColorCounts) -> Self {
        RawColorData {
            red_raw: Some(counts.red),
            green_raw: Some(counts.green),
            blue_raw: Some(counts.blue),
            clear_raw: Some(counts.clear),
            lux: counts.lux,
            gain: counts.gain,
            integration_time_ms: counts.integration_time_ms,
            color_temperature_k: None,
        }
    }
}

/// `raw_lux_data` object of plain lux meters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLuxData {
    /// Illuminance (lux)
    #[serde(default)]
    pub lux: Option<f64>,
}

/// One reading dictionary as exchanged with the polling layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyReading {
    /// Sensor type tag, e.g. `"TCS34725"`
    pub sensor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_color_data: Option<RawColorData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_spectrum_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_lux_data: Option<RawLuxData>,
    /// Per-sensor lux calibration multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lux_calibration: Option<f64>,
    /// Older name of `lux_calibration`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_factor: Option<f64>,
    /// Lux budget for sensors without a direct lux output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_lux: Option<f64>,
    /// Unix seconds; carried through, not used by fusion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl LegacyReading {
    /// Convert to a typed reading.
    ///
    /// Payload precedence is `raw_color_data`, `raw_spectrum_data`,
    /// `raw_lux_data`. A dictionary with none of them decodes to
    /// [`RawData::Empty`] and contributes nothing to fusion.
    pub fn to_reading(&self) -> Result<SensorReading, SchemaError> {
        let kind = SensorKind::from_tag(&self.sensor_type);
        let data = if let Some(color) = &self.raw_color_data {
            RawData::Color(ColorCounts::from(color))
        } else if let Some(spectrum) = &self.raw_spectrum_data {
            self.spectrum_data(spectrum)?
        } else if let Some(lux) = &self.raw_lux_data {
            match lux.lux {
                Some(lux) => RawData::Lux { lux },
                None => RawData::Empty,
            }
        } else {
            log::warn!("{} reading has no raw data payload", self.sensor_type);
            RawData::Empty
        };

        let mut reading = SensorReading::new(kind, data);
        reading.lux_calibration = self.lux_calibration.or(self.calibration_factor);
        reading.estimated_lux = self.estimated_lux.or_else(|| {
            self.raw_spectrum_data
                .as_ref()
                .and_then(|s| s.get("estimated_lux"))
                .and_then(Value::as_f64)
        });
        Ok(reading)
    }

    fn spectrum_data(&self, spectrum: &Map<String, Value>) -> Result<RawData, SchemaError> {
        let number = |key: &'static str| -> Result<Option<f64>, SchemaError> {
            match spectrum.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(value) => value.as_f64().map(Some).ok_or_else(|| SchemaError::InvalidPayload {
                    sensor_type: self.sensor_type.clone(),
                    field: key,
                    reason: "expected a number",
                }),
            }
        };

        if spectrum.contains_key("visible") || spectrum.contains_key("infrared") {
            return Ok(RawData::DualBroadband(BroadbandCounts {
                visible: number("visible")?.unwrap_or(0.0),
                infrared: number("infrared")?.unwrap_or(0.0),
                full_spectrum: number("full_spectrum")?,
                lux: number("lux")?,
            }));
        }

        let mut counts = ChannelCounts::new();
        counts.gain = number("gain")?;
        counts.integration_time_ms = number("integration_time_ms")?;

        let channels = match spectrum.get("raw_values") {
            Some(Value::Object(nested)) => nested,
            Some(Value::Null) | None => spectrum,
            Some(_) => {
                return Err(SchemaError::InvalidPayload {
                    sensor_type: self.sensor_type.clone(),
                    field: "raw_values",
                    reason: "expected an object",
                })
            }
        };
        for (name, value) in channels {
            if RESERVED_SPECTRUM_KEYS.contains(&name.as_str()) {
                continue;
            }
            match value.as_f64() {
                Some(v) => counts.set(name, v),
                None => log::debug!("{}: skipping non-numeric channel {}", self.sensor_type, name),
            }
        }
        Ok(RawData::Channels(counts))
    }

    /// Reading dictionary for a typed reading
    pub fn from_reading(reading: &SensorReading) -> Self {
        let mut legacy = LegacyReading {
            sensor_type: reading.kind.tag().to_string(),
            lux_calibration: reading.lux_calibration,
            estimated_lux: reading.estimated_lux,
            ..Default::default()
        };
        match &reading.data {
            RawData::Color(counts) => legacy.raw_color_data = Some(RawColorData::from(counts)),
            RawData::DualBroadband(counts) => {
                let mut map = Map::new();
                map.insert("visible".into(), Value::from(counts.visible));
                map.insert("infrared".into(), Value::from(counts.infrared));
                if let Some(full) = counts.full_spectrum {
                    map.insert("full_spectrum".into(), Value::from(full));
                }
                if let Some(lux) = counts.lux {
                    map.insert("lux".into(), Value::from(lux));
                }
                legacy.raw_spectrum_data = Some(map);
            }
            RawData::Channels(counts) => {
                let values: Map<String, Value> = counts
                    .values
                    .iter()
                    .map(|(name, v)| (name.clone(), Value::from(*v)))
                    .collect();
                let mut map = Map::new();
                map.insert("raw_values".into(), Value::Object(values));
                if let Some(gain) = counts.gain {
                    map.insert("gain".into(), Value::from(gain));
                }
                if let Some(t) = counts.integration_time_ms {
                    map.insert("integration_time_ms".into(), Value::from(t));
                }
                legacy.raw_spectrum_data = Some(map);
            }
            RawData::Lux { lux } => legacy.raw_lux_data = Some(RawLuxData { lux: Some(*lux) }),
            RawData::Empty => legacy.raw_lux_data = Some(RawLuxData { lux: None }),
        }
        legacy
    }
}

impl TryFrom<&LegacyReading> for SensorReading {
    type Error = SchemaError;

    fn try_from(legacy: &LegacyReading) -> Result<Self, Self::Error> {
        legacy.to_reading()
    }
}

impl From<&SensorReading> for LegacyReading {
    fn from(reading: &SensorReading) -> Self {
        LegacyReading::from_reading(reading)
    }
}

/// Decode one reading dictionary
pub fn decode_reading(json: &str) -> Result<SensorReading, SchemaError> {
    let legacy: LegacyReading = serde_json::from_str(json)?;
    legacy.to_reading()
}

/// Decode a JSON array of reading dictionaries
pub fn decode_readings(json: &str) -> Result<Vec<SensorReading>, SchemaError> {
    let legacy: Vec<LegacyReading> = serde_json::from_str(json)?;
    legacy.iter().map(LegacyReading::to_reading).collect()
}
