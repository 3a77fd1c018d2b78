//! Per-sensor channel wavelength windows
//!
//! A [`SensorWavelengthMap`] is the static table of a sensor type's native
//! channels and the wavelength interval each one responds to. Channels are
//! kept in declaration order, which is also the tie-break order of
//! [`SensorWavelengthMap::narrowest_overlapping`].

use heapless::Vec;

use crate::bins::WavelengthBin;
use crate::constants::sensors::MAX_SENSOR_CHANNELS;

/// One native channel and its nominal wavelength window `[low_nm, high_nm)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWindow {
    /// Channel name as reported by the driver
    pub name: &'static str,
    /// Lower edge (nm)
    pub low_nm: f64,
    /// Upper edge (nm)
    pub high_nm: f64,
    /// Wide clear/broadband window, ignored by overlap scoring
    pub broadband: bool,
}

impl ChannelWindow {
    /// Create a channel window
    pub const fn new(name: &'static str, low_nm: f64, high_nm: f64) -> Self {
        Self { name, low_nm, high_nm, broadband: false }
    }

    /// Create a clear/broadband window
    pub const fn broadband(name: &'static str, low_nm: f64, high_nm: f64) -> Self {
        Self { name, low_nm, high_nm, broadband: true }
    }

    /// Window width (nm)
    #[inline]
    pub fn width(&self) -> f64 {
        self.high_nm - self.low_nm
    }

    /// Window center (nm)
    #[inline]
    pub fn center(&self) -> f64 {
        (self.low_nm + self.high_nm) / 2.0
    }

    /// Overlap with a bin (nm)
    #[inline]
    pub fn overlap(&self, bin: &WavelengthBin) -> f64 {
        bin.overlap(self.low_nm, self.high_nm)
    }
}

/// Fixed-capacity table of a sensor's channel windows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorWavelengthMap {
    channels: Vec<ChannelWindow, MAX_SENSOR_CHANNELS>,
}

impl SensorWavelengthMap {
    /// Empty map
    pub const fn new() -> Self {
        Self { channels: Vec::new() }
    }

    /// Map from a channel table
    ///
    /// Channels past [`MAX_SENSOR_CHANNELS`] are dropped.
    pub fn from_channels(channels: &[ChannelWindow]) -> Self {
        let mut map = Self::new();
        for window in channels {
            if map.push(*window).is_err() {
                log_warn!("wavelength map full, dropping channel {}", window.name);
                break;
            }
        }
        map
    }

    /// Append a channel, handing it back when the map is full
    pub fn push(&mut self, window: ChannelWindow) -> Result<(), ChannelWindow> {
        self.channels.push(window)
    }

    /// Channels in declaration order
    pub fn channels(&self) -> &[ChannelWindow] {
        &self.channels
    }

    /// Look up a channel by name
    pub fn get(&self, name: &str) -> Option<&ChannelWindow> {
        self.channels.iter().find(|w| w.name == name)
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the map declares no channels
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Narrowest channel overlapping `bin` among those `eligible` accepts.
    ///
    /// Returns the channel index and the overlap (nm). Equal widths keep the
    /// first declared channel.
    pub fn narrowest_overlapping<F>(&self, bin: &WavelengthBin, mut eligible: F) -> Option<(usize, f64)>
    where
        F: FnMut(usize, &ChannelWindow) -> bool,
    {
        let mut best: Option<(usize, f64, f64)> = None;
        for (index, window) in self.channels.iter().enumerate() {
            let overlap = window.overlap(bin);
            if overlap <= 0.0 || !eligible(index, window) {
                continue;
            }
            let width = window.width();
            match best {
                Some((_, best_width, _)) if width >= best_width => {}
                _ => best = Some((index, width, overlap)),
            }
        }
        best.map(|(index, _, overlap)| (index, overlap))
    }

    /// Largest fraction of `bin` covered by any single narrowband channel
    ///
    /// Broadband windows are skipped.
    pub fn max_overlap_fraction(&self, bin: &WavelengthBin) -> f64 {
        let width = bin.width();
        if width <= 0.0 {
            return 0.0;
        }
        self.channels
            .iter()
            .filter(|w| !w.broadband)
            .map(|w| w.overlap(bin) / width)
            .fold(0.0, f64::max)
    }

    /// Lowest and highest wavelength covered by any channel
    pub fn span(&self) -> Option<(f64, f64)> {
        let low = self.channels.iter().map(|w| w.low_nm).reduce(f64::min)?;
        let high = self.channels.iter().map(|w| w.high_nm).reduce(f64::max)?;
        Some((low, high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::sensors::{AS7265X_CHANNELS, AS7341_CHANNELS, TCS34725_CHANNELS};

    #[test]
    fn from_channels_keeps_order() {
        let map = SensorWavelengthMap::from_channels(&TCS34725_CHANNELS);
        assert_eq!(map.len(), 4);
        assert_eq!(map.channels()[0].name, "red_raw");
        assert_eq!(map.get("clear_raw").map(|w| w.width()), Some(300.0));
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn eighteen_channels_fit() {
        let map = SensorWavelengthMap::from_channels(&AS7265X_CHANNELS);
        assert_eq!(map.len(), 18);
        assert_eq!(map.span(), Some((400.0, 950.0)));
    }

    #[test]
    fn narrowest_channel_wins() {
        let map = SensorWavelengthMap::from_channels(&TCS34725_CHANNELS);
        // [500, 520) overlaps green (80 nm) and clear (300 nm)
        let bin = WavelengthBin::new(500.0, 520.0);
        let (index, overlap) = map.narrowest_overlapping(&bin, |_, _| true).unwrap();
        assert_eq!(map.channels()[index].name, "green_raw");
        assert_eq!(overlap, 20.0);

        // Skipping green falls back to clear
        let (index, _) = map.narrowest_overlapping(&bin, |_, w| w.name != "green_raw").unwrap();
        assert_eq!(map.channels()[index].name, "clear_raw");
    }

    #[test]
    fn ties_keep_first_declared() {
        let map = SensorWavelengthMap::from_channels(&[
            ChannelWindow::new("first", 400.0, 440.0),
            ChannelWindow::new("second", 410.0, 450.0),
        ]);
        let bin = WavelengthBin::new(420.0, 440.0);
        let (index, _) = map.narrowest_overlapping(&bin, |_, _| true).unwrap();
        assert_eq!(map.channels()[index].name, "first");
    }

    #[test]
    fn no_overlap_gives_none() {
        let map = SensorWavelengthMap::from_channels(&TCS34725_CHANNELS);
        let bin = WavelengthBin::new(280.0, 300.0);
        assert!(map.narrowest_overlapping(&bin, |_, _| true).is_none());
        assert_eq!(map.max_overlap_fraction(&bin), 0.0);
    }

    #[test]
    fn clear_window_does_not_score_overlap() {
        let map = SensorWavelengthMap::from_channels(&AS7341_CHANNELS);
        assert!(map.get("clear").unwrap().broadband);
        // only clear reaches into 640-660
        assert_eq!(map.max_overlap_fraction(&WavelengthBin::new(640.0, 660.0)), 0.0);
        assert_eq!(map.max_overlap_fraction(&WavelengthBin::new(460.0, 480.0)), 0.5);
    }

    #[test]
    fn overflow_is_truncated() {
        let many = [ChannelWindow::new("x", 400.0, 410.0); MAX_SENSOR_CHANNELS + 3];
        let map = SensorWavelengthMap::from_channels(&many);
        assert_eq!(map.len(), MAX_SENSOR_CHANNELS);
    }
}
