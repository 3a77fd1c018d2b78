//! Canonical Wavelength Bins
//!
//! Every sensor in a fusion run is projected onto the same ordered set of
//! contiguous, half-open, fixed-width bins. Bins are plain values: building
//! them twice with the same arguments yields the same set.
//!
//! ```text
//! min                                           max
//!  |[280,300)|[300,320)| ... |[820,840)|[840,860)|
//!                                        ^ starts below max, kept
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-open wavelength interval `[low_nm, high_nm)`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WavelengthBin {
    /// Inclusive lower edge (nm)
    pub low_nm: f64,
    /// Exclusive upper edge (nm)
    pub high_nm: f64,
}

impl WavelengthBin {
    /// Create a bin from its edges
    pub const fn new(low_nm: f64, high_nm: f64) -> Self {
        Self { low_nm, high_nm }
    }

    /// Bin width in nm
    #[inline]
    pub fn width(&self) -> f64 {
        self.high_nm - self.low_nm
    }

    /// Bin center in nm
    #[inline]
    pub fn center(&self) -> f64 {
        (self.low_nm + self.high_nm) / 2.0
    }

    /// Width of the intersection with `[low_nm, high_nm)`, 0 when disjoint
    #[inline]
    pub fn overlap(&self, low_nm: f64, high_nm: f64) -> f64 {
        let lo = self.low_nm.max(low_nm);
        let hi = self.high_nm.min(high_nm);
        (hi - lo).max(0.0)
    }

    /// Whether the center lies in `[low_nm, high_nm]`
    #[inline]
    pub fn center_within(&self, low_nm: f64, high_nm: f64) -> bool {
        let c = self.center();
        c >= low_nm && c <= high_nm
    }
}

impl From<(f64, f64)> for WavelengthBin {
    fn from((low_nm, high_nm): (f64, f64)) -> Self {
        Self::new(low_nm, high_nm)
    }
}

/// Build contiguous bins starting at `min_nm`, `width_nm` wide each.
///
/// A bin is emitted while its lower edge is below `max_nm`, so the last bin
/// may extend past `max_nm`. Non-finite inputs, a non-positive width or an
/// empty range yield no bins.
pub fn create_spectrum_bins(min_nm: f64, max_nm: f64, width_nm: f64) -> Vec<WavelengthBin> {
    if !(min_nm.is_finite() && max_nm.is_finite() && width_nm.is_finite())
        || width_nm <= 0.0
        || max_nm <= min_nm
    {
        return Vec::new();
    }

    // Index-based edges avoid drift from repeated addition.
    let count = libm::ceil((max_nm - min_nm) / width_nm) as usize;
    let mut bins = Vec::with_capacity(count);
    let mut index = 0usize;
    loop {
        let low = min_nm + index as f64 * width_nm;
        if low >= max_nm {
            break;
        }
        bins.push(WavelengthBin::new(low, low + width_nm));
        index += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_29_bins() {
        let bins = create_spectrum_bins(280.0, 850.0, 20.0);
        assert_eq!(bins.len(), 29);
        assert_eq!(bins[0], WavelengthBin::new(280.0, 300.0));
        assert_eq!(bins[28], WavelengthBin::new(840.0, 860.0));
    }

    #[test]
    fn exact_multiple_stops_at_max() {
        let bins = create_spectrum_bins(400.0, 700.0, 20.0);
        assert_eq!(bins.len(), 15);
        assert_eq!(bins.last().map(|b| b.high_nm), Some(700.0));
    }

    #[test]
    fn degenerate_inputs_give_no_bins() {
        assert!(create_spectrum_bins(400.0, 700.0, 0.0).is_empty());
        assert!(create_spectrum_bins(400.0, 700.0, -5.0).is_empty());
        assert!(create_spectrum_bins(700.0, 400.0, 20.0).is_empty());
        assert!(create_spectrum_bins(400.0, 400.0, 20.0).is_empty());
        assert!(create_spectrum_bins(f64::NAN, 700.0, 20.0).is_empty());
    }

    #[test]
    fn bins_are_deterministic() {
        assert_eq!(
            create_spectrum_bins(280.0, 850.0, 20.0),
            create_spectrum_bins(280.0, 850.0, 20.0)
        );
    }

    #[test]
    fn overlap_and_center() {
        let bin = WavelengthBin::new(480.0, 500.0);
        assert_eq!(bin.center(), 490.0);
        assert_eq!(bin.width(), 20.0);
        assert_eq!(bin.overlap(430.0, 490.0), 10.0);
        assert_eq!(bin.overlap(500.0, 580.0), 0.0);
        assert!(bin.center_within(400.0, 700.0));
        assert!(!bin.center_within(700.0, 1100.0));
    }
}
