//! Numeric helpers shared by the fusion stages
//!
//! Weighted means over many small contributions lose precision when summed
//! naively, so accumulation goes through a compensated (Neumaier) sum.

/// Compensated floating point accumulator (Neumaier variant of Kahan).
///
/// ```text
/// t = sum + x
/// c += if |sum| >= |x| { (sum - t) + x } else { (x - t) + sum }
/// sum = t
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    /// Empty accumulator
    pub const fn new() -> Self {
        Self { sum: 0.0, compensation: 0.0 }
    }

    /// Add one term
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if libm::fabs(self.sum) >= libm::fabs(value) {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// Current total
    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl core::iter::FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        for value in iter {
            acc.add(value);
        }
        acc
    }
}

/// Compensated sum of an iterator of values
pub fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().collect::<CompensatedSum>().total()
}

/// Clamp to the unit interval, mapping NaN to 0
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0).min(1.0)
    }
}

/// Replace negative or non-finite values with 0
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Standard normal CDF via `erf`
#[inline]
pub fn normal_cdf(x: f64, mean: f64, sigma: f64) -> f64 {
    0.5 * (1.0 + libm::erf((x - mean) / (sigma * core::f64::consts::SQRT_2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensated_sum_recovers_small_terms() {
        let mut acc = CompensatedSum::new();
        acc.add(1.0e16);
        acc.add(1.0);
        acc.add(-1.0e16);
        assert_eq!(acc.total(), 1.0);
    }

    #[test]
    fn compensated_sum_from_iterator() {
        let total = compensated_sum([0.1; 10]);
        assert!((total - 1.0).abs() < 1e-15);
    }

    #[test]
    fn clamp_unit_handles_nan_and_bounds() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.4), 0.4);
    }

    #[test]
    fn non_negative_filters_garbage() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
    }

    #[test]
    fn normal_cdf_is_symmetric() {
        assert!((normal_cdf(0.0, 0.0, 1.0) - 0.5).abs() < 1e-12);
        let left = normal_cdf(-1.0, 0.0, 1.0);
        let right = normal_cdf(1.0, 0.0, 1.0);
        assert!((left + right - 1.0).abs() < 1e-12);
        assert!((right - 0.841_344_746).abs() < 1e-6);
    }
}
