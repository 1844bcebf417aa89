//! Rolling sample standard deviation.
//!
//! STDDEV(n)[i] = sqrt(sum((v[i-j] - mean)^2 for j in 0..n) / (n - 1))
//!
//! Uses Bessel's correction (divide by n-1). Each window is reduced directly in
//! two passes (mean, then squared deviations) instead of a running sum of
//! squares, which loses precision under cancellation.
//! Lookback: length - 1.

use super::{extract_source, Indicator, PriceSource};
use crate::domain::Candle;

/// Rolling sample standard deviation over windows of `length` values.
///
/// `None` for `i < length-1`, for windows holding a non-finite value, where
/// the mean or variance overflows, and at every index when `length < 2`: a
/// single-value window has no sample variance (the n-1 denominator is zero).
pub fn rolling_std_dev(values: &[f64], length: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if length < 2 || n < length {
        return result;
    }

    let count = length as f64;

    for i in (length - 1)..n {
        let window = &values[(i + 1 - length)..=i];
        if !window.iter().all(|v| v.is_finite()) {
            continue;
        }

        let mean = window.iter().sum::<f64>() / count;
        if !mean.is_finite() {
            continue;
        }
        let variance = window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (count - 1.0);

        result[i] = Some(variance.sqrt()).filter(|sd| sd.is_finite());
    }

    result
}

#[derive(Debug, Clone)]
pub struct StdDev {
    length: usize,
    source: PriceSource,
    name: String,
}

impl StdDev {
    pub fn new(length: usize, source: PriceSource) -> Self {
        assert!(length >= 1, "StdDev length must be >= 1");
        Self {
            length,
            source,
            name: format!("stddev_{length}_{source}"),
        }
    }
}

impl Indicator for StdDev {
    type Output = Option<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    /// At length 1 no index is ever defined, not just the first `lookback()`.
    fn lookback(&self) -> usize {
        self.length.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        rolling_std_dev(&extract_source(candles, self.source), self.length)
    }
}
