//! Simple Moving Average (SMA).
//!
//! Rolling mean over a lookback window of `length` values.
//! Lookback: length - 1 (first defined value at index length-1).

use super::{extract_source, Indicator, PriceSource};
use crate::domain::Candle;

/// Rolling simple moving average.
///
/// `result[i]` is the mean of `values[i+1-length..=i]`, or `None` for
/// `i < length-1`, for any window holding a non-finite value, and where the
/// window sum overflows. A zero length or a window longer than the series
/// yields all `None`.
///
/// Each window is summed directly, front to back, so the result never carries
/// cancellation error from values that already left the window.
pub fn rolling_sma(values: &[f64], length: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if length == 0 || n < length {
        return result;
    }

    let divisor = length as f64;

    for i in (length - 1)..n {
        let window = &values[(i + 1 - length)..=i];
        if !window.iter().all(|v| v.is_finite()) {
            continue;
        }

        let mean = window.iter().sum::<f64>() / divisor;
        result[i] = Some(mean).filter(|m| m.is_finite());
    }

    result
}

#[derive(Debug, Clone)]
pub struct Sma {
    length: usize,
    source: PriceSource,
    name: String,
}

impl Sma {
    pub fn new(length: usize, source: PriceSource) -> Self {
        assert!(length >= 1, "SMA length must be >= 1");
        Self {
            length,
            source,
            name: format!("sma_{length}_{source}"),
        }
    }
}

impl Indicator for Sma {
    type Output = Option<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.length.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        rolling_sma(&extract_source(candles, self.source), self.length)
    }
}
