//! Rolling-window building blocks of the Bollinger Bands pipeline.
//!
//! Every stage is a pure function from a positional series to a series of the
//! same length. `None` marks an index without a defined value (warm-up region,
//! shifted-out band, or a window containing a non-finite input).
//!
//! Stages, leaves first: source extraction → SMA / sample std-dev → bands →
//! offset.

pub mod bands;
pub mod offset;
pub mod sma;
pub mod source;
pub mod stddev;

pub use bands::{build_bands, Bands};
pub use offset::shift;
pub use sma::{rolling_sma, Sma};
pub use source::{extract_named, extract_source, PriceSource};
pub use stddev::{rolling_std_dev, StdDev};

use crate::domain::Candle;

/// Trait for indicators computed over a whole candle series.
///
/// `compute` returns exactly one output per input candle. The first
/// `lookback()` outputs are always undefined (warm-up). Later outputs are
/// defined unless the input is degenerate: a non-finite value in the window,
/// a length-1 std-dev, or a series too short to fill the warm-up.
///
/// # Look-ahead guard
/// No output at index t may depend on candles after t. Computing over a
/// truncated series must reproduce the prefix of the full computation.
pub trait Indicator: Send + Sync {
    type Output;

    /// Human-readable name (e.g., "sma_20", "bb_20_close_2").
    fn name(&self) -> &str;

    /// Number of leading outputs that are undefined for any input.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire series.
    fn compute(&self, candles: &[Candle]) -> Vec<Self::Output>;
}

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLCV: open = prev_close (or close for the first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000,
/// one-day timestamp spacing.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    const DAY_MS: i64 = 86_400_000;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                timestamp: 1_700_000_000_000 + i as i64 * DAY_MS,
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
