//! Synthetic OHLCV series for demos and tests.
//!
//! A seeded random walk with a slow sinusoidal trend, a medium-term cycle and
//! time-varying volatility. Same seed, same series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Candle;

/// Timestamp of the first generated candle (epoch millis).
pub const SAMPLE_START_MS: i64 = 1_700_000_000_000;
/// Spacing between generated candles: one day.
pub const SAMPLE_INTERVAL_MS: i64 = 86_400_000;
/// Default number of generated candles.
pub const DEFAULT_SAMPLE_COUNT: usize = 250;

const START_PRICE: f64 = 100.0;
const PRICE_FLOOR: f64 = 10.0;

fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Generate `count` candles from `seed`.
///
/// Prices are rounded to cents, `high`/`low` bracket `open`/`close`, and
/// volume is a whole number in 15_000..95_000.
pub fn generate_candles(count: usize, seed: u64) -> Vec<Candle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut candles = Vec::with_capacity(count);
    let mut price = START_PRICE;

    for i in 0..count {
        let t = i as f64;
        let trend = (t * 0.02).sin() * 0.8;
        let cycle = (t * 0.05).cos() * 0.3;
        let volatility = 0.015 + (t * 0.08).sin() * 0.01;
        let random_walk = rng.gen_range(-1.0_f64..1.0) * volatility * price;

        price = (price + trend + cycle + random_walk).max(PRICE_FLOOR);

        // 0.8%..3.3% daily range
        let daily_range = price * rng.gen_range(0.008_f64..0.033);
        let open = price + rng.gen_range(-0.5_f64..0.5) * daily_range * 0.4;
        let close = open + rng.gen_range(-0.5_f64..0.5) * daily_range;
        let high = open.max(close) + rng.gen_range(0.0_f64..1.0) * daily_range * 0.4;
        let low = open.min(close) - rng.gen_range(0.0_f64..1.0) * daily_range * 0.4;
        let volume = rng.gen_range(15_000u32..95_000) as f64;

        candles.push(Candle {
            timestamp: SAMPLE_START_MS + i as i64 * SAMPLE_INTERVAL_MS,
            open: round_cents(open),
            high: round_cents(high),
            low: round_cents(low),
            close: round_cents(close),
            volume,
        });

        price = close;
    }

    candles
}
