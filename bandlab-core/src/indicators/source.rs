//! Source extraction — which candle field feeds the indicator.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Candle;

/// Candle price field used as the indicator input.
///
/// Parsing from a name is lenient: matching is case-insensitive and any
/// unrecognized name falls back to [`PriceSource::Close`] with a warning
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PriceSource {
    #[default]
    Close,
    Open,
    High,
    Low,
}

impl PriceSource {
    pub const ALL: [PriceSource; 4] = [
        PriceSource::Close,
        PriceSource::Open,
        PriceSource::High,
        PriceSource::Low,
    ];

    /// Resolve a source field name, defaulting to `Close` for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "close" => PriceSource::Close,
            "open" => PriceSource::Open,
            "high" => PriceSource::High,
            "low" => PriceSource::Low,
            other => {
                warn!(source = other, "unknown price source, using close");
                PriceSource::Close
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceSource::Close => "close",
            PriceSource::Open => "open",
            PriceSource::High => "high",
            PriceSource::Low => "low",
        }
    }

    /// The selected field of one candle.
    #[inline]
    pub fn price(self, candle: &Candle) -> f64 {
        match self {
            PriceSource::Close => candle.close,
            PriceSource::Open => candle.open,
            PriceSource::High => candle.high,
            PriceSource::Low => candle.low,
        }
    }
}

impl From<String> for PriceSource {
    fn from(name: String) -> Self {
        PriceSource::from_name(&name)
    }
}

impl From<PriceSource> for &'static str {
    fn from(source: PriceSource) -> Self {
        source.as_str()
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the chosen field from every candle, preserving length and order.
pub fn extract_source(candles: &[Candle], source: PriceSource) -> Vec<f64> {
    candles.iter().map(|c| source.price(c)).collect()
}

/// Extract by field name. Unknown names read `close`.
pub fn extract_named(candles: &[Candle], name: &str) -> Vec<f64> {
    extract_source(candles, PriceSource::from_name(name))
}
