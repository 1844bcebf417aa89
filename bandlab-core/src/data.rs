//! Candle series loading and saving.
//!
//! Series arrive as a JSON array of `{timestamp, open, high, low, close, volume}`
//! objects, the same shape the chart page fetches. This is the only place in the
//! crate that touches the filesystem; the indicator pipeline works on slices.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Candle;

/// Errors raised while reading or writing a candle series.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("failed to read series file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write series file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid series JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("timestamps must be strictly increasing: candle {index} has {current}, previous was {previous}")]
    NonIncreasingTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },
}

/// Check that timestamps are strictly increasing (sorted and unique).
pub fn check_ordering(candles: &[Candle]) -> Result<(), SeriesError> {
    for (i, pair) in candles.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(SeriesError::NonIncreasingTimestamp {
                index: i + 1,
                previous: pair[0].timestamp,
                current: pair[1].timestamp,
            });
        }
    }
    Ok(())
}

/// Indices of candles failing the OHLC sanity check ([`Candle::is_sane`]).
pub fn malformed_candles(candles: &[Candle]) -> Vec<usize> {
    candles
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_sane())
        .map(|(i, _)| i)
        .collect()
}

/// Parse a JSON candle array and check its ordering.
///
/// Malformed candles are kept (the pipeline reads one price field and treats
/// non-finite values as gaps) but logged.
pub fn parse_series(json: &str) -> Result<Vec<Candle>, SeriesError> {
    let candles: Vec<Candle> = serde_json::from_str(json)?;
    check_ordering(&candles)?;

    let malformed = malformed_candles(&candles);
    if let Some(&first) = malformed.first() {
        warn!(count = malformed.len(), first, "series contains malformed candles");
    }
    Ok(candles)
}

/// Load a candle series from a JSON file.
pub fn load_series(path: &Path) -> Result<Vec<Candle>, SeriesError> {
    let json = std::fs::read_to_string(path).map_err(|source| SeriesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let candles = parse_series(&json)?;
    debug!(path = %path.display(), candles = candles.len(), "loaded candle series");
    Ok(candles)
}

/// Write a candle series as pretty-printed JSON.
pub fn save_series(path: &Path, candles: &[Candle]) -> Result<(), SeriesError> {
    let json = serde_json::to_string_pretty(candles)?;
    std::fs::write(path, json).map_err(|source| SeriesError::Write {
        path: path.to_path_buf(),
        source,
    })
}
