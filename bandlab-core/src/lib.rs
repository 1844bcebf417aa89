//! BandLab Core — Bollinger Bands over OHLCV candle series.
//!
//! This crate contains the indicator engine and what it needs around it:
//! - Domain types (candles)
//! - Settings with a single validation boundary
//! - Rolling building blocks (source extraction, SMA, sample std-dev, bands, offset)
//! - The pipeline producing one `BandPoint` per candle
//! - Band consistency checks, synthetic sample series, JSON series I/O
//!
//! The pipeline is pure and synchronous: no I/O, no shared state, nothing
//! retained between calls.

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod sample;
pub mod settings;
pub mod validate;

pub use domain::Candle;
pub use engine::{compute, BandPoint, BollingerBands};
pub use indicators::{Indicator, PriceSource};
pub use settings::{IndicatorSettings, MaType, SettingsError, SettingsLimits};
pub use validate::{validate_bands, BandReport, BandViolation};
