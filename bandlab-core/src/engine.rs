//! Bollinger Bands pipeline.
//!
//! candles + settings → source extraction → basis (moving average) and sample
//! std-dev → bands → offset → one [`BandPoint`] per candle.
//!
//! Every call is independent: nothing is cached or retained between calls, and
//! the only allocation is O(series length) for the intermediate series.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Candle;
use crate::indicators::{build_bands, extract_source, rolling_std_dev, shift, Indicator};
use crate::settings::{IndicatorSettings, SettingsError};

/// One output point, positionally aligned with its input candle.
///
/// `basis`, `upper` and `lower` carry the offset; `source_value` and `std_dev`
/// stay at their natural index. `None` means not defined at this index and
/// serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPoint {
    pub timestamp: i64,
    pub basis: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
    pub source_value: f64,
    pub std_dev: Option<f64>,
}

impl BandPoint {
    /// The three line values a chart draws for this point: `[upper, basis, lower]`.
    pub fn lines(&self) -> [Option<f64>; 3] {
        [self.upper, self.basis, self.lower]
    }

    /// `(basis, upper, lower)` when all three band lines are defined.
    pub fn defined_lines(&self) -> Option<(f64, f64, f64)> {
        Some((self.basis?, self.upper?, self.lower?))
    }
}

/// Run the full pipeline.
///
/// `settings` are taken as already validated (see [`IndicatorSettings::validate`]);
/// use [`BollingerBands::new`] to validate and compute in one place. An empty
/// series yields an empty result.
pub fn compute(candles: &[Candle], settings: &IndicatorSettings) -> Vec<BandPoint> {
    if candles.is_empty() {
        return Vec::new();
    }

    debug!(
        candles = candles.len(),
        length = settings.length,
        source = %settings.source,
        multiplier = settings.std_dev_multiplier,
        offset = settings.offset,
        "computing bollinger bands"
    );

    let source_values = extract_source(candles, settings.source);
    let basis = settings.ma_type.apply(&source_values, settings.length);
    let std_dev = rolling_std_dev(&source_values, settings.length);
    let bands = build_bands(&basis, &std_dev, settings.std_dev_multiplier);

    let basis = shift(&basis, settings.offset);
    let upper = shift(&bands.upper, settings.offset);
    let lower = shift(&bands.lower, settings.offset);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| BandPoint {
            timestamp: candle.timestamp,
            basis: basis[i],
            upper: upper[i],
            lower: lower[i],
            source_value: source_values[i],
            std_dev: std_dev[i],
        })
        .collect()
}

/// Validated Bollinger Bands indicator.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    settings: IndicatorSettings,
    name: String,
}

impl BollingerBands {
    /// Validate `settings` and build the indicator.
    pub fn new(settings: IndicatorSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            name: settings.name(),
            settings,
        })
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }
}

impl Indicator for BollingerBands {
    type Output = BandPoint;

    fn name(&self) -> &str {
        &self.name
    }

    /// Warm-up of the basis plus any positive offset. A negative offset leaves
    /// undefined points at the end instead.
    fn lookback(&self) -> usize {
        let shift = usize::try_from(self.settings.offset).unwrap_or(0);
        self.settings.length.saturating_sub(1).saturating_add(shift)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<BandPoint> {
        compute(candles, &self.settings)
    }
}
