//! Bollinger Bands settings and their validation boundary.
//!
//! `IndicatorSettings` is an immutable snapshot: callers replace the whole
//! value on every change and hand it to the engine. Validation happens here,
//! once, at entry. The numeric pipeline assumes validated input.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::PriceSource;

/// Errors raised when settings are read or validated.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("length must be at least 1 (got {0})")]
    InvalidLength(usize),

    #[error("standard deviation multiplier must be a finite number greater than 0 (got {0})")]
    InvalidMultiplier(f64),

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Moving average used for the basis line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaType {
    /// Simple moving average.
    #[default]
    Sma,
}

impl MaType {
    /// Apply this moving average to a value series.
    pub fn apply(self, values: &[f64], length: usize) -> Vec<Option<f64>> {
        match self {
            MaType::Sma => crate::indicators::rolling_sma(values, length),
        }
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaType::Sma => f.write_str("SMA"),
        }
    }
}

/// Inputs of one Bollinger Bands computation.
///
/// Defaults: length 20, SMA, close, multiplier 2.0, offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Lookback window size.
    pub length: usize,
    pub ma_type: MaType,
    pub source: PriceSource,
    /// Number of standard deviations between basis and each band.
    pub std_dev_multiplier: f64,
    /// Bars to shift the bands by; positive shifts them later.
    pub offset: i64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            length: 20,
            ma_type: MaType::Sma,
            source: PriceSource::Close,
            std_dev_multiplier: 2.0,
            offset: 0,
        }
    }
}

impl IndicatorSettings {
    /// Reject settings the pipeline cannot compute meaningfully.
    ///
    /// Offsets are not checked: an offset past the series end is legal and
    /// yields undefined bands.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.length == 0 {
            return Err(SettingsError::InvalidLength(self.length));
        }
        if !self.std_dev_multiplier.is_finite() || self.std_dev_multiplier <= 0.0 {
            return Err(SettingsError::InvalidMultiplier(self.std_dev_multiplier));
        }
        Ok(())
    }

    /// Parse settings from TOML. Missing keys take their default.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Name used in logs and output headers, e.g. `bb_20_close_2`.
    pub fn name(&self) -> String {
        let mut name = format!(
            "bb_{}_{}_{}",
            self.length, self.source, self.std_dev_multiplier
        );
        if self.offset != 0 {
            name.push_str(&format!("_off{}", self.offset));
        }
        name
    }
}

impl fmt::Display for IndicatorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BB({}, {}, {}, {}, offset {})",
            self.length, self.ma_type, self.source, self.std_dev_multiplier, self.offset
        )
    }
}

/// Input ranges of the settings dialog.
///
/// Clamping is opt-in; [`IndicatorSettings::validate`] only rejects values
/// the computation cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsLimits {
    pub min_length: usize,
    pub max_length: usize,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    pub min_offset: i64,
    pub max_offset: i64,
}

impl Default for SettingsLimits {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 200,
            min_multiplier: 0.1,
            max_multiplier: 10.0,
            min_offset: -50,
            max_offset: 50,
        }
    }
}

impl SettingsLimits {
    /// Bring every numeric field into range. A NaN multiplier becomes the minimum.
    pub fn clamp(&self, settings: IndicatorSettings) -> IndicatorSettings {
        let multiplier = if settings.std_dev_multiplier.is_nan() {
            self.min_multiplier
        } else {
            settings
                .std_dev_multiplier
                .clamp(self.min_multiplier, self.max_multiplier)
        };
        IndicatorSettings {
            length: settings.length.clamp(self.min_length, self.max_length),
            std_dev_multiplier: multiplier,
            offset: settings.offset.clamp(self.min_offset, self.max_offset),
            ..settings
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_bollinger() {
        let s = IndicatorSettings::default();
        assert_eq!(s.length, 20);
        assert_eq!(s.ma_type, MaType::Sma);
        assert_eq!(s.source, PriceSource::Close);
        assert_eq!(s.std_dev_multiplier, 2.0);
        assert_eq!(s.offset, 0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn zero_length_rejected() {
        let s = IndicatorSettings {
            length: 0,
            ..Default::default()
        };
        let err = s.validate().unwrap_err();
        assert!(matches!(err, SettingsError::InvalidLength(0)));
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn non_positive_or_nan_multiplier_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let s = IndicatorSettings {
                std_dev_multiplier: bad,
                ..Default::default()
            };
            assert!(
                matches!(s.validate(), Err(SettingsError::InvalidMultiplier(_))),
                "multiplier {bad} should be rejected"
            );
        }
    }

    #[test]
    fn any_offset_is_valid() {
        for offset in [-1_000, -1, 0, 1, 1_000] {
            let s = IndicatorSettings {
                offset,
                ..Default::default()
            };
            assert!(s.validate().is_ok());
        }
    }

    #[test]
    fn toml_partial_settings_use_defaults() {
        let s = IndicatorSettings::from_toml_str(
            r#"
            length = 10
            source = "high"
            offset = -3
            "#,
        )
        .unwrap();
        assert_eq!(s.length, 10);
        assert_eq!(s.source, PriceSource::High);
        assert_eq!(s.offset, -3);
        assert_eq!(s.std_dev_multiplier, 2.0);
        assert_eq!(s.ma_type, MaType::Sma);
    }

    #[test]
    fn toml_full_settings() {
        let s = IndicatorSettings::from_toml_str(
            r#"
            length = 14
            ma_type = "SMA"
            source = "low"
            std_dev_multiplier = 1.5
            offset = 2
            "#,
        )
        .unwrap();
        assert_eq!(s.std_dev_multiplier, 1.5);
        assert_eq!(s.source, PriceSource::Low);
    }

    #[test]
    fn toml_unknown_ma_type_rejected() {
        let err = IndicatorSettings::from_toml_str(r#"ma_type = "EMA""#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn toml_negative_length_rejected() {
        assert!(IndicatorSettings::from_toml_str("length = -5").is_err());
    }

    #[test]
    fn settings_serialize_to_toml() {
        let s = IndicatorSettings {
            source: PriceSource::Open,
            ..Default::default()
        };
        let text = toml::to_string(&s).unwrap();
        assert!(text.contains("source = \"open\""));
        assert!(text.contains("ma_type = \"SMA\""));
        assert_eq!(IndicatorSettings::from_toml_str(&text).unwrap(), s);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = IndicatorSettings::from_file(Path::new("/nonexistent/bb.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bb.toml"));
    }

    #[test]
    fn name_and_display() {
        let s = IndicatorSettings::default();
        assert_eq!(s.name(), "bb_20_close_2");
        let shifted = IndicatorSettings { offset: -3, ..s };
        assert_eq!(shifted.name(), "bb_20_close_2_off-3");
        assert_eq!(s.to_string(), "BB(20, SMA, close, 2, offset 0)");
    }

    #[test]
    fn clamp_brings_values_into_dialog_range() {
        let limits = SettingsLimits::default();
        let s = IndicatorSettings {
            length: 0,
            std_dev_multiplier: 50.0,
            offset: -99,
            ..Default::default()
        };
        let clamped = limits.clamp(s);
        assert_eq!(clamped.length, 1);
        assert_eq!(clamped.std_dev_multiplier, 10.0);
        assert_eq!(clamped.offset, -50);
        assert!(clamped.validate().is_ok());

        let nan = IndicatorSettings {
            std_dev_multiplier: f64::NAN,
            ..Default::default()
        };
        assert_eq!(limits.clamp(nan).std_dev_multiplier, 0.1);
    }

    #[test]
    fn clamp_leaves_in_range_settings_alone() {
        let s = IndicatorSettings::default();
        assert_eq!(SettingsLimits::default().clamp(s), s);
    }
}
