//! Consistency checks over computed band output.
//!
//! Walks every fully-defined point from the first full window on and records
//! ordering and symmetry violations. Used by the CLI `check` command and by
//! tests as an independent oracle over engine output.

use serde::Serialize;
use thiserror::Error;

use crate::engine::BandPoint;

/// Maximum allowed difference between the upper and lower half-widths.
pub const SYMMETRY_TOLERANCE: f64 = 1e-4;

/// A single violated band invariant.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandViolation {
    #[error("index {index}: upper band ({upper}) is below basis ({basis})")]
    UpperBelowBasis { index: usize, upper: f64, basis: f64 },

    #[error("index {index}: basis ({basis}) is below lower band ({lower})")]
    BasisBelowLower { index: usize, basis: f64, lower: f64 },

    #[error("index {index}: bands are not symmetric around basis (upper distance {upper_distance}, lower distance {lower_distance})")]
    Asymmetric {
        index: usize,
        upper_distance: f64,
        lower_distance: f64,
    },
}

/// Result of [`validate_bands`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BandReport {
    /// Points with all three bands defined.
    pub valid_count: usize,
    pub violations: Vec<BandViolation>,
}

impl BandReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check band ordering and symmetry from index `length - 1` on.
///
/// Points with any undefined band are skipped. Ordering is non-strict so a
/// zero standard deviation, which collapses the bands onto the basis, passes.
pub fn validate_bands(points: &[BandPoint], length: usize) -> BandReport {
    let mut report = BandReport::default();

    for (index, point) in points
        .iter()
        .enumerate()
        .skip(length.saturating_sub(1))
    {
        let Some((basis, upper, lower)) = point.defined_lines() else {
            continue;
        };

        report.valid_count += 1;

        if upper < basis {
            report
                .violations
                .push(BandViolation::UpperBelowBasis { index, upper, basis });
        }
        if basis < lower {
            report
                .violations
                .push(BandViolation::BasisBelowLower { index, basis, lower });
        }

        let upper_distance = upper - basis;
        let lower_distance = basis - lower;
        if (upper_distance - lower_distance).abs() > SYMMETRY_TOLERANCE {
            report.violations.push(BandViolation::Asymmetric {
                index,
                upper_distance,
                lower_distance,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute;
    use crate::indicators::make_candles;
    use crate::settings::IndicatorSettings;

    fn point(basis: f64, upper: f64, lower: f64) -> BandPoint {
        BandPoint {
            timestamp: 0,
            basis: Some(basis),
            upper: Some(upper),
            lower: Some(lower),
            source_value: basis,
            std_dev: Some((upper - basis) / 2.0),
        }
    }

    #[test]
    fn engine_output_is_valid() {
        let closes: Vec<f64> = (0..60).map(|i| 50.0 + (i as f64 * 0.7).sin() * 4.0).collect();
        let settings = IndicatorSettings {
            length: 10,
            ..Default::default()
        };
        let points = compute(&make_candles(&closes), &settings);
        let report = validate_bands(&points, settings.length);
        assert!(report.is_valid(), "{:?}", report.violations);
        assert_eq!(report.valid_count, 51);
    }

    #[test]
    fn collapsed_bands_are_valid() {
        let report = validate_bands(&[point(10.0, 10.0, 10.0)], 1);
        assert!(report.is_valid());
        assert_eq!(report.valid_count, 1);
    }

    #[test]
    fn defined_lines_requires_all_three() {
        let p = point(10.0, 11.0, 9.0);
        assert_eq!(p.defined_lines(), Some((10.0, 11.0, 9.0)));
        let mut partial = p;
        partial.lower = None;
        assert_eq!(partial.defined_lines(), None);
    }

    #[test]
    fn undefined_points_are_skipped() {
        let mut p = point(10.0, 11.0, 9.0);
        p.upper = None;
        let report = validate_bands(&[p], 1);
        assert_eq!(report.valid_count, 0);
        assert!(report.is_valid());
    }

    #[test]
    fn detects_inverted_bands() {
        let report = validate_bands(&[point(10.0, 9.0, 11.0)], 1);
        assert!(!report.is_valid());
        assert!(matches!(
            report.violations[0],
            BandViolation::UpperBelowBasis { index: 0, .. }
        ));
        assert!(matches!(
            report.violations[1],
            BandViolation::BasisBelowLower { index: 0, .. }
        ));
    }

    #[test]
    fn detects_asymmetry() {
        let report = validate_bands(&[point(10.0, 12.0, 9.0)], 1);
        assert_eq!(report.violations.len(), 1);
        let message = report.violations[0].to_string();
        assert!(message.contains("not symmetric"), "{message}");
    }

    #[test]
    fn warm_up_region_is_not_checked() {
        let points = [point(10.0, 9.0, 11.0), point(10.0, 11.0, 9.0)];
        let report = validate_bands(&points, 2);
        assert!(report.is_valid());
        assert_eq!(report.valid_count, 1);
    }
}
