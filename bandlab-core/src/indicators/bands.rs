//! Band construction — basis ± multiplier × standard deviation.

/// Upper and lower band series, positionally aligned with the basis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bands {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Build the upper and lower bands.
///
/// Where either the basis or the standard deviation is undefined, both bands
/// are undefined. Otherwise `upper = basis + k*sd` and `lower = basis - k*sd`.
/// No clamping is applied to `k`; a band that overflows leaves both bands
/// undefined at that index.
pub fn build_bands(basis: &[Option<f64>], std_dev: &[Option<f64>], multiplier: f64) -> Bands {
    debug_assert_eq!(basis.len(), std_dev.len(), "basis and std-dev must be aligned");

    let (upper, lower) = basis
        .iter()
        .zip(std_dev)
        .map(|(&mid, &sd)| match (mid, sd) {
            (Some(mid), Some(sd)) => {
                let width = multiplier * sd;
                let (upper, lower) = (mid + width, mid - width);
                if upper.is_finite() && lower.is_finite() {
                    (Some(upper), Some(lower))
                } else {
                    (None, None)
                }
            }
            _ => (None, None),
        })
        .unzip();

    Bands { upper, lower }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn bands_offset_by_multiplier() {
        let bands = build_bands(&[Some(4.0)], &[Some(1.0)], 2.0);
        assert_eq!(bands.upper, vec![Some(6.0)]);
        assert_eq!(bands.lower, vec![Some(2.0)]);
    }

    #[test]
    fn undefined_input_gives_undefined_bands() {
        let basis = [None, Some(10.0), Some(10.0)];
        let std_dev = [None, None, Some(0.5)];
        let bands = build_bands(&basis, &std_dev, 2.0);
        assert_eq!(bands.upper, vec![None, None, Some(11.0)]);
        assert_eq!(bands.lower, vec![None, None, Some(9.0)]);
    }

    #[test]
    fn bands_are_symmetric() {
        let basis = [Some(102.0), Some(-3.25), Some(1e6)];
        let std_dev = [Some(1.5811), Some(0.1), Some(123.456)];
        let bands = build_bands(&basis, &std_dev, 2.5);
        for i in 0..basis.len() {
            let mid = basis[i].unwrap();
            let up = bands.upper[i].unwrap() - mid;
            let down = mid - bands.lower[i].unwrap();
            assert_approx(up, down, 1e-9);
        }
    }

    #[test]
    fn zero_multiplier_collapses_onto_basis() {
        let bands = build_bands(&[Some(50.0), Some(51.0)], &[Some(3.0), Some(4.0)], 0.0);
        assert_eq!(bands.upper, vec![Some(50.0), Some(51.0)]);
        assert_eq!(bands.lower, vec![Some(50.0), Some(51.0)]);
    }

    #[test]
    fn negative_prices_pass_through() {
        let bands = build_bands(&[Some(-5.0)], &[Some(1.0)], 1.0);
        assert_approx(bands.upper[0].unwrap(), -4.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[0].unwrap(), -6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn overflowing_band_is_undefined() {
        let basis = [Some(1e308), Some(-1e308), Some(1.0)];
        let std_dev = [Some(1e308), Some(1e308), Some(1.0)];
        let bands = build_bands(&basis, &std_dev, 2.0);
        assert_eq!(bands.upper, vec![None, None, Some(3.0)]);
        assert_eq!(bands.lower, vec![None, None, Some(-1.0)]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(build_bands(&[], &[], 2.0), Bands::default());
    }
}
