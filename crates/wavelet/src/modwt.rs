//! Maximal Overlap Discrete Wavelet Transform (MODWT).

use std::f64::consts::SQRT_2;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::WaveletError;
use crate::filter::{ENERGY_EPS, WaveletFilter, sum_of_squares};

/// Tolerance for the orthonormality check on MODWT filters.
const ORTHONORMAL_TOL: f64 = 1e-10;

/// Deepest MODWT level whose equivalent filter still fits inside the series.
///
/// The level `J` satisfies `L_j = (2^J - 1)(L - 1) + 1 <= N`, where `L` is
/// the filter length and `N` is the series length. Levels beyond this wrap
/// the filter around the series more than once; [`modwt`] still accepts
/// them up to `floor(log2 N)`, but their coefficients are dominated by
/// boundary effects.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::{Wavelet, max_modwt_level};
///
/// assert_eq!(max_modwt_level(256, &Wavelet::Daubechies4.filter()), 5);
/// assert_eq!(max_modwt_level(256, &Wavelet::Haar.filter()), 8);
/// ```
pub fn max_modwt_level(n: usize, filter: &WaveletFilter) -> usize {
    let l = filter.filter_length() as f64;
    let n = n as f64;
    // L_j = (2^J - 1)(L - 1) + 1 <= N
    // 2^J <= (N - 1) / (L - 1) + 1
    if l <= 1.0 || n <= 1.0 {
        return 0;
    }
    let ratio = (n - 1.0) / (l - 1.0) + 1.0;
    if ratio <= 1.0 {
        return 0;
    }
    ratio.log2().floor() as usize
}

/// Configuration for a MODWT decomposition.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::{ModwtConfig, Wavelet};
///
/// let config = ModwtConfig::new(Wavelet::Symlet4.filter(), 4);
/// assert_eq!(config.n_levels(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ModwtConfig {
    filter: Arc<WaveletFilter>,
    n_levels: usize,
}

impl ModwtConfig {
    /// Creates a new MODWT configuration.
    pub fn new(filter: impl Into<Arc<WaveletFilter>>, n_levels: usize) -> Self {
        Self {
            filter: filter.into(),
            n_levels,
        }
    }

    /// Sets the number of decomposition levels.
    pub fn with_levels(mut self, n_levels: usize) -> Self {
        self.n_levels = n_levels;
        self
    }

    /// Returns the wavelet filter.
    pub fn filter(&self) -> &WaveletFilter {
        &self.filter
    }

    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }
}

/// MODWT decomposition coefficients.
///
/// Contains detail coefficients at each level and the final smooth
/// (scaling) coefficients, all with the length of the original series.
#[derive(Clone, Debug)]
pub struct ModwtCoeffs {
    details: Vec<Vec<f64>>,
    smooth: Vec<f64>,
    filter: Arc<WaveletFilter>,
}

impl ModwtCoeffs {
    /// Assembles coefficients, e.g. after editing the output of [`modwt`].
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::EmptySignal`] | `smooth` is empty |
    /// | [`WaveletError::LengthMismatch`] | a detail level differs in length from `smooth` |
    pub fn new(
        details: Vec<Vec<f64>>,
        smooth: Vec<f64>,
        filter: impl Into<Arc<WaveletFilter>>,
    ) -> Result<Self, WaveletError> {
        if smooth.is_empty() {
            return Err(WaveletError::EmptySignal);
        }
        if let Some(bad) = details.iter().find(|d| d.len() != smooth.len()) {
            return Err(WaveletError::LengthMismatch {
                expected: smooth.len(),
                got: bad.len(),
            });
        }
        Ok(Self {
            details,
            smooth,
            filter: filter.into(),
        })
    }

    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the detail coefficients at the given level (0-indexed).
    ///
    /// Returns `None` if the level is out of range.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        self.details.get(level).map(|v| v.as_slice())
    }

    /// Returns the smooth (scaling) coefficients.
    pub fn smooth(&self) -> &[f64] {
        &self.smooth
    }

    /// Returns the length of the original series.
    pub fn series_len(&self) -> usize {
        self.smooth.len()
    }

    /// Returns the wavelet filter used.
    pub fn filter(&self) -> &WaveletFilter {
        &self.filter
    }

    /// Returns `D1..DJ` followed by `AJ`: `n_levels() + 1` rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        let mut rows = self.details.clone();
        rows.push(self.smooth.clone());
        rows
    }

    /// Sum of squared coefficients over every row.
    pub fn energy(&self) -> f64 {
        self.details
            .iter()
            .map(|d| sum_of_squares(d))
            .sum::<f64>()
            + sum_of_squares(&self.smooth)
    }
}

/// Computes the MODWT decomposition of a signal of any length `N >= 1`.
///
/// Filters are scaled to unit energy and then by `1/sqrt(2)`. Level `j`
/// applies them with `2^(j-1) - 1` zeros between taps as a circular
/// convolution over the previous level's smooth coefficients, so every
/// output row keeps length `N`. Any level in `[0, floor(log2 N)]` is
/// accepted; see [`max_modwt_level`] for the boundary-free depth.
///
/// Only orthonormal filters are accepted: the inverse is the transpose of
/// the forward pass, which is exact only when synthesis equals analysis.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::EmptySignal`] | `signal` is empty |
/// | [`WaveletError::InvalidFilter`] | the filter is not orthonormal |
/// | [`WaveletError::LevelOutOfRange`] | `config.n_levels()` exceeds `floor(log2 N)` |
pub fn modwt(signal: &[f64], config: &ModwtConfig) -> Result<ModwtCoeffs, WaveletError> {
    let n = signal.len();
    if n == 0 {
        return Err(WaveletError::EmptySignal);
    }
    check_orthonormal(config.filter())?;
    let j = config.n_levels();
    let max_level = n.ilog2() as usize;
    if j > max_level {
        return Err(WaveletError::LevelOutOfRange {
            requested: j,
            max: max_level,
            len: n,
        });
    }

    let (scaling, wavelet) = modwt_filters(config.filter());
    debug!(len = n, levels = j, "modwt forward");

    let mut smooth = signal.to_vec();
    let mut details = Vec::with_capacity(j);
    for level in 1..=j {
        let stride = 1 << (level - 1);
        let mut next = vec![0.0; n];
        let mut detail = vec![0.0; n];
        for t in 0..n {
            let mut v = 0.0;
            let mut w = 0.0;
            for (l, (&g, &h)) in scaling.iter().zip(&wavelet).enumerate() {
                let k = circular_index(t, stride * l, n, false);
                v += g * smooth[k];
                w += h * smooth[k];
            }
            next[t] = v;
            detail[t] = w;
        }
        details.push(detail);
        smooth = next;
    }

    Ok(ModwtCoeffs {
        details,
        smooth,
        filter: Arc::clone(&config.filter),
    })
}

/// Reconstructs a signal from MODWT coefficients (inverse MODWT).
///
/// Runs the transpose of each forward level from the coarsest down.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::InvalidFilter`] | the filter is not orthonormal |
/// | [`WaveletError::LengthMismatch`] | a detail level differs in length from the smooth coefficients |
pub fn imodwt(coeffs: &ModwtCoeffs) -> Result<Vec<f64>, WaveletError> {
    check_orthonormal(&coeffs.filter)?;
    let n = coeffs.series_len();
    if let Some(bad) = coeffs.details.iter().find(|d| d.len() != n) {
        return Err(WaveletError::LengthMismatch {
            expected: n,
            got: bad.len(),
        });
    }

    let (scaling, wavelet) = modwt_filters(&coeffs.filter);
    debug!(len = n, levels = coeffs.n_levels(), "modwt reverse");

    let mut smooth = coeffs.smooth.clone();
    for (idx, detail) in coeffs.details.iter().enumerate().rev() {
        let stride = 1 << idx;
        let mut prev = vec![0.0; n];
        for (t, out) in prev.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (l, (&g, &h)) in scaling.iter().zip(&wavelet).enumerate() {
                let k = circular_index(t, stride * l, n, true);
                acc += g * smooth[k] + h * detail[k];
            }
            *out = acc;
        }
        smooth = prev;
    }
    Ok(smooth)
}

fn check_orthonormal(filter: &WaveletFilter) -> Result<(), WaveletError> {
    if filter.is_orthonormal(ORTHONORMAL_TOL) {
        Ok(())
    } else {
        Err(WaveletError::InvalidFilter(format!(
            "{} is not orthonormal; the MODWT needs synthesis equal to analysis",
            filter.name()
        )))
    }
}

/// Unit-energy filters scaled by `1/sqrt(2)`: `(scaling, wavelet)`.
fn modwt_filters(filter: &WaveletFilter) -> (Vec<f64>, Vec<f64>) {
    (
        rescale(filter.analysis_low()),
        rescale(filter.analysis_high()),
    )
}

fn rescale(coeffs: &[f64]) -> Vec<f64> {
    let energy = sum_of_squares(coeffs);
    let norm = if energy < ENERGY_EPS {
        warn!(energy, "filter energy below threshold, skipping normalization");
        1.0
    } else {
        energy.sqrt()
    };
    coeffs.iter().map(|c| c / norm / SQRT_2).collect()
}

/// `(t - shift) mod n` or, with `ahead`, `(t + shift) mod n`.
fn circular_index(t: usize, shift: usize, n: usize, ahead: bool) -> usize {
    let shift = shift % n;
    if ahead {
        (t + shift) % n
    } else {
        (t + n - shift) % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Wavelet;
    use approx::assert_abs_diff_eq;

    #[test]
    fn max_level_daubechies4_256() {
        assert_eq!(max_modwt_level(256, &Wavelet::Daubechies4.filter()), 5);
    }

    #[test]
    fn max_level_haar_256() {
        assert_eq!(max_modwt_level(256, &Wavelet::Haar.filter()), 8);
    }

    #[test]
    fn max_level_short_series() {
        assert_eq!(max_modwt_level(4, &Wavelet::Daubechies4.filter()), 0);
    }

    #[test]
    fn max_level_edge_case_length_one() {
        assert_eq!(max_modwt_level(1, &Wavelet::Haar.filter()), 0);
    }

    #[test]
    fn config_accessors() {
        let config = ModwtConfig::new(Wavelet::Daubechies2.filter(), 3);
        assert_eq!(config.filter().name(), "Daubechies 2");
        assert_eq!(config.n_levels(), 3);
        assert_eq!(config.with_levels(1).n_levels(), 1);
    }

    #[test]
    fn coeffs_accessors() {
        let details = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let smooth = vec![5.0, 6.0];
        let coeffs = ModwtCoeffs::new(details, smooth, Wavelet::Haar.filter()).unwrap();

        assert_eq!(coeffs.n_levels(), 2);
        assert_eq!(coeffs.detail(0), Some([1.0, 2.0].as_slice()));
        assert_eq!(coeffs.detail(1), Some([3.0, 4.0].as_slice()));
        assert_eq!(coeffs.detail(2), None);
        assert_eq!(coeffs.smooth(), &[5.0, 6.0]);
        assert_eq!(coeffs.series_len(), 2);
        assert_eq!(coeffs.to_rows().len(), 3);
        assert_abs_diff_eq!(coeffs.energy(), 91.0, epsilon = 1e-12);
    }

    #[test]
    fn coeffs_reject_ragged_details() {
        let err =
            ModwtCoeffs::new(vec![vec![1.0]], vec![1.0, 2.0], Wavelet::Haar.filter()).unwrap_err();
        assert!(matches!(
            err,
            WaveletError::LengthMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn haar_first_level_values() {
        let config = ModwtConfig::new(Wavelet::Haar.filter(), 1);
        let coeffs = modwt(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], &config).unwrap();
        let detail = coeffs.detail(0).unwrap();
        assert_abs_diff_eq!(detail[0], -3.5, epsilon = 1e-12);
        for d in &detail[1..] {
            assert_abs_diff_eq!(*d, 0.5, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(coeffs.smooth()[0], 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(coeffs.smooth()[7], 7.5, epsilon = 1e-12);
    }

    #[test]
    fn constant_signal_has_zero_details() {
        let config = ModwtConfig::new(Wavelet::Haar.filter(), 2);
        let coeffs = modwt(&[1.0; 8], &config).unwrap();
        for level in 0..2 {
            for d in coeffs.detail(level).unwrap() {
                assert_abs_diff_eq!(*d, 0.0, epsilon = 1e-12);
            }
        }
        for s in coeffs.smooth() {
            assert_abs_diff_eq!(*s, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn level_too_high() {
        let config = ModwtConfig::new(Wavelet::Daubechies4.filter(), 3);
        let err = modwt(&[1.0, 2.0, 3.0, 4.0], &config).unwrap_err();
        assert!(matches!(
            err,
            WaveletError::LevelOutOfRange {
                requested: 3,
                max: 2,
                len: 4
            }
        ));
    }

    #[test]
    fn levels_past_filter_support_invert() {
        let signal: Vec<f64> = (0..8).map(|i| (i as f64 * 0.9).cos()).collect();
        let config = ModwtConfig::new(Wavelet::Daubechies2.filter(), 3);
        assert_eq!(max_modwt_level(8, config.filter()), 1);
        let back = imodwt(&modwt(&signal, &config).unwrap()).unwrap();
        for (a, b) in back.iter().zip(&signal) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn biorthogonal_filter_rejected() {
        let config = ModwtConfig::new(Wavelet::BiOrthogonal13.filter(), 1);
        let err = modwt(&[1.0; 8], &config).unwrap_err();
        assert!(matches!(err, WaveletError::InvalidFilter(_)));
        assert_eq!(err.kind(), crate::error::ErrorKind::ConfigurationError);

        let coeffs =
            ModwtCoeffs::new(vec![vec![0.0; 4]], vec![1.0; 4], Wavelet::BiOrthogonal13.filter())
                .unwrap();
        assert!(matches!(imodwt(&coeffs), Err(WaveletError::InvalidFilter(_))));
    }

    #[test]
    fn empty_signal() {
        let config = ModwtConfig::new(Wavelet::Haar.filter(), 0);
        assert!(matches!(modwt(&[], &config), Err(WaveletError::EmptySignal)));
    }

    #[test]
    fn odd_length_round_trip() {
        let signal: Vec<f64> = (0..37).map(|i| (i as f64 * 0.3).sin() + 0.1 * i as f64).collect();
        let config = ModwtConfig::new(Wavelet::Daubechies2.filter(), 3);
        let coeffs = modwt(&signal, &config).unwrap();
        assert_eq!(coeffs.to_rows().len(), 4);
        let back = imodwt(&coeffs).unwrap();
        for (a, b) in back.iter().zip(&signal) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn coeffs_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ModwtCoeffs>();
    }
}
