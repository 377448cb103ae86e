//! Single two-band analysis/synthesis step with periodic boundaries.

use crate::error::WaveletError;
use crate::filter::WaveletFilter;

/// Splits one window into approximation and detail bands.
///
/// Returns a vector of the window's length holding the `h/2` approximation
/// coefficients followed by the `h/2` detail coefficients. Filter taps that
/// run past the end of the window wrap around to its start, so filters longer
/// than the window are allowed.
///
/// # Errors
///
/// Returns [`WaveletError::WindowTooShort`] if the window is odd or shorter
/// than the filter's minimum transform length.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::{Wavelet, analyze};
///
/// let out = analyze(&[1.0, 1.0], &Wavelet::Haar.filter()).unwrap();
/// assert!((out[0] - 2.0_f64.sqrt()).abs() < 1e-12);
/// assert!(out[1].abs() < 1e-12);
/// ```
pub fn analyze(window: &[f64], filter: &WaveletFilter) -> Result<Vec<f64>, WaveletError> {
    check_window(window.len(), filter)?;
    let mut out = vec![0.0; window.len()];
    analyze_into(window, filter, &mut out);
    Ok(out)
}

/// Merges approximation and detail bands back into one window.
///
/// `coeffs` holds the approximation band followed by the detail band, as
/// produced by [`analyze`]. This is the transpose of [`analyze`]; it inverts
/// it exactly when the filter's analysis and synthesis pairs are
/// (bi)orthogonal.
///
/// # Errors
///
/// Returns [`WaveletError::WindowTooShort`] if `coeffs` is odd or shorter
/// than the filter's minimum transform length.
pub fn synthesize(coeffs: &[f64], filter: &WaveletFilter) -> Result<Vec<f64>, WaveletError> {
    check_window(coeffs.len(), filter)?;
    let mut out = vec![0.0; coeffs.len()];
    synthesize_into(coeffs, filter, &mut out);
    Ok(out)
}

pub(crate) fn check_window(len: usize, filter: &WaveletFilter) -> Result<(), WaveletError> {
    let min = filter.min_transform_length();
    if len < min || len < 2 || len % 2 != 0 {
        return Err(WaveletError::WindowTooShort { len, min });
    }
    Ok(())
}

/// Unchecked analysis. `out` must have the window's length.
pub(crate) fn analyze_into(window: &[f64], filter: &WaveletFilter, out: &mut [f64]) {
    let h = window.len();
    let half = h / 2;
    let low = filter.analysis_low();
    let high = filter.analysis_high();

    let (approx, detail) = out.split_at_mut(half);
    for i in 0..half {
        let mut a = 0.0;
        let mut d = 0.0;
        for (j, (&lo, &hi)) in low.iter().zip(high).enumerate() {
            let k = (2 * i + j) % h;
            a += window[k] * lo;
            d += window[k] * hi;
        }
        approx[i] = a;
        detail[i] = d;
    }
}

/// Unchecked synthesis. `out` must have the coefficients' length.
pub(crate) fn synthesize_into(coeffs: &[f64], filter: &WaveletFilter, out: &mut [f64]) {
    let h = coeffs.len();
    let half = h / 2;
    let low = filter.synthesis_low();
    let high = filter.synthesis_high();

    out.fill(0.0);
    let (approx, detail) = coeffs.split_at(half);
    for i in 0..half {
        for (j, (&lo, &hi)) in low.iter().zip(high).enumerate() {
            let k = (2 * i + j) % h;
            out[k] += approx[i] * lo + detail[i] * hi;
        }
    }
}
