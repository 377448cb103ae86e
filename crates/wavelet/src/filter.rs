//! Wavelet filter coefficients.

use crate::error::WaveletError;

/// Filters whose energy falls below this bound are treated as degenerate.
pub(crate) const ENERGY_EPS: f64 = 1e-12;

/// Immutable set of two-band analysis and synthesis filters.
///
/// Holds the four coefficient vectors consumed by a pyramid step plus the
/// minimum window length the filter may be applied to. All four vectors
/// share one length (the mother wavelet length).
///
/// For an orthonormal wavelet the high-pass filters are the length-reversed,
/// alternating-sign permutation of the low-pass filter and synthesis equals
/// analysis. This relationship is established by [`WaveletFilter::orthogonal`]
/// and checked empirically by [`WaveletFilter::is_orthonormal`]; it is not
/// re-verified when the filter is applied.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::WaveletFilter;
///
/// let h = std::f64::consts::FRAC_1_SQRT_2;
/// let haar = WaveletFilter::orthogonal("Haar", &[h, h]).unwrap();
/// assert_eq!(haar.filter_length(), 2);
/// assert!(haar.is_orthonormal(1e-12));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WaveletFilter {
    name: String,
    min_transform_length: usize,
    analysis_low: Vec<f64>,
    analysis_high: Vec<f64>,
    synthesis_low: Vec<f64>,
    synthesis_high: Vec<f64>,
}

impl WaveletFilter {
    /// Builds an orthogonal filter from its scaling (low-pass) coefficients.
    ///
    /// The high-pass filter is derived via the quadrature mirror relation
    /// `high[i] = (-1)^i * low[L - 1 - i]`, and the synthesis filters equal
    /// the analysis filters.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::InvalidFilter`] | odd or short length, non-finite coefficient |
    /// | [`WaveletError::DegenerateFilter`] | coefficient energy below threshold |
    pub fn orthogonal(name: impl Into<String>, scaling: &[f64]) -> Result<Self, WaveletError> {
        let low = scaling.to_vec();
        let high = quadrature_mirror(&low);
        Self::biorthogonal(name, low.clone(), high.clone(), low, high)
    }

    /// Builds a filter from four explicitly supplied coefficient vectors.
    ///
    /// Coefficients are taken in application order: `analysis_low[j]`
    /// multiplies sample `2i + j` of the window.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::InvalidFilter`] | lengths differ, are odd or shorter than 2, or contain non-finite values |
    /// | [`WaveletError::DegenerateFilter`] | analysis low-pass energy below threshold |
    pub fn biorthogonal(
        name: impl Into<String>,
        analysis_low: Vec<f64>,
        analysis_high: Vec<f64>,
        synthesis_low: Vec<f64>,
        synthesis_high: Vec<f64>,
    ) -> Result<Self, WaveletError> {
        let len = analysis_low.len();
        if len < 2 || len % 2 != 0 {
            return Err(WaveletError::InvalidFilter(format!(
                "filter length must be even and at least 2, got {len}"
            )));
        }
        for v in [&analysis_high, &synthesis_low, &synthesis_high] {
            if v.len() != len {
                return Err(WaveletError::InvalidFilter(format!(
                    "all filters must have length {len}, got {}",
                    v.len()
                )));
            }
        }
        let all = [&analysis_low, &analysis_high, &synthesis_low, &synthesis_high];
        if !all.iter().all(|v| v.iter().all(|c| c.is_finite())) {
            return Err(WaveletError::InvalidFilter(
                "coefficients must be finite".into(),
            ));
        }
        let energy = sum_of_squares(&analysis_low);
        if energy < ENERGY_EPS {
            return Err(WaveletError::DegenerateFilter { energy });
        }

        Ok(Self {
            name: name.into(),
            min_transform_length: 2,
            analysis_low,
            analysis_high,
            synthesis_low,
            synthesis_high,
        })
    }

    /// Sets the minimum window length the filter is applied to.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::InvalidFilter`] unless `2 <= min <= filter_length()`.
    pub fn with_min_transform_length(mut self, min: usize) -> Result<Self, WaveletError> {
        if min < 2 || min > self.filter_length() {
            return Err(WaveletError::InvalidFilter(format!(
                "minimum transform length {min} must lie in [2, {}]",
                self.filter_length()
            )));
        }
        self.min_transform_length = min;
        Ok(self)
    }

    /// Returns the display name of the wavelet.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of coefficients per filter.
    pub fn filter_length(&self) -> usize {
        self.analysis_low.len()
    }

    /// Returns the smallest window length a pyramid step may process.
    pub fn min_transform_length(&self) -> usize {
        self.min_transform_length
    }

    /// Analysis low-pass (scaling) coefficients.
    pub fn analysis_low(&self) -> &[f64] {
        &self.analysis_low
    }

    /// Analysis high-pass (wavelet) coefficients.
    pub fn analysis_high(&self) -> &[f64] {
        &self.analysis_high
    }

    /// Synthesis low-pass coefficients.
    pub fn synthesis_low(&self) -> &[f64] {
        &self.synthesis_low
    }

    /// Synthesis high-pass coefficients.
    pub fn synthesis_high(&self) -> &[f64] {
        &self.synthesis_high
    }

    /// Checks the orthonormality conditions within `tol`.
    ///
    /// Both analysis filters must have unit energy and be orthogonal to
    /// their own even shifts, and synthesis must equal analysis.
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let same_synthesis =
            self.analysis_low == self.synthesis_low && self.analysis_high == self.synthesis_high;
        same_synthesis
            && unit_energy_and_shift_orthogonal(&self.analysis_low, tol)
            && unit_energy_and_shift_orthogonal(&self.analysis_high, tol)
    }
}

/// Derives the high-pass filter from a low-pass filter.
pub(crate) fn quadrature_mirror(low: &[f64]) -> Vec<f64> {
    let len = low.len();
    (0..len)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            sign * low[len - 1 - i]
        })
        .collect()
}

pub(crate) fn sum_of_squares(coeffs: &[f64]) -> f64 {
    coeffs.iter().map(|c| c * c).sum()
}

fn unit_energy_and_shift_orthogonal(coeffs: &[f64], tol: f64) -> bool {
    let len = coeffs.len();
    if (sum_of_squares(coeffs) - 1.0).abs() > tol {
        return false;
    }
    (1..len.div_ceil(2)).all(|m| {
        let shift = 2 * m;
        let dot: f64 = (0..len - shift).map(|i| coeffs[i] * coeffs[i + shift]).sum();
        dot.abs() <= tol
    })
}
