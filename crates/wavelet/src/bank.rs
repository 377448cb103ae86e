//! Named wavelet filters.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use crate::error::WaveletError;
use crate::filter::WaveletFilter;

/// Wavelets shipped with the crate.
///
/// Each variant resolves to one shared, immutable [`WaveletFilter`] built on
/// first use.
///
/// | Wavelet | Length | Family |
/// |---------|--------|--------|
/// | [`Wavelet::Haar`] | 2 | Haar |
/// | [`Wavelet::Daubechies2`] | 4 | Daubechies |
/// | [`Wavelet::Daubechies3`] | 6 | Daubechies |
/// | [`Wavelet::Daubechies4`] | 8 | Daubechies |
/// | [`Wavelet::Symlet2`] | 4 | Symlet |
/// | [`Wavelet::Symlet4`] | 8 | Symlet |
/// | [`Wavelet::Coiflet1`] | 6 | Coiflet |
/// | [`Wavelet::BiOrthogonal11`] | 2 | Biorthogonal spline |
/// | [`Wavelet::BiOrthogonal13`] | 6 | Biorthogonal spline |
///
/// # Example
///
/// ```
/// use pyramid_wavelet::Wavelet;
///
/// let w = Wavelet::from_name("Daubechies 2").unwrap();
/// assert_eq!(w, Wavelet::Daubechies2);
/// assert_eq!(w.filter().filter_length(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wavelet {
    /// Haar wavelet (length 2).
    Haar,
    /// Daubechies wavelet with 2 vanishing moments (length 4).
    Daubechies2,
    /// Daubechies wavelet with 3 vanishing moments (length 6).
    Daubechies3,
    /// Daubechies wavelet with 4 vanishing moments (length 8).
    Daubechies4,
    /// Symlet with 2 vanishing moments (length 4).
    Symlet2,
    /// Symlet with 4 vanishing moments (length 8).
    Symlet4,
    /// Coiflet of order 1 (length 6).
    Coiflet1,
    /// Biorthogonal spline wavelet 1.1 (length 2).
    BiOrthogonal11,
    /// Biorthogonal spline wavelet 1.3 (length 6).
    BiOrthogonal13,
}

impl Default for Wavelet {
    fn default() -> Self {
        Self::Daubechies2
    }
}

impl Wavelet {
    /// Every shipped wavelet, in table order.
    pub const ALL: [Wavelet; 9] = [
        Wavelet::Haar,
        Wavelet::Daubechies2,
        Wavelet::Daubechies3,
        Wavelet::Daubechies4,
        Wavelet::Symlet2,
        Wavelet::Symlet4,
        Wavelet::Coiflet1,
        Wavelet::BiOrthogonal11,
        Wavelet::BiOrthogonal13,
    ];

    /// Returns the display name, e.g. `"Daubechies 2"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Haar => "Haar",
            Self::Daubechies2 => "Daubechies 2",
            Self::Daubechies3 => "Daubechies 3",
            Self::Daubechies4 => "Daubechies 4",
            Self::Symlet2 => "Symlet 2",
            Self::Symlet4 => "Symlet 4",
            Self::Coiflet1 => "Coiflet 1",
            Self::BiOrthogonal11 => "BiOrthogonal 1/1",
            Self::BiOrthogonal13 => "BiOrthogonal 1/3",
        }
    }

    /// Returns `true` for wavelets whose synthesis filters equal their
    /// analysis filters.
    pub fn is_orthogonal(&self) -> bool {
        !matches!(self, Self::BiOrthogonal13)
    }

    /// Returns the shared filter for this wavelet.
    pub fn filter(&self) -> Arc<WaveletFilter> {
        let index = Self::ALL
            .iter()
            .position(|w| w == self)
            .unwrap_or_default();
        Arc::clone(&FILTERS[index])
    }

    /// Parses a wavelet from a case-insensitive name.
    ///
    /// Accepts display names (`"Daubechies 2"`, `"BiOrthogonal 1/3"`) and
    /// short aliases (`"db2"`, `"sym4"`, `"coif1"`, `"bior1.3"`). Spaces,
    /// dashes and underscores are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::UnsupportedWavelet`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, WaveletError> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "haar" | "haar1" | "db1" => Ok(Self::Haar),
            "daubechies2" | "db2" => Ok(Self::Daubechies2),
            "daubechies3" | "db3" => Ok(Self::Daubechies3),
            "daubechies4" | "db4" => Ok(Self::Daubechies4),
            "symlet2" | "sym2" => Ok(Self::Symlet2),
            "symlet4" | "sym4" => Ok(Self::Symlet4),
            "coiflet1" | "coif1" => Ok(Self::Coiflet1),
            "biorthogonal1/1" | "bior1.1" | "bior11" => Ok(Self::BiOrthogonal11),
            "biorthogonal1/3" | "bior1.3" | "bior13" => Ok(Self::BiOrthogonal13),
            _ => Err(WaveletError::UnsupportedWavelet(name.to_string())),
        }
    }
}

impl fmt::Display for Wavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Wavelet {
    type Err = WaveletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

static FILTERS: LazyLock<Vec<Arc<WaveletFilter>>> = LazyLock::new(|| {
    Wavelet::ALL
        .iter()
        .map(|w| Arc::new(build(*w)))
        .collect()
});

// Coefficient tables are compile-time constants or closed forms; building
// them cannot fail, so a failure here is a table typo.
fn build(wavelet: Wavelet) -> WaveletFilter {
    let filter = match wavelet {
        Wavelet::Haar | Wavelet::BiOrthogonal11 => {
            let h = std::f64::consts::FRAC_1_SQRT_2;
            WaveletFilter::orthogonal(wavelet.name(), &[h, h])
        }
        Wavelet::Daubechies2 | Wavelet::Symlet2 => {
            WaveletFilter::orthogonal(wavelet.name(), &daubechies2())
        }
        Wavelet::Daubechies3 => WaveletFilter::orthogonal(wavelet.name(), &daubechies3()),
        Wavelet::Daubechies4 => WaveletFilter::orthogonal(wavelet.name(), &DAUBECHIES4),
        Wavelet::Symlet4 => WaveletFilter::orthogonal(wavelet.name(), &SYMLET4),
        Wavelet::Coiflet1 => WaveletFilter::orthogonal(wavelet.name(), &coiflet1()),
        Wavelet::BiOrthogonal13 => biorthogonal13(),
    };
    filter.unwrap_or_else(|e| panic!("built-in filter {wavelet} is malformed: {e}"))
}

fn daubechies2() -> [f64; 4] {
    let s3 = 3.0_f64.sqrt();
    let d = 4.0 * std::f64::consts::SQRT_2;
    [(1.0 + s3) / d, (3.0 + s3) / d, (3.0 - s3) / d, (1.0 - s3) / d]
}

fn daubechies3() -> [f64; 6] {
    let r = 10.0_f64.sqrt();
    let a = (5.0 + 2.0 * r).sqrt();
    let d = 16.0 * std::f64::consts::SQRT_2;
    [
        (1.0 + r + a) / d,
        (5.0 + r + 3.0 * a) / d,
        (10.0 - 2.0 * r + 2.0 * a) / d,
        (10.0 - 2.0 * r - 2.0 * a) / d,
        (5.0 + r - 3.0 * a) / d,
        (1.0 + r - a) / d,
    ]
}

fn coiflet1() -> [f64; 6] {
    let s7 = 7.0_f64.sqrt();
    let d = 16.0 * std::f64::consts::SQRT_2;
    [
        (1.0 - s7) / d,
        (5.0 + s7) / d,
        (14.0 + 2.0 * s7) / d,
        (14.0 - 2.0 * s7) / d,
        (1.0 - s7) / d,
        (-3.0 + s7) / d,
    ]
}

const DAUBECHIES4: [f64; 8] = [
    0.2303778133088965,
    0.7148465705529157,
    0.6308807679298589,
    -0.027983769416859854,
    -0.18703481171909309,
    0.030841381835560764,
    0.0328830116668852,
    -0.010597401785069032,
];

const SYMLET4: [f64; 8] = [
    0.032223100604051466,
    -0.012603967262031304,
    -0.09921954357663353,
    0.29785779560530606,
    0.8037387518051321,
    0.497618667632775,
    -0.029635527646002493,
    -0.07576571478950221,
];

fn biorthogonal13() -> Result<WaveletFilter, crate::error::WaveletError> {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let a = h / 8.0;
    WaveletFilter::biorthogonal(
        Wavelet::BiOrthogonal13.name(),
        vec![-a, a, h, h, a, -a],
        vec![0.0, 0.0, h, -h, 0.0, 0.0],
        vec![0.0, 0.0, h, h, 0.0, 0.0],
        vec![-a, -a, h, -h, a, a],
    )
}
