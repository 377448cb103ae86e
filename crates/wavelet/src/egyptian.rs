//! Arbitrary-length support by splitting into power-of-two segments.

use tracing::debug;

use crate::error::WaveletError;
use crate::pyramid::{LevelTransform, check_level};

/// One power-of-two slice of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Index of the first sample.
    pub offset: usize,
    /// The segment holds `2^exponent` samples.
    pub exponent: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Segment {
    /// Number of samples in the segment.
    pub fn len(&self) -> usize {
        1 << self.exponent
    }
}

/// Splits `len` into distinct powers of two, largest first.
///
/// The segments follow the set bits of `len` from the most significant down
/// and tile `[0, len)` without gaps.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::egyptian_segments;
///
/// let segs = egyptian_segments(11);
/// let sizes: Vec<usize> = segs.iter().map(|s| s.len()).collect();
/// assert_eq!(sizes, vec![8, 2, 1]);
/// assert_eq!(segs[1].offset, 8);
/// ```
pub fn egyptian_segments(len: usize) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(len.count_ones() as usize);
    let mut offset = 0;
    for exponent in (0..usize::BITS as usize).rev() {
        if len & (1 << exponent) != 0 {
            segments.push(Segment { offset, exponent });
            offset += 1 << exponent;
        }
    }
    segments
}

/// Wraps a dyadic transform so it accepts any length `N >= 1`.
///
/// The signal is cut into the segments given by [`egyptian_segments`] and
/// each segment is transformed in place by the inner transform. Single-sample
/// segments pass through unchanged.
///
/// A requested level is applied to every segment, clamped to that segment's
/// own depth; the level itself may not exceed the depth of the largest
/// segment.
///
/// # Example
///
/// ```
/// use pyramid_wavelet::{
///     AncientEgyptianDecomposition, FastWaveletTransform, LevelTransform, Wavelet,
/// };
///
/// let aed = AncientEgyptianDecomposition::new(FastWaveletTransform::new(
///     Wavelet::Daubechies2.filter(),
/// ));
/// let signal: Vec<f64> = (0..13).map(|i| i as f64).collect();
/// let back = aed.reverse(&aed.forward(&signal).unwrap()).unwrap();
/// assert!(back.iter().zip(&signal).all(|(a, b)| (a - b).abs() < 1e-9));
/// ```
#[derive(Clone, Debug)]
pub struct AncientEgyptianDecomposition<T> {
    inner: T,
}

impl<T: LevelTransform> AncientEgyptianDecomposition<T> {
    /// Wraps a power-of-two transform.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Returns the wrapped transform.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn apply(
        &self,
        buf: &mut [f64],
        level: usize,
        step: impl Fn(&T, &mut [f64], usize) -> Result<(), WaveletError>,
    ) -> Result<(), WaveletError> {
        let max = self.max_level(buf.len())?;
        check_level(buf.len(), level, max)?;

        let segments = egyptian_segments(buf.len());
        debug!(len = buf.len(), level, segments = segments.len(), "egyptian split");
        for seg in segments.iter().filter(|s| s.exponent > 0) {
            let part = &mut buf[seg.offset..seg.offset + seg.len()];
            step(&self.inner, part, level.min(seg.exponent))?;
        }
        Ok(())
    }
}

impl<T: LevelTransform> LevelTransform for AncientEgyptianDecomposition<T> {
    /// Depth of the largest segment, `floor(log2(len))`.
    fn max_level(&self, len: usize) -> Result<usize, WaveletError> {
        if len == 0 {
            return Err(WaveletError::EmptySignal);
        }
        Ok(len.ilog2() as usize)
    }

    fn forward_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError> {
        self.apply(buf, level, |t, part, l| t.forward_in_place(part, l))
    }

    fn reverse_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError> {
        self.apply(buf, level, |t, part, l| t.reverse_in_place(part, l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Wavelet;
    use crate::fwt::FastWaveletTransform;
    use crate::wpt::WaveletPacketTransform;
    use approx::assert_abs_diff_eq;

    #[test]
    fn segments_follow_binary_digits() {
        let segs = egyptian_segments(1200);
        let exps: Vec<usize> = segs.iter().map(|s| s.exponent).collect();
        assert_eq!(exps, vec![10, 7, 5, 4]);
        let offsets: Vec<usize> = segs.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 1024, 1152, 1184]);
        assert_eq!(segs.iter().map(Segment::len).sum::<usize>(), 1200);
    }

    #[test]
    fn segments_of_power_of_two_is_single() {
        assert_eq!(
            egyptian_segments(64),
            vec![Segment {
                offset: 0,
                exponent: 6
            }]
        );
        assert!(egyptian_segments(0).is_empty());
    }

    #[test]
    fn power_of_two_matches_inner() {
        let f = Wavelet::Daubechies3.filter();
        let signal: Vec<f64> = (0..32).map(|i| (i as f64).sqrt()).collect();
        let inner = FastWaveletTransform::new(f);
        let aed = AncientEgyptianDecomposition::new(inner.clone());
        assert_eq!(aed.forward(&signal).unwrap(), inner.forward(&signal).unwrap());
    }

    #[test]
    fn single_sample_passes_through() {
        let aed = AncientEgyptianDecomposition::new(FastWaveletTransform::new(
            Wavelet::Haar.filter(),
        ));
        assert_eq!(aed.forward(&[3.5]).unwrap(), vec![3.5]);
        let out = aed.forward(&[1.0, 1.0, 9.0]).unwrap();
        assert_abs_diff_eq!(out[0], 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 0.0, epsilon = 1e-12);
        assert_eq!(out[2], 9.0);
    }

    #[test]
    fn partial_level_clamps_per_segment() {
        let aed = AncientEgyptianDecomposition::new(WaveletPacketTransform::new(
            Wavelet::Daubechies2.filter(),
        ));
        let signal: Vec<f64> = (0..22).map(|i| (i as f64 * 0.3).sin()).collect();
        assert_eq!(aed.max_level(22).unwrap(), 4);
        for level in 0..=4 {
            let coeffs = aed.forward_level(&signal, level).unwrap();
            let back = aed.reverse_level(&coeffs, level).unwrap();
            for (a, b) in back.iter().zip(&signal) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn rejects_empty_and_deep_levels() {
        let aed = AncientEgyptianDecomposition::new(FastWaveletTransform::new(
            Wavelet::Haar.filter(),
        ));
        assert!(matches!(aed.forward(&[]), Err(WaveletError::EmptySignal)));
        assert!(matches!(
            aed.forward_level(&[1.0; 5], 3),
            Err(WaveletError::LevelOutOfRange {
                requested: 3,
                max: 2,
                len: 5
            })
        ));
    }
}
