//! Round-trip and invariant tests for the dyadic pyramids.

use approx::assert_relative_eq;
use pyramid_wavelet::{
    AncientEgyptianDecomposition, FastWaveletTransform, LevelTransform, Wavelet,
    WaveletPacketTransform,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn random_signal(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-10.0..10.0)).collect()
}

fn norm(data: &[f64]) -> f64 {
    data.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Largest absolute difference, relative to the reference signal's peak.
fn relative_error(actual: &[f64], expected: &[f64]) -> f64 {
    assert_eq!(actual.len(), expected.len());
    let peak = expected.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
    actual
        .iter()
        .zip(expected)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
        / peak
}

fn engines(wavelet: Wavelet) -> Vec<(&'static str, Box<dyn LevelTransform>)> {
    vec![
        ("fwt", Box::new(FastWaveletTransform::new(wavelet.filter()))),
        ("wpt", Box::new(WaveletPacketTransform::new(wavelet.filter()))),
    ]
}

// ---------------------------------------------------------------------------
// Round-trip identity
// ---------------------------------------------------------------------------

#[test]
fn every_wavelet_round_trips_small_powers() {
    for wavelet in Wavelet::ALL {
        for (name, engine) in engines(wavelet) {
            for p in 1..=12 {
                let signal = random_signal(1 << p, p as u64);
                let back = engine.reverse(&engine.forward(&signal).unwrap()).unwrap();
                let err = relative_error(&back, &signal);
                assert!(err < 1e-8, "{wavelet} {name} N=2^{p}: error {err}");
            }
        }
    }
}

#[test]
fn every_wavelet_round_trips_large_powers() {
    for p in 13..=16 {
        let signal = random_signal(1 << p, p as u64);
        for wavelet in Wavelet::ALL {
            for (name, engine) in engines(wavelet) {
                let back = engine.reverse(&engine.forward(&signal).unwrap()).unwrap();
                let err = relative_error(&back, &signal);
                assert!(err < 1e-8, "{wavelet} {name} N=2^{p}: error {err}");
            }
        }
    }
}

#[test]
fn longest_filter_per_family_round_trips_two_to_the_twentieth() {
    let signal = random_signal(1 << 20, 20);
    for wavelet in [
        Wavelet::Haar,
        Wavelet::Daubechies4,
        Wavelet::Symlet4,
        Wavelet::Coiflet1,
        Wavelet::BiOrthogonal13,
    ] {
        for (name, engine) in engines(wavelet) {
            let back = engine.reverse(&engine.forward(&signal).unwrap()).unwrap();
            let err = relative_error(&back, &signal);
            assert!(err < 1e-8, "{wavelet} {name}: error {err}");
        }
    }
}

#[test]
fn repeated_round_trips_do_not_drift() {
    let signal = random_signal(1024, 7);
    for wavelet in [Wavelet::Daubechies4, Wavelet::Coiflet1] {
        let fwt = FastWaveletTransform::new(wavelet.filter());
        let mut current = signal.clone();
        for _ in 0..1000 {
            current = fwt.reverse(&fwt.forward(&current).unwrap()).unwrap();
        }
        let err = relative_error(&current, &signal);
        assert!(err < 1e-6, "{wavelet}: drift {err}");
    }
}

// ---------------------------------------------------------------------------
// Level consistency
// ---------------------------------------------------------------------------

#[test]
fn recompose_from_every_ledger_row() {
    let signal = random_signal(256, 3);
    for wavelet in Wavelet::ALL {
        for (name, engine) in engines(wavelet) {
            let ledger = engine.decompose(&signal).unwrap();
            assert_eq!(ledger.max_level(), 8);
            assert_eq!(ledger.original(), signal.as_slice());
            for level in 0..=ledger.max_level() {
                let back = engine.recompose_level(&ledger, level).unwrap();
                let err = relative_error(&back, &signal);
                assert!(err < 1e-8, "{wavelet} {name} level {level}: error {err}");
            }
            let back = engine.recompose(&ledger).unwrap();
            assert!(relative_error(&back, &signal) < 1e-8);
        }
    }
}

#[test]
fn ledger_rows_match_direct_forward() {
    let signal = random_signal(64, 11);
    let fwt = FastWaveletTransform::new(Wavelet::Symlet4.filter());
    let ledger = fwt.decompose(&signal).unwrap();
    for level in 0..=6 {
        assert_eq!(
            ledger.row(level).unwrap(),
            fwt.forward_level(&signal, level).unwrap().as_slice()
        );
    }
    assert_eq!(ledger.deepest(), fwt.forward(&signal).unwrap().as_slice());
}

#[test]
fn recompose_rejects_missing_row() {
    let fwt = FastWaveletTransform::new(Wavelet::Haar.filter());
    let ledger = fwt.decompose(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert!(fwt.recompose_level(&ledger, 3).is_err());
}

// ---------------------------------------------------------------------------
// Energy invariant
// ---------------------------------------------------------------------------

#[test]
fn orthonormal_transforms_preserve_energy() {
    let signal = random_signal(512, 5);
    let expected = norm(&signal);
    for wavelet in Wavelet::ALL.into_iter().filter(Wavelet::is_orthogonal) {
        for (name, engine) in engines(wavelet) {
            let coeffs = engine.forward(&signal).unwrap();
            assert!(
                (norm(&coeffs) - expected).abs() / expected < 1e-10,
                "{wavelet} {name}: energy changed"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Arbitrary lengths
// ---------------------------------------------------------------------------

#[test]
fn egyptian_round_trips_non_powers_of_two() {
    for len in [1000, 5000, 100_000] {
        let signal = random_signal(len, len as u64);
        for wavelet in [Wavelet::Haar, Wavelet::Daubechies3] {
            let fwt = AncientEgyptianDecomposition::new(FastWaveletTransform::new(
                wavelet.filter(),
            ));
            let back = fwt.reverse(&fwt.forward(&signal).unwrap()).unwrap();
            let err = relative_error(&back, &signal);
            assert!(err < 1e-8, "fwt {wavelet} N={len}: error {err}");
        }
    }
    let signal = random_signal(5000, 1);
    let wpt = AncientEgyptianDecomposition::new(WaveletPacketTransform::new(
        Wavelet::Symlet4.filter(),
    ));
    let back = wpt.reverse(&wpt.forward(&signal).unwrap()).unwrap();
    assert!(relative_error(&back, &signal) < 1e-8);
}

#[test]
fn egyptian_segments_are_transformed_independently() {
    let signal = random_signal(24, 9);
    let fwt = FastWaveletTransform::new(Wavelet::Daubechies2.filter());
    let aed = AncientEgyptianDecomposition::new(fwt.clone());
    let out = aed.forward(&signal).unwrap();
    assert_eq!(&out[..16], fwt.forward(&signal[..16]).unwrap().as_slice());
    assert_eq!(&out[16..], fwt.forward(&signal[16..]).unwrap().as_slice());
}

#[test]
fn egyptian_ledger_round_trips() {
    let signal = random_signal(100, 4);
    let aed = AncientEgyptianDecomposition::new(FastWaveletTransform::new(
        Wavelet::Coiflet1.filter(),
    ));
    let ledger = aed.decompose(&signal).unwrap();
    assert_eq!(ledger.max_level(), 6);
    for level in 0..=6 {
        let back = aed.recompose_level(&ledger, level).unwrap();
        assert!(relative_error(&back, &signal) < 1e-8);
    }
}

// ---------------------------------------------------------------------------
// Packet vs cascade
// ---------------------------------------------------------------------------

#[test]
fn packet_and_cascade_diverge_but_both_invert() {
    let signal = random_signal(64, 64);
    for wavelet in [Wavelet::Daubechies2, Wavelet::Daubechies4, Wavelet::Coiflet1] {
        let fwt = FastWaveletTransform::new(wavelet.filter());
        let wpt = WaveletPacketTransform::new(wavelet.filter());
        let cascade = fwt.forward(&signal).unwrap();
        let packet = wpt.forward(&signal).unwrap();
        let diff = relative_error(&packet, &cascade);
        assert!(diff > 1e-6, "{wavelet}: packet equals cascade");

        let back_c = fwt.reverse(&cascade).unwrap();
        let back_p = wpt.reverse(&packet).unwrap();
        for (i, &expected) in signal.iter().enumerate() {
            assert_relative_eq!(back_c[i], expected, epsilon = 1e-9, max_relative = 1e-9);
            assert_relative_eq!(back_p[i], expected, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
