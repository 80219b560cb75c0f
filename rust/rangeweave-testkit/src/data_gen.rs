//! Data generation utilities for testing.

/// Generates `len` pseudo-random values in `-1000..1000`.
///
/// The same `seed` always yields the same sequence.
pub fn random_sequence(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.i64(-1000..1000)).collect()
}

/// Generates a sequence of random length in `0..=max_len`.
pub fn random_length_sequence(max_len: usize, seed: u64) -> Vec<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let len = rng.usize(0..=max_len);
    random_sequence(len, rng.u64(..))
}
