//! Utilities related to random numbers.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Creates a random number generator, seeded with the given seed if provided
/// and from system entropy otherwise.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Creates the given number of independent random number streams, each seeded
/// by a draw from the given parent generator.
///
/// The streams are fully determined by the state of the parent generator, so a
/// seeded parent gives reproducible streams regardless of how the streams are
/// later scheduled across threads.
pub fn split_rng_streams<R: Rng + ?Sized>(rng: &mut R, n_streams: usize) -> Vec<StdRng> {
    (0..n_streams)
        .map(|_| StdRng::seed_from_u64(rng.gen()))
        .collect()
}

/// Draws a uniformly distributed number in `[0, 1)`.
pub fn uniform_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}
