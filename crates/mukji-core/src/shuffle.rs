//! Uniform shuffling and fixed-size sampling of the candidate pool.

use rand::Rng;

/// Returns a uniformly shuffled copy of `items` (Fisher–Yates).
///
/// The input is never reordered.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// The first `sample_size` entries of a fresh shuffle of `pool`.
///
/// Pools smaller than `sample_size` come back whole, in shuffled order.
pub fn select_sample<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    sample_size: usize,
    rng: &mut R,
) -> Vec<T> {
    let mut shuffled = shuffle(pool, rng);
    shuffled.truncate(sample_size);
    shuffled
}
