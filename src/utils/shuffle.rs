//! Unbiased shuffling of answer choices.

use rand::{Rng, seq::SliceRandom};

/// Return a uniformly random permutation of `items` drawn from `rng`, leaving
/// the input untouched.
pub fn shuffled_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
