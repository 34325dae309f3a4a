//! Shuffle index selection
//!
//! Shuffle navigation picks a uniformly random index from the whole queue.
//! The current index is not excluded, so the same episode may be picked
//! again.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the RNG used for shuffle navigation
pub fn shuffle_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Pick a random index in `0..len`
///
/// Returns `None` for an empty queue.
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.gen_range(0..len))
}
