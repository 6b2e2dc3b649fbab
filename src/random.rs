//! Random number generator construction.
//!
//! Every search run owns its own generator. Seeding the generator with a
//! fixed value makes a run reproducible end to end.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
///
/// Two generators created from the same seed yield identical sequences.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from a fresh OS-random seed when
/// `seed` is `None`.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
