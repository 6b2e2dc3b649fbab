//! Generic operators for fixed-length, position-aligned chromosomes.
//!
//! These operate on plain gene slices and know nothing about what a gene
//! means, so any problem whose individuals are `Vec<T>` can use them.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: swap the tails after a random cut, O(n)
//!
//! # Mutation Operators
//!
//! - [`reset_mutation`]: redraw each gene independently at a fixed rate, O(n)

use rand::Rng;

/// Single-point crossover.
///
/// Draws a cut index `k` uniformly from `0..n`. The first child takes
/// `parent1[..k]` followed by `parent2[k..]`; the second child takes the
/// complement. A cut at 0 swaps the parents entirely.
///
/// Empty parents yield empty children without drawing from `rng`.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let cut = rng.random_range(0..n);
    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Random-reset mutation.
///
/// Visits every position in order; with probability `rate` the gene is
/// replaced by `sample(rng)`, which may return the value already there.
pub fn reset_mutation<T, R, F>(genes: &mut [T], rate: f64, rng: &mut R, mut sample: F)
where
    R: Rng,
    F: FnMut(&mut R) -> T,
{
    for gene in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            *gene = sample(rng);
        }
    }
}
