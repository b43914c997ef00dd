//! Permutation null distribution and tail counting.
//!
//! A trial shuffles the pooled score vector (both models concatenated) and
//! takes `sum(first k) - sum(last k)`. On a pool of `2k` values those two
//! windows are disjoint and cover every element.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::common::error::{SweatError, SweatResult};

use super::domain::Tail;

/// Trials per independently seeded chunk in the parallel path.
pub const CHUNK_TRIALS: usize = 1024;

/// Sum of the first `k` entries minus sum of the last `k` entries. Callers
/// guarantee `pool.len() == 2 * k` via `check_pool`.
fn split_difference(pool: &[f64], k: usize) -> f64 {
    let head: f64 = pool[..k].iter().sum();
    let tail: f64 = pool[pool.len() - k..].iter().sum();
    head - tail
}

fn check_pool(pool: &[f64], k: usize) -> SweatResult<()> {
    if k == 0 || pool.len() != 2 * k {
        return Err(SweatError::invalid(format!(
            "pool of length {} cannot be split into two windows of {k}",
            pool.len()
        )));
    }
    Ok(())
}

/// Run `trials` permutations over a private copy of `pool`.
pub fn null_distribution<R>(pool: &[f64], k: usize, trials: usize, rng: &mut R) -> SweatResult<Vec<f64>>
where
    R: Rng + ?Sized,
{
    check_pool(pool, k)?;
    let mut work = pool.to_vec();
    let mut samples = Vec::with_capacity(trials);
    for _ in 0..trials {
        work.shuffle(rng);
        samples.push(split_difference(&work, k));
    }
    Ok(samples)
}

/// Parallel variant of [`null_distribution`].
///
/// Each chunk of [`CHUNK_TRIALS`] gets its own `ChaCha8Rng` seeded from `rng`
/// before any work starts, so the output depends on the caller's seed only and
/// not on how rayon schedules the chunks.
pub fn null_distribution_parallel<R>(
    pool: &[f64],
    k: usize,
    trials: usize,
    rng: &mut R,
) -> SweatResult<Vec<f64>>
where
    R: Rng + ?Sized,
{
    check_pool(pool, k)?;
    let chunks: Vec<(u64, usize)> = (0..trials)
        .step_by(CHUNK_TRIALS)
        .map(|start| (rng.gen::<u64>(), CHUNK_TRIALS.min(trials - start)))
        .collect();

    let per_chunk: Vec<Vec<f64>> = chunks
        .into_par_iter()
        .map(|(seed, len)| {
            let mut local = ChaCha8Rng::seed_from_u64(seed);
            let mut work = pool.to_vec();
            (0..len)
                .map(|_| {
                    work.shuffle(&mut local);
                    split_difference(&work, k)
                })
                .collect()
        })
        .collect();

    Ok(per_chunk.into_iter().flatten().collect())
}

/// Number of null samples that are not more extreme than `observed`.
///
/// Ties count here, so they never make a result look more significant.
pub fn over_count(observed: f64, null: &[f64], tail: Tail) -> usize {
    match tail {
        Tail::TwoTailed => null.iter().filter(|d| d.abs() <= observed.abs()).count(),
        Tail::OneTailed if observed > 0.0 => null.iter().filter(|d| **d <= observed).count(),
        Tail::OneTailed => null.iter().filter(|d| **d >= observed).count(),
    }
}

/// Fraction of null samples strictly more extreme than `observed`.
pub fn p_value(observed: f64, null: &[f64], tail: Tail) -> SweatResult<f64> {
    if null.is_empty() {
        return Err(SweatError::invalid("null distribution is empty"));
    }
    let over = over_count(observed, null, tail);
    Ok(1.0 - over as f64 / null.len() as f64)
}
