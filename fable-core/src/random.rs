//! random.rs
//! Randomness source abstraction plus the primitives every handler draws through.
//!
//! Handlers never read a source directly: all draws go through the functions
//! below, so swapping in a seeded source makes a whole resolution replayable.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Generator of uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Per-process entropy. The default for live play.
#[derive(Debug)]
pub struct EntropySource(ThreadRng);

impl EntropySource {
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next_f64(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Deterministic stream for tests and replays: same seed, same draws.
#[derive(Debug, Clone)]
pub struct SeededSource(StdRng);

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededSource {
    fn next_f64(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Contract violations inside the primitives. These point at a handler or
/// table bug, never at bad player input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    #[error("invalid range: min {min} > max {max}")]
    InvalidRange { min: i64, max: i64 },
    #[error("weighted selection over an empty list")]
    EmptyInput,
    #[error("total weight {total} is not positive")]
    NonPositiveWeight { total: f64 },
}

/// Uniform integer over `[min, max]`, both ends inclusive.
pub fn random_in_range(
    rng: &mut dyn RandomSource,
    min: i64,
    max: i64,
) -> Result<i64, RandomError> {
    if min > max {
        return Err(RandomError::InvalidRange { min, max });
    }
    let span = (max as i128 - min as i128 + 1) as f64;
    let offset = (rng.next_f64() * span).floor() as i128;
    // A draw of 1.0 - ε times a huge span can round up to `span`.
    Ok((min as i128 + offset).min(max as i128) as i64)
}

/// Bernoulli trial. `probability` is clamped to `[0, 1]`; one draw is always consumed.
pub fn success_check(rng: &mut dyn RandomSource, probability: f64) -> bool {
    let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
    rng.next_f64() < p
}

/// Pick one item with probability proportional to its weight.
///
/// Single cumulative-subtraction scan. If float drift walks off the end
/// without triggering, the last item wins.
pub fn weighted_random<'a, T>(
    rng: &mut dyn RandomSource,
    items: &'a [(T, f64)],
) -> Result<&'a T, RandomError> {
    let Some((last, _)) = items.last() else {
        return Err(RandomError::EmptyInput);
    };
    let total: f64 = items.iter().map(|(_, w)| *w).sum();
    if total.is_nan() || total <= 0.0 {
        return Err(RandomError::NonPositiveWeight { total });
    }
    let mut remaining = rng.next_f64() * total;
    for (item, weight) in items {
        remaining -= *weight;
        if remaining < 0.0 {
            return Ok(item);
        }
    }
    Ok(last)
}

/// `max(0, base + random_in_range(-v, v))` with `v = |variance|`.
pub fn calculate_damage(
    rng: &mut dyn RandomSource,
    base: i64,
    variance: i64,
) -> Result<i64, RandomError> {
    let v = variance.saturating_abs();
    let roll = random_in_range(rng, -v, v)?;
    Ok(base.saturating_add(roll).max(0))
}

/// Uniform float over `[min, max)`.
pub fn uniform(rng: &mut dyn RandomSource, min: f64, max: f64) -> f64 {
    min + rng.next_f64() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws, cycling.
    struct Scripted {
        draws: Vec<f64>,
        idx: usize,
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let v = self.draws[self.idx % self.draws.len()];
            self.idx += 1;
            v
        }
    }

    fn scripted(draws: &[f64]) -> Scripted {
        Scripted { draws: draws.to_vec(), idx: 0 }
    }

    #[test]
    fn range_ends_are_reachable() {
        assert_eq!(random_in_range(&mut scripted(&[0.0]), 1, 3), Ok(1));
        assert_eq!(random_in_range(&mut scripted(&[0.999_999]), 1, 3), Ok(3));
        assert_eq!(random_in_range(&mut scripted(&[0.5]), 4, 4), Ok(4));
    }

    #[test]
    fn reversed_range_is_an_error() {
        assert_eq!(
            random_in_range(&mut scripted(&[0.5]), 3, 1),
            Err(RandomError::InvalidRange { min: 3, max: 1 })
        );
    }

    #[test]
    fn extreme_range_does_not_overflow() {
        let v = random_in_range(&mut scripted(&[0.999_999_999_999]), i64::MIN, i64::MAX)
            .expect("full range");
        assert!(v > 0);
    }

    #[test]
    fn weighted_falls_through_to_last_on_drift() {
        // A source that returns exactly 1.0 breaks the [0, 1) promise; the scan
        // must still land on something.
        let items = [("a", 1.0), ("b", 1.0)];
        assert_eq!(weighted_random(&mut scripted(&[1.0]), &items), Ok(&"b"));
    }

    #[test]
    fn weighted_first_bucket() {
        let items = [("a", 1.0), ("b", 3.0)];
        assert_eq!(weighted_random(&mut scripted(&[0.2]), &items), Ok(&"a"));
        assert_eq!(weighted_random(&mut scripted(&[0.3]), &items), Ok(&"b"));
    }

    #[test]
    fn damage_is_never_negative() {
        assert_eq!(calculate_damage(&mut scripted(&[0.0]), 2, 10), Ok(0));
        assert_eq!(calculate_damage(&mut scripted(&[0.0]), 2, -10), Ok(0));
    }
}
