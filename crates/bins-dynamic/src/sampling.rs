//! Random subset selection
//!
//! Every function here draws from a caller-supplied generator. Seed one
//! (`StdRng::seed_from_u64`, `ChaCha8Rng::seed_from_u64`) for reproducible
//! runs; [`entropy_rng`] is meant for the outermost application layer only.

use bins_core::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A generator seeded from operating-system entropy
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Walks a population of `population` items in order and decides for each
/// whether it belongs to a uniformly random subset of exactly `n` items.
///
/// Item `i` is picked with probability `still_needed / still_unseen`
/// (selection sampling), so the picks come out in ascending order and the
/// walk needs no memory beyond two counters.
pub struct RandomSamplingAssistant<'r, R: Rng + ?Sized> {
    to_pick: usize,
    unseen: usize,
    rng: &'r mut R,
}

impl<'r, R: Rng + ?Sized> RandomSamplingAssistant<'r, R> {
    /// Fails with [`Error::SampleTooLarge`] if `n > population`
    pub fn new(n: usize, population: usize, rng: &'r mut R) -> Result<Self> {
        if n > population {
            return Err(Error::SampleTooLarge {
                requested: n,
                available: population,
            });
        }
        Ok(Self {
            to_pick: n,
            unseen: population,
            rng,
        })
    }

    /// Decide whether the next item of the population is picked.
    /// Returns `false` once the population is exhausted.
    pub fn sample_next_element(&mut self) -> bool {
        if self.unseen == 0 {
            return false;
        }
        let picked = self.to_pick > 0 && self.rng.gen_range(0..self.unseen) < self.to_pick;
        self.unseen -= 1;
        if picked {
            self.to_pick -= 1;
        }
        picked
    }

    /// Number of picks still to be made
    pub fn remaining(&self) -> usize {
        self.to_pick
    }

    /// Hand the index of every picked item to `visit`, in ascending order
    pub fn for_each_pick(mut self, mut visit: impl FnMut(usize)) {
        let population = self.unseen;
        for index in 0..population {
            if self.to_pick == 0 {
                break;
            }
            if self.sample_next_element() {
                visit(index);
            }
        }
    }
}

/// Ascending indices of a uniformly random `n`-subset of `0..population`
pub fn sample_indices<R: Rng + ?Sized>(n: usize, population: usize, rng: &mut R) -> Result<Vec<usize>> {
    let mut picks = Vec::with_capacity(n);
    RandomSamplingAssistant::new(n, population, rng)?.for_each_pick(|i| picks.push(i));
    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_picks_exactly_n_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for (n, population) in [(0, 10), (3, 10), (10, 10), (7, 1000)] {
            let picks = sample_indices(n, population, &mut rng).unwrap();
            assert_eq!(picks.len(), n);
            assert!(picks.windows(2).all(|w| w[0] < w[1]));
            assert!(picks.iter().all(|&i| i < population));
        }
    }

    #[test]
    fn test_rejects_oversized_request() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            sample_indices(5, 4, &mut rng).unwrap_err(),
            Error::SampleTooLarge {
                requested: 5,
                available: 4
            }
        );
    }

    #[test]
    fn test_every_index_equally_likely() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut counts = [0usize; 10];
        let trials = 20_000;
        for _ in 0..trials {
            for i in sample_indices(3, 10, &mut rng).unwrap() {
                counts[i] += 1;
            }
        }
        let expected = trials as f64 * 0.3;
        for count in counts {
            assert!((count as f64 - expected).abs() < expected * 0.05, "count {count}");
        }
    }

    #[test]
    fn test_assistant_walk() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut assistant = RandomSamplingAssistant::new(2, 5, &mut rng).unwrap();
        let picked = (0..5).filter(|_| assistant.sample_next_element()).count();
        assert_eq!(picked, 2);
        assert_eq!(assistant.remaining(), 0);
        assert!(!assistant.sample_next_element());
    }
}
