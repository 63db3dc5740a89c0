use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::options::Options;

/// Draws the number of levels a new entry spans.
#[derive(Debug, Clone)]
pub(crate) struct LevelGenerator {
  rng: SmallRng,
  probability: f64,
  max_height: usize,
}

impl LevelGenerator {
  pub(crate) fn new(opts: &Options) -> Self {
    let rng = match opts.seed() {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_os_rng(),
    };

    Self {
      rng,
      probability: opts.probability(),
      max_height: opts.max_height() as usize,
    }
  }

  /// Returns a level in `1..=min(max_height, height + 1)`, where `height` is
  /// the current height of the list.
  ///
  /// A new entry can raise the list by at most one level.
  #[inline]
  pub(crate) fn choose(&mut self, height: usize) -> usize {
    let mut level = 1;
    while level < self.max_height && self.rng.random_bool(self.probability) {
      level += 1;
    }
    level.min(height + 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn generator(max_height: u8, probability: f64) -> LevelGenerator {
    LevelGenerator::new(
      &Options::new()
        .with_max_height(max_height)
        .with_probability(probability)
        .with_seed(Some(7)),
    )
  }

  #[test]
  fn test_bounds() {
    let mut levels = generator(32, 0.25);
    for height in 1..=32 {
      for _ in 0..1000 {
        let level = levels.choose(height);
        assert!(level >= 1);
        assert!(level <= (height + 1).min(32), "{level} at height {height}");
      }
    }
  }

  #[test]
  fn test_grows_by_one() {
    let mut levels = generator(32, 0.9);
    let mut saw_growth = false;
    for _ in 0..1000 {
      let level = levels.choose(1);
      assert!(level <= 2);
      saw_growth |= level == 2;
    }
    assert!(saw_growth);
  }

  #[test]
  fn test_single_level() {
    let mut levels = generator(1, 0.9);
    for _ in 0..1000 {
      assert_eq!(levels.choose(1), 1);
    }
  }

  #[test]
  fn test_geometric_distribution() {
    const DRAWS: usize = 100_000;

    let mut levels = generator(32, 0.25);
    let mut counts = [0usize; 33];
    for _ in 0..DRAWS {
      counts[levels.choose(32)] += 1;
    }

    // P(level >= 2) = p, P(level >= 3) = p^2.
    let at_least_two = counts[2..].iter().sum::<usize>() as f64 / DRAWS as f64;
    let at_least_three = counts[3..].iter().sum::<usize>() as f64 / DRAWS as f64;
    assert!((at_least_two - 0.25).abs() < 0.02, "{at_least_two}");
    assert!((at_least_three - 0.0625).abs() < 0.01, "{at_least_three}");
    assert!(counts[20..].iter().all(|&c| c == 0));
  }

  #[test]
  fn test_seeded_is_reproducible() {
    let mut a = generator(32, 0.5);
    let mut b = generator(32, 0.5);
    for height in (1..=32).cycle().take(500) {
      assert_eq!(a.choose(height), b.choose(height));
    }
  }
}
