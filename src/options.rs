use crate::{error::Error, DEFAULT_PROBABILITY, MAX_HEIGHT};

/// Options for [`RankList`](crate::RankList).
#[viewit::viewit(vis_all = "pub(super)", getters(skip), setters(skip))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
  max_height: u8,
  probability: f64,
  seed: Option<u64>,
  capacity: usize,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_height: MAX_HEIGHT as u8,
      probability: DEFAULT_PROBABILITY,
      seed: None,
      capacity: 0,
    }
  }

  /// Set the maximum number of levels an entry can span.
  ///
  /// Must be in `1..=32`. The default is `32`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::Options;
  ///
  /// let opts = Options::new().with_max_height(12);
  /// assert_eq!(opts.max_height(), 12);
  /// ```
  #[inline]
  pub const fn with_max_height(mut self, max_height: u8) -> Self {
    self.max_height = max_height;
    self
  }

  /// Set the probability that an entry which reached one level also reaches
  /// the next one.
  ///
  /// Must be greater than `0` and less than `1`. The default is `0.25`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::Options;
  ///
  /// let opts = Options::new().with_probability(0.5);
  /// assert_eq!(opts.probability(), 0.5);
  /// ```
  #[inline]
  pub const fn with_probability(mut self, probability: f64) -> Self {
    self.probability = probability;
    self
  }

  /// Set the seed of the level generator.
  ///
  /// Two lists built with the same seed and fed the same operations end up
  /// with identical shapes. By default the generator is seeded from the OS.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::Options;
  ///
  /// let opts = Options::new().with_seed(Some(42));
  /// assert_eq!(opts.seed(), Some(42));
  /// ```
  #[inline]
  pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
    self.seed = seed;
    self
  }

  /// Set the number of entries to reserve space for up front.
  ///
  /// The default is `0`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::Options;
  ///
  /// let opts = Options::new().with_capacity(1024);
  /// assert_eq!(opts.capacity(), 1024);
  /// ```
  #[inline]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Returns the maximum number of levels an entry can span.
  #[inline]
  pub const fn max_height(&self) -> u8 {
    self.max_height
  }

  /// Returns the level probability.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.probability
  }

  /// Returns the seed of the level generator.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }

  /// Returns the number of entries to reserve space for.
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  pub(crate) fn validate(&self) -> Result<(), Error> {
    if self.max_height == 0 || self.max_height as usize > MAX_HEIGHT {
      return Err(Error::InvalidMaxHeight(self.max_height));
    }

    // NaN fails both comparisons.
    if !(self.probability > 0.0 && self.probability < 1.0) {
      return Err(Error::InvalidProbability);
    }

    Ok(())
  }
}
