/// Error type for the ranklist crate.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// Indicates that the identity is empty or otherwise cannot be ranked.
  #[error("identity must not be empty")]
  InvalidIdentity,

  /// Indicates that the score has no place in a total order, e.g. a NaN float.
  #[error("score is not totally ordered")]
  InvalidScore,

  /// Indicates that the lower bound of a score range is greater than its upper bound.
  #[error("range lower bound is greater than its upper bound")]
  InvertedRange,

  /// Indicates that the configured maximum height is outside of `1..=32`.
  #[error("max height must be in 1..=32, got {0}")]
  InvalidMaxHeight(u8),

  /// Indicates that the configured level probability is outside of `(0, 1)`.
  #[error("level probability must be greater than 0 and less than 1")]
  InvalidProbability,
}

/// A broken structural invariant, reported by [`RankList::validate`](crate::RankList::validate).
///
/// Any of these means the list is corrupted; none of them can be caused by
/// a caller using the public API.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
  /// The head chain does not have exactly one sentinel per level.
  #[error("head chain has {found} sentinels, expected {expected}")]
  HeadChain {
    /// The current height of the list.
    expected: usize,
    /// The number of sentinels reachable from the top sentinel.
    found: usize,
  },

  /// The current height exceeds the configured maximum.
  #[error("height {height} exceeds the maximum height {max}")]
  HeightOverflow {
    /// The current height of the list.
    height: usize,
    /// The configured maximum height.
    max: usize,
  },

  /// A sentinel carries an entry, or an entry node is missing its entry.
  #[error("level {level} mixes sentinel and entry nodes")]
  Sentinel {
    /// The level, counted from 1 at the bottom.
    level: usize,
  },

  /// Two neighbours on one level are not in strictly ascending order.
  #[error("level {level} is not strictly ascending")]
  Unordered {
    /// The level, counted from 1 at the bottom.
    level: usize,
  },

  /// A node does not continue down to the same entry on the level below.
  #[error("entry node at level {level} has no counterpart on the level below")]
  Gap {
    /// The level, counted from 1 at the bottom.
    level: usize,
  },

  /// The top level holds no entries although the height is above one.
  #[error("top level {height} is empty")]
  StaleHeight {
    /// The current height of the list.
    height: usize,
  },

  /// The bottom level, the entry arena and the identity index disagree on the size.
  #[error("bottom level has {nodes} nodes, {entries} entries are stored and {index} are indexed")]
  Length {
    /// Entry nodes on the bottom level.
    nodes: usize,
    /// Live entries.
    entries: usize,
    /// Identity index records.
    index: usize,
  },

  /// An identity index record does not point at its entry's bottom level node.
  #[error("identity index points away from the bottom level node of its entry")]
  Index,
}
