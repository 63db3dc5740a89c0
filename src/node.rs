use core::{borrow::Borrow, cmp::Ordering};

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{arena::Handle, types::Score};

macro_rules! handle {
  ($($name:ident),+ $(,)?) => {
    $(
      #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
      pub(crate) struct $name(usize);

      impl Handle for $name {
        #[inline]
        fn from_usize(idx: usize) -> Self {
          Self(idx)
        }

        #[inline]
        fn as_usize(self) -> usize {
          self.0
        }
      }
    )+
  };
}

handle!(NodeId, EntryId);

/// A ranked entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<I, S> {
  identity: I,
  score: S,
  inserted_at: u64,
}

impl<I, S: Score> Entry<I, S> {
  #[inline]
  pub(crate) fn new(identity: I, score: S) -> Self {
    Self {
      identity,
      score,
      inserted_at: now_millis(),
    }
  }

  /// Returns the identity of the entry.
  #[inline]
  pub const fn identity(&self) -> &I {
    &self.identity
  }

  /// Returns the score of the entry.
  #[inline]
  pub fn score(&self) -> S {
    self.score
  }

  /// Returns when the entry was inserted, in milliseconds since the Unix epoch.
  ///
  /// Upserting a new score creates a new entry, so this is the time of the
  /// last score change.
  #[inline]
  pub const fn inserted_at(&self) -> u64 {
    self.inserted_at
  }

  /// Consumes the entry, returning its identity and score.
  #[inline]
  pub fn into_parts(self) -> (I, S) {
    (self.identity, self.score)
  }

  /// Compares the `(score, identity)` key of this entry with another key.
  #[inline]
  pub(crate) fn cmp_key<Q>(&self, score: &S, identity: &Q) -> Ordering
  where
    I: Borrow<Q>,
    Q: Ord + ?Sized,
  {
    self
      .score
      .compare(score)
      .then_with(|| self.identity.borrow().cmp(identity))
  }
}

/// One level of an entry's tower, or a sentinel when `entry` is `None`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
  pub(crate) entry: Option<EntryId>,
  pub(crate) next: Option<NodeId>,
  pub(crate) down: Option<NodeId>,
}

impl Node {
  #[inline]
  pub(crate) const fn new(entry: EntryId, next: Option<NodeId>, down: Option<NodeId>) -> Self {
    Self {
      entry: Some(entry),
      next,
      down,
    }
  }

  #[inline]
  pub(crate) const fn sentinel(next: Option<NodeId>, down: Option<NodeId>) -> Self {
    Self {
      entry: None,
      next,
      down,
    }
  }

  #[inline]
  pub(crate) const fn is_sentinel(&self) -> bool {
    self.entry.is_none()
  }
}

fn now_millis() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as u64)
    .unwrap_or_default()
}
