use core::{cmp::Ordering, iter::FusedIterator};

use super::{Entry, Identity, NodeId, RankList, Score};

/// An iterator over the entries of a [`RankList`] within a score range.
///
/// Created by [`RankList::range_by_score`].
pub struct Range<'a, I, S> {
  list: &'a RankList<I, S>,
  next: Option<NodeId>,
  high: S,
}

impl<I, S: Score> Clone for Range<'_, I, S> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      list: self.list,
      next: self.next,
      high: self.high,
    }
  }
}

impl<I, S: Score> core::fmt::Debug for Range<'_, I, S> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Range")
      .field("next", &self.next)
      .field("high", &self.high)
      .finish()
  }
}

impl<'a, I, S> Range<'a, I, S> {
  #[inline]
  pub(super) fn new(list: &'a RankList<I, S>, next: Option<NodeId>, high: S) -> Self {
    Self { list, next, high }
  }
}

impl<'a, I: Identity, S: Score> Iterator for Range<'a, I, S> {
  type Item = &'a Entry<I, S>;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.next?;
    let Some(ent) = self.list.entry_at(node) else {
      self.next = None;
      return None;
    };

    if ent.score().compare(&self.high) == Ordering::Greater {
      self.next = None;
      return None;
    }

    self.next = self.list.nodes[node].next;
    Some(ent)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    match self.next {
      Some(_) => (0, Some(self.list.len())),
      None => (0, Some(0)),
    }
  }
}

impl<I: Identity, S: Score> FusedIterator for Range<'_, I, S> {}

/// An iterator over every entry of a [`RankList`] in ascending order.
///
/// Created by [`RankList::iter`].
pub struct Iter<'a, I, S> {
  list: &'a RankList<I, S>,
  next: Option<NodeId>,
  remaining: usize,
}

impl<I, S> Clone for Iter<'_, I, S> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      list: self.list,
      next: self.next,
      remaining: self.remaining,
    }
  }
}

impl<I, S> core::fmt::Debug for Iter<'_, I, S> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Iter")
      .field("next", &self.next)
      .field("remaining", &self.remaining)
      .finish()
  }
}

impl<'a, I, S> Iter<'a, I, S> {
  #[inline]
  pub(super) fn new(list: &'a RankList<I, S>, next: Option<NodeId>, remaining: usize) -> Self {
    Self {
      list,
      next,
      remaining,
    }
  }
}

impl<'a, I: Identity, S: Score> Iterator for Iter<'a, I, S> {
  type Item = &'a Entry<I, S>;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.next?;
    let ent = self.list.entry_at(node)?;
    self.next = self.list.nodes[node].next;
    self.remaining = self.remaining.saturating_sub(1);
    Some(ent)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<I: Identity, S: Score> ExactSizeIterator for Iter<'_, I, S> {}

impl<I: Identity, S: Score> FusedIterator for Iter<'_, I, S> {}

impl<'a, I: Identity, S: Score> IntoIterator for &'a RankList<I, S> {
  type Item = &'a Entry<I, S>;
  type IntoIter = Iter<'a, I, S>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
