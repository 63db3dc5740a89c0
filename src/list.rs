use core::{borrow::Borrow, cmp::Ordering, hash::Hash, mem};

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::{
  arena::Arena,
  error::Error,
  height::LevelGenerator,
  node::{Entry, EntryId, Node, NodeId},
  options::Options,
  types::{Identity, Score},
  MAX_HEIGHT,
};

mod check;
mod iterator;
pub use iterator::{Iter, Range};


/// A skiplist ranking index of `(identity, score)` entries.
///
/// Entries are kept in ascending `(score, identity)` order. Each identity is
/// ranked at most once; [`upsert`](RankList::upsert) on a ranked identity
/// moves it.
///
/// Every level is a chain of nodes starting at a sentinel. Nodes live in an
/// arena and link to their successor on the same level and to the same
/// entry's node on the level below. An identity index maps each identity to
/// its bottom level node.
pub struct RankList<I, S> {
  nodes: Arena<NodeId, Node>,
  entries: Arena<EntryId, Entry<I, S>>,
  index: HashMap<I, NodeId>,
  /// Sentinel of the top level.
  head: NodeId,
  /// Sentinel of level 1, which is never discarded.
  base: NodeId,
  /// Current height. 1 <= height <= max height.
  height: usize,
  levels: LevelGenerator,
  opts: Options,
}

impl<I: Identity, S: Score> Default for RankList<I, S> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<I, S> core::fmt::Debug for RankList<I, S> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RankList")
      .field("len", &self.entries.len())
      .field("height", &self.height)
      .field("max_height", &self.opts.max_height())
      .finish()
  }
}

impl<I: Identity, S: Score> RankList<I, S> {
  /// Creates an empty list with the default [`Options`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::RankList;
  ///
  /// let board = RankList::<String, u64>::new();
  /// assert!(board.is_empty());
  /// assert_eq!(board.height(), 1);
  /// ```
  #[inline]
  pub fn new() -> Self {
    Self::build(Options::new())
  }

  /// Creates an empty list with the given [`Options`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::{Options, RankList};
  ///
  /// let board = RankList::<u64, f64>::with_options(
  ///   Options::new().with_max_height(16).with_seed(Some(1)),
  /// )
  /// .unwrap();
  /// assert_eq!(board.max_height(), 16);
  ///
  /// assert!(RankList::<u64, f64>::with_options(Options::new().with_max_height(0)).is_err());
  /// ```
  pub fn with_options(opts: Options) -> Result<Self, Error> {
    opts.validate()?;
    Ok(Self::build(opts))
  }

  fn build(opts: Options) -> Self {
    let cap = opts.capacity();
    // Towers average 1 / (1 - p) nodes.
    let node_cap = cap.saturating_add(cap / 2);
    let mut nodes = Arena::with_capacity(node_cap.saturating_add(opts.max_height() as usize));
    let base = nodes.insert(Node::sentinel(None, None));
    Self {
      nodes,
      entries: Arena::with_capacity(cap),
      index: HashMap::with_capacity(cap),
      head: base,
      base,
      height: 1,
      levels: LevelGenerator::new(&opts),
      opts,
    }
  }

  /// Returns the number of ranked entries.
  #[inline]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` if nothing is ranked.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the current number of levels, at least 1.
  #[inline]
  pub fn height(&self) -> usize {
    self.height
  }

  /// Returns the maximum number of levels.
  #[inline]
  pub fn max_height(&self) -> usize {
    self.opts.max_height() as usize
  }

  /// Returns the options the list was built with.
  #[inline]
  pub const fn options(&self) -> &Options {
    &self.opts
  }

  /// Returns `true` if the identity is ranked.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::RankList;
  ///
  /// let mut board = RankList::<String, i32>::new();
  /// board.upsert("a".to_string(), 1).unwrap();
  /// assert!(board.contains("a"));
  /// assert!(!board.contains("b"));
  /// ```
  #[inline]
  pub fn contains<Q>(&self, identity: &Q) -> bool
  where
    I: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.index.contains_key(identity)
  }

  /// Returns the score of the identity, if it is ranked.
  #[inline]
  pub fn score_of<Q>(&self, identity: &Q) -> Option<S>
  where
    I: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.get(identity).map(Entry::score)
  }

  /// Returns the entry of the identity, if it is ranked.
  #[inline]
  pub fn get<Q>(&self, identity: &Q) -> Option<&Entry<I, S>>
  where
    I: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self
      .index
      .get(identity)
      .and_then(|node| self.entry_at(*node))
  }

  /// Ranks `identity` with `score`, replacing its previous entry if there is one.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::{Error, RankList};
  ///
  /// let mut board = RankList::<String, f64>::new();
  /// board.upsert("a".to_string(), 1.0).unwrap();
  /// board.upsert("a".to_string(), 3.0).unwrap();
  /// assert_eq!(board.len(), 1);
  /// assert_eq!(board.score_of("a"), Some(3.0));
  ///
  /// assert_eq!(board.upsert(String::new(), 1.0), Err(Error::InvalidIdentity));
  /// assert_eq!(board.upsert("b".to_string(), f64::NAN), Err(Error::InvalidScore));
  /// ```
  pub fn upsert(&mut self, identity: I, score: S) -> Result<(), Error> {
    if !identity.is_valid() {
      return Err(Error::InvalidIdentity);
    }

    if !score.is_valid() {
      return Err(Error::InvalidScore);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    let replaced = self.remove(&identity);
    #[cfg(feature = "tracing")]
    if let Some(old) = replaced {
      tracing::debug!(old = ?old.score(), new = ?score, "ranklist: replacing entry");
    }

    self.insert_absent(identity, score);
    Ok(())
  }

  /// Inserts an entry whose identity is known to be absent.
  fn insert_absent(&mut self, identity: I, score: S) {
    let level = self.levels.choose(self.height);

    // Predecessors from the top level down to level 1.
    let mut preds: SmallVec<[NodeId; MAX_HEIGHT]> = SmallVec::new();
    let mut cur = Some(self.head);
    while let Some(at) = cur {
      let pred = self.seek_on_level(at, |ent| ent.cmp_key(&score, &identity) == Ordering::Less);
      preds.push(pred);
      cur = self.nodes[pred].down;
    }
    debug_assert_eq!(preds.len(), self.height);

    let key = identity.clone();
    let entry = self.entries.insert(Entry::new(identity, score));

    let mut bottom = None;
    let mut below = None;
    for &pred in preds.iter().rev().take(level) {
      let next = self.nodes[pred].next;
      let node = self.nodes.insert(Node::new(entry, next, below));
      self.nodes[pred].next = Some(node);
      bottom.get_or_insert(node);
      below = Some(node);
    }

    while self.height < level {
      let node = self.nodes.insert(Node::new(entry, None, below));
      self.head = self.nodes.insert(Node::sentinel(Some(node), Some(self.head)));
      self.height += 1;
      below = Some(node);

      #[cfg(feature = "tracing")]
      tracing::trace!(height = self.height, "ranklist: grew");
    }

    if let Some(bottom) = bottom {
      self.index.insert(key, bottom);
    }
  }

  /// Unranks the identity. Returns `false` if it was not ranked.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::RankList;
  ///
  /// let mut board = RankList::<&'static str, i64>::new();
  /// board.upsert("a", 1).unwrap();
  /// assert!(board.delete("a"));
  /// assert!(!board.delete("a"));
  /// ```
  #[inline]
  pub fn delete<Q>(&mut self, identity: &Q) -> bool
  where
    I: Borrow<Q>,
    Q: Hash + Ord + ?Sized,
  {
    self.remove(identity).is_some()
  }

  /// Unranks the identity and returns its entry.
  pub fn remove<Q>(&mut self, identity: &Q) -> Option<Entry<I, S>>
  where
    I: Borrow<Q>,
    Q: Hash + Ord + ?Sized,
  {
    let score = self.get(identity)?.score();
    let entry = self.unlink(&score, identity)?;
    self.release(entry)
  }

  /// Unranks the entry whose key is exactly `(score, identity)`.
  ///
  /// Unlike [`delete`](RankList::delete), the nodes are found by walking
  /// every level with the given key rather than through the identity index.
  /// Returns `false` if no entry has that key.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::RankList;
  ///
  /// let mut board = RankList::<String, i64>::new();
  /// board.upsert("a".to_string(), 10).unwrap();
  /// assert!(!board.delete_exact("a", 11));
  /// assert!(board.delete_exact("a", 10));
  /// assert!(!board.contains("a"));
  /// ```
  pub fn delete_exact<Q>(&mut self, identity: &Q, score: S) -> bool
  where
    I: Borrow<Q>,
    Q: Hash + Ord + ?Sized,
  {
    if !score.is_valid() {
      return false;
    }

    match self.unlink(&score, identity) {
      Some(entry) => self.release(entry).is_some(),
      None => false,
    }
  }

  /// Unranks every entry.
  pub fn clear(&mut self) {
    self.nodes.clear();
    self.entries.clear();
    self.index.clear();
    self.base = self.nodes.insert(Node::sentinel(None, None));
    self.head = self.base;
    self.height = 1;
  }

  /// Returns the entries with `low <= score <= high` in ascending order.
  ///
  /// The scan is positioned in expected O(log n) and then walks the bottom
  /// level lazily.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::{Error, RankList};
  ///
  /// let mut board = RankList::<u32, u32>::new();
  /// for id in 0..10 {
  ///   board.upsert(id, id * 10).unwrap();
  /// }
  ///
  /// let ids: Vec<_> = board.range_by_score(25, 60).unwrap().map(|ent| *ent.identity()).collect();
  /// assert_eq!(ids, [3, 4, 5, 6]);
  /// assert_eq!(board.range_by_score(60, 25).err(), Some(Error::InvertedRange));
  /// ```
  pub fn range_by_score(&self, low: S, high: S) -> Result<Range<'_, I, S>, Error> {
    if !low.is_valid() || !high.is_valid() {
      return Err(Error::InvalidScore);
    }

    if low.compare(&high) == Ordering::Greater {
      return Err(Error::InvertedRange);
    }

    let pred = self.seek(|ent| ent.score().compare(&low) == Ordering::Less);
    Ok(Range::new(self, self.nodes[pred].next, high))
  }

  /// Returns `count` entries starting at the 0-based ascending position `start`.
  ///
  /// Positions are not indexed, so this walks `start + count` entries.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::RankList;
  ///
  /// let mut board = RankList::<u32, i64>::new();
  /// for id in 0..10 {
  ///   board.upsert(id, -(id as i64)).unwrap();
  /// }
  ///
  /// let ids: Vec<_> = board.rank_range(0, 3).map(|ent| *ent.identity()).collect();
  /// assert_eq!(ids, [9, 8, 7]);
  /// ```
  #[inline]
  pub fn rank_range(
    &self,
    start: usize,
    count: usize,
  ) -> core::iter::Take<core::iter::Skip<Iter<'_, I, S>>> {
    self.iter().skip(start).take(count)
  }

  /// Returns an iterator over every entry in ascending order.
  #[inline]
  pub fn iter(&self) -> Iter<'_, I, S> {
    Iter::new(self, self.nodes[self.base].next, self.len())
  }

  /// Returns the lowest ranked entry.
  #[inline]
  pub fn first(&self) -> Option<&Entry<I, S>> {
    self.nodes[self.base].next.and_then(|node| self.entry_at(node))
  }

  /// Returns the highest ranked entry.
  #[inline]
  pub fn last(&self) -> Option<&Entry<I, S>> {
    self.entry_at(self.seek(|_| true))
  }

  /// Walks the levels from the top down and returns the last bottom level
  /// node whose entry satisfies `before`, or the base sentinel.
  ///
  /// `before` must hold for a prefix of the entries in ascending order.
  fn seek(&self, before: impl Fn(&Entry<I, S>) -> bool) -> NodeId {
    let mut pred = self.head;
    loop {
      pred = self.seek_on_level(pred, &before);
      match self.nodes[pred].down {
        Some(down) => pred = down,
        None => return pred,
      }
    }
  }

  /// Advances along one level from `from` while the next entry satisfies `before`.
  #[inline]
  fn seek_on_level(&self, from: NodeId, before: impl Fn(&Entry<I, S>) -> bool) -> NodeId {
    let mut pred = from;
    while let Some(next) = self.nodes[pred].next {
      match self.entry_at(next) {
        Some(ent) if before(ent) => pred = next,
        _ => break,
      }
    }
    pred
  }

  /// Unlinks every node whose key is `(score, identity)`, then drops empty
  /// top levels. Returns the entry the nodes belonged to.
  fn unlink<Q>(&mut self, score: &S, identity: &Q) -> Option<EntryId>
  where
    I: Borrow<Q>,
    Q: Ord + ?Sized,
  {
    let mut unlinked = None;
    let mut cur = Some(self.head);
    while let Some(at) = cur {
      let pred = self.seek_on_level(at, |ent| ent.cmp_key(score, identity) == Ordering::Less);
      if let Some(next) = self.nodes[pred].next {
        let node = self.nodes[next];
        let matched = node
          .entry
          .map(|entry| self.entries[entry].cmp_key(score, identity) == Ordering::Equal);
        if matched == Some(true) {
          self.nodes[pred].next = node.next;
          self.nodes.remove(next);
          unlinked = node.entry;
        }
      }
      cur = self.nodes[pred].down;
    }

    if unlinked.is_some() {
      self.shrink();
    }
    unlinked
  }

  /// Drops trailing empty top levels, keeping at least one.
  fn shrink(&mut self) {
    while self.height > 1 && self.nodes[self.head].next.is_none() {
      let Some(down) = self.nodes[self.head].down else {
        break;
      };
      let stale = mem::replace(&mut self.head, down);
      self.nodes.remove(stale);
      self.height -= 1;

      #[cfg(feature = "tracing")]
      tracing::trace!(height = self.height, "ranklist: shrank");
    }
  }

  /// Frees an unlinked entry and its index record.
  fn release(&mut self, entry: EntryId) -> Option<Entry<I, S>> {
    let entry = self.entries.remove(entry)?;
    let indexed = self.index.remove(entry.identity());
    debug_assert!(indexed.is_some(), "unlinked entry was not indexed");
    Some(entry)
  }

  #[inline]
  fn entry_at(&self, node: NodeId) -> Option<&Entry<I, S>> {
    self.nodes[node].entry.map(|entry| &self.entries[entry])
  }
}
