use core::{cmp::Ordering, fmt::Write};

use std::collections::{HashMap, HashSet};

use super::{EntryId, Identity, NodeId, RankList, Score};
use crate::error::InvariantViolation;

impl<I: Identity, S: Score> RankList<I, S> {
  /// Checks every structural invariant of the list.
  ///
  /// This walks the whole structure, so it is meant for tests and debugging.
  /// An error means the list is corrupted.
  pub fn validate(&self) -> Result<(), InvariantViolation> {
    if self.height > self.max_height() {
      return Err(InvariantViolation::HeightOverflow {
        height: self.height,
        max: self.max_height(),
      });
    }

    let levels = self.levels_top_down();
    if levels.len() != self.height || levels.last().map(|(sentinel, _)| *sentinel) != Some(self.base)
    {
      return Err(InvariantViolation::HeadChain {
        expected: self.height,
        found: levels.len(),
      });
    }

    // Node -> entry, per level, used to check that towers continue downwards.
    let mut below: HashMap<NodeId, EntryId> = HashMap::new();
    for (depth, (sentinel, chain)) in levels.iter().enumerate().rev() {
      let level = self.height - depth;
      if !self.nodes[*sentinel].is_sentinel() {
        return Err(InvariantViolation::Sentinel { level });
      }

      if level == self.height && level > 1 && chain.is_empty() {
        return Err(InvariantViolation::StaleHeight {
          height: self.height,
        });
      }

      let mut here = HashMap::with_capacity(chain.len());
      let mut prev: Option<EntryId> = None;
      for &node in chain {
        let Some(entry) = self.nodes[node].entry else {
          return Err(InvariantViolation::Sentinel { level });
        };

        if let Some(prev) = prev {
          let (a, b) = (&self.entries[prev], &self.entries[entry]);
          if a.cmp_key(&b.score(), b.identity()) != Ordering::Less {
            return Err(InvariantViolation::Unordered { level });
          }
        }

        let continues = match self.nodes[node].down {
          Some(down) => level > 1 && below.get(&down) == Some(&entry),
          None => level == 1,
        };
        if !continues {
          return Err(InvariantViolation::Gap { level });
        }

        here.insert(node, entry);
        prev = Some(entry);
      }

      if level == 1 {
        if chain.len() != self.entries.len() || chain.len() != self.index.len() {
          return Err(InvariantViolation::Length {
            nodes: chain.len(),
            entries: self.entries.len(),
            index: self.index.len(),
          });
        }

        let bottom: HashSet<NodeId> = chain.iter().copied().collect();
        for (identity, node) in &self.index {
          let points_home = bottom.contains(node)
            && self
              .entry_at(*node)
              .is_some_and(|ent| ent.identity() == identity);
          if !points_home {
            return Err(InvariantViolation::Index);
          }
        }
      }

      below = here;
    }

    Ok(())
  }

  /// Returns every level as its sentinel and entry nodes, top level first.
  pub(crate) fn levels_top_down(&self) -> Vec<(NodeId, Vec<NodeId>)> {
    let mut levels = Vec::with_capacity(self.height);
    let mut sentinel = Some(self.head);
    while let Some(at) = sentinel {
      let mut chain = Vec::new();
      let mut cur = self.nodes[at].next;
      while let Some(node) = cur {
        chain.push(node);
        cur = self.nodes[node].next;
      }
      levels.push((at, chain));
      sentinel = self.nodes[at].down;

      // A cycle in the head chain would never end.
      if levels.len() > crate::MAX_HEIGHT {
        break;
      }
    }
    levels
  }
}

impl<I, S> RankList<I, S>
where
  I: Identity + core::fmt::Debug,
  S: Score,
{
  /// Returns a level by level listing of the list, top level first.
  ///
  /// The format is meant for humans and may change.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use ranklist::{Options, RankList};
  ///
  /// let mut board = RankList::<&'static str, i32>::with_options(Options::new().with_max_height(1)).unwrap();
  /// board.upsert("b", 5).unwrap();
  /// board.upsert("a", 10).unwrap();
  /// assert_eq!(board.debug_dump(), "L1: \"b\"=5 \"a\"=10\n");
  /// ```
  pub fn debug_dump(&self) -> String {
    let mut out = String::new();
    for (depth, (_, chain)) in self.levels_top_down().iter().enumerate() {
      let _ = write!(out, "L{}:", self.height - depth);
      for &node in chain {
        if let Some(ent) = self.entry_at(node) {
          let _ = write!(out, " {:?}={:?}", ent.identity(), ent.score());
        }
      }
      out.push('\n');
    }
    out
  }
}
