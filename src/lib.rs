//! An arena based skiplist specialised as a ranking index.
//!
//! [`RankList`] stores `(identity, score)` entries ordered by `(score, identity)`.
//! Every identity appears at most once: upserting an identity that is already
//! ranked moves it to its new position. Lookups by identity go through a hash
//! index and cost O(1); inserts, deletes and the positioning step of a range
//! scan cost expected O(log n).
//!
//! ## Example
//!
//! ```rust
//! use ranklist::RankList;
//!
//! let mut board = RankList::<String, i64>::new();
//! board.upsert("alice".to_string(), 10).unwrap();
//! board.upsert("bob".to_string(), 5).unwrap();
//! board.upsert("carol".to_string(), 20).unwrap();
//!
//! let mid: Vec<_> = board
//!   .range_by_score(5, 15)
//!   .unwrap()
//!   .map(|ent| (ent.identity().as_str(), ent.score()))
//!   .collect();
//! assert_eq!(mid, [("bob", 5), ("alice", 10)]);
//!
//! board.upsert("alice".to_string(), 30).unwrap();
//! assert_eq!(board.score_of("alice"), Some(30));
//! assert_eq!(board.last().map(|ent| ent.identity().as_str()), Some("alice"));
//!
//! assert!(board.delete("bob"));
//! assert!(!board.contains("bob"));
//! assert_eq!(board.len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! A [`RankList`] has no internal locking. It is `Send + Sync` whenever the
//! identity and score types are, so it can be shared behind a reader/writer
//! lock; a [`Range`] borrows the list, so the borrow checker keeps the lock
//! held for the whole scan unless the results are collected first.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod arena;
mod error;
mod height;
mod node;
mod options;
mod types;

/// The skiplist ranking index.
pub mod list;

pub use error::{Error, InvariantViolation};
pub use list::{Iter, Range, RankList};
pub use node::Entry;
pub use options::Options;
pub use types::{Identity, Score};

/// The hard ceiling on the number of levels of a [`RankList`].
pub const MAX_HEIGHT: usize = 32;

/// The default probability that an entry which reached a level also reaches
/// the next one.
pub const DEFAULT_PROBABILITY: f64 = 0.25;
