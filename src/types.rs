use core::{cmp::Ordering, fmt::Debug, hash::Hash};

use std::{rc::Rc, sync::Arc};

/// A score that can rank entries.
///
/// Scores only need a total order on their valid values; a value for which
/// [`is_valid`](Score::is_valid) returns `false` is rejected before it
/// reaches the list.
pub trait Score: Copy + Debug {
  /// Compares two valid scores.
  fn compare(&self, other: &Self) -> Ordering;

  /// Returns `true` if the score has a place in the total order.
  #[inline]
  fn is_valid(&self) -> bool {
    true
  }
}

macro_rules! impl_int_score {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl Score for $ty {
        #[inline]
        fn compare(&self, other: &Self) -> Ordering {
          self.cmp(other)
        }
      }
    )+
  };
}

impl_int_score!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_score {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl Score for $ty {
        /// Total order in which `-0.0` and `0.0` are equal.
        #[inline]
        fn compare(&self, other: &Self) -> Ordering {
          (*self + 0.0).total_cmp(&(*other + 0.0))
        }

        #[inline]
        fn is_valid(&self) -> bool {
          !self.is_nan()
        }
      }
    )+
  };
}

impl_float_score!(f32, f64);

/// A unique key of a ranked entry.
///
/// The [`Ord`] implementation breaks ties between entries with equal scores.
pub trait Identity: Clone + Eq + Hash + Ord {
  /// Returns `true` if the identity can be ranked.
  #[inline]
  fn is_valid(&self) -> bool {
    true
  }
}

macro_rules! impl_non_empty_identity {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl Identity for $ty {
        #[inline]
        fn is_valid(&self) -> bool {
          !self.is_empty()
        }
      }
    )+
  };
}

impl_non_empty_identity!(
  String,
  &'static str,
  Box<str>,
  Arc<str>,
  Rc<str>,
  Vec<u8>,
  Box<[u8]>,
);

macro_rules! impl_int_identity {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl Identity for $ty {}
    )+
  };
}

impl_int_identity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
