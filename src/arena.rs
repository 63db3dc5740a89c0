use core::{
  marker::PhantomData,
  ops::{Index, IndexMut},
};

/// A typed handle into an [`Arena`].
pub(crate) trait Handle: Copy + Eq {
  fn from_usize(idx: usize) -> Self;

  fn as_usize(self) -> usize;
}

#[derive(Debug)]
enum Slot<T> {
  Occupied(T),
  Vacant { next_free: Option<usize> },
}

/// Slot storage addressed by handles.
///
/// Freed slots are threaded into a free list and reused by later inserts, so
/// a handle stays valid until the value behind it is removed and is then
/// recycled.
#[derive(Debug)]
pub(crate) struct Arena<H, T> {
  slots: Vec<Slot<T>>,
  free: Option<usize>,
  len: usize,
  _handle: PhantomData<H>,
}

impl<H: Handle, T> Arena<H, T> {
  #[inline]
  pub(crate) fn with_capacity(cap: usize) -> Self {
    Self {
      slots: Vec::with_capacity(cap),
      free: None,
      len: 0,
      _handle: PhantomData,
    }
  }

  /// Returns the number of occupied slots.
  #[inline]
  pub(crate) const fn len(&self) -> usize {
    self.len
  }

  /// Returns the number of slots ever allocated, occupied or not.
  #[inline]
  pub(crate) fn allocated(&self) -> usize {
    self.slots.len()
  }

  pub(crate) fn insert(&mut self, val: T) -> H {
    self.len += 1;
    match self.free {
      Some(idx) => {
        let slot = &mut self.slots[idx];
        if let Slot::Vacant { next_free } = *slot {
          self.free = next_free;
        }
        *slot = Slot::Occupied(val);
        H::from_usize(idx)
      }
      None => {
        self.slots.push(Slot::Occupied(val));
        H::from_usize(self.slots.len() - 1)
      }
    }
  }

  pub(crate) fn remove(&mut self, handle: H) -> Option<T> {
    let idx = handle.as_usize();
    let slot = self.slots.get_mut(idx)?;
    if matches!(slot, Slot::Vacant { .. }) {
      return None;
    }

    let old = core::mem::replace(
      slot,
      Slot::Vacant {
        next_free: self.free,
      },
    );
    self.free = Some(idx);
    self.len -= 1;
    match old {
      Slot::Occupied(val) => Some(val),
      Slot::Vacant { .. } => None,
    }
  }

  #[inline]
  pub(crate) fn get(&self, handle: H) -> Option<&T> {
    match self.slots.get(handle.as_usize()) {
      Some(Slot::Occupied(val)) => Some(val),
      _ => None,
    }
  }

  #[inline]
  pub(crate) fn get_mut(&mut self, handle: H) -> Option<&mut T> {
    match self.slots.get_mut(handle.as_usize()) {
      Some(Slot::Occupied(val)) => Some(val),
      _ => None,
    }
  }

  pub(crate) fn clear(&mut self) {
    self.slots.clear();
    self.free = None;
    self.len = 0;
  }
}

impl<H: Handle, T> Index<H> for Arena<H, T> {
  type Output = T;

  #[inline]
  fn index(&self, handle: H) -> &T {
    match self.get(handle) {
      Some(val) => val,
      None => panic!("arena handle {} points at a vacant slot", handle.as_usize()),
    }
  }
}

impl<H: Handle, T> IndexMut<H> for Arena<H, T> {
  #[inline]
  fn index_mut(&mut self, handle: H) -> &mut T {
    let idx = handle.as_usize();
    match self.get_mut(handle) {
      Some(val) => val,
      None => panic!("arena handle {idx} points at a vacant slot"),
    }
  }
}
