//! Arena storage for one section of the IR.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use dexir_core::Interner;

use super::refs::Handle;

/// Objects of one kind, addressed by handle `H`.
///
/// Storage is append-only. Iteration follows `order`, which starts as
/// insertion order and can be re-sorted by disk offset. Data sections also
/// remember which disk offset produced which handle.
#[derive(Debug, Clone)]
pub struct Section<H, T> {
    items: Vec<T>,
    order: Vec<H>,
    offset: u32,
    by_offset: Interner<u32, H>,
    _handle: PhantomData<H>,
}

impl<H, T> Default for Section<H, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            order: Vec::new(),
            offset: 0,
            by_offset: Interner::default(),
            _handle: PhantomData,
        }
    }
}

impl<H: Handle, T> Section<H, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Disk offset of the section (from the header or the map list).
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }

    /// Handle the next `push` will return.
    pub(crate) fn next_handle(&self) -> H {
        H::from_index(self.items.len())
    }

    pub(crate) fn push(&mut self, item: T) -> H {
        let handle = self.next_handle();
        self.items.push(item);
        self.order.push(handle);
        handle
    }

    /// Handle of the `index`-th object in storage order, if it exists.
    /// For id sections this resolves an on-disk index.
    pub fn handle(&self, index: u32) -> Option<H> {
        ((index as usize) < self.items.len()).then(|| H::from_index(index as usize))
    }

    /// Handle built for the object at `offset`, if any.
    pub fn at_offset(&self, offset: u32) -> Option<H> {
        self.by_offset.get(&offset)
    }

    pub(crate) fn record_offset(&mut self, offset: u32, handle: H) -> H {
        self.by_offset.insert(offset, handle)
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.items.get(handle.index())
    }

    /// Iterate `(handle, object)` in section order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.order.iter().map(|&h| (h, &self.items[h.index()]))
    }

    pub fn handles(&self) -> impl Iterator<Item = H> + '_ {
        self.order.iter().copied()
    }

    /// Reorder iteration by the disk offset each object was read from.
    /// Objects read from several offsets sort by the lowest; ties keep
    /// insertion order.
    pub(crate) fn sort_by_disk_offset(&mut self) {
        let mut first = vec![u32::MAX; self.items.len()];
        for (&offset, handle) in self.by_offset.iter() {
            let slot = &mut first[handle.index()];
            *slot = (*slot).min(offset);
        }
        self.order.sort_by_key(|h| first[h.index()]);
    }
}

impl<H: Handle, T> Index<H> for Section<H, T> {
    type Output = T;

    fn index(&self, handle: H) -> &T {
        let len = self.items.len();
        self.items.get(handle.index()).unwrap_or_else(|| {
            panic!("handle {handle:?} out of bounds for section of {len}")
        })
    }
}

impl<H: Handle, T> IndexMut<H> for Section<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut T {
        let len = self.items.len();
        self.items.get_mut(handle.index()).unwrap_or_else(|| {
            panic!("handle {handle:?} out of bounds for section of {len}")
        })
    }
}
