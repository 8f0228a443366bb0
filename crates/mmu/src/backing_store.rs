//! Read-only source of initial page contents.

use crate::{PAGE_SIZE, PageNumber};

/// A read-only, byte-addressable store holding the initial content of every logical page.
///
/// Page `P` lives at byte offset `P * PAGE_SIZE`. The store is owned by the caller and
/// handed to the [`Mmu`](crate::Mmu); the engine only ever reads from it.
///
/// Every `AsRef<[u8]>` type is a backing store, so a `Vec<u8>`, a byte slice or a memory map
/// can be used directly.
pub trait BackingStore {
    /// Returns the total size of the store in bytes.
    fn len(&self) -> usize;

    /// Returns whether the store holds no bytes at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `PAGE_SIZE` bytes of `page`, or `None` if the store is too short to hold it.
    fn page(&self, page: PageNumber) -> Option<&[u8]>;
}

impl<T> BackingStore for T
where
    T: AsRef<[u8]> + ?Sized,
{
    fn len(&self) -> usize {
        self.as_ref().len()
    }

    fn page(&self, page: PageNumber) -> Option<&[u8]> {
        let start = page.backing_offset();
        self.as_ref().get(start..start + PAGE_SIZE)
    }
}
