//! Direct-mapped page table.

use alloc::boxed::Box;

use thiserror::Error;

use crate::{FrameNumber, PageNumber, layout};

/// Number of slots in the page table, one per logical page.
const ENTRY_COUNT: usize = layout::PAGE_COUNT;

/// Errors returned when installing a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The page already maps to a different frame. Mappings are permanent.
    #[error("page {page} is already mapped to frame {existing}, refusing to remap it to frame {requested}")]
    AlreadyMapped {
        page: PageNumber,
        existing: FrameNumber,
        requested: FrameNumber,
    },
}

/// A single-level page table covering the whole logical address space.
///
/// Slot `P` holds the frame currently backing logical page `P`, or `None` if the page has
/// not been faulted in yet. The table is never resized and a mapping, once installed, is
/// never changed.
pub struct PageTable {
    /// The entries in this page table.
    entries: Box<[Option<FrameNumber>; ENTRY_COUNT]>,
    /// Number of slots holding a mapping.
    mapped: usize,
}

impl PageTable {
    /// Creates a new, empty page table.
    ///
    /// All entries start unmapped.
    pub fn new() -> Self {
        Self {
            entries: Box::new([None; ENTRY_COUNT]),
            mapped: 0,
        }
    }

    /// Returns the frame backing `page`, if any.
    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        self.entries[page.as_usize()]
    }

    /// Maps `page` to `frame`.
    ///
    /// Mapping a page to the frame it already maps to is a no-op. Mapping it to any other
    /// frame fails and leaves the table untouched.
    pub fn map(&mut self, page: PageNumber, frame: FrameNumber) -> Result<(), MapError> {
        let slot = &mut self.entries[page.as_usize()];
        match *slot {
            Some(existing) if existing == frame => Ok(()),
            Some(existing) => Err(MapError::AlreadyMapped {
                page,
                existing,
                requested: frame,
            }),
            None => {
                *slot = Some(frame);
                self.mapped += 1;
                Ok(())
            }
        }
    }

    /// Returns the number of pages currently mapped.
    pub fn mapped_count(&self) -> usize {
        self.mapped
    }

    /// Iterates over every installed `(page, frame)` mapping in page order.
    pub fn mappings(&self) -> impl Iterator<Item = (PageNumber, FrameNumber)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.map(|frame| (PageNumber::new(index), frame)))
    }

    /// Returns the number of slots in this page table.
    pub const fn len(&self) -> usize {
        ENTRY_COUNT
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unmapped() {
        let table = PageTable::new();
        assert_eq!(table.len(), 1024);
        assert_eq!(table.mapped_count(), 0);
        for page in 0..table.len() {
            assert_eq!(table.lookup(PageNumber::new(page)), None);
        }
    }

    #[test]
    fn map_then_lookup() {
        let mut table = PageTable::new();
        table.map(PageNumber::new(66), FrameNumber::new(0)).unwrap();

        assert_eq!(table.lookup(PageNumber::new(66)), Some(FrameNumber::new(0)));
        assert_eq!(table.lookup(PageNumber::new(65)), None);
        assert_eq!(table.mapped_count(), 1);
    }

    #[test]
    fn remapping_to_same_frame_is_noop() {
        let mut table = PageTable::new();
        table.map(PageNumber::new(5), FrameNumber::new(9)).unwrap();
        table.map(PageNumber::new(5), FrameNumber::new(9)).unwrap();

        assert_eq!(table.lookup(PageNumber::new(5)), Some(FrameNumber::new(9)));
        assert_eq!(table.mapped_count(), 1);
    }

    #[test]
    fn remapping_to_other_frame_fails() {
        let mut table = PageTable::new();
        table.map(PageNumber::new(5), FrameNumber::new(9)).unwrap();

        let err = table
            .map(PageNumber::new(5), FrameNumber::new(10))
            .unwrap_err();
        assert_eq!(
            err,
            MapError::AlreadyMapped {
                page: PageNumber::new(5),
                existing: FrameNumber::new(9),
                requested: FrameNumber::new(10),
            }
        );
        // Original mapping survives.
        assert_eq!(table.lookup(PageNumber::new(5)), Some(FrameNumber::new(9)));
    }

    #[test]
    fn mappings_in_page_order() {
        let mut table = PageTable::new();
        table.map(PageNumber::new(700), FrameNumber::new(0)).unwrap();
        table.map(PageNumber::new(3), FrameNumber::new(1)).unwrap();

        let mappings: Vec<_> = table.mappings().collect();
        assert_eq!(
            mappings,
            vec![
                (PageNumber::new(3), FrameNumber::new(1)),
                (PageNumber::new(700), FrameNumber::new(0)),
            ]
        );
    }

    #[test]
    fn error_message() {
        let err = MapError::AlreadyMapped {
            page: PageNumber::new(1),
            existing: FrameNumber::new(2),
            requested: FrameNumber::new(3),
        };
        assert_eq!(
            format!("{}", err),
            "page 1 is already mapped to frame 2, refusing to remap it to frame 3"
        );
    }
}
