//! Page and frame number types.
//!
//! This module provides newtypes for logical page numbers and physical frame numbers, so the
//! two index spaces can't be mixed up when they flow through the TLB and the page table.

use core::fmt;

use crate::{PhysicalAddress, layout};

/// Macro to define common page/frame number functionality.
///
/// This macro generates the basic structure and methods common to both frame
/// and page number types, reducing code duplication.
macro_rules! impl_page_number_common {
    ($name:ident, $limit:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Exclusive upper bound for this number type.
            pub const LIMIT: usize = $limit;

            /// Creates a new page/frame number.
            ///
            /// # Panics
            ///
            /// Panics if `number` is not below [`Self::LIMIT`].
            #[inline]
            pub const fn new(number: usize) -> Self {
                assert!(number < $limit, concat!(stringify!($name), " out of range"));
                Self(number as u32)
            }

            /// Creates a new page/frame number, or `None` if it is out of range.
            #[inline]
            pub const fn try_new(number: usize) -> Option<Self> {
                if number < $limit {
                    Some(Self(number as u32))
                } else {
                    None
                }
            }

            /// Returns the raw page/frame number.
            #[inline]
            pub const fn as_usize(self) -> usize {
                self.0 as usize
            }

            /// Returns the raw page/frame number as a `u32`.
            #[inline]
            pub const fn as_u32(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_page_number_common!(
    PageNumber,
    layout::PAGE_COUNT,
    "A logical page number.\n\n\
     Identifies one of the `PAGE_COUNT` pages of the logical address space. Page numbers\n\
     index the page table directly and locate the page's initial content in the backing store."
);

impl PageNumber {
    /// Returns the byte offset of this page's content in the backing store.
    #[inline]
    pub const fn backing_offset(self) -> usize {
        self.as_usize() * layout::PAGE_SIZE
    }
}

impl_page_number_common!(
    FrameNumber,
    layout::FRAME_COUNT,
    "A physical frame number.\n\n\
     Represents a page-sized slot of physical memory. Frame numbers are zero-indexed and\n\
     correspond to PAGE_SIZE-aligned physical addresses."
);

impl FrameNumber {
    /// Returns the physical address at the start of this frame.
    #[inline]
    pub const fn start(self) -> PhysicalAddress {
        PhysicalAddress::new(self, 0)
    }

    /// Returns the byte offset of this frame in physical memory.
    #[inline]
    pub const fn memory_offset(self) -> usize {
        self.as_usize() * layout::PAGE_SIZE
    }
}
