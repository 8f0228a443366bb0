//! Address types for logical and physical memory.
//!
//! This module provides newtype wrappers around logical addresses (as presented by the
//! simulated program) and physical addresses (as produced by translation), with the
//! masking and assembly rules of the machine's paging layout.

use core::fmt;

use crate::{FrameNumber, PageNumber, layout};

/// A logical address as read from a trace.
///
/// The raw value is kept as given so it can be reported back unchanged. Decoding only looks at
/// the low [`layout::ADDRESS_BITS`] bits: larger values silently alias into the address space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LogicalAddress(u32);

impl LogicalAddress {
    /// Creates a logical address from its raw value. Never fails.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Builds the logical address of `offset` within `page`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not smaller than the page size.
    #[inline]
    pub const fn from_parts(page: PageNumber, offset: u32) -> Self {
        assert!(
            (offset as usize) < layout::PAGE_SIZE,
            "offset exceeds page size"
        );
        Self((page.as_u32() << layout::OFFSET_BITS) | offset)
    }

    /// Returns the raw address value, including any bits above the address width.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the page number (bits 10-19).
    #[inline]
    pub const fn page_number(self) -> PageNumber {
        PageNumber::new(((self.0 & layout::PAGE_MASK) >> layout::OFFSET_BITS) as usize)
    }

    /// Returns the offset within the page (bits 0-9).
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0 & layout::OFFSET_MASK
    }

    /// Splits the address into its page number and page offset.
    #[inline]
    pub const fn decode(self) -> (PageNumber, u32) {
        (self.page_number(), self.offset())
    }

    /// Returns the address with every bit above the address width cleared.
    #[inline]
    pub const fn canonical(self) -> Self {
        Self(self.0 & layout::ADDRESS_MASK)
    }
}

impl fmt::Debug for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicalAddress({:#x})", self.0)
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LogicalAddress {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

/// A physical address, assembled from a frame number and a page offset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysicalAddress(u32);

impl PhysicalAddress {
    /// Assembles `frame << OFFSET_BITS | offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not smaller than the page size.
    #[inline]
    pub const fn new(frame: FrameNumber, offset: u32) -> Self {
        assert!(
            (offset as usize) < layout::PAGE_SIZE,
            "offset exceeds page size"
        );
        Self((frame.as_u32() << layout::OFFSET_BITS) | offset)
    }

    /// Returns the raw address value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the address as an index into physical memory.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns the frame this address falls in.
    #[inline]
    pub const fn frame_number(self) -> FrameNumber {
        FrameNumber::new((self.0 >> layout::OFFSET_BITS) as usize)
    }

    /// Returns the offset within the frame.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0 & layout::OFFSET_MASK
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysicalAddress({:#x})", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
