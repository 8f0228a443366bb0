//! The translation orchestrator.
//!
//! [`Mmu`] owns every piece of simulated hardware state (TLB, page table, frame allocator,
//! physical memory and statistics) and walks each logical address through the lookup path:
//!
//! 1. Decode the address into page number and offset.
//! 2. Look the page up in the TLB. A hit yields the frame directly.
//! 3. On a TLB miss, look the page up in the page table.
//! 4. On a page table miss, fault the page in: allocate the next frame, copy the page from
//!    the backing store and install the mapping.
//! 5. After any TLB miss, cache the resolved mapping in the TLB.
//! 6. Assemble the physical address and read the byte it points at.

use log::{debug, trace};
use thiserror::Error;

use crate::{
    AllocError, BackingStore, FrameAllocator, FrameNumber, LogicalAddress, MapError, PageNumber,
    PageTable, PhysicalAddress, PhysicalMemory, Statistics, Tlb, layout,
};

/// How a translation was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The TLB held the mapping.
    TlbHit,
    /// The TLB missed but the page was already resident.
    PageTableHit,
    /// The page was not resident and had to be loaded from the backing store.
    PageFault,
}

/// The result of translating one logical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: LogicalAddress,
    pub page: PageNumber,
    pub offset: u32,
    pub frame: FrameNumber,
    pub physical: PhysicalAddress,
    /// The signed byte stored at the physical address.
    pub value: i8,
    pub outcome: Outcome,
}

/// Errors raised while resolving a page fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FaultError {
    /// No free frame is left to load the page into.
    #[error(transparent)]
    OutOfFrames(#[from] AllocError),
    /// The backing store does not hold the faulting page.
    #[error("backing store of {len} bytes does not contain page {page}")]
    BackingStoreTooShort { page: PageNumber, len: usize },
    /// The page table refused the new mapping.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Errors returned by [`Mmu::translate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("page fault for logical address {address} could not be resolved")]
    Fault {
        address: LogicalAddress,
        source: FaultError,
    },
}

/// A single-process memory management unit with demand paging.
pub struct Mmu<B> {
    backing: B,
    tlb: Tlb,
    page_table: PageTable,
    allocator: FrameAllocator,
    memory: PhysicalMemory,
    stats: Statistics,
}

impl<B: BackingStore> Mmu<B> {
    /// Creates an MMU with a full complement of [`layout::FRAME_COUNT`] physical frames.
    ///
    /// The TLB and page table start empty, so the first reference to every page faults.
    pub fn new(backing: B) -> Self {
        Self::with_frames(backing, layout::FRAME_COUNT)
    }

    /// Creates an MMU whose physical memory holds only `frames` frames.
    ///
    /// Frames are never reclaimed, so translating more distinct pages than `frames` ends in
    /// [`AllocError::OutOfFrames`].
    ///
    /// # Panics
    ///
    /// Panics if `frames` is zero or exceeds [`layout::FRAME_COUNT`].
    pub fn with_frames(backing: B, frames: usize) -> Self {
        Self {
            backing,
            tlb: Tlb::new(),
            page_table: PageTable::new(),
            allocator: FrameAllocator::new(frames),
            memory: PhysicalMemory::new(frames),
            stats: Statistics::default(),
        }
    }

    /// Translates `address` and reads the byte it maps to.
    ///
    /// On error no statistics are recorded and no state other than the failed fault's
    /// partial progress is changed.
    pub fn translate(&mut self, address: LogicalAddress) -> Result<Translation, TranslateError> {
        let (page, offset) = address.decode();

        let (frame, outcome) = match self.tlb.lookup(page) {
            Some(frame) => (frame, Outcome::TlbHit),
            None => {
                let (frame, outcome) = match self.page_table.lookup(page) {
                    Some(frame) => (frame, Outcome::PageTableHit),
                    None => {
                        let frame = self
                            .handle_fault(page)
                            .map_err(|source| TranslateError::Fault { address, source })?;
                        (frame, Outcome::PageFault)
                    }
                };
                self.tlb.insert(page, frame);
                (frame, outcome)
            }
        };

        let physical = PhysicalAddress::new(frame, offset);
        let value = self.memory.read(physical);
        self.stats.record(outcome);

        trace!("{address} -> page {page} offset {offset} -> {physical} = {value} ({outcome:?})");

        Ok(Translation {
            logical: address,
            page,
            offset,
            frame,
            physical,
            value,
            outcome,
        })
    }

    /// Loads `page` from the backing store into a fresh frame and maps it.
    fn handle_fault(&mut self, page: PageNumber) -> Result<FrameNumber, FaultError> {
        let contents = self
            .backing
            .page(page)
            .ok_or(FaultError::BackingStoreTooShort {
                page,
                len: self.backing.len(),
            })?;

        let frame = self.allocator.allocate()?;
        self.memory.load_frame(frame, contents);
        self.page_table.map(page, frame)?;

        debug!(
            "page fault: loaded page {page} into frame {frame} ({} of {} frames in use)",
            self.allocator.allocated(),
            self.allocator.capacity()
        );
        Ok(frame)
    }

    /// Returns the statistics gathered so far.
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Returns the TLB.
    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    /// Returns the page table.
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    /// Returns the simulated physical memory.
    pub fn physical_memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    /// Returns the number of frames handed out so far.
    pub fn frames_in_use(&self) -> usize {
        self.allocator.allocated()
    }

    /// Returns the backing store.
    pub fn backing(&self) -> &B {
        &self.backing
    }
}
