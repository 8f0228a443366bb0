#![cfg_attr(not(test), no_std)]

//! # MMU translation engine
//!
//! A software model of the lookup path a hardware MMU performs for a toy paged architecture:
//!
//! - Decoding of 20-bit logical addresses into a page number and an offset.
//! - A small fully-associative TLB with second-chance (clock) replacement.
//! - A direct-mapped page table covering every logical page.
//! - Demand paging from an injected, read-only backing store into monotonically allocated
//!   physical frames.
//! - Hit and fault statistics.
//!
//! The crate never touches files or the process environment; callers hand it a
//! [`BackingStore`] and feed it [`LogicalAddress`]es one at a time.

extern crate alloc;

mod address;
mod backing_store;
mod frame_allocator;
pub mod layout;
mod mmu;
mod numbers;
mod page_table;
mod physical_memory;
mod stats;
mod tlb;

pub use address::{LogicalAddress, PhysicalAddress};
pub use backing_store::BackingStore;
pub use frame_allocator::{AllocError, FrameAllocator};
pub use mmu::{FaultError, Mmu, Outcome, TranslateError, Translation};
pub use numbers::{FrameNumber, PageNumber};
pub use page_table::{MapError, PageTable};
pub use physical_memory::PhysicalMemory;
pub use stats::Statistics;
pub use tlb::{ClockHand, Tlb, TlbEntry};

pub use layout::PAGE_SIZE;
