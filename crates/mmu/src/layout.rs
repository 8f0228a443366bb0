//! Fixed geometry of the simulated machine.
//!
//! The machine is a one-level paged architecture:
//! - 20-bit logical addresses (1 MiB logical address space)
//! - 10-bit page offset (1 KiB pages)
//! - 10-bit page number (1024 logical pages, one page table slot each)
//! - 1024 physical frames (1 MiB of physical memory)
//! - 16-entry fully-associative TLB
//!
//! Address layout:
//! - Bits 0-9: Page offset
//! - Bits 10-19: Page number
//! - Bits 20 and up: ignored (masked away on decode)

/// Number of bits in the page offset.
pub const OFFSET_BITS: usize = 10;

/// Number of bits in the page number.
pub const PAGE_NUMBER_BITS: usize = 10;

/// Number of significant bits in a logical address.
pub const ADDRESS_BITS: usize = OFFSET_BITS + PAGE_NUMBER_BITS;

/// Page size in bytes (1024 bytes = 2^10).
pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;

/// Number of logical pages, and therefore of page table slots.
pub const PAGE_COUNT: usize = 1 << PAGE_NUMBER_BITS;

/// Number of physical frames.
pub const FRAME_COUNT: usize = 1024;

/// Size of physical memory (and of a complete backing store) in bytes.
pub const MEMORY_SIZE: usize = FRAME_COUNT * PAGE_SIZE;

/// Number of entries in the TLB.
pub const TLB_ENTRIES: usize = 16;

/// Mask selecting the offset bits of an address (bits 0-9).
pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;

/// Mask selecting the page number bits of an address (bits 10-19).
pub const PAGE_MASK: u32 = ((1 << PAGE_NUMBER_BITS) - 1) << OFFSET_BITS;

/// Mask selecting every significant bit of a logical address.
pub const ADDRESS_MASK: u32 = PAGE_MASK | OFFSET_MASK;

const _: () = assert!(PAGE_MASK == 0xFFC00);
const _: () = assert!(OFFSET_MASK == 0x3FF);
const _: () = assert!(PAGE_COUNT <= FRAME_COUNT, "every logical page must fit in a frame");
