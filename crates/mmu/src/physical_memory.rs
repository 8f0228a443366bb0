//! Simulated physical memory.

use alloc::boxed::Box;
use alloc::vec;

use crate::{FrameNumber, PAGE_SIZE, PhysicalAddress};

/// Byte-addressable physical memory made of page-sized frames.
///
/// Frame `F` occupies bytes `F * PAGE_SIZE .. (F + 1) * PAGE_SIZE`. Memory starts zeroed.
pub struct PhysicalMemory {
    /// The underlying memory buffer.
    bytes: Box<[u8]>,
}

impl PhysicalMemory {
    /// Creates zeroed physical memory holding `frames` frames.
    pub fn new(frames: usize) -> Self {
        Self {
            bytes: vec![0u8; frames * PAGE_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the number of frames in this memory.
    pub fn frame_count(&self) -> usize {
        self.bytes.len() / PAGE_SIZE
    }

    /// Returns the size of this memory in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the bytes of `frame`.
    ///
    /// # Panics
    /// Panics if the frame lies outside this memory.
    pub fn frame(&self, frame: FrameNumber) -> &[u8] {
        let start = frame.memory_offset();
        assert!(start < self.bytes.len(), "frame outside physical memory");
        &self.bytes[start..start + PAGE_SIZE]
    }

    /// Copies one page worth of bytes into `frame`.
    ///
    /// # Panics
    /// Panics if the frame lies outside this memory or `page` is not exactly `PAGE_SIZE` bytes.
    pub fn load_frame(&mut self, frame: FrameNumber, page: &[u8]) {
        let start = frame.memory_offset();
        assert!(start < self.bytes.len(), "frame outside physical memory");
        self.bytes[start..start + PAGE_SIZE].copy_from_slice(page);
    }

    /// Reads the signed byte at `address`.
    ///
    /// # Panics
    /// Panics if the address lies outside this memory.
    pub fn read(&self, address: PhysicalAddress) -> i8 {
        let index = address.as_usize();
        assert!(index < self.bytes.len(), "physical address out of bounds");
        self.bytes[index] as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let memory = PhysicalMemory::new(4);
        assert_eq!(memory.size(), 4 * PAGE_SIZE);
        assert_eq!(memory.frame_count(), 4);
        assert!(memory.frame(FrameNumber::new(3)).iter().all(|&b| b == 0));
    }

    #[test]
    fn load_frame_only_touches_that_frame() {
        let mut memory = PhysicalMemory::new(3);
        memory.load_frame(FrameNumber::new(1), &[0xAB; PAGE_SIZE]);

        assert!(memory.frame(FrameNumber::new(0)).iter().all(|&b| b == 0));
        assert!(memory.frame(FrameNumber::new(1)).iter().all(|&b| b == 0xAB));
        assert!(memory.frame(FrameNumber::new(2)).iter().all(|&b| b == 0));
    }

    #[test]
    fn read_returns_signed_bytes() {
        let mut memory = PhysicalMemory::new(2);
        let mut page = [0u8; PAGE_SIZE];
        page[5] = 0xFF;
        page[6] = 42;
        memory.load_frame(FrameNumber::new(1), &page);

        let frame = FrameNumber::new(1);
        assert_eq!(memory.read(PhysicalAddress::new(frame, 5)), -1);
        assert_eq!(memory.read(PhysicalAddress::new(frame, 6)), 42);
        assert_eq!(memory.read(PhysicalAddress::new(frame, 7)), 0);
    }

    #[test]
    #[should_panic(expected = "physical address out of bounds")]
    fn read_outside_memory_panics() {
        let memory = PhysicalMemory::new(1);
        memory.read(PhysicalAddress::new(FrameNumber::new(1), 0));
    }

    #[test]
    #[should_panic]
    fn load_frame_rejects_short_page() {
        let mut memory = PhysicalMemory::new(1);
        memory.load_frame(FrameNumber::new(0), &[1, 2, 3]);
    }
}
