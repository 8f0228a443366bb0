//! Monotonic physical frame allocator.
//!
//! Frames are handed out in increasing order starting at frame 0 and are never returned:
//! the simulated machine has no frame reclamation or page replacement. Exhausting the
//! allocator is an error rather than a wrap-around, so a resident page can never be
//! silently overwritten.

use thiserror::Error;

use crate::{FrameNumber, layout};

/// Errors that can occur during frame allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// Every frame has already been handed out.
    #[error("out of physical frames: all {capacity} frames are in use")]
    OutOfFrames { capacity: usize },
}

/// Bump allocator over the physical frames.
#[derive(Debug)]
pub struct FrameAllocator {
    /// Next frame to hand out.
    next: usize,
    /// Number of frames this allocator manages.
    capacity: usize,
}

impl FrameAllocator {
    /// Creates an allocator managing frames `0..capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds [`layout::FRAME_COUNT`].
    pub const fn new(capacity: usize) -> Self {
        assert!(
            capacity > 0 && capacity <= layout::FRAME_COUNT,
            "frame capacity out of range"
        );
        Self { next: 0, capacity }
    }

    /// Allocates the next unused frame.
    pub fn allocate(&mut self) -> Result<FrameNumber, AllocError> {
        if self.next >= self.capacity {
            return Err(AllocError::OutOfFrames {
                capacity: self.capacity,
            });
        }

        let frame = FrameNumber::new(self.next);
        self.next += 1;
        Ok(frame)
    }

    /// Returns the number of frames handed out so far.
    pub const fn allocated(&self) -> usize {
        self.next
    }

    /// Returns the number of frames still available.
    pub const fn remaining(&self) -> usize {
        self.capacity - self.next
    }

    /// Returns the total number of frames managed by this allocator.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FrameAllocator {
    fn default() -> Self {
        Self::new(layout::FRAME_COUNT)
    }
}
