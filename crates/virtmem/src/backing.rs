//! Memory-mapped backing store file.

use std::fs::File;
use std::path::Path;

use log::{info, warn};
use memmap2::Mmap;
use mmu::layout;

use crate::Error;

/// A backing store file mapped read-only into memory.
///
/// The mapping lives as long as this value and is released when it is dropped.
pub struct BackingFile {
    mmap: Mmap,
}

impl BackingFile {
    /// Opens and maps the backing store at `path`.
    ///
    /// The file must hold at least one full address space worth of pages; any bytes past
    /// that are ignored.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let open_error = |source| Error::OpenBackingStore {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;
        let len = file.metadata().map_err(open_error)?.len();

        if len < layout::MEMORY_SIZE as u64 {
            return Err(Error::BackingStoreSize {
                path: path.to_path_buf(),
                len,
                expected: layout::MEMORY_SIZE,
            });
        }
        if len > layout::MEMORY_SIZE as u64 {
            warn!(
                "{} is {len} bytes, ignoring everything past the first {}",
                path.display(),
                layout::MEMORY_SIZE
            );
        }

        // SAFETY: The map is read-only and private to this process. Truncating the file
        // underneath a running simulation is outside what the tool supports.
        let mmap = unsafe { Mmap::map(&file) }.map_err(open_error)?;
        info!("mapped backing store {} ({len} bytes)", path.display());

        Ok(Self { mmap })
    }
}

impl AsRef<[u8]> for BackingFile {
    fn as_ref(&self) -> &[u8] {
        &self.mmap[..layout::MEMORY_SIZE]
    }
}
