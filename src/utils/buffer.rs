use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::cursor::SliceCursor;

pub trait Buffer: Send + Sync {
    fn data(&'_ self) -> &'_ [u8];

    /// Returns a cursor positioned at the start of the buffer
    fn cursor(&'_ self) -> SliceCursor<'_> {
        SliceCursor::new(self.data())
    }
}

/// Stores the data in memory
pub struct MemoryBuffer {
    data: Vec<u8>,
}

impl MemoryBuffer {
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let mut file = File::options().read(true).open(path)?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        Ok(Self { data })
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl Buffer for MemoryBuffer {
    fn data(&'_ self) -> &'_ [u8] {
        &self.data
    }
}

/// Uses a memory map
pub struct MmapBuffer {
    mmap: Mmap,
}

impl MmapBuffer {
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let file = File::options().read(true).open(path)?;
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self { mmap })
    }
}

impl Buffer for MmapBuffer {
    fn data(&'_ self) -> &'_ [u8] {
        &self.mmap
    }
}

/// Opens an artifact either fully loaded or memory mapped
pub fn open_buffer(path: &Path, in_memory: bool) -> std::io::Result<Box<dyn Buffer>> {
    // Empty files cannot be mapped
    if in_memory || std::fs::metadata(path)?.len() == 0 {
        Ok(Box::new(MemoryBuffer::new(path)?))
    } else {
        Ok(Box::new(MmapBuffer::new(path)?))
    }
}
