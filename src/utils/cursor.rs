//! Sequential cursors over a binary index artifact
//!
//! A cursor reads little-endian `u32` words and can move forward by a number
//! of bytes without handing them to the caller. Running out of data is
//! reported as [`std::io::ErrorKind::UnexpectedEof`].

use std::io::{self, Read};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use crate::base::WORD_SIZE;

pub trait IndexCursor {
    /// Number of bytes consumed since the start of the artifact
    fn position(&self) -> u64;

    fn read_u32(&mut self) -> io::Result<u32>;

    /// Fills `dst` with consecutive words
    fn read_u32_into(&mut self, dst: &mut [u32]) -> io::Result<()>;

    /// Moves forward by `bytes` without reading them
    fn skip(&mut self, bytes: u64) -> io::Result<()>;

    /// True if no byte is left (a stream cursor may consume one byte to
    /// find out)
    fn at_end(&mut self) -> io::Result<bool>;

    /// Number of bytes left, if known without reading them
    fn remaining(&self) -> Option<u64> {
        None
    }
}

impl<C: IndexCursor + ?Sized> IndexCursor for &mut C {
    fn position(&self) -> u64 {
        (**self).position()
    }

    fn read_u32(&mut self) -> io::Result<u32> {
        (**self).read_u32()
    }

    fn read_u32_into(&mut self, dst: &mut [u32]) -> io::Result<()> {
        (**self).read_u32_into(dst)
    }

    fn skip(&mut self, bytes: u64) -> io::Result<()> {
        (**self).skip(bytes)
    }

    fn at_end(&mut self) -> io::Result<bool> {
        (**self).at_end()
    }

    fn remaining(&self) -> Option<u64> {
        (**self).remaining()
    }
}

fn eof(needed: u64, available: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("{} bytes needed, {} available", needed, available),
    )
}

/// Cursor over a byte slice (in memory or memory mapped)
pub struct SliceCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    fn take(&mut self, bytes: u64) -> io::Result<&'a [u8]> {
        let available = (self.data.len() - self.position) as u64;
        if bytes > available {
            return Err(eof(bytes, available));
        }
        let data: &'a [u8] = self.data;
        let start = self.position;
        self.position += bytes as usize;
        Ok(&data[start..self.position])
    }
}

impl<'a> IndexCursor for SliceCursor<'a> {
    fn position(&self) -> u64 {
        self.position as u64
    }

    fn read_u32(&mut self) -> io::Result<u32> {
        Ok(LittleEndian::read_u32(self.take(WORD_SIZE)?))
    }

    fn read_u32_into(&mut self, dst: &mut [u32]) -> io::Result<()> {
        let src = self.take(WORD_SIZE * dst.len() as u64)?;
        LittleEndian::read_u32_into(src, dst);
        Ok(())
    }

    fn skip(&mut self, bytes: u64) -> io::Result<()> {
        self.take(bytes).map(|_| ())
    }

    fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.position == self.data.len())
    }

    fn remaining(&self) -> Option<u64> {
        Some((self.data.len() - self.position) as u64)
    }
}

/// Cursor over any reader; skipped bytes are discarded
pub struct ReaderCursor<R: Read> {
    reader: R,
    position: u64,
}

impl<R: Read> ReaderCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> IndexCursor for ReaderCursor<R> {
    fn position(&self) -> u64 {
        self.position
    }

    fn read_u32(&mut self) -> io::Result<u32> {
        let value = self.reader.read_u32::<LittleEndian>()?;
        self.position += WORD_SIZE;
        Ok(value)
    }

    fn read_u32_into(&mut self, dst: &mut [u32]) -> io::Result<()> {
        self.reader.read_u32_into::<LittleEndian>(dst)?;
        self.position += WORD_SIZE * dst.len() as u64;
        Ok(())
    }

    fn skip(&mut self, bytes: u64) -> io::Result<()> {
        let skipped = io::copy(&mut (&mut self.reader).take(bytes), &mut io::sink())?;
        self.position += skipped;
        if skipped < bytes {
            return Err(eof(bytes, skipped));
        }
        Ok(())
    }

    fn at_end(&mut self) -> io::Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(true),
                Ok(_) => {
                    self.position += 1;
                    return Ok(false);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
