//! Binary encoding: a flat sequence of little-endian `u32`
//!
//! ```text
//! universe_size num_lists [term_id list_size doc_id*list_size]*num_lists
//! ```
//!
//! Each list states its own length, so a reader can skip the entries of a
//! list and move on to the next list header.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, info};

use crate::{
    base::{DocId, Len, TermId, WORD_SIZE},
    error::{Error, Record, Result, Violation},
    index::InvertedIndex,
    utils::cursor::IndexCursor,
};

/// Largest number of words read at once from a cursor of unknown length
const READ_CHUNK: usize = 1 << 16;

/// Writes the index, returning the number of bytes written
pub fn write_binary<W: Write>(index: &InvertedIndex, writer: &mut W) -> Result<u64> {
    let num_lists =
        u32::try_from(index.num_lists()).map_err(|_| Error::Overflow("posting lists"))?;

    writer.write_u32::<LittleEndian>(index.universe_size())?;
    writer.write_u32::<LittleEndian>(num_lists)?;
    let mut written = 2 * WORD_SIZE;

    for (term, list) in index.iter() {
        let size = u32::try_from(list.len()).map_err(|_| Error::Overflow("postings in a list"))?;
        writer.write_u32::<LittleEndian>(term)?;
        writer.write_u32::<LittleEndian>(size)?;
        for &doc_id in list.iter() {
            writer.write_u32::<LittleEndian>(doc_id)?;
        }
        written += (2 + size as u64) * WORD_SIZE;
    }
    writer.flush()?;

    info!(
        "Wrote binary index: universe size {}, {} lists, {} bytes",
        index.universe_size(),
        num_lists,
        written
    );
    Ok(written)
}

/// The two words at the start of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub universe_size: TermId,
    pub num_lists: u32,
}

/// Header of a posting list within an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub term: TermId,
    pub size: u32,
    /// Byte offset of the first entry
    pub offset: u64,
}

impl ListHeader {
    /// Number of bytes taken by the entries
    pub fn entries_bytes(&self) -> u64 {
        self.size as u64 * WORD_SIZE
    }
}

/// Streaming reader over a binary artifact
///
/// Lists are visited in file order with [`next_list`](Self::next_list);
/// entries of the current list are either read or skipped. Entries that
/// were not read are skipped when moving to the next list.
pub struct BinaryIndexReader<C: IndexCursor> {
    cursor: C,
    header: IndexHeader,
    /// Number of list headers read
    visited: u32,
    /// Current list if its entries were neither read nor skipped
    pending: Option<ListHeader>,
}

impl<C: IndexCursor> BinaryIndexReader<C> {
    /// Reads the header of the artifact
    pub fn new(mut cursor: C) -> Result<Self> {
        let universe_size = read_word(&mut cursor, Record::Header)?;
        let num_lists = read_word(&mut cursor, Record::Header)?;
        debug!("universe size: {}, num lists: {}", universe_size, num_lists);

        Ok(Self {
            cursor,
            header: IndexHeader {
                universe_size,
                num_lists,
            },
            visited: 0,
            pending: None,
        })
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    /// Byte offset of the cursor
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Number of bytes left in the artifact, if the cursor knows it
    pub fn remaining(&self) -> Option<u64> {
        self.cursor.remaining()
    }

    /// Moves to the next list, returning `None` after the last one
    pub fn next_list(&mut self) -> Result<Option<ListHeader>> {
        self.skip_entries()?;
        if self.visited == self.header.num_lists {
            return Ok(None);
        }

        let record = Record::ListHeader(self.visited);
        let term = read_word(&mut self.cursor, record)?;
        let size = read_word(&mut self.cursor, record)?;
        self.visited += 1;

        let list = ListHeader {
            term,
            size,
            offset: self.cursor.position(),
        };
        self.pending = Some(list);
        Ok(Some(list))
    }

    /// Skips the entries of the current list (no-op if already consumed)
    pub fn skip_entries(&mut self) -> Result<()> {
        if let Some(list) = self.pending.take() {
            self.cursor
                .skip(list.entries_bytes())
                .map_err(|e| truncated(e, list.offset, Record::Entries(list.term)))?;
        }
        Ok(())
    }

    /// Reads the entries of the current list
    ///
    /// Returns an empty vector if they were already consumed.
    pub fn read_entries(&mut self) -> Result<Vec<DocId>> {
        match self.pending.take() {
            Some(list) => {
                let record = Record::Entries(list.term);
                let size = list.size as usize;

                // The announced size is only trusted once the bytes are there
                let capacity = match self.cursor.remaining() {
                    Some(remaining) if remaining < list.entries_bytes() => {
                        return Err(Error::TruncatedIndex {
                            offset: list.offset,
                            record,
                        })
                    }
                    Some(_) => size,
                    None => size.min(READ_CHUNK),
                };

                let mut docs = Vec::with_capacity(capacity);
                while docs.len() < size {
                    let start = docs.len();
                    docs.resize(size.min(start + READ_CHUNK), 0);
                    self.cursor
                        .read_u32_into(&mut docs[start..])
                        .map_err(|e| truncated(e, list.offset, record))?;
                }
                Ok(docs)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Reads the last entry of the current list, skipping the others
    pub fn read_last_entry(&mut self) -> Result<Option<DocId>> {
        match self.pending.take() {
            Some(list) if list.size > 0 => {
                let record = Record::Entries(list.term);
                self.cursor
                    .skip(list.entries_bytes() - WORD_SIZE)
                    .map_err(|e| truncated(e, list.offset, record))?;
                read_word(&mut self.cursor, record).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Checks that nothing follows the last list
    pub fn finish(mut self) -> Result<C> {
        while self.next_list()?.is_some() {}

        let offset = self.cursor.position();
        if !self.cursor.at_end()? {
            return Err(Error::CorruptIndex {
                offset,
                source: Violation::TrailingBytes,
            });
        }
        Ok(self.cursor)
    }
}

fn read_word<C: IndexCursor + ?Sized>(cursor: &mut C, record: Record) -> Result<u32> {
    let offset = cursor.position();
    cursor.read_u32().map_err(|e| truncated(e, offset, record))
}

fn truncated(e: io::Error, offset: u64, record: Record) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::TruncatedIndex { offset, record }
    } else {
        Error::Io(e)
    }
}

/// Decodes a whole binary artifact
pub fn read_binary<C: IndexCursor>(cursor: C) -> Result<InvertedIndex> {
    let mut reader = BinaryIndexReader::new(cursor)?;
    let mut index = InvertedIndex::new(reader.header().universe_size);

    while let Some(list) = reader.next_list()? {
        let docs = reader.read_entries()?;
        index.insert(list.term, docs).map_err(|source| Error::CorruptIndex {
            offset: list.offset - 2 * WORD_SIZE,
            source,
        })?;
    }
    reader.finish()?;

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::cursor::{ReaderCursor, SliceCursor};

    fn sample() -> InvertedIndex {
        let mut index = InvertedIndex::new(3);
        index.insert(1, vec![0, 2]).unwrap();
        index.insert(3, vec![1]).unwrap();
        index
    }

    #[test]
    fn test_layout() {
        let mut data = Vec::new();
        let written = write_binary(&sample(), &mut data).unwrap();
        assert_eq!(written, data.len() as u64);

        let expected: Vec<u8> = [3u32, 2, 1, 2, 0, 2, 3, 1, 1]
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_lists_in_any_order() {
        // Term 3 before term 1
        let data: Vec<u8> = [3u32, 2, 3, 1, 1, 1, 2, 0, 2]
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        let index = read_binary(SliceCursor::new(&data)).unwrap();
        assert_eq!(index, sample());
    }

    #[test]
    fn test_skip_and_read() {
        let mut data = Vec::new();
        write_binary(&sample(), &mut data).unwrap();

        let mut reader = BinaryIndexReader::new(ReaderCursor::new(data.as_slice())).unwrap();
        assert_eq!(
            *reader.header(),
            IndexHeader {
                universe_size: 3,
                num_lists: 2
            }
        );
        let first = reader.next_list().unwrap().unwrap();
        assert_eq!((first.term, first.size, first.offset), (1, 2, 16));
        // Entries of term 1 are skipped implicitly
        let second = reader.next_list().unwrap().unwrap();
        assert_eq!((second.term, second.size), (3, 1));
        assert_eq!(reader.read_entries().unwrap(), vec![1]);
        assert!(reader.next_list().unwrap().is_none());
        reader.finish().unwrap();
    }

    #[test]
    fn test_truncation() {
        let mut data = Vec::new();
        write_binary(&sample(), &mut data).unwrap();

        let cases = [
            (6, 4, Record::Header),
            (10, 8, Record::ListHeader(0)),
            (20, 16, Record::Entries(1)),
            (data.len() - 1, 32, Record::Entries(3)),
        ];
        for (len, expected_offset, expected_record) in cases {
            match read_binary(SliceCursor::new(&data[..len])) {
                Err(Error::TruncatedIndex { offset, record }) => {
                    assert_eq!((offset, record), (expected_offset, expected_record));
                }
                r => panic!("Expected truncation at {}, got {:?}", len, r),
            }
        }
    }

    #[test]
    fn test_announced_size_beyond_data() {
        // One list of term 1 claiming u32::MAX entries, one entry present
        let data: Vec<u8> = [5u32, 1, 1, u32::MAX, 0]
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();

        let expected = (16, Record::Entries(1));
        match read_binary(SliceCursor::new(&data)) {
            Err(Error::TruncatedIndex { offset, record }) => {
                assert_eq!((offset, record), expected)
            }
            r => panic!("Unexpected result {:?}", r),
        }
        match read_binary(ReaderCursor::new(data.as_slice())) {
            Err(Error::TruncatedIndex { offset, record }) => {
                assert_eq!((offset, record), expected)
            }
            r => panic!("Unexpected result {:?}", r),
        }
    }

    #[test]
    fn test_chunked_stream_read() {
        let docs: Vec<DocId> = (0..(READ_CHUNK as u32 * 2 + 3)).collect();
        let mut index = InvertedIndex::new(0);
        index.insert(0, docs.clone()).unwrap();
        let mut data = Vec::new();
        write_binary(&index, &mut data).unwrap();

        let decoded = read_binary(ReaderCursor::new(data.as_slice())).unwrap();
        assert_eq!(decoded.get(0).unwrap().as_slice(), docs.as_slice());
    }

    #[test]
    fn test_trailing_bytes() {
        let mut data = Vec::new();
        write_binary(&sample(), &mut data).unwrap();
        data.extend_from_slice(&[0, 0]);

        match read_binary(SliceCursor::new(&data)) {
            Err(Error::CorruptIndex {
                offset: 36,
                source: Violation::TrailingBytes,
            }) => (),
            r => panic!("Unexpected result {:?}", r),
        }
    }

    #[test]
    fn test_invariant_violation() {
        // universe 1, list for term 2
        let data: Vec<u8> = [1u32, 1, 2, 1, 0]
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        match read_binary(SliceCursor::new(&data)) {
            Err(Error::CorruptIndex {
                offset: 8,
                source: Violation::TermOutOfRange { term: 2, .. },
            }) => (),
            r => panic!("Unexpected result {:?}", r),
        }
    }
}
