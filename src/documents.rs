//! Document streams recovered from a binary artifact

use std::collections::BTreeMap;
use std::io::Write;

use log::info;

use crate::{
    base::{DocId, TermId},
    error::{Error, Result, Violation},
    serialize::BinaryIndexReader,
    utils::{cursor::IndexCursor, progress::progress_bar},
};

/// Documents rebuilt from posting lists
///
/// Only documents holding at least one term are stored; the others are
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documents {
    terms: BTreeMap<DocId, Vec<TermId>>,
    num_documents: u64,
}

impl Documents {
    pub fn num_documents(&self) -> u64 {
        self.num_documents
    }

    /// Terms of a document, in the order their lists appear in the artifact
    pub fn get(&self, doc_id: DocId) -> &[TermId] {
        self.terms.get(&doc_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over all documents, empty ones included
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &[TermId])> + '_ {
        // doc_id < num_documents <= 2^32
        (0..self.num_documents).map(move |d| (d as DocId, self.get(d as DocId)))
    }
}

/// Rebuilds the documents of an index
///
/// Document `d` holds the terms whose posting list contains `d`. Without
/// `num_documents`, the number of documents is the largest document ID
/// plus one; with it, larger document IDs are rejected and trailing empty
/// documents are kept.
pub fn reconstruct_documents<C: IndexCursor>(
    cursor: C,
    num_documents: Option<u64>,
    progress: bool,
) -> Result<Documents> {
    let mut reader = BinaryIndexReader::new(cursor)?;
    let header = *reader.header();
    let bar = progress_bar(Some(header.num_lists as u64), progress);

    let mut terms: BTreeMap<DocId, Vec<TermId>> = BTreeMap::new();
    while let Some(list) = reader.next_list()? {
        for doc_id in reader.read_entries()? {
            if let Some(num_documents) = num_documents {
                if doc_id as u64 >= num_documents {
                    return Err(Error::CorruptIndex {
                        offset: list.offset,
                        source: Violation::DocumentOutOfRange {
                            term: list.term,
                            doc_id,
                            num_documents,
                        },
                    });
                }
            }
            terms.entry(doc_id).or_default().push(list.term);
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    reader.finish()?;

    let num_documents = num_documents.unwrap_or_else(|| {
        terms
            .keys()
            .next_back()
            .map_or(0, |&doc_id| doc_id as u64 + 1)
    });
    info!(
        "Rebuilt {} documents ({} non-empty) from {} lists",
        num_documents,
        terms.len(),
        header.num_lists
    );
    Ok(Documents {
        terms,
        num_documents,
    })
}

/// Writes one document per line, optionally prefixed by `<doc_id>: `
pub fn write_documents<W: Write>(
    documents: &Documents,
    with_ids: bool,
    writer: &mut W,
) -> Result<()> {
    for (doc_id, terms) in documents.iter() {
        if with_ids {
            write!(writer, "{}: ", doc_id)?;
        }
        for (ix, term) in terms.iter().enumerate() {
            if ix > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{}", term)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::cursor::SliceCursor;

    fn artifact(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_reconstruct() {
        // term 1: [0, 2], term 2: [0]
        let data = artifact(&[2, 2, 1, 2, 0, 2, 2, 1, 0]);
        let documents = reconstruct_documents(SliceCursor::new(&data), None, false).unwrap();
        assert_eq!(documents.num_documents(), 3);
        assert_eq!(documents.get(0), &[1, 2]);
        assert!(documents.get(1).is_empty());

        let mut out = Vec::new();
        write_documents(&documents, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0: 1 2\n1: \n2: 1\n");
    }

    #[test]
    fn test_trailing_empty_documents() {
        let data = artifact(&[2, 1, 1, 1, 0]);
        let documents = reconstruct_documents(SliceCursor::new(&data), Some(3), false).unwrap();

        let mut out = Vec::new();
        write_documents(&documents, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n\n\n");
    }

    #[test]
    fn test_large_document_ids() {
        let data = artifact(&[0, 1, 0, 1, u32::MAX]);

        // Storage follows the entries, not the largest ID
        let documents = reconstruct_documents(SliceCursor::new(&data), None, false).unwrap();
        assert_eq!(documents.num_documents(), 1 << 32);
        assert_eq!(documents.get(u32::MAX), &[0]);
        assert!(documents.get(7).is_empty());

        match reconstruct_documents(SliceCursor::new(&data), Some(10), false) {
            Err(Error::CorruptIndex {
                offset: 16,
                source: Violation::DocumentOutOfRange { doc_id, .. },
            }) => assert_eq!(doc_id, u32::MAX),
            r => panic!("Unexpected result {:?}", r),
        }
    }
}
