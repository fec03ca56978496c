//! Error types for posting-index.

use thiserror::Error;

use crate::base::{DocId, TermId};

/// Top-level error type for index operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A document contains a token that is not a valid term id.
    #[error("malformed term {token:?} in document {document}: {reason}")]
    MalformedTerm {
        document: u64,
        token: String,
        reason: String,
    },

    /// The binary artifact ends before the data its headers announce.
    #[error("truncated index at byte {offset} while reading {record}")]
    TruncatedIndex { offset: u64, record: Record },

    /// A caller-supplied argument is out of its domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The text artifact cannot be parsed.
    #[error("malformed text index at line {line}: {reason}")]
    MalformedArtifact { line: usize, reason: String },

    /// The binary artifact breaks an index invariant.
    #[error("corrupt index at byte {offset}: {source}")]
    CorruptIndex {
        offset: u64,
        #[source]
        source: Violation,
    },

    /// A count does not fit into the 32 bits of the format.
    #[error("too many {0} for 32-bit identifiers")]
    Overflow(&'static str),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Part of the binary artifact being read when it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Header,
    /// 0-based position of the list in the file
    ListHeader(u32),
    Entries(TermId),
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Header => write!(f, "the index header"),
            Record::ListHeader(ix) => write!(f, "the header of list #{}", ix),
            Record::Entries(term) => write!(f, "the entries of term {}", term),
        }
    }
}

/// A posting list that cannot be part of an index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("term {term} exceeds universe size {universe_size}")]
    TermOutOfRange { term: TermId, universe_size: TermId },

    #[error("term {0} has more than one posting list")]
    DuplicateTerm(TermId),

    #[error("term {0} has an empty posting list")]
    EmptyList(TermId),

    #[error(
        "posting list of term {term} is not strictly increasing at entry {position} (doc {doc_id})"
    )]
    Unordered {
        term: TermId,
        position: usize,
        doc_id: DocId,
    },

    #[error("term {term} lists document {doc_id}, beyond the {num_documents} documents")]
    DocumentOutOfRange {
        term: TermId,
        doc_id: DocId,
        num_documents: u64,
    },

    #[error("unexpected bytes after the last list")]
    TrailingBytes,
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, Error>;
