//! posting-index builds inverted indices over term-id documents, stores
//! them in a text or a skip-capable binary format, and selects the largest
//! posting lists of a binary artifact without loading it.

pub mod base;
pub mod builder;
pub mod cli;
pub mod documents;
pub mod error;
pub mod index;
pub mod remap;
pub mod select;
pub mod serialize;
pub mod stats;
pub mod utils;

pub use base::{DocId, TermId};
pub use builder::{build_from_reader, BuilderOptions, IndexBuilder};
pub use error::{Error, Result};
pub use index::{InvertedIndex, PostingList};
pub use remap::IdRemapper;
pub use select::{select_top_k, ListSize, TopKSelector};
