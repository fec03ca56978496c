//! Text and binary encodings of an inverted index
//!
//! Both encodings start with the universe size and the number of lists,
//! followed by the non-empty posting lists by ascending term.

pub mod binary;
pub mod text;

pub use binary::{read_binary, write_binary, BinaryIndexReader, IndexHeader, ListHeader};
pub use text::{read_text, read_text_with, write_text, TextOptions};
