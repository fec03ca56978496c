use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    serialize::BinaryIndexReader,
    utils::{cursor::IndexCursor, progress::progress_bar},
};

/// Summary of a binary artifact
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IndexStatistics {
    pub universe_size: u32,
    pub num_lists: u32,
    pub total_entries: u64,
    pub min_list_size: Option<u32>,
    pub max_list_size: Option<u32>,
    /// Largest document ID plus one
    pub documents: u64,
    pub bytes: u64,
}

/// Computes the statistics of an artifact
///
/// Only list headers and the last entry of each list are read.
pub fn compute_statistics<C: IndexCursor>(cursor: C, progress: bool) -> Result<IndexStatistics> {
    let mut reader = BinaryIndexReader::new(cursor)?;
    let header = *reader.header();
    let bar = progress_bar(Some(header.num_lists as u64), progress);

    let mut stats = IndexStatistics {
        universe_size: header.universe_size,
        num_lists: header.num_lists,
        total_entries: 0,
        min_list_size: None,
        max_list_size: None,
        documents: 0,
        bytes: 0,
    };

    while let Some(list) = reader.next_list()? {
        stats.total_entries += list.size as u64;
        stats.min_list_size = Some(stats.min_list_size.map_or(list.size, |s| s.min(list.size)));
        stats.max_list_size = Some(stats.max_list_size.map_or(list.size, |s| s.max(list.size)));
        if let Some(last) = reader.read_last_entry()? {
            stats.documents = stats.documents.max(last as u64 + 1);
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    stats.bytes = reader.position();
    reader.finish()?;
    Ok(stats)
}
