//! Selection of the largest posting lists from a binary artifact
//!
//! Lists are streamed in file order; only their headers are read, entries
//! are skipped.

pub mod top_k_heap;

use log::{debug, info};

pub use top_k_heap::{ListSize, TopKHeap};

use crate::{
    base::WORD_SIZE,
    error::{Error, Result},
    serialize::{BinaryIndexReader, IndexHeader},
    utils::{cursor::IndexCursor, progress::progress_bar},
};

/// Heap slots reserved upfront when the artifact length is unknown
const INITIAL_CAPACITY: usize = 1024;

/// Outcome of a selection
#[derive(Debug, Clone)]
pub struct Selection {
    pub header: IndexHeader,

    /// Selected lists by descending size (ties by file order)
    pub lists: Vec<ListSize>,

    /// Largest number of candidates held during the scan
    pub peak_candidates: usize,
}

pub struct TopKSelector {
    k: usize,
    progress: bool,
}

impl TopKSelector {
    /// Creates a selector for the `k` largest lists (`k` must be positive)
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidArgument {
                name: "k",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self { k, progress: false })
    }

    /// Show a progress bar over the lists
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn select<C: IndexCursor>(&self, cursor: C) -> Result<Selection> {
        let mut reader = BinaryIndexReader::new(cursor)?;
        let header = *reader.header();
        info!(
            "Selecting the {} largest lists among {} (universe size {})",
            self.k, header.num_lists, header.universe_size
        );

        // Each list takes at least a two-word header
        let max_lists = match reader.remaining() {
            Some(bytes) => usize::try_from(bytes / (2 * WORD_SIZE)).unwrap_or(usize::MAX),
            None => INITIAL_CAPACITY,
        };
        let capacity = self.k.min(header.num_lists as usize).min(max_lists);
        let mut heap = TopKHeap::new(self.k, capacity);
        let progress = progress_bar(Some(header.num_lists as u64), self.progress);

        while let Some(list) = reader.next_list()? {
            if heap.push(list.term, list.size) {
                debug!("Candidate term {} (size {})", list.term, list.size);
            }
            reader.skip_entries()?;
            progress.inc(1);
        }
        progress.finish_and_clear();

        let peak_candidates = heap.peak();
        Ok(Selection {
            header,
            lists: heap.into_sorted_vec(),
            peak_candidates,
        })
    }
}

/// Returns the `k` largest lists of a binary artifact
pub fn select_top_k<C: IndexCursor>(cursor: C, k: usize) -> Result<Vec<ListSize>> {
    Ok(TopKSelector::new(k)?.select(cursor)?.lists)
}
