//! Main data structure used to describe an index

use std::collections::BTreeMap;
use std::fmt;

use crate::base::{DocId, Len, TermId};
use crate::error::Violation;

/// Ordered document IDs of one term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    docs: Vec<DocId>,
}

impl PostingList {
    pub fn new() -> Self {
        Self { docs: Vec::new() }
    }

    /// Appends a document, returns false if it is already the last one
    ///
    /// Documents are pushed in increasing order by the builder
    pub(crate) fn push(&mut self, doc_id: DocId) -> bool {
        if let Some(&last) = self.docs.last() {
            debug_assert!(
                last <= doc_id,
                "Doc ID should be increasing and this is not the case: {} vs {}",
                last,
                doc_id
            );
            if last == doc_id {
                return false;
            }
        }
        self.docs.push(doc_id);
        true
    }

    pub fn as_slice(&self) -> &[DocId] {
        &self.docs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocId> {
        self.docs.iter()
    }

    pub fn max_doc_id(&self) -> Option<DocId> {
        self.docs.last().copied()
    }
}

impl Len for PostingList {
    fn len(&self) -> usize {
        self.docs.len()
    }
}

impl fmt::Display for PostingList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (ix, doc_id) in self.docs.iter().enumerate() {
            if ix > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", doc_id)?;
        }
        Ok(())
    }
}

/// An inverted index: universe size and the non-empty posting lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    universe_size: TermId,
    postings: BTreeMap<TermId, PostingList>,
}

impl InvertedIndex {
    /// Creates an index without posting lists
    pub fn new(universe_size: TermId) -> Self {
        Self {
            universe_size,
            postings: BTreeMap::new(),
        }
    }

    /// Builds an index from lists in ascending term order (builder output)
    pub(crate) fn from_sorted_lists(
        universe_size: TermId,
        lists: impl Iterator<Item = (TermId, PostingList)>,
    ) -> Self {
        Self {
            universe_size,
            postings: lists.filter(|(_, list)| !list.is_empty()).collect(),
        }
    }

    /// Adds a posting list decoded from an artifact
    ///
    /// The list must be non-empty, strictly increasing, and belong to a new
    /// term within the universe.
    pub fn insert(&mut self, term: TermId, docs: Vec<DocId>) -> Result<(), Violation> {
        if term > self.universe_size {
            return Err(Violation::TermOutOfRange {
                term,
                universe_size: self.universe_size,
            });
        }
        if docs.is_empty() {
            return Err(Violation::EmptyList(term));
        }
        if let Some(position) = docs.windows(2).position(|w| w[0] >= w[1]) {
            return Err(Violation::Unordered {
                term,
                position: position + 1,
                doc_id: docs[position + 1],
            });
        }
        if self.postings.contains_key(&term) {
            return Err(Violation::DuplicateTerm(term));
        }
        self.postings.insert(term, PostingList { docs });
        Ok(())
    }

    pub fn universe_size(&self) -> TermId {
        self.universe_size
    }

    /// Number of (non-empty) posting lists
    pub fn num_lists(&self) -> usize {
        self.postings.len()
    }

    pub fn get(&self, term: TermId) -> Option<&PostingList> {
        self.postings.get(&term)
    }

    /// Iterates over the posting lists by ascending term
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &PostingList)> + '_ {
        self.postings.iter().map(|(&term, list)| (term, list))
    }

    /// Total number of postings
    pub fn total_entries(&self) -> u64 {
        self.postings.values().map(|l| l.len() as u64).sum()
    }
}

impl Len for InvertedIndex {
    fn len(&self) -> usize {
        self.num_lists()
    }
}
