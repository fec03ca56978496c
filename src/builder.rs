use std::collections::BTreeMap;
use std::io::BufRead;

use derivative::Derivative;
use log::{debug, info};

use crate::{
    base::{DocId, TermId},
    error::{Error, Result},
    index::{InvertedIndex, PostingList},
    utils::progress::progress_bar,
};

#[derive(Derivative, Clone, Debug)]
#[derivative(Default)]
pub struct BuilderOptions {
    /// Largest valid term ID; when `None`, the largest term seen
    pub universe_size: Option<TermId>,

    /// Show a progress bar on stderr
    #[derivative(Default(value = "false"))]
    pub progress: bool,

    /// Log a message every X documents
    /// (0 means no logging)
    #[derivative(Default(value = "1_000_000"))]
    pub log_frequency: u64,
}

/// Parses a document line into term IDs
///
/// `document` is the ordinal of the line and is only used for error
/// reporting.
pub fn parse_document(
    line: &str,
    document: u64,
    universe_size: Option<TermId>,
) -> Result<Vec<TermId>> {
    line.split_whitespace()
        .map(|token| parse_term(token, document, universe_size))
        .collect()
}

fn parse_term(token: &str, document: u64, universe_size: Option<TermId>) -> Result<TermId> {
    let malformed = |reason: String| Error::MalformedTerm {
        document,
        token: token.to_string(),
        reason,
    };

    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("not a non-negative integer".to_string()));
    }
    let term: TermId = token
        .parse()
        .map_err(|_| malformed(format!("larger than {}", TermId::MAX)))?;

    match universe_size {
        Some(universe_size) if term > universe_size => Err(malformed(format!(
            "exceeds universe size {}",
            universe_size
        ))),
        _ => Ok(term),
    }
}

/// The builder consumes documents in stream order and
/// accumulates one posting list per term
pub struct IndexBuilder {
    options: BuilderOptions,

    /// Posting lists of the terms seen so far
    postings: BTreeMap<TermId, PostingList>,

    /// Number of documents consumed so far (= next doc ID)
    documents: u64,

    /// Number of term occurrences
    occurrences: u64,

    /// Number of (term, document) pairs
    entries: u64,
}

impl IndexBuilder {
    pub fn new(options: &BuilderOptions) -> Self {
        Self {
            options: options.clone(),
            postings: BTreeMap::new(),
            documents: 0,
            occurrences: 0,
            entries: 0,
        }
    }

    /// Number of documents added so far
    pub fn documents(&self) -> u64 {
        self.documents
    }

    /// Number of term occurrences seen so far
    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }

    /// Number of postings (distinct term/document pairs) so far
    pub fn entries(&self) -> u64 {
        self.entries
    }

    fn next_doc_id(&self) -> Result<DocId> {
        DocId::try_from(self.documents).map_err(|_| Error::Overflow("documents"))
    }

    /// Parses and adds a document, returning its ID
    pub fn add_document(&mut self, line: &str) -> Result<DocId> {
        let terms = parse_document(line, self.documents, self.options.universe_size)?;
        self.add_terms(&terms)
    }

    /// Adds a document given as term IDs, returning its ID
    pub fn add_terms(&mut self, terms: &[TermId]) -> Result<DocId> {
        let doc_id = self.next_doc_id()?;

        if let Some(universe_size) = self.options.universe_size {
            if let Some(&term) = terms.iter().find(|&&t| t > universe_size) {
                return Err(Error::MalformedTerm {
                    document: self.documents,
                    token: term.to_string(),
                    reason: format!("exceeds universe size {}", universe_size),
                });
            }
        }

        for &term in terms {
            if self.postings.entry(term).or_default().push(doc_id) {
                self.entries += 1;
            }
        }
        self.occurrences += terms.len() as u64;
        self.documents += 1;

        if self.options.log_frequency > 0 && self.documents % self.options.log_frequency == 0 {
            info!(
                "{} documents indexed ({} postings)",
                self.documents, self.entries
            );
        }
        Ok(doc_id)
    }

    /// Closes the builder and returns the index
    pub fn build(self) -> InvertedIndex {
        let max_term = self.postings.keys().next_back().copied().unwrap_or(0);
        let universe_size = self.options.universe_size.unwrap_or(max_term);

        info!(
            "Built index: {} documents, {} term occurrences, {} postings, universe size {}",
            self.documents, self.occurrences, self.entries, universe_size
        );

        let index = InvertedIndex::from_sorted_lists(universe_size, self.postings.into_iter());
        debug!("{} non-empty posting lists", index.num_lists());
        index
    }
}

/// Builds an index from a document stream (one document per line)
pub fn build_from_reader<R: BufRead>(
    mut reader: R,
    options: &BuilderOptions,
) -> Result<InvertedIndex> {
    let mut builder = IndexBuilder::new(options);
    let progress = progress_bar(None, options.progress);

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        builder.add_document(&line)?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(builder.build())
}
