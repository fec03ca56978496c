use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use rand::{rngs::StdRng, SeedableRng};
use temp_dir::TempDir;

use crate::documents::{create_document, TestDocument};
use posting_index::{
    base::Len,
    serialize::{write_binary, write_text},
    DocId, InvertedIndex, TermId,
};

/// A random corpus with the posting lists it should produce
pub struct TestCorpus {
    pub vocabulary_size: usize,
    pub documents: Vec<TestDocument>,
    pub all_terms: BTreeMap<TermId, Vec<DocId>>,
}

impl TestCorpus {
    pub fn new(
        vocabulary_size: usize,
        document_count: usize,
        lambda_words: f32,
        max_words: usize,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let mut all_terms = BTreeMap::<TermId, Vec<DocId>>::new();
        let mut documents = Vec::<TestDocument>::new();

        // Creates documents
        for doc_id in 0..document_count {
            let document = create_document(lambda_words, max_words, vocabulary_size, &mut rng);
            for &term in document.terms.iter() {
                all_terms.entry(term).or_default().push(doc_id as DocId);
            }
            documents.push(document);
        }

        Self {
            vocabulary_size,
            documents,
            all_terms,
        }
    }

    /// The corpus as a text document stream
    pub fn text(&self) -> String {
        let mut text = String::new();
        for document in self.documents.iter() {
            text.push_str(&document.to_line());
            text.push('\n');
        }
        text
    }

    /// Total number of term occurrences
    pub fn occurrences(&self) -> usize {
        self.documents.iter().map(|d| d.terms.len()).sum()
    }
}

/// Test if the index holds exactly the expected posting lists
pub fn check_same_index(expected: &BTreeMap<TermId, Vec<DocId>>, observed: &InvertedIndex) {
    assert_eq!(
        expected.len(),
        observed.num_lists(),
        "Number of posting lists differ"
    );
    for (term, list) in observed.iter() {
        let docs = expected
            .get(&term)
            .unwrap_or_else(|| panic!("Unexpected posting list for term {}", term));
        assert_eq!(list.len(), docs.len(), "Size differ for term {}", term);
        assert_eq!(list.as_slice(), docs.as_slice(), "Entries differ for term {}", term);
    }
}

/// Serialized artifacts of an index in a temporary directory
pub struct TestArtifacts {
    pub dir: TempDir,
    pub text: PathBuf,
    pub binary: PathBuf,
}

impl TestArtifacts {
    pub fn new(index: &InvertedIndex) -> Self {
        let dir = TempDir::new().expect("Could not create temporary directory");
        let text = dir.path().join("index.txt");
        let binary = dir.path().join("index.dat");

        let mut writer = BufWriter::new(File::create(&text).expect("Could not create text index"));
        write_text(index, &mut writer).expect("Error while writing the text index");
        writer.flush().unwrap();

        let mut writer =
            BufWriter::new(File::create(&binary).expect("Could not create binary index"));
        write_binary(index, &mut writer).expect("Error while writing the binary index");
        writer.flush().unwrap();

        Self { dir, text, binary }
    }
}
