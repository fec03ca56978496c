use rand::{self, RngCore};
use rand_distr::{Distribution, Poisson};
use std::cmp::min;

use posting_index::TermId;

pub struct TestDocument {
    pub terms: Vec<TermId>,
}

impl TestDocument {
    /// The document as a line of the text document stream
    pub fn to_line(&self) -> String {
        self.terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Creates a document with distinct terms drawn from `0..vocabulary_size`
///
/// Term counts follow a Poisson law; documents may be empty.
pub fn create_document(
    lambda_words: f32,
    max_words: usize,
    vocabulary_size: usize,
    rng: &mut dyn RngCore,
) -> TestDocument {
    let poi = Poisson::new(lambda_words).unwrap();
    let num_words = poi.sample(rng) as usize;

    let amount = min(num_words, min(max_words, vocabulary_size));
    let term_ids = rand::seq::index::sample(rng, vocabulary_size, amount).into_vec();

    TestDocument {
        terms: term_ids.iter().map(|&t| t as TermId).collect(),
    }
}
