//! TF-IDF relevance scoring over a [`CorpusIndex`].
//!
//! Query scores are an unnormalized sum of per-term `tf * idf` products, not
//! cosine similarity: a document matching more distinct query terms beats one
//! that only repeats a single term more densely.

use std::collections::HashSet;

use crate::index::CorpusIndex;

pub struct Scorer<'a> {
    index: &'a CorpusIndex,
}

impl<'a> Scorer<'a> {
    pub fn new(index: &'a CorpusIndex) -> Self {
        Self { index }
    }

    /// Share of the document's tokens equal to `term`.
    pub fn tf(&self, term: &str, doc_id: usize) -> f64 {
        let terms = self.index.terms(doc_id);
        let count = terms.iter().filter(|t| t.as_str() == term).count();
        count as f64 / terms.len().max(1) as f64
    }

    /// `ln(N / (df + 1))`; unseen terms get `ln(N)`.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.index.num_docs() as f64;
        (n / (self.index.df(term) as f64 + 1.0)).ln()
    }

    pub fn score(&self, term: &str, doc_id: usize) -> f64 {
        self.tf(term, doc_id) * self.idf(term)
    }

    /// Sum of [`Scorer::score`] over distinct query terms in the vocabulary.
    pub fn aggregate<S: AsRef<str>>(&self, query_terms: &[S], doc_id: usize) -> f64 {
        let mut seen: HashSet<&str> = HashSet::new();
        query_terms
            .iter()
            .map(|term| term.as_ref())
            .filter(|term| seen.insert(*term) && self.index.contains(term))
            .map(|term| self.score(term, doc_id))
            .sum()
    }
}
