use std::collections::{BTreeSet, HashMap, HashSet};

use crate::tokenizer::tokenize;
use crate::Document;

/// In-memory term statistics for a fixed document set.
///
/// Built once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    /// Distinct terms across all documents, sorted.
    pub vocabulary: BTreeSet<String>,
    /// Number of documents each vocabulary term occurs in.
    pub doc_freq: HashMap<String, u32>,
    /// Token sequence of each document, duplicates kept, indexed by doc id.
    pub term_lists: Vec<Vec<String>>,
}

impl CorpusIndex {
    pub fn build(documents: &[Document]) -> Self {
        let mut vocabulary = BTreeSet::new();
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        let mut term_lists = Vec::with_capacity(documents.len());

        for doc in documents {
            let terms = tokenize(&doc.text);
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
                if !vocabulary.contains(term) {
                    vocabulary.insert(term.clone());
                }
            }
            term_lists.push(terms);
        }

        tracing::info!(num_docs = documents.len(), num_terms = vocabulary.len(), "indexed documents");
        Self { vocabulary, doc_freq, term_lists }
    }

    pub fn num_docs(&self) -> usize {
        self.term_lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_lists.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains(term)
    }

    /// Document frequency, zero for terms outside the vocabulary.
    pub fn df(&self, term: &str) -> u32 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Token list of a document; empty for out-of-range ids.
    pub fn terms(&self, doc_id: usize) -> &[String] {
        self.term_lists.get(doc_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
