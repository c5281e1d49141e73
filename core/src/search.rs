use std::cmp::Ordering;

use crate::index::CorpusIndex;
use crate::scorer::Scorer;
use crate::tokenizer::tokenize;
use crate::{DocId, Document, SearchHit};

/// TF-IDF search over a document set fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    documents: Vec<Document>,
    index: CorpusIndex,
}

impl SearchEngine {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<Document> = texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Document::new(id, text))
            .collect();
        let index = CorpusIndex::build(&documents);
        Self { documents, index }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Relevance of every document to `query`, in document order.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let query_terms = tokenize(query);
        let scorer = Scorer::new(&self.index);
        (0..self.documents.len())
            .map(|doc_id| scorer.aggregate(&query_terms, doc_id))
            .collect()
    }

    /// Top `k` documents by descending score.
    ///
    /// Every document is a candidate, including those scoring zero. Equal
    /// scores are ordered by ascending document id.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        if k == 0 || self.documents.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(DocId, f64)> = self.scores(query).into_iter().enumerate().collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        tracing::debug!(query, k, hits = scored.len(), "search");

        scored
            .into_iter()
            .enumerate()
            .map(|(rank, (doc_id, score))| SearchHit {
                rank: rank + 1,
                doc_id,
                document: self.documents[doc_id].text.clone(),
                score,
            })
            .collect()
    }
}
