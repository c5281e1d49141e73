//! Question answering on top of [`SearchEngine`].
//!
//! Retrieval always runs. When a [`Generator`] is attached, the best hits
//! are folded into a prompt and the generated text becomes the answer;
//! otherwise the top hit itself is returned.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::{CONTEXT_CHAR_LIMIT, PROMPT_CONTEXT_DOCS};
use crate::search::SearchEngine;
use crate::SearchHit;

/// Text-to-text generation backend.
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Ai,
    Retrieval,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub source: AnswerSource,
    pub context_documents: Vec<SearchHit>,
}

pub const NO_MATCH_ANSWER: &str = "No relevant documents found.";

#[derive(Clone)]
pub struct Assistant {
    engine: Arc<SearchEngine>,
    generator: Option<Arc<dyn Generator>>,
    top_k: usize,
}

impl fmt::Debug for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assistant")
            .field("documents", &self.engine.len())
            .field("generator", &self.generator.is_some())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl Assistant {
    pub fn new(engine: Arc<SearchEngine>, generator: Option<Arc<dyn Generator>>, top_k: usize) -> Self {
        Self { engine, generator, top_k }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn ask(&self, question: &str) -> Answer {
        let hits = self.engine.search(question, self.top_k);

        let (answer, source) = match &self.generator {
            Some(generator) => {
                let prompt = build_prompt(question, &hits);
                let answer = match generator.generate(&prompt) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(error = %err, "generation failed");
                        format!("Error generating AI answer: {err}")
                    }
                };
                (answer, AnswerSource::Ai)
            }
            None => {
                let answer = hits
                    .first()
                    .map(|hit| truncate_chars(&hit.document, CONTEXT_CHAR_LIMIT).to_string())
                    .unwrap_or_else(|| NO_MATCH_ANSWER.to_string());
                (answer, AnswerSource::Retrieval)
            }
        };

        Answer {
            question: question.to_string(),
            answer,
            source,
            context_documents: hits,
        }
    }
}

/// Prompt built from the leading hits, each cut to [`CONTEXT_CHAR_LIMIT`] characters.
pub fn build_prompt(question: &str, hits: &[SearchHit]) -> String {
    let context = hits
        .iter()
        .take(PROMPT_CONTEXT_DOCS)
        .map(|hit| truncate_chars(&hit.document, CONTEXT_CHAR_LIMIT))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Based on these supply chain policies:\n\n{context}\n\nQuestion: {question}\n\n\
         Provide a clear, actionable answer in 2-3 sentences:"
    )
}

/// Longest prefix of `text` with at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    struct Echo;

    impl Generator for Echo {
        fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            Ok(format!("echo:{}", prompt.len()))
        }
    }

    struct Failing;

    impl Generator for Failing {
        fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Err(anyhow!("model unavailable"))
        }
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl Generator for Recording {
        fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            self.0.lock().unwrap().push(prompt.to_string());
            Ok("ok".into())
        }
    }

    fn engine() -> Arc<SearchEngine> {
        Arc::new(SearchEngine::new([
            "safety stock policy for class items",
            "supplier penalty for late delivery",
            "shipping routes and carriers",
        ]))
    }

    #[test]
    fn retrieval_answer_is_top_document() {
        let assistant = Assistant::new(engine(), None, 3);
        let answer = assistant.ask("late supplier penalty");
        assert_eq!(answer.source, AnswerSource::Retrieval);
        assert_eq!(answer.answer, "supplier penalty for late delivery");
        assert_eq!(answer.context_documents.len(), 3);
    }

    #[test]
    fn retrieval_on_empty_corpus() {
        let assistant = Assistant::new(Arc::new(SearchEngine::new(Vec::<String>::new())), None, 3);
        let answer = assistant.ask("anything");
        assert_eq!(answer.answer, NO_MATCH_ANSWER);
        assert!(answer.context_documents.is_empty());
    }

    #[test]
    fn generator_receives_top_two_documents() {
        let recording = Arc::new(Recording::default());
        let assistant = Assistant::new(engine(), Some(recording.clone()), 3);
        let answer = assistant.ask("safety stock");
        assert_eq!(answer.source, AnswerSource::Ai);
        assert_eq!(answer.answer, "ok");

        let prompts = recording.0.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.starts_with("Based on these supply chain policies:\n\nsafety stock policy"));
        assert!(prompt.contains("Question: safety stock"));
        assert!(!prompt.contains("shipping routes"));
    }

    #[test]
    fn generator_failure_becomes_answer_text() {
        let assistant = Assistant::new(engine(), Some(Arc::new(Failing)), 3);
        let answer = assistant.ask("safety stock");
        assert_eq!(answer.source, AnswerSource::Ai);
        assert_eq!(answer.answer, "Error generating AI answer: model unavailable");
    }

    #[test]
    fn echo_generator_is_used() {
        let assistant = Assistant::new(engine(), Some(Arc::new(Echo)), 1);
        assert!(assistant.ask("carriers").answer.starts_with("echo:"));
    }

    #[test]
    fn prompt_truncates_long_documents() {
        let long = "é".repeat(600);
        let hits = vec![SearchHit { rank: 1, doc_id: 0, document: long, score: 1.0 }];
        let prompt = build_prompt("q", &hits);
        assert_eq!(prompt.matches('é').count(), CONTEXT_CHAR_LIMIT);
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
    }
}
