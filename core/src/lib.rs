//! Document retrieval, demand forecasting and risk scoring for inventory items.

use serde::{Deserialize, Serialize};

pub mod answer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forecast;
pub mod generator;
pub mod history;
pub mod index;
pub mod loader;
pub mod risk;
pub mod scorer;
pub mod search;
pub mod system;
pub mod tokenizer;
pub mod trend;

pub use answer::{Answer, AnswerSource, Assistant, Generator};
pub use catalog::{default_policies, InventoryItem, Searchable};
pub use config::Config;
pub use error::{ForecastError, LoadError};
pub use forecast::{Forecast, Forecaster, HistoricalSeries, Observation, Trend};
pub use risk::{RiskAnalyzer, RiskAssessment, RiskLevel, RiskSummary};
pub use search::SearchEngine;
pub use system::SupplyChain;

/// Position of a document in the corpus.
pub type DocId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

impl Document {
    pub fn new(id: DocId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// 1-based rank.
    pub rank: usize,
    pub doc_id: DocId,
    pub document: String,
    pub score: f64,
}
