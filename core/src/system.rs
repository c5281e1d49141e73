use std::collections::HashMap;
use std::sync::Arc;
use time::{Date, OffsetDateTime};

use crate::answer::{Answer, Assistant, Generator};
use crate::catalog::{InventoryItem, Searchable};
use crate::config::Config;
use crate::error::ForecastError;
use crate::forecast::{Forecast, Forecaster};
use crate::history;
use crate::risk::{RiskAnalyzer, RiskAssessment};
use crate::search::SearchEngine;
use crate::SearchHit;

/// Search, answering, forecasting and risk analysis over one catalog.
#[derive(Debug)]
pub struct SupplyChain {
    config: Config,
    items: Vec<InventoryItem>,
    by_sku: HashMap<String, usize>,
    engine: Arc<SearchEngine>,
    assistant: Assistant,
    forecaster: Forecaster,
    risk_analyzer: RiskAnalyzer,
}

impl SupplyChain {
    /// Index policies followed by one document per item.
    pub fn new(
        config: Config,
        items: Vec<InventoryItem>,
        policies: Vec<String>,
        generator: Option<Arc<dyn Generator>>,
    ) -> Self {
        let num_policies = policies.len();
        let documents = policies
            .into_iter()
            .chain(items.iter().map(Searchable::to_searchable_text));
        let engine = Arc::new(SearchEngine::new(documents));
        let assistant = Assistant::new(engine.clone(), generator, config.search_top_k);

        let mut by_sku = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            by_sku.entry(item.sku.clone()).or_insert(idx);
        }

        tracing::info!(
            num_items = items.len(),
            num_policies,
            ai = assistant.has_generator(),
            "supply chain system ready"
        );
        Self {
            config,
            items,
            by_sku,
            engine,
            assistant,
            forecaster: Forecaster::new(),
            risk_analyzer: RiskAnalyzer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn item(&self, sku: &str) -> Option<&InventoryItem> {
        self.by_sku.get(sku).map(|&idx| &self.items[idx])
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        self.engine.search(query, k)
    }

    pub fn ask(&self, question: &str) -> Answer {
        self.assistant.ask(question)
    }

    /// Forecast with a history window ending yesterday (UTC).
    pub fn forecast_demand(&self, sku: &str, days: usize) -> Result<Forecast, ForecastError> {
        self.forecast_demand_as_of(sku, days, OffsetDateTime::now_utc().date())
    }

    /// Forecast for `sku` from a synthesized history ending the day before `as_of`.
    pub fn forecast_demand_as_of(&self, sku: &str, days: usize, as_of: Date) -> Result<Forecast, ForecastError> {
        let item = self
            .item(sku)
            .ok_or_else(|| ForecastError::UnknownItem(sku.to_string()))?;
        let mut rng = history::rng(self.config.seed.map(|seed| history::item_seed(seed, sku)));
        let hist = history::synthesize(item.daily_demand(), self.config.history_days, as_of, &mut rng);
        self.forecaster.forecast(sku, &hist, days)
    }

    /// Risk assessments for the first `top_n` items.
    pub fn analyze_risks(&self, top_n: usize) -> Vec<RiskAssessment> {
        self.items
            .iter()
            .take(top_n)
            .map(|item| self.risk_analyzer.assess(item))
            .collect()
    }
}
