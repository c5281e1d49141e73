use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Trend slope (units per step) above which demand is labelled increasing.
pub const TREND_THRESHOLD: f64 = 0.1;
/// Multiplier applied to the historical standard deviation for the forecast band.
pub const CONFIDENCE_Z: f64 = 1.96;
/// Historical growth (percent) beyond which stock should be adjusted.
pub const GROWTH_ACTION_THRESHOLD: f64 = 15.0;
/// Days of forecast demand held as target stock.
pub const TARGET_COVER_DAYS: f64 = 14.0;
/// Days of forecast demand at which to reorder.
pub const REORDER_COVER_DAYS: f64 = 7.0;
/// Guards the growth-rate division when the first observation is zero.
pub const GROWTH_EPSILON: f64 = 1e-10;
/// Longest forecast horizon accepted, in days.
pub const MAX_FORECAST_DAYS: usize = 365;

/// Number of top hits folded into a generation prompt.
pub const PROMPT_CONTEXT_DOCS: usize = 2;
/// Character budget per document, for prompts and retrieval answers.
pub const CONTEXT_CHAR_LIMIT: usize = 500;

/// Runtime configuration shared by the CLI and the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model identifier passed to the generation endpoint.
    pub model: String,
    /// Max output length requested from the generator.
    pub max_length: u32,
    pub search_top_k: usize,
    /// Forecast horizon in days.
    pub forecast_days: usize,
    /// Length of the synthesized history window in days.
    pub history_days: usize,
    /// Explicit generation endpoint; derived from `model` when unset.
    pub generator_url: Option<String>,
    pub generator_timeout_secs: u64,
    /// Seed for synthetic history noise. Unseeded runs draw from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "google/flan-t5-base".to_string(),
            max_length: 256,
            search_top_k: 3,
            forecast_days: 30,
            history_days: 90,
            generator_url: None,
            generator_timeout_secs: 60,
            seed: None,
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Endpoint the HTTP generator posts to.
    pub fn generator_endpoint(&self) -> String {
        match &self.generator_url {
            Some(url) => url.clone(),
            None => format!("https://api-inference.huggingface.co/models/{}", self.model),
        }
    }
}
