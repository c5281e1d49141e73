use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::answer::Generator;
use crate::config::Config;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Batch(Vec<Generated>),
    Single(Generated),
}

#[derive(Deserialize)]
struct Generated {
    generated_text: String,
}

/// Text-generation inference endpoint reached over HTTP.
///
/// Calls block; async callers should run them off the runtime threads.
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    token: Option<String>,
    max_length: u32,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>, token: Option<String>, max_length: u32, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockwise/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint: endpoint.into(), token, max_length })
    }

    pub fn from_config(config: &Config, token: Option<String>) -> Result<Self> {
        Self::new(
            config.generator_endpoint(),
            token,
            config.max_length,
            Duration::from_secs(config.generator_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Generator for HttpGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters { max_new_tokens: self.max_length, do_sample: false },
        };
        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().with_context(|| format!("request to {} failed", self.endpoint))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!("generator returned {status}: {text}"));
        }
        let parsed: GenerateResponse = resp.json().context("unexpected generator response")?;
        extract_text(parsed)
    }
}

fn extract_text(resp: GenerateResponse) -> Result<String> {
    match resp {
        GenerateResponse::Single(g) => Ok(g.generated_text),
        GenerateResponse::Batch(batch) => batch
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| anyhow!("generator returned no candidates")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_batch_and_single_responses() {
        let batch: GenerateResponse = serde_json::from_str(r#"[{"generated_text": "keep 2 weeks"}]"#).unwrap();
        assert_eq!(extract_text(batch).unwrap(), "keep 2 weeks");
        let single: GenerateResponse = serde_json::from_str(r#"{"generated_text": "reorder now"}"#).unwrap();
        assert_eq!(extract_text(single).unwrap(), "reorder now");
        let empty: GenerateResponse = serde_json::from_str("[]").unwrap();
        assert!(extract_text(empty).is_err());
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            inputs: "prompt",
            parameters: GenerateParameters { max_new_tokens: 256, do_sample: false },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"], "prompt");
        assert_eq!(json["parameters"]["max_new_tokens"], 256);
        assert_eq!(json["parameters"]["do_sample"], false);
    }

    #[test]
    fn unreachable_endpoint_is_an_error() {
        let generator = HttpGenerator::new("http://127.0.0.1:9/generate", None, 16, Duration::from_millis(200)).unwrap();
        assert!(generator.generate("hello").is_err());
    }
}
