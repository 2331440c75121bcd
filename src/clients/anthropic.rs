//! Anthropic messages API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::clients::openai_compat::{map_reqwest_err, truncate_snippet};
use crate::clients::traits::{ExternalIdeaSource, SourceError};
use crate::config::ProviderConfig;
use crate::model::InnovationDigest;
use crate::prompts::{IDEA_SYSTEM_PROMPT, idea_generation_prompt};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone, Debug)]
pub struct AnthropicClient {
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    timeout_ms: u64,
    client: Client,
}

impl AnthropicClient {
    pub fn new(cfg: &ProviderConfig, api_key: impl Into<String>) -> Self {
        let base = cfg.effective_base_url();
        let endpoint = if base.ends_with("/messages") {
            base
        } else {
            format!("{}/messages", base)
        };

        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            endpoint,
            model: cfg.effective_model(),
            api_key: api_key.into(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            timeout_ms: cfg.timeout_ms,
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, SourceError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "system": system_prompt,
            "messages": [{"role": "user", "content": prompt}]
        });

        tracing::info!(provider = "anthropic", model = %self.model, "calling messages API");

        let res = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_reqwest_err(e, self.timeout_ms))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: truncate_snippet(&text, 500),
            });
        }

        let response_json: Value = res
            .json()
            .await
            .map_err(|e| SourceError::Http(format!("failed to parse response: {}", e)))?;

        let content = response_text(&response_json);
        if content.is_empty() {
            return Err(SourceError::EmptyResponse);
        }
        Ok(content)
    }
}

/// Join the text blocks of a messages response
fn response_text(v: &Value) -> String {
    v.get("content")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[async_trait]
impl ExternalIdeaSource for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(
        &self,
        context: &[InnovationDigest],
        topic: &str,
    ) -> Result<String, SourceError> {
        let prompt = idea_generation_prompt(context, topic);
        self.complete(IDEA_SYSTEM_PROMPT, &prompt).await
    }
}
