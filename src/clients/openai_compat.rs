//! Chat-completions client for OpenAI-compatible endpoints (DeepSeek, OpenAI, local servers)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::clients::traits::{ExternalIdeaSource, SourceError};
use crate::config::ProviderConfig;
use crate::model::InnovationDigest;
use crate::prompts::{IDEA_SYSTEM_PROMPT, idea_generation_prompt};

#[derive(Clone, Debug)]
pub struct OpenAiCompatClient {
    label: String,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    timeout_ms: u64,
    client: Client,
}

impl OpenAiCompatClient {
    pub fn new(label: impl Into<String>, cfg: &ProviderConfig, api_key: impl Into<String>) -> Self {
        let base = cfg.effective_base_url();
        // Accept either a base URL or the full completions path
        let endpoint = if base.ends_with("/chat/completions") {
            base
        } else {
            format!("{}/chat/completions", base)
        };

        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            label: label.into(),
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

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system + user exchange and return the assistant text
    pub async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, SourceError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": prompt}
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "stream": false
        });

        tracing::info!(provider = %self.label, model = %self.model, "calling chat completions");

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
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

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(SourceError::EmptyResponse);
        }
        tracing::debug!(chars = content.len(), "chat completion received");
        Ok(content)
    }
}

#[async_trait]
impl ExternalIdeaSource for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.label
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

pub(crate) fn map_reqwest_err(err: reqwest::Error, timeout_ms: u64) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout { timeout_ms }
    } else {
        SourceError::Http(err.to_string())
    }
}

pub(crate) fn truncate_snippet(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn endpoint_is_built_from_base_url() {
        let cfg = ProviderConfig {
            kind: ProviderKind::Deepseek,
            ..ProviderConfig::default()
        };
        let client = OpenAiCompatClient::new("deepseek", &cfg, "key");
        assert_eq!(client.endpoint(), "https://api.deepseek.com/v1/chat/completions");
        assert_eq!(client.model(), "deepseek-chat");

        let cfg = ProviderConfig {
            kind: ProviderKind::Openai,
            base_url: "http://127.0.0.1:8111/v1/chat/completions".into(),
            ..ProviderConfig::default()
        };
        let client = OpenAiCompatClient::new("local", &cfg, "key");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8111/v1/chat/completions");
    }

    #[test]
    fn snippets_are_truncated_on_char_boundaries() {
        assert_eq!(truncate_snippet("short", 10), "short");
        assert_eq!(truncate_snippet("ééééé", 3), "ééé…");
    }
}
