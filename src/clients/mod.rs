pub mod anthropic;
pub mod openai_compat;
pub mod traits;

use std::sync::Arc;

pub use anthropic::AnthropicClient;
pub use openai_compat::OpenAiCompatClient;
pub use traits::{ExternalIdeaSource, SourceError};

use crate::config::{ProviderConfig, ProviderKind};

/// Build the idea source for the configured provider.
///
/// Returns `None` when the provider is disabled or its API key is missing; generation then runs
/// on deterministic combinations alone.
pub fn build_idea_source(cfg: &ProviderConfig) -> Option<Arc<dyn ExternalIdeaSource>> {
    if cfg.kind == ProviderKind::None {
        tracing::info!("external idea source disabled");
        return None;
    }
    let Some(api_key) = cfg.api_key.clone() else {
        tracing::warn!(
            provider = cfg.kind.as_str(),
            "no API key configured, external idea source unavailable"
        );
        return None;
    };

    let source: Arc<dyn ExternalIdeaSource> = match cfg.kind {
        ProviderKind::Deepseek | ProviderKind::Openai => {
            Arc::new(OpenAiCompatClient::new(cfg.kind.as_str(), cfg, api_key))
        }
        ProviderKind::Anthropic => Arc::new(AnthropicClient::new(cfg, api_key)),
        ProviderKind::None => return None,
    };
    Some(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_source_without_key_or_when_disabled() {
        let cfg = ProviderConfig::default();
        assert!(build_idea_source(&cfg).is_none());

        let cfg = ProviderConfig {
            kind: ProviderKind::None,
            api_key: Some("k".into()),
            ..ProviderConfig::default()
        };
        assert!(build_idea_source(&cfg).is_none());
    }

    #[test]
    fn source_named_after_provider() {
        let cfg = ProviderConfig {
            kind: ProviderKind::Anthropic,
            api_key: Some("k".into()),
            ..ProviderConfig::default()
        };
        assert_eq!(build_idea_source(&cfg).unwrap().name(), "anthropic");

        let cfg = ProviderConfig {
            kind: ProviderKind::Deepseek,
            api_key: Some("k".into()),
            ..ProviderConfig::default()
        };
        assert_eq!(build_idea_source(&cfg).unwrap().name(), "deepseek");
    }
}
