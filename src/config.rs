use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure loaded from idea_forge.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Fan-out caps and limits applied by the idea generator
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Pairs taken from a single category, in enumeration order
    pub intra_category_pair_cap: usize,
    /// Leading points of each category that take part in cross-category pairing
    pub cross_category_sample: usize,
    /// Ideas kept after ranking
    pub result_limit: usize,
    /// Innovations handed to the external idea source
    pub external_context_limit: usize,
    /// Characters of each source description quoted in a combined idea
    pub description_excerpt_chars: usize,
}

impl GenerationConfig {
    pub const INTRA_CATEGORY_PAIR_CAP: usize = 10;
    pub const CROSS_CATEGORY_SAMPLE: usize = 3;
    pub const RESULT_LIMIT: usize = 20;
    pub const EXTERNAL_CONTEXT_LIMIT: usize = 20;
    pub const DESCRIPTION_EXCERPT_CHARS: usize = 100;

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.intra_category_pair_cap == 0 {
            anyhow::bail!("generation.intra_category_pair_cap must be at least 1");
        }
        if self.cross_category_sample == 0 {
            anyhow::bail!("generation.cross_category_sample must be at least 1");
        }
        if self.result_limit == 0 {
            anyhow::bail!("generation.result_limit must be at least 1");
        }
        if self.external_context_limit == 0 {
            anyhow::bail!("generation.external_context_limit must be at least 1");
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            intra_category_pair_cap: Self::INTRA_CATEGORY_PAIR_CAP,
            cross_category_sample: Self::CROSS_CATEGORY_SAMPLE,
            result_limit: Self::RESULT_LIMIT,
            external_context_limit: Self::EXTERNAL_CONTEXT_LIMIT,
            description_excerpt_chars: Self::DESCRIPTION_EXCERPT_CHARS,
        }
    }
}

/// Which language model family backs the external idea source
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Deepseek,
    Openai,
    Anthropic,
    None,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Some(Self::Deepseek),
            "openai" => Some(Self::Openai),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "none" | "off" | "" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deepseek => "deepseek",
            Self::Openai => "openai",
            Self::Anthropic => "anthropic",
            Self::None => "none",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Self::Deepseek => "deepseek-chat",
            Self::Openai => "gpt-4",
            Self::Anthropic => "claude-3-sonnet-20240229",
            Self::None => "",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Self::Deepseek => "https://api.deepseek.com/v1",
            Self::Openai => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
            Self::None => "",
        }
    }

    fn api_key_var(&self) -> Option<&'static str> {
        match self {
            Self::Deepseek => Some("DEEPSEEK_API_KEY"),
            Self::Openai => Some("OPENAI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::None => None,
        }
    }

    fn model_var(&self) -> Option<&'static str> {
        match self {
            Self::Deepseek => Some("DEEPSEEK_MODEL"),
            Self::Openai => Some("OPENAI_MODEL"),
            Self::Anthropic => Some("ANTHROPIC_MODEL"),
            Self::None => None,
        }
    }
}

/// Language model provider settings. API keys only ever come from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Empty means the provider's default model
    pub model: String,
    /// Empty means the provider's public endpoint
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Deepseek,
            model: String::new(),
            base_url: String::new(),
            max_tokens: 4000,
            temperature: 0.8,
            timeout_ms: 120_000,
            api_key: None,
        }
    }
}

impl ProviderConfig {
    pub fn effective_model(&self) -> String {
        if self.model.trim().is_empty() {
            self.kind.default_model().to_string()
        } else {
            self.model.clone()
        }
    }

    pub fn effective_base_url(&self) -> String {
        let base = if self.base_url.trim().is_empty() {
            self.kind.default_base_url()
        } else {
            self.base_url.as_str()
        };
        base.trim_end_matches('/').to_string()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!("provider.temperature must be between 0.0 and 2.0");
        }
        if self.max_tokens == 0 {
            anyhow::bail!("provider.max_tokens must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub innovations_dir: PathBuf,
    pub results_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            innovations_dir: PathBuf::from("data/innovations"),
            results_dir: PathBuf::from("data/results"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: std::net::SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: std::net::SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "idea_forge=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses IDEA_FORGE_CONFIG environment variable or defaults to "idea_forge.toml"
    pub fn load() -> anyhow::Result<Self> {
        // IDEA_FORGE_ENV_FILE if set, else ./.env
        if let Ok(env_path) = std::env::var("IDEA_FORGE_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path = std::env::var("IDEA_FORGE_CONFIG")
            .unwrap_or_else(|_| "idea_forge.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup` (env-first)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("AI_PROVIDER") {
            match ProviderKind::parse(&raw) {
                Some(kind) => {
                    tracing::debug!("AI_PROVIDER env override applied: {}", kind.as_str());
                    self.provider.kind = kind;
                }
                None => tracing::warn!("Unknown AI_PROVIDER '{}', keeping configured provider", raw),
            }
        }

        if let Some(var) = self.provider.kind.model_var()
            && let Some(model) = lookup(var)
            && !model.trim().is_empty()
        {
            self.provider.model = model;
        }

        self.provider.api_key = self
            .provider
            .kind
            .api_key_var()
            .and_then(&lookup)
            .filter(|k| !k.trim().is_empty());

        if let Some(timeout) = lookup("IDEA_FORGE_PROVIDER_TIMEOUT_MS").and_then(|v| v.parse().ok())
        {
            self.provider.timeout_ms = timeout;
        }

        if let Some(dir) = lookup("IDEA_FORGE_INNOVATIONS_DIR") {
            self.storage.innovations_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("IDEA_FORGE_RESULTS_DIR") {
            self.storage.results_dir = PathBuf::from(dir);
        }

        if let Some(v) = lookup("IDEA_FORGE_HTTP_BIND") {
            match v.parse::<std::net::SocketAddr>() {
                Ok(bind) => self.server.bind = bind,
                Err(_) => tracing::warn!("Ignoring invalid IDEA_FORGE_HTTP_BIND '{}'", v),
            }
        }

        self.runtime.log_level =
            lookup("RUST_LOG").unwrap_or_else(|| RuntimeConfig::default().log_level);
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.generation.validate()?;
        self.provider.validate()?;
        Ok(())
    }
}
