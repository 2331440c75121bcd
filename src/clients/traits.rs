use async_trait::async_trait;
use thiserror::Error;

use crate::model::InnovationDigest;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("idea source timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("http error: {0}")]
    Http(String),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("empty response from provider")]
    EmptyResponse,
}

/// Capability that proposes ideas for a topic from a bounded set of innovation digests.
///
/// Implementations return the raw model text; decoding happens in [`crate::payload`].
#[async_trait]
pub trait ExternalIdeaSource: Send + Sync {
    /// Provider label recorded in generation metadata
    fn name(&self) -> &str;

    async fn generate(
        &self,
        context: &[InnovationDigest],
        topic: &str,
    ) -> Result<String, SourceError>;
}
