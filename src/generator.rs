//! Idea generation pipeline: collect → guard → combine → external → rank → summarize.

use std::sync::Arc;

use chrono::Utc;

use crate::categorizer::group_by_category;
use crate::clients::ExternalIdeaSource;
use crate::combination::CombinationGenerator;
use crate::config::GenerationConfig;
use crate::model::{
    GeneratedIdea, GenerationMetadata, IdeaGenerationResult, InnovationDigest, InnovationPoint,
    InnovationSet,
};
use crate::payload::parse_generated_ideas;
use crate::ranker::merge_and_rank;
use crate::summary::build_summary;

const GENERATION_METHOD: &str = "combination_and_ai";

/// Turns innovation sets into ranked research ideas.
///
/// Holds only configuration and an optional shared idea source, so one instance can serve
/// concurrent callers.
pub struct IdeaGenerator {
    config: GenerationConfig,
    combinations: CombinationGenerator,
    source: Option<Arc<dyn ExternalIdeaSource>>,
}

impl IdeaGenerator {
    pub fn new(config: GenerationConfig, source: Option<Arc<dyn ExternalIdeaSource>>) -> Self {
        Self {
            combinations: CombinationGenerator::new(&config),
            config,
            source,
        }
    }

    /// Generator that never consults an external source
    pub fn deterministic(config: GenerationConfig) -> Self {
        Self::new(config, None)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_deref().map(|s| s.name())
    }

    /// Generate ranked ideas for `topic`.
    ///
    /// Returns `None` when the sets hold no innovation points at all. External source failures
    /// are logged and treated as zero external ideas.
    pub async fn generate(
        &self,
        innovation_sets: &[InnovationSet],
        topic: &str,
    ) -> Option<IdeaGenerationResult> {
        tracing::info!(
            papers = innovation_sets.len(),
            topic,
            "generating ideas from innovation sets"
        );

        let innovations: Vec<&InnovationPoint> = innovation_sets
            .iter()
            .flat_map(|set| set.innovations.iter())
            .collect();

        if innovations.is_empty() {
            tracing::error!("no innovation points available, nothing to generate from");
            return None;
        }

        let groups = group_by_category(innovations.iter().copied());
        let deterministic = self.combinations.generate(&groups);
        let external = self.external_ideas(&innovations, topic).await;

        let deterministic_candidates = deterministic.len();
        let external_candidates = external.len();
        let ideas = merge_and_rank(deterministic, external, self.config.result_limit);

        let analysis_summary = build_summary(innovations.iter().copied(), &ideas);

        tracing::info!(
            innovations = innovations.len(),
            deterministic_candidates,
            external_candidates,
            kept = ideas.len(),
            "idea generation complete"
        );

        Some(IdeaGenerationResult {
            topic: topic.to_string(),
            generated_ideas: ideas,
            analysis_summary,
            generation_metadata: GenerationMetadata {
                total_innovations: innovations.len(),
                total_papers: innovation_sets.len(),
                generation_method: GENERATION_METHOD.to_string(),
                deterministic_candidates,
                external_candidates,
                external_source: self.source_name().map(str::to_string),
                generated_at: Utc::now(),
            },
        })
    }

    async fn external_ideas(
        &self,
        innovations: &[&InnovationPoint],
        topic: &str,
    ) -> Vec<GeneratedIdea> {
        let Some(source) = self.source.as_ref() else {
            tracing::warn!("external idea source unavailable, skipping");
            return Vec::new();
        };

        let context: Vec<InnovationDigest> = innovations
            .iter()
            .take(self.config.external_context_limit)
            .map(|p| InnovationDigest::from(*p))
            .collect();

        let text = match source.generate(&context, topic).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "external idea source failed");
                return Vec::new();
            }
        };

        match parse_generated_ideas(&text) {
            Ok(ideas) => {
                tracing::debug!(count = ideas.len(), "external ideas decoded");
                ideas
            }
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "could not decode external ideas");
                Vec::new()
            }
        }
    }
}
