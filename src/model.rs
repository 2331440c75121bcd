//! Data model shared by the engine and its I/O layers.
//! Field names are snake_case on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::deserializers::{de_text, de_unit_score, default_score};

/// Tag for ideas paired from two innovations of the same category
pub const INTRA_CATEGORY: &str = "intra_category";
/// Tag for ideas paired across two categories
pub const CROSS_CATEGORY: &str = "cross_category";
/// Default tag for ideas returned by an external source that did not set one
pub const AI_GENERATED: &str = "ai_generated";

/// One discrete claimed innovation extracted from a paper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InnovationPoint {
    #[serde(default, deserialize_with = "de_text")]
    pub title: String,
    #[serde(default, deserialize_with = "de_text")]
    pub description: String,
    #[serde(default, deserialize_with = "de_text")]
    pub category: String,
    #[serde(default, deserialize_with = "de_text")]
    pub impact: String,
    #[serde(default, deserialize_with = "de_text")]
    pub methodology: String,
    #[serde(default = "default_score", deserialize_with = "de_unit_score")]
    pub novelty_score: f64,
    #[serde(default = "default_score", deserialize_with = "de_unit_score")]
    pub confidence: f64,
}

/// The innovations extracted from one paper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InnovationSet {
    #[serde(default, deserialize_with = "de_text")]
    pub paper_title: String,
    #[serde(default, deserialize_with = "de_text")]
    pub paper_id: String,
    #[serde(default)]
    pub innovations: Vec<InnovationPoint>,
    #[serde(default, deserialize_with = "de_text")]
    pub summary: String,
    #[serde(default)]
    pub extraction_metadata: HashMap<String, Value>,
}

/// Reduced view of an innovation handed to an external idea source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InnovationDigest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub novelty_score: f64,
}

impl From<&InnovationPoint> for InnovationDigest {
    fn from(point: &InnovationPoint) -> Self {
        Self {
            title: point.title.clone(),
            description: point.description.clone(),
            category: point.category.clone(),
            novelty_score: point.novelty_score,
        }
    }
}

/// A candidate research idea
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedIdea {
    pub title: String,
    pub description: String,
    /// Titles of the innovations this idea came from
    pub source_innovations: Vec<String>,
    /// Open provenance tag; see [`INTRA_CATEGORY`], [`CROSS_CATEGORY`], [`AI_GENERATED`]
    pub combination_type: String,
    pub feasibility_score: f64,
    pub novelty_score: f64,
    /// Recomputed at ranking time from novelty and feasibility
    pub impact_potential: f64,
    pub implementation_path: String,
    pub research_directions: Vec<String>,
}

impl GeneratedIdea {
    /// Composite ranking score
    pub fn composite_score(&self) -> f64 {
        (self.novelty_score + self.feasibility_score) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationMetadata {
    pub total_innovations: usize,
    pub total_papers: usize,
    pub generation_method: String,
    pub deterministic_candidates: usize,
    pub external_candidates: usize,
    /// Name of the external source consulted, if any
    pub external_source: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// Output of one generation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdeaGenerationResult {
    pub topic: String,
    /// Rank order, best first
    pub generated_ideas: Vec<GeneratedIdea>,
    pub analysis_summary: String,
    pub generation_metadata: GenerationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn innovation_set_tolerates_sparse_records() {
        let set: InnovationSet = serde_json::from_value(json!({
            "paper_title": "Sparse Attention",
            "innovations": [
                {"title": "Block sparsity", "category": "architecture", "novelty_score": 3}
            ]
        }))
        .unwrap();

        assert_eq!(set.paper_id, "");
        assert!(set.extraction_metadata.is_empty());
        let point = &set.innovations[0];
        assert_eq!(point.title, "Block sparsity");
        assert_eq!(point.description, "");
        assert_eq!(point.novelty_score, 0.5);
        assert_eq!(point.confidence, 0.5);
    }

    #[test]
    fn composite_score_is_mean_of_novelty_and_feasibility() {
        let idea = GeneratedIdea {
            title: "t".into(),
            description: String::new(),
            source_innovations: vec![],
            combination_type: AI_GENERATED.into(),
            feasibility_score: 0.4,
            novelty_score: 0.8,
            impact_potential: 0.0,
            implementation_path: String::new(),
            research_directions: vec![],
        };
        assert_eq!(idea.composite_score(), (0.8 + 0.4) / 2.0);
    }
}
