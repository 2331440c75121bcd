//! Deterministic pairing of innovation points into candidate ideas.
//!
//! Two passes run over the category groups:
//! - intra-category: unordered pairs inside one category, in `(i, j)` with `i < j` order,
//!   capped per category
//! - cross-category: for every category pair `(i, j)` with `i < j`, the full product of the
//!   leading points of both categories
//!
//! No external service is involved and the output order is a pure function of the input order.

use crate::categorizer::CategoryGroups;
use crate::config::GenerationConfig;
use crate::model::{CROSS_CATEGORY, GeneratedIdea, INTRA_CATEGORY, InnovationPoint};

const FEASIBILITY_FACTOR: f64 = 0.8;
const NOVELTY_FACTOR: f64 = 1.2;
const IMPLEMENTATION_PLACEHOLDER: &str = "Requires further research and experimental validation";

pub struct CombinationGenerator {
    intra_category_pair_cap: usize,
    cross_category_sample: usize,
    description_excerpt_chars: usize,
}

impl Default for CombinationGenerator {
    fn default() -> Self {
        Self::new(&GenerationConfig::default())
    }
}

impl CombinationGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            intra_category_pair_cap: config.intra_category_pair_cap,
            cross_category_sample: config.cross_category_sample,
            description_excerpt_chars: config.description_excerpt_chars,
        }
    }

    /// Run both passes; intra-category ideas come first.
    pub fn generate(&self, groups: &CategoryGroups<'_>) -> Vec<GeneratedIdea> {
        let mut ideas = self.intra_category(groups);
        ideas.extend(self.cross_category(groups));
        tracing::debug!(
            categories = groups.len(),
            ideas = ideas.len(),
            "deterministic combinations generated"
        );
        ideas
    }

    pub fn intra_category(&self, groups: &CategoryGroups<'_>) -> Vec<GeneratedIdea> {
        let mut ideas = Vec::new();
        for points in groups.values().filter(|points| points.len() >= 2) {
            ideas.extend(
                unordered_pairs(points)
                    .take(self.intra_category_pair_cap)
                    .filter_map(|(a, b)| self.combine(&[a, b], INTRA_CATEGORY)),
            );
        }
        ideas
    }

    pub fn cross_category(&self, groups: &CategoryGroups<'_>) -> Vec<GeneratedIdea> {
        let mut ideas = Vec::new();
        if groups.len() < 2 {
            return ideas;
        }

        let categories: Vec<&Vec<&InnovationPoint>> = groups.values().collect();
        for i in 0..categories.len() {
            for j in (i + 1)..categories.len() {
                let left = leading(categories[i], self.cross_category_sample);
                let right = leading(categories[j], self.cross_category_sample);
                for &a in left {
                    for &b in right {
                        if let Some(idea) = self.combine(&[a, b], CROSS_CATEGORY) {
                            ideas.push(idea);
                        }
                    }
                }
            }
        }
        ideas
    }

    /// Build one idea from a group of points. Fewer than two points yields `None`.
    pub fn combine(
        &self,
        points: &[&InnovationPoint],
        combination_type: &str,
    ) -> Option<GeneratedIdea> {
        if points.len() < 2 {
            return None;
        }

        let count = points.len() as f64;
        let avg_novelty = points.iter().map(|p| p.novelty_score).sum::<f64>() / count;
        let avg_confidence = points.iter().map(|p| p.confidence).sum::<f64>() / count;

        let titles: Vec<String> = points.iter().map(|p| p.title.clone()).collect();
        let title = format!("Combined: {}", titles[..2].join(" + "));

        let mut description = String::from("Combines the following innovations:");
        for point in points {
            let excerpt: String = point
                .description
                .chars()
                .take(self.description_excerpt_chars)
                .collect();
            description.push_str(&format!("\n- {}: {}...", point.title, excerpt));
        }

        let research_directions = titles
            .iter()
            .map(|t| format!("Build on the approach of {}", t))
            .collect();

        Some(GeneratedIdea {
            title,
            description,
            source_innovations: titles,
            combination_type: combination_type.to_string(),
            feasibility_score: avg_confidence * FEASIBILITY_FACTOR,
            // may exceed 1.0; left unclamped
            novelty_score: avg_novelty * NOVELTY_FACTOR,
            // provisional, replaced during ranking
            impact_potential: (avg_novelty + avg_confidence) / 2.0,
            implementation_path: IMPLEMENTATION_PLACEHOLDER.to_string(),
            research_directions,
        })
    }
}

fn leading<'s, 'a>(points: &'s [&'a InnovationPoint], n: usize) -> &'s [&'a InnovationPoint] {
    &points[..points.len().min(n)]
}

/// Lazily yields `(points[i], points[j])` for `i < j` in lexicographic order
fn unordered_pairs<'s, 'a>(
    points: &'s [&'a InnovationPoint],
) -> impl Iterator<Item = (&'a InnovationPoint, &'a InnovationPoint)> + 's {
    (0..points.len())
        .flat_map(move |i| ((i + 1)..points.len()).map(move |j| (points[i], points[j])))
}
