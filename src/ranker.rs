//! Merge and rank candidate ideas.

use std::cmp::Ordering;

use crate::model::GeneratedIdea;

/// Concatenate `deterministic` then `external`, recompute every `impact_potential` as the mean of
/// novelty and feasibility, stable-sort best first and keep at most `limit` ideas.
///
/// Ideas with equal scores keep their concatenation order, so deterministic candidates win ties.
pub fn merge_and_rank(
    deterministic: Vec<GeneratedIdea>,
    external: Vec<GeneratedIdea>,
    limit: usize,
) -> Vec<GeneratedIdea> {
    let mut ideas = deterministic;
    ideas.extend(external);

    for idea in ideas.iter_mut() {
        idea.impact_potential = idea.composite_score();
    }

    // sort_by is stable; -0.0 and 0.0 compare equal
    ideas.sort_by(|a, b| {
        b.impact_potential
            .partial_cmp(&a.impact_potential)
            .unwrap_or(Ordering::Equal)
    });
    ideas.truncate(limit);
    ideas
}
