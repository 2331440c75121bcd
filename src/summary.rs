//! Aggregate report over a generation run.

use indexmap::IndexMap;
use std::fmt;

use crate::model::{GeneratedIdea, InnovationPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_innovations: usize,
    pub total_ideas: usize,
    /// Innovation category → count, first-seen order
    pub category_distribution: IndexMap<String, usize>,
    /// Combination type → count over the final ideas, first-seen order
    pub combination_distribution: IndexMap<String, usize>,
    /// `None` when there are no ideas
    pub mean_novelty: Option<f64>,
    pub mean_feasibility: Option<f64>,
}

impl SummaryStats {
    pub fn compute<'a, I>(innovations: I, ideas: &[GeneratedIdea]) -> Self
    where
        I: IntoIterator<Item = &'a InnovationPoint>,
    {
        let mut total_innovations = 0;
        let mut category_distribution = IndexMap::new();
        for point in innovations {
            total_innovations += 1;
            *category_distribution
                .entry(point.category.clone())
                .or_insert(0) += 1;
        }

        let mut combination_distribution = IndexMap::new();
        for idea in ideas {
            *combination_distribution
                .entry(idea.combination_type.clone())
                .or_insert(0) += 1;
        }

        Self {
            total_innovations,
            total_ideas: ideas.len(),
            category_distribution,
            combination_distribution,
            mean_novelty: mean(ideas.iter().map(|i| i.novelty_score)),
            mean_feasibility: mean(ideas.iter().map(|i| i.feasibility_score)),
        }
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    Some(values.sum::<f64>() / n as f64)
}

fn write_distribution(f: &mut fmt::Formatter<'_>, dist: &IndexMap<String, usize>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (label, count)) in dist.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", label, count)?;
    }
    f.write_str("}")
}

fn write_mean(f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{:.2}", v),
        None => f.write_str("N/A"),
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis summary:")?;
        writeln!(f, "- Innovations analyzed: {}", self.total_innovations)?;
        writeln!(f, "- Ideas generated: {}", self.total_ideas)?;
        write!(f, "- Innovation categories: ")?;
        write_distribution(f, &self.category_distribution)?;
        writeln!(f)?;
        write!(f, "- Idea types: ")?;
        write_distribution(f, &self.combination_distribution)?;
        writeln!(f)?;
        write!(f, "- Mean novelty score: ")?;
        write_mean(f, self.mean_novelty)?;
        writeln!(f)?;
        write!(f, "- Mean feasibility score: ")?;
        write_mean(f, self.mean_feasibility)?;
        writeln!(f)
    }
}

/// Render the textual analysis summary for a run
pub fn build_summary<'a, I>(innovations: I, ideas: &[GeneratedIdea]) -> String
where
    I: IntoIterator<Item = &'a InnovationPoint>,
{
    SummaryStats::compute(innovations, ideas).to_string()
}
