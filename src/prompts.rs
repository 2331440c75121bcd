//! Prompt text sent to language-model idea sources.

use crate::model::InnovationDigest;

pub const IDEA_SYSTEM_PROMPT: &str = "You are an innovation research expert who proposes new research directions grounded in existing innovations.";

/// Characters of each innovation description quoted in the prompt
const PROMPT_DESCRIPTION_CHARS: usize = 200;

/// Build the user prompt asking for new ideas in the `generated_ideas` JSON shape
pub fn idea_generation_prompt(context: &[InnovationDigest], topic: &str) -> String {
    let innovations = context
        .iter()
        .map(|inv| {
            let excerpt: String = inv.description.chars().take(PROMPT_DESCRIPTION_CHARS).collect();
            format!(
                "- {}: {}... (category: {}, novelty: {})",
                inv.title, excerpt, inv.category, inv.novelty_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Based on the research topic and the existing innovations below, propose 5-10 new research directions and innovative ideas.

Research topic: {topic}

Existing innovations:
{innovations}

Analyze the patterns and trends across these innovations and propose new directions. Requirements:

1. Every idea has a clear title and a detailed description
2. Assess feasibility and potential impact
3. Provide an implementation path and research directions
4. Make sure each idea is novel and practical

Respond in JSON:

{{
    "generated_ideas": [
        {{
            "title": "Idea title",
            "description": "Detailed description",
            "source_innovations": ["Related innovation 1", "Related innovation 2"],
            "combination_type": "ai_generated",
            "feasibility_score": 0.8,
            "novelty_score": 0.9,
            "impact_potential": 0.85,
            "implementation_path": "Implementation path",
            "research_directions": ["Direction 1", "Direction 2"]
        }}
    ]
}}

Make sure the JSON is valid and every score is a number between 0 and 1.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_innovations_and_topic() {
        let context = vec![InnovationDigest {
            title: "Block sparsity".into(),
            description: "x".repeat(300),
            category: "architecture".into(),
            novelty_score: 0.75,
        }];
        let prompt = idea_generation_prompt(&context, "long-context transformers");

        assert!(prompt.contains("Research topic: long-context transformers"));
        assert!(prompt.contains("(category: architecture, novelty: 0.75)"));
        assert!(prompt.contains(&format!("- Block sparsity: {}...", "x".repeat(200))));
        assert!(!prompt.contains(&"x".repeat(201)));
        assert!(prompt.contains("\"generated_ideas\": ["));
    }
}
