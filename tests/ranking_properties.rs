//! Property tests over ranking and deterministic combination counts.

use idea_forge::categorizer::group_by_category;
use idea_forge::combination::CombinationGenerator;
use idea_forge::model::{GeneratedIdea, InnovationPoint};
use idea_forge::ranker::merge_and_rank;
use proptest::prelude::*;

fn arb_idea() -> impl Strategy<Value = GeneratedIdea> {
    // Coarse grid so ties show up often
    (0u8..5, 0u8..5).prop_map(|(n, f)| GeneratedIdea {
        title: String::new(),
        description: String::new(),
        source_innovations: Vec::new(),
        combination_type: "intra_category".into(),
        feasibility_score: f64::from(f) / 4.0,
        novelty_score: f64::from(n) / 4.0,
        impact_potential: 0.0,
        implementation_path: String::new(),
        research_directions: Vec::new(),
    })
}

fn tagged(ideas: Vec<GeneratedIdea>, offset: usize) -> Vec<GeneratedIdea> {
    ideas
        .into_iter()
        .enumerate()
        .map(|(i, mut idea)| {
            idea.title = format!("{:04}", i + offset);
            idea
        })
        .collect()
}

fn pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

proptest! {
    #[test]
    fn ranking_is_bounded_sorted_and_stable(
        deterministic in prop::collection::vec(arb_idea(), 0..30),
        external in prop::collection::vec(arb_idea(), 0..30),
        limit in 0usize..40,
    ) {
        let total = deterministic.len() + external.len();
        let offset = deterministic.len();
        let ranked = merge_and_rank(tagged(deterministic, 0), tagged(external, offset), limit);

        prop_assert_eq!(ranked.len(), total.min(limit));
        for idea in &ranked {
            prop_assert_eq!(idea.impact_potential, (idea.novelty_score + idea.feasibility_score) / 2.0);
        }
        for w in ranked.windows(2) {
            prop_assert!(w[0].impact_potential >= w[1].impact_potential);
            if w[0].impact_potential == w[1].impact_potential {
                // Titles carry the concatenation index
                prop_assert!(w[0].title < w[1].title);
            }
        }
    }

    #[test]
    fn combination_count_follows_category_sizes(
        sizes in prop::collection::vec(0usize..8, 1..5),
    ) {
        let points: Vec<InnovationPoint> = sizes
            .iter()
            .enumerate()
            .flat_map(|(c, &n)| {
                (0..n).map(move |i| InnovationPoint {
                    title: format!("c{}-p{}", c, i),
                    description: String::new(),
                    category: format!("c{}", c),
                    impact: String::new(),
                    methodology: String::new(),
                    novelty_score: 0.5,
                    confidence: 0.5,
                })
            })
            .collect();

        let groups = group_by_category(points.iter());
        let ideas = CombinationGenerator::default().generate(&groups);

        let present: Vec<usize> = sizes.iter().copied().filter(|&n| n > 0).collect();
        let intra: usize = present.iter().map(|&n| pairs(n).min(10)).sum();
        let mut cross = 0;
        for i in 0..present.len() {
            for j in (i + 1)..present.len() {
                cross += present[i].min(3) * present[j].min(3);
            }
        }
        prop_assert_eq!(ideas.len(), intra + cross);
        prop_assert!(ideas.iter().all(|idea| idea.source_innovations.len() == 2));
    }
}
