//! Groups innovation points by their category label.

use indexmap::IndexMap;

use crate::model::InnovationPoint;

/// Category label → points, both in first-seen order
pub type CategoryGroups<'a> = IndexMap<&'a str, Vec<&'a InnovationPoint>>;

/// Partition `points` by category, preserving insertion order of categories and of points
/// within each category.
pub fn group_by_category<'a, I>(points: I) -> CategoryGroups<'a>
where
    I: IntoIterator<Item = &'a InnovationPoint>,
{
    let mut groups: CategoryGroups<'a> = IndexMap::new();
    for point in points {
        groups.entry(point.category.as_str()).or_default().push(point);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(title: &str, category: &str) -> InnovationPoint {
        InnovationPoint {
            title: title.into(),
            description: String::new(),
            category: category.into(),
            impact: String::new(),
            methodology: String::new(),
            novelty_score: 0.5,
            confidence: 0.5,
        }
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = group_by_category(std::iter::empty::<&InnovationPoint>());
        assert!(groups.is_empty());
    }

    #[test]
    fn keeps_first_seen_category_order() {
        let points = vec![
            point("a", "method"),
            point("b", "data"),
            point("c", "method"),
            point("d", "theory"),
            point("e", "data"),
        ];
        let groups = group_by_category(&points);

        let categories: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(categories, vec!["method", "data", "theory"]);

        let method: Vec<&str> = groups["method"].iter().map(|p| p.title.as_str()).collect();
        assert_eq!(method, vec!["a", "c"]);
        let data: Vec<&str> = groups["data"].iter().map(|p| p.title.as_str()).collect();
        assert_eq!(data, vec!["b", "e"]);
    }
}
