use super::fingerprint::Fingerprint;
use crate::core::catalog::Catalog;
use crate::core::models::circle::Circle;
use crate::core::models::product::Product;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, warn};

/// Overlap scores at or above this count as a strong match.
pub const STRONG_MATCH: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Leaning {
    Liked,
    Disliked,
    Suspect,
    Neutral,
}

impl fmt::Display for Leaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Leaning::Liked => "liked",
                Leaning::Disliked => "disliked",
                Leaning::Suspect => "suspect",
                Leaning::Neutral => "neutral",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OverlapEntry {
    pub ingredient: String,
    pub name: String,
    pub user: Leaning,
    pub circle: Leaning,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CircleOverlap {
    pub circle_id: String,
    pub entries: Vec<OverlapEntry>,
    pub strong_matches: usize,
    pub conflicts: usize,
    pub match_percentage: u8,
}

fn user_leaning(fingerprint: &Fingerprint, ingredient: &str) -> Leaning {
    if fingerprint.liked.contains(ingredient) {
        Leaning::Liked
    } else if fingerprint.disliked.contains(ingredient) {
        Leaning::Disliked
    } else if fingerprint.suspects.contains(ingredient) {
        Leaning::Suspect
    } else {
        Leaning::Neutral
    }
}

fn circle_leaning(circle: &Circle, ingredient: &str) -> Leaning {
    if circle.top_liked_ingredients.iter().any(|i| i == ingredient) {
        Leaning::Liked
    } else if circle.top_disliked_ingredients.iter().any(|i| i == ingredient) {
        Leaning::Disliked
    } else {
        Leaning::Neutral
    }
}

fn overlap_score(user: Leaning, circle: Leaning) -> f64 {
    use Leaning::*;
    match (user, circle) {
        (Liked, Liked) => 1.0,
        (Disliked, Disliked) => 0.9,
        (Liked, Neutral) | (Neutral, Liked) => 0.3,
        (Disliked, Liked) | (Liked, Disliked) => -0.5,
        _ => 0.0,
    }
}

/// Per-ingredient agreement between the user and a circle.
///
/// Only ingredients either side likes or dislikes are considered; entries scoring zero are
/// dropped and the rest are sorted by score, highest first.
#[instrument(skip(catalog, fingerprint, circle), fields(circle = %circle.id))]
pub fn ingredient_overlap(
    catalog: &Catalog,
    fingerprint: &Fingerprint,
    circle: &Circle,
) -> CircleOverlap {
    let candidates = fingerprint
        .liked
        .iter()
        .chain(&circle.top_liked_ingredients)
        .chain(&fingerprint.disliked)
        .chain(&circle.top_disliked_ingredients)
        .unique();

    let mut entries: Vec<OverlapEntry> = candidates
        .filter_map(|ingredient| {
            let user = user_leaning(fingerprint, ingredient);
            let circle_side = circle_leaning(circle, ingredient);
            let score = overlap_score(user, circle_side);
            (score != 0.0).then(|| OverlapEntry {
                ingredient: ingredient.clone(),
                name: catalog.display_name(ingredient).to_string(),
                user,
                circle: circle_side,
                score,
            })
        })
        .collect();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    let strong_matches = entries.iter().filter(|e| e.score >= STRONG_MATCH).count();
    let conflicts = entries.iter().filter(|e| e.score < 0.0).count();
    debug!(strong_matches, conflicts, "Computed circle overlap.");

    CircleOverlap {
        circle_id: circle.id.clone(),
        entries,
        strong_matches,
        conflicts,
        match_percentage: circle.match_percentage,
    }
}

/// Circles ordered by their match with the user, best first.
pub fn ranked_circles(catalog: &Catalog) -> Vec<&Circle> {
    catalog
        .circles()
        .iter()
        .sorted_by(|a, b| b.match_percentage.cmp(&a.match_percentage))
        .collect()
}

/// The circle's recommended products that exist in the catalog, with their upvotes.
pub fn recommended_products<'a>(catalog: &'a Catalog, circle: &Circle) -> Vec<(&'a Product, u32)> {
    circle
        .top_products
        .iter()
        .filter_map(|rec| match catalog.product_by_id(&rec.product_id) {
            Some(product) => Some((product, rec.upvotes)),
            None => {
                warn!(
                    "Circle '{}' recommends unknown product '{}'",
                    circle.id, rec.product_id
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::preferences::UserPreferences;
    use std::collections::BTreeSet;

    fn fingerprint(liked: &[&str], disliked: &[&str], suspects: &[&str]) -> Fingerprint {
        let set = |v: &[&str]| -> BTreeSet<String> { v.iter().map(|s| s.to_string()).collect() };
        Fingerprint {
            liked: set(liked),
            disliked: set(disliked),
            suspects: set(suspects),
        }
    }

    #[test]
    fn scores_follow_leaning_pairs() {
        use Leaning::*;
        assert_eq!(overlap_score(Liked, Liked), 1.0);
        assert_eq!(overlap_score(Disliked, Disliked), 0.9);
        assert_eq!(overlap_score(Neutral, Liked), 0.3);
        assert_eq!(overlap_score(Liked, Disliked), -0.5);
        assert_eq!(overlap_score(Suspect, Disliked), 0.0);
        assert_eq!(overlap_score(Disliked, Neutral), 0.0);
    }

    #[test]
    fn overlap_with_sensitive_skin_circle() {
        let catalog = Catalog::builtin();
        let circle = catalog.circle_by_id("circle-1").unwrap();
        let fp = fingerprint(&["ceramides", "retinol"], &["bha"], &["aha"]);

        let overlap = ingredient_overlap(&catalog, &fp, circle);
        let scores: Vec<(&str, f64)> = overlap
            .entries
            .iter()
            .map(|e| (e.ingredient.as_str(), e.score))
            .collect();
        assert_eq!(
            scores,
            vec![
                ("ceramides", 1.0),
                ("bha", 0.9),
                ("hyaluronic-acid", 0.3),
                ("peptides", 0.3),
                ("retinol", -0.5),
            ]
        );
        assert_eq!(overlap.strong_matches, 2);
        assert_eq!(overlap.conflicts, 1);
        assert_eq!(overlap.match_percentage, 87);
        assert_eq!(overlap.entries[0].name, "Ceramides");
    }

    #[test]
    fn empty_fingerprint_sees_only_circle_likes() {
        let catalog = Catalog::builtin();
        let circle = catalog.circle_by_id("circle-3").unwrap();
        let overlap =
            ingredient_overlap(&catalog, &Fingerprint::from_preferences(&UserPreferences::new()), circle);
        assert_eq!(overlap.entries.len(), 3);
        assert!(overlap.entries.iter().all(|e| e.score == 0.3));
        assert_eq!(overlap.conflicts, 0);
    }

    #[test]
    fn circles_rank_by_match_percentage() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = ranked_circles(&catalog).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["circle-1", "circle-2", "circle-3"]);
    }

    #[test]
    fn recommended_products_resolve_against_catalog() {
        let catalog = Catalog::builtin();
        let circle = catalog.circle_by_id("circle-1").unwrap();
        let recs = recommended_products(&catalog, circle);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].0.id, "product-1");
        assert_eq!(recs[0].1, 89);
    }
}
