use super::compatibility::check_compatibility;
use super::messages::MessageTemplates;
use crate::core::catalog::Catalog;
use crate::core::models::preferences::UserPreferences;
use crate::core::models::product::Product;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Two ingredients of one list that should not be combined. Identifiers are kept exactly
/// as they appeared in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IngredientConflict {
    pub ingredient1: String,
    pub ingredient2: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SensitivityWarning {
    pub ingredient: String,
    pub name: String,
    pub reason: String,
}

/// An ingredient found in one of the user's preference sets. Used for both liked and
/// disliked matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IngredientMatch {
    pub ingredient: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProductAnalysis {
    pub product: Product,
    pub ingredients: Vec<String>,
    pub conflicts: Vec<IngredientConflict>,
    pub sensitivity_warnings: Vec<SensitivityWarning>,
    pub liked_ingredients: Vec<IngredientMatch>,
    pub disliked_ingredients: Vec<IngredientMatch>,
    pub has_issues: bool,
    pub has_liked_ingredients: bool,
}

/// A conflict between an ingredient of one product and an ingredient of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoutineConflict {
    pub product1: String,
    pub product2: String,
    pub ingredient1: String,
    pub ingredient2: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoutineAnalysis {
    pub products: Vec<Product>,
    pub product_analyses: Vec<ProductAnalysis>,
    pub routine_conflicts: Vec<RoutineConflict>,
    pub sensitivity_warnings: Vec<SensitivityWarning>,
    pub liked_ingredients: Vec<IngredientMatch>,
    pub disliked_ingredients: Vec<IngredientMatch>,
    pub has_issues: bool,
}

/// Checks every unordered pair `i < j` of the list exactly once.
pub fn analyze_ingredient_list<S: AsRef<str>>(
    catalog: &Catalog,
    ingredients: &[S],
) -> Vec<IngredientConflict> {
    ingredients
        .iter()
        .map(|s| s.as_ref())
        .tuple_combinations()
        .filter_map(|(a, b)| {
            let result = check_compatibility(catalog, a, b);
            (!result.is_compatible()).then(|| IngredientConflict {
                ingredient1: a.to_string(),
                ingredient2: b.to_string(),
                reason: result.reason,
            })
        })
        .collect()
}

fn matches_in<S: AsRef<str>>(
    catalog: &Catalog,
    ingredients: &[S],
    set: &BTreeSet<String>,
) -> impl Iterator<Item = IngredientMatch> {
    ingredients
        .iter()
        .map(|s| s.as_ref())
        .filter(move |id| set.contains(*id))
        .map(move |id| IngredientMatch {
            ingredient: id.to_string(),
            name: catalog.display_name(id).to_string(),
        })
}

/// One warning per occurrence of a sensitive ingredient, duplicates included.
pub fn check_sensitivities<S: AsRef<str>>(
    catalog: &Catalog,
    ingredients: &[S],
    sensitivities: &BTreeSet<String>,
) -> Vec<SensitivityWarning> {
    matches_in(catalog, ingredients, sensitivities)
        .map(|m| SensitivityWarning {
            ingredient: m.ingredient,
            name: m.name,
            reason: MessageTemplates::SENSITIVITY.to_string(),
        })
        .collect()
}

pub fn check_liked_ingredients<S: AsRef<str>>(
    catalog: &Catalog,
    ingredients: &[S],
    liked: &BTreeSet<String>,
) -> Vec<IngredientMatch> {
    matches_in(catalog, ingredients, liked).collect()
}

pub fn check_disliked_ingredients<S: AsRef<str>>(
    catalog: &Catalog,
    ingredients: &[S],
    disliked: &BTreeSet<String>,
) -> Vec<IngredientMatch> {
    matches_in(catalog, ingredients, disliked).collect()
}

/// Disliked matches are reported but do not count as issues.
pub fn analyze_product(
    catalog: &Catalog,
    product: &Product,
    preferences: &UserPreferences,
) -> ProductAnalysis {
    let ingredients = &product.ingredients;
    let conflicts = analyze_ingredient_list(catalog, ingredients);
    let sensitivity_warnings = check_sensitivities(catalog, ingredients, &preferences.sensitivities);
    let liked_ingredients = check_liked_ingredients(catalog, ingredients, &preferences.liked);
    let disliked_ingredients =
        check_disliked_ingredients(catalog, ingredients, &preferences.disliked);

    let has_issues = !conflicts.is_empty() || !sensitivity_warnings.is_empty();
    let has_liked_ingredients = !liked_ingredients.is_empty();
    debug!(
        product = %product.id,
        conflicts = conflicts.len(),
        warnings = sensitivity_warnings.len(),
        "Analyzed product."
    );

    ProductAnalysis {
        product: product.clone(),
        ingredients: ingredients.clone(),
        conflicts,
        sensitivity_warnings,
        liked_ingredients,
        disliked_ingredients,
        has_issues,
        has_liked_ingredients,
    }
}

/// Analyzes products used together.
///
/// Cross-product conflicts are checked for every product pair `i < j`, ingredient by
/// ingredient. Conflicts within a single product appear only in that product's analysis.
/// Preference checks run once over the concatenated ingredient lists.
#[instrument(skip_all, name = "routine_analysis", fields(products = products.len()))]
pub fn analyze_routine(
    catalog: &Catalog,
    products: &[Product],
    preferences: &UserPreferences,
) -> RoutineAnalysis {
    let product_analyses: Vec<ProductAnalysis> = products
        .iter()
        .map(|product| analyze_product(catalog, product, preferences))
        .collect();

    let all_ingredients: Vec<&str> = product_analyses
        .iter()
        .flat_map(|analysis| analysis.ingredients.iter().map(String::as_str))
        .collect();

    let routine_conflicts: Vec<RoutineConflict> = products
        .iter()
        .tuple_combinations()
        .flat_map(|(product1, product2)| {
            product1
                .ingredients
                .iter()
                .cartesian_product(product2.ingredients.iter())
                .filter_map(move |(ing1, ing2)| {
                    let result = check_compatibility(catalog, ing1, ing2);
                    (!result.is_compatible()).then(|| RoutineConflict {
                        product1: product1.name.clone(),
                        product2: product2.name.clone(),
                        ingredient1: ing1.clone(),
                        ingredient2: ing2.clone(),
                        reason: result.reason,
                    })
                })
        })
        .collect();

    let sensitivity_warnings =
        check_sensitivities(catalog, &all_ingredients, &preferences.sensitivities);
    let liked_ingredients = check_liked_ingredients(catalog, &all_ingredients, &preferences.liked);
    let disliked_ingredients =
        check_disliked_ingredients(catalog, &all_ingredients, &preferences.disliked);

    let has_issues = !routine_conflicts.is_empty() || !sensitivity_warnings.is_empty();
    debug!(
        conflicts = routine_conflicts.len(),
        warnings = sensitivity_warnings.len(),
        "Analyzed routine."
    );

    RoutineAnalysis {
        products: products.to_vec(),
        product_analyses,
        routine_conflicts,
        sensitivity_warnings,
        liked_ingredients,
        disliked_ingredients,
        has_issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, ingredients: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            brand: "Test".to_string(),
            function: "serum".to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn list_pairs_are_checked_once_in_index_order() {
        let catalog = Catalog::builtin();
        let conflicts = analyze_ingredient_list(&catalog, &["aha", "hyaluronic-acid", "bha", "retinol"]);
        let pairs: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.ingredient1.as_str(), c.ingredient2.as_str()))
            .collect();
        assert_eq!(pairs, vec![("aha", "bha"), ("aha", "retinol"), ("bha", "retinol")]);
    }

    #[test]
    fn conflict_keeps_original_list_strings() {
        let catalog = Catalog::builtin();
        let conflicts = analyze_ingredient_list(&catalog, &["Niacinamide", "vitamin-c"]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].ingredient1, "Niacinamide");
        assert_eq!(conflicts[0].ingredient2, "vitamin-c");
    }

    #[test]
    fn product_with_conflicting_pair_names_both_ingredients() {
        let catalog = Catalog::builtin();
        let analysis = analyze_product(
            &catalog,
            &product("p", "Mix", &["niacinamide", "vitamin-c"]),
            &UserPreferences::new(),
        );
        assert_eq!(analysis.conflicts.len(), 1);
        let reason = &analysis.conflicts[0].reason;
        assert!(reason.contains("Niacinamide"));
        assert!(reason.contains("Vitamin C (L-Ascorbic Acid)"));
        assert!(analysis.has_issues);
        assert!(!analysis.has_liked_ingredients);
    }

    #[test]
    fn gentle_product_has_no_conflicts() {
        let catalog = Catalog::builtin();
        let analysis = analyze_product(
            &catalog,
            &product("p", "Gentle", &["hyaluronic-acid", "ceramides"]),
            &UserPreferences::new(),
        );
        assert!(analysis.conflicts.is_empty());
        assert!(!analysis.has_issues);
    }

    #[test]
    fn sensitivity_warning_per_occurrence() {
        let catalog = Catalog::builtin();
        let warnings = check_sensitivities(
            &catalog,
            &["retinol", "ceramides", "retinol", "mystery"],
            &set(&["retinol", "mystery"]),
        );
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].name, "Retinol");
        assert_eq!(warnings[2].name, "mystery");
        assert_eq!(
            warnings[0].reason,
            "You have marked this ingredient as causing sensitivity or allergies"
        );
    }

    #[test]
    fn preferences_drive_issue_and_liked_flags() {
        let catalog = Catalog::builtin();
        let mut prefs = UserPreferences::new();
        prefs.add_liked("ceramides");
        prefs.add_disliked("hyaluronic-acid");
        let gentle = product("p", "Gentle", &["hyaluronic-acid", "ceramides"]);

        let analysis = analyze_product(&catalog, &gentle, &prefs);
        assert!(analysis.has_liked_ingredients);
        assert_eq!(analysis.liked_ingredients[0].name, "Ceramides");
        assert_eq!(analysis.disliked_ingredients.len(), 1);
        assert!(!analysis.has_issues);

        prefs.add_sensitivity("ceramides");
        let analysis = analyze_product(&catalog, &gentle, &prefs);
        assert!(analysis.has_issues);
    }

    #[test]
    fn routine_conflict_names_both_products() {
        let catalog = Catalog::builtin();
        let products = vec![
            product("a", "Product A", &["niacinamide"]),
            product("b", "Product B", &["vitamin-c"]),
        ];
        let analysis = analyze_routine(&catalog, &products, &UserPreferences::new());
        assert_eq!(analysis.routine_conflicts.len(), 1);
        let conflict = &analysis.routine_conflicts[0];
        assert_eq!(conflict.product1, "Product A");
        assert_eq!(conflict.product2, "Product B");
        assert_eq!(conflict.ingredient1, "niacinamide");
        assert_eq!(conflict.ingredient2, "vitamin-c");
        assert!(analysis.has_issues);
        assert!(analysis.product_analyses.iter().all(|a| !a.has_issues));
    }

    #[test]
    fn in_product_conflicts_stay_out_of_routine_conflicts() {
        let catalog = Catalog::builtin();
        let products = vec![
            product("a", "Mix", &["niacinamide", "vitamin-c"]),
            product("b", "Moisturizer", &["ceramides"]),
        ];
        let analysis = analyze_routine(&catalog, &products, &UserPreferences::new());
        assert!(analysis.routine_conflicts.is_empty());
        assert!(analysis.product_analyses[0].has_issues);
        assert!(!analysis.has_issues);
    }

    #[test]
    fn routine_aggregates_preference_matches_over_all_products() {
        let catalog = Catalog::builtin();
        let mut prefs = UserPreferences::new();
        prefs.add_sensitivity("hyaluronic-acid");
        prefs.add_liked("ceramides");
        let products = vec![
            product("a", "Cleanser", &["hyaluronic-acid", "ceramides"]),
            product("b", "Serum", &["hyaluronic-acid", "peptides"]),
        ];
        let analysis = analyze_routine(&catalog, &products, &prefs);
        assert_eq!(analysis.sensitivity_warnings.len(), 2);
        assert_eq!(analysis.liked_ingredients.len(), 1);
        assert!(analysis.has_issues);
    }

    #[test]
    fn empty_routine_is_clean() {
        let catalog = Catalog::builtin();
        let analysis = analyze_routine(&catalog, &[], &UserPreferences::new());
        assert!(analysis.product_analyses.is_empty());
        assert!(!analysis.has_issues);
    }

    #[test]
    fn analysis_is_idempotent() {
        let catalog = Catalog::builtin();
        let mut prefs = UserPreferences::new();
        prefs.add_sensitivity("retinol");
        let products: Vec<Product> = catalog.products().to_vec();
        let first = analyze_routine(&catalog, &products, &prefs);
        let second = analyze_routine(&catalog, &products, &prefs);
        assert_eq!(first, second);
    }
}
