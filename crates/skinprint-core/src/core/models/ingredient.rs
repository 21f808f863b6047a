use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngredientCategory {
    Active,
    Exfoliant,
    Hydrating,
    Barrier,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid ingredient category: '{0}'")]
pub struct ParseIngredientCategoryError(pub String);

impl FromStr for IngredientCategory {
    type Err = ParseIngredientCategoryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(IngredientCategory::Active),
            "exfoliant" => Ok(IngredientCategory::Exfoliant),
            "hydrating" => Ok(IngredientCategory::Hydrating),
            "barrier" => Ok(IngredientCategory::Barrier),
            _ => Err(ParseIngredientCategoryError(s.to_string())),
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                IngredientCategory::Active => "active",
                IngredientCategory::Exfoliant => "exfoliant",
                IngredientCategory::Hydrating => "hydrating",
                IngredientCategory::Barrier => "barrier",
            }
        )
    }
}

/// A skincare ingredient as held in the reference catalog.
///
/// `conflicts` lists the ids of ingredients this one should not be combined with. The
/// relation is meant to be symmetric but the data does not enforce it, so consumers must
/// check both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: IngredientCategory,
    /// Routine step this ingredient is usually delivered in (e.g. "serum").
    pub function: String,
    #[serde(default)]
    pub common_sensitivities: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub compatible_with: Vec<String>,
}

impl Ingredient {
    pub fn conflicts_with(&self, other_id: &str) -> bool {
        self.conflicts.iter().any(|id| id == other_id)
    }

    /// Case-insensitive match against either the display name or the id. The input is
    /// compared as given; callers trim user input.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.name.to_lowercase() == name || self.id.to_lowercase() == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retinol() -> Ingredient {
        Ingredient {
            id: "retinol".to_string(),
            name: "Retinol".to_string(),
            description: String::new(),
            category: IngredientCategory::Active,
            function: "serum".to_string(),
            common_sensitivities: vec![],
            conflicts: vec!["aha".to_string(), "bha".to_string()],
            compatible_with: vec!["ceramides".to_string()],
        }
    }

    #[test]
    fn conflicts_with_checks_only_the_own_list() {
        let ingredient = retinol();
        assert!(ingredient.conflicts_with("aha"));
        assert!(ingredient.conflicts_with("bha"));
        assert!(!ingredient.conflicts_with("ceramides"));
        assert!(!ingredient.conflicts_with("AHA"));
    }

    #[test]
    fn matches_name_is_case_insensitive_on_name_and_id() {
        let ingredient = retinol();
        assert!(ingredient.matches_name("RETINOL"));
        assert!(!ingredient.matches_name(" retinol "));
        assert!(!ingredient.matches_name("retin"));
    }

    #[test]
    fn category_parses_and_displays_round_trip() {
        for category in [
            IngredientCategory::Active,
            IngredientCategory::Exfoliant,
            IngredientCategory::Hydrating,
            IngredientCategory::Barrier,
        ] {
            assert_eq!(category.to_string().parse::<IngredientCategory>(), Ok(category));
        }
        assert!("humectant".parse::<IngredientCategory>().is_err());
    }
}
