use super::compatibility::{Verdict, check_compatibility};
use crate::core::catalog::Catalog;
use crate::core::models::product::Product;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MatrixCell {
    pub ingredient1: String,
    pub ingredient2: String,
    pub verdict: Verdict,
    pub reason: String,
    /// Names of the products containing `ingredient1`.
    pub products1: Vec<String>,
    pub products2: Vec<String>,
}

impl MatrixCell {
    pub fn is_conflict(&self) -> bool {
        self.verdict == Verdict::Incompatible
    }
}

/// Upper triangle of the pairwise compatibility table for a set of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompatibilityMatrix {
    /// Unique ingredient ids in first-seen order.
    pub ingredients: Vec<String>,
    pub cells: Vec<MatrixCell>,
}

impl CompatibilityMatrix {
    pub fn build(catalog: &Catalog, products: &[Product]) -> Self {
        let ingredients: Vec<String> = products
            .iter()
            .flat_map(|p| p.ingredients.iter())
            .unique()
            .cloned()
            .collect();

        let containing = |ingredient: &str| -> Vec<String> {
            products
                .iter()
                .filter(|p| p.contains(ingredient))
                .map(|p| p.name.clone())
                .collect()
        };

        let cells = ingredients
            .iter()
            .tuple_combinations()
            .map(|(ing1, ing2)| {
                let result = check_compatibility(catalog, ing1, ing2);
                MatrixCell {
                    ingredient1: ing1.clone(),
                    ingredient2: ing2.clone(),
                    verdict: result.verdict,
                    reason: result.reason,
                    products1: containing(ing1),
                    products2: containing(ing2),
                }
            })
            .collect();

        Self { ingredients, cells }
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &MatrixCell> {
        self.cells.iter().filter(|cell| cell.is_conflict())
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts().count()
    }

    pub fn cell(&self, ingredient1: &str, ingredient2: &str) -> Option<&MatrixCell> {
        self.cells.iter().find(|cell| {
            (cell.ingredient1 == ingredient1 && cell.ingredient2 == ingredient2)
                || (cell.ingredient1 == ingredient2 && cell.ingredient2 == ingredient1)
        })
    }
}
