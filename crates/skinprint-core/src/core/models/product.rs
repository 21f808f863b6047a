use serde::{Deserialize, Serialize};

/// A product as held in the reference catalog, or synthesized from a scanned label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub function: String,
    /// Ingredient ids in label order.
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn contains(&self, ingredient_id: &str) -> bool {
        self.ingredients.iter().any(|id| id == ingredient_id)
    }
}
