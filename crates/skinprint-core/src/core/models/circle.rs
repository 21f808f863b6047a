use serde::{Deserialize, Serialize};

/// A product the members of a circle recommend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CircleProduct {
    pub product_id: String,
    pub upvotes: u32,
    pub reason: String,
}

/// A community of users with similar ingredient experiences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Circle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Precomputed similarity to the current user, in percent.
    #[serde(default)]
    pub match_percentage: u8,
    #[serde(default)]
    pub top_liked_ingredients: Vec<String>,
    #[serde(default)]
    pub top_disliked_ingredients: Vec<String>,
    #[serde(default)]
    pub top_concerns: Vec<String>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub top_products: Vec<CircleProduct>,
}
