//! # Catalog Module
//!
//! The reference catalog of ingredients, products and community circles.
//!
//! ## Overview
//!
//! Every analysis resolves ingredient identifiers against a [`Catalog`]. The catalog is
//! immutable once built and is passed by reference into the engine, so the same catalog
//! can serve any number of analyses.
//!
//! - [`Catalog::builtin`] returns the bundled reference data.
//! - [`Catalog::load`] reads a replacement catalog from a TOML file with `[[ingredients]]`,
//!   `[[products]]` and `[[circles]]` tables.
//!
//! ```ignore
//! use skinprint::core::catalog::Catalog;
//!
//! let catalog = Catalog::load(Path::new("catalog.toml"))?;
//! for issue in catalog.validate() {
//!     eprintln!("{}", issue);
//! }
//! ```

mod builtin;

use crate::core::models::circle::Circle;
use crate::core::models::ingredient::Ingredient;
use crate::core::models::product::Product;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    circles: Vec<Circle>,
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Duplicate ingredient id '{0}' in catalog")]
    DuplicateIngredient(String),
    #[error("Duplicate product id '{0}' in catalog")]
    DuplicateProduct(String),
}

/// A consistency problem found by [`Catalog::validate`]. Issues are diagnostics only;
/// the analyzer tolerates all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// `ingredient` lists `conflicts_with` but not the other way round.
    AsymmetricConflict {
        ingredient: String,
        conflicts_with: String,
    },
    /// An ingredient or product refers to an ingredient id the catalog does not hold.
    UnknownReference {
        owner: String,
        field: &'static str,
        reference: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::AsymmetricConflict {
                ingredient,
                conflicts_with,
            } => write!(
                f,
                "'{}' lists a conflict with '{}', but '{}' does not list '{}'",
                ingredient, conflicts_with, conflicts_with, ingredient
            ),
            CatalogIssue::UnknownReference {
                owner,
                field,
                reference,
            } => write!(
                f,
                "'{}' refers to unknown ingredient '{}' in '{}'",
                owner, reference, field
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    products: Vec<Product>,
    circles: Vec<Circle>,
    ingredient_index: HashMap<String, usize>,
    product_index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ingredient or product ids.
    pub fn new(
        ingredients: Vec<Ingredient>,
        products: Vec<Product>,
        circles: Vec<Circle>,
    ) -> Result<Self, CatalogLoadError> {
        let mut ingredient_index = HashMap::with_capacity(ingredients.len());
        for (idx, ingredient) in ingredients.iter().enumerate() {
            if ingredient_index.insert(ingredient.id.clone(), idx).is_some() {
                return Err(CatalogLoadError::DuplicateIngredient(ingredient.id.clone()));
            }
        }
        let mut product_index = HashMap::with_capacity(products.len());
        for (idx, product) in products.iter().enumerate() {
            if product_index.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogLoadError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Self {
            ingredients,
            products,
            circles,
            ingredient_index,
            product_index,
        })
    }

    /// The bundled reference data: nine ingredients, eight products and three circles.
    pub fn builtin() -> Self {
        let ingredients = builtin::ingredients();
        let products = builtin::products();
        let ingredient_index = ingredients
            .iter()
            .enumerate()
            .map(|(idx, ingredient)| (ingredient.id.clone(), idx))
            .collect();
        let product_index = products
            .iter()
            .enumerate()
            .map(|(idx, product)| (product.id.clone(), idx))
            .collect();
        Self {
            ingredients,
            products,
            circles: builtin::circles(),
            ingredient_index,
            product_index,
        }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        debug!("Loading catalog from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| CatalogLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let catalog = Self::new(file.ingredients, file.products, file.circles)?;
        for issue in catalog.validate() {
            warn!("Catalog {:?}: {}", path, issue);
        }
        Ok(catalog)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn ingredient_by_id(&self, id: &str) -> Option<&Ingredient> {
        self.ingredient_index
            .get(id)
            .map(|&idx| &self.ingredients[idx])
    }

    /// Case-insensitive lookup on the display name or the id.
    pub fn ingredient_by_name(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|ing| ing.matches_name(name))
    }

    /// Resolves an identifier by exact id first, then by name.
    pub fn resolve_ingredient(&self, identifier: &str) -> Option<&Ingredient> {
        self.ingredient_by_id(identifier)
            .or_else(|| self.ingredient_by_name(identifier))
    }

    /// Display name for an identifier, or the identifier itself when it does not resolve.
    pub fn display_name<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.resolve_ingredient(identifier)
            .map(|ing| ing.name.as_str())
            .unwrap_or(identifier)
    }

    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.product_index.get(id).map(|&idx| &self.products[idx])
    }

    pub fn circle_by_id(&self, id: &str) -> Option<&Circle> {
        self.circles.iter().find(|circle| circle.id == id)
    }

    /// Case-insensitive substring search over name, id and description, in catalog order.
    pub fn search_ingredients(&self, query: &str) -> Vec<&Ingredient> {
        let query = query.to_lowercase();
        self.ingredients
            .iter()
            .filter(|ing| {
                ing.name.to_lowercase().contains(&query)
                    || ing.id.to_lowercase().contains(&query)
                    || ing.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Case-insensitive substring search over name, brand and description, in catalog order.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.brand.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for ingredient in &self.ingredients {
            for other_id in &ingredient.conflicts {
                match self.ingredient_by_id(other_id) {
                    Some(other) if !other.conflicts_with(&ingredient.id) => {
                        issues.push(CatalogIssue::AsymmetricConflict {
                            ingredient: ingredient.id.clone(),
                            conflicts_with: other_id.clone(),
                        });
                    }
                    Some(_) => {}
                    None => issues.push(CatalogIssue::UnknownReference {
                        owner: ingredient.id.clone(),
                        field: "conflicts",
                        reference: other_id.clone(),
                    }),
                }
            }
            for other_id in &ingredient.compatible_with {
                if self.ingredient_by_id(other_id).is_none() {
                    issues.push(CatalogIssue::UnknownReference {
                        owner: ingredient.id.clone(),
                        field: "compatible-with",
                        reference: other_id.clone(),
                    });
                }
            }
        }

        for product in &self.products {
            for ingredient_id in &product.ingredients {
                if self.ingredient_by_id(ingredient_id).is_none() {
                    issues.push(CatalogIssue::UnknownReference {
                        owner: product.id.clone(),
                        field: "ingredients",
                        reference: ingredient_id.clone(),
                    });
                }
            }
        }

        issues
    }
}
