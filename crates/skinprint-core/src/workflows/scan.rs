use crate::core::catalog::Catalog;
use crate::core::models::preferences::UserPreferences;
use crate::core::models::product::Product;
use crate::engine::analyzer::{ProductAnalysis, analyze_product};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const PRODUCT_MATCH_CONFIDENCE: f64 = 0.95;
pub const TEXT_EXTRACTION_CONFIDENCE: f64 = 0.75;

const SCANNED_PRODUCT_ID: &str = "scanned-product";
const FALLBACK_PRODUCT_NAME: &str = "Detected Product";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMethod {
    /// The file name identified a catalog product.
    ProductMatch,
    /// Ingredients were recognized in the label text.
    TextExtraction,
}

impl fmt::Display for ScanMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ScanMethod::ProductMatch => "product-match",
                ScanMethod::TextExtraction => "text-extraction",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScanResult {
    pub product: Product,
    pub ingredients: Vec<String>,
    pub confidence: f64,
    pub method: ScanMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScanAnalysis {
    pub scan: ScanResult,
    pub analysis: ProductAnalysis,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Nothing to scan: provide a file name or label text")]
    NoInput,
    #[error("No known product or ingredient was recognized")]
    NothingRecognized,
}

/// Everything before the first `.`, matching how label photos are usually named.
fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Turns a file name like `"noni_ampoule-front.jpg"` into `"noni ampoule front"`.
pub fn extract_product_name(file_name: &str) -> String {
    file_stem(file_name).replace(['_', '-'], " ").trim().to_string()
}

fn match_product<'a>(catalog: &'a Catalog, file_name: &str) -> Option<&'a Product> {
    let file_name = file_name.to_lowercase();
    let stem = file_stem(&file_name);
    catalog.products().iter().find(|product| {
        let name = product.name.to_lowercase();
        let brand = product.brand.to_lowercase();
        file_name.contains(&name)
            || file_name.contains(&brand)
            || (!stem.is_empty() && (name.contains(stem) || brand.contains(stem)))
    })
}

/// Catalog ingredients mentioned in `text`, in catalog order, each at most once.
pub fn extract_ingredients(catalog: &Catalog, text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    catalog
        .ingredients()
        .iter()
        .filter(|ingredient| {
            let id = ingredient.id.to_lowercase();
            text.contains(&ingredient.name.to_lowercase())
                || text.contains(&id)
                || text.contains(&id.replace('-', " "))
        })
        .map(|ingredient| ingredient.id.clone())
        .collect()
}

/// Identifies a product from a label photo's file name and/or text already extracted from it.
///
/// A file name that names a catalog product wins. Otherwise the label text is searched for
/// catalog ingredients and a product is synthesized around them.
#[instrument(skip(catalog, text), name = "scan_workflow")]
pub fn scan_label(
    catalog: &Catalog,
    file_name: Option<&str>,
    text: Option<&str>,
) -> Result<ScanResult, ScanError> {
    let file_name = file_name.map(str::trim).filter(|s| !s.is_empty());
    let text = text.filter(|s| !s.trim().is_empty());
    if file_name.is_none() && text.is_none() {
        return Err(ScanError::NoInput);
    }

    if let Some(product) = file_name.and_then(|name| match_product(catalog, name)) {
        info!(product = %product.id, "Label matched a catalog product.");
        return Ok(ScanResult {
            product: product.clone(),
            ingredients: product.ingredients.clone(),
            confidence: PRODUCT_MATCH_CONFIDENCE,
            method: ScanMethod::ProductMatch,
        });
    }

    let ingredients = text
        .map(|text| extract_ingredients(catalog, text))
        .unwrap_or_default();
    if ingredients.is_empty() {
        debug!("Neither the file name nor the label text matched the catalog.");
        return Err(ScanError::NothingRecognized);
    }

    let name = file_name
        .map(extract_product_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_PRODUCT_NAME.to_string());
    info!(ingredients = ingredients.len(), "Extracted ingredients from label text.");

    Ok(ScanResult {
        product: Product {
            id: SCANNED_PRODUCT_ID.to_string(),
            name,
            brand: "Unknown".to_string(),
            function: "serum".to_string(),
            ingredients: ingredients.clone(),
            description: String::new(),
        },
        ingredients,
        confidence: TEXT_EXTRACTION_CONFIDENCE,
        method: ScanMethod::TextExtraction,
    })
}

pub fn scan_and_analyze(
    catalog: &Catalog,
    file_name: Option<&str>,
    text: Option<&str>,
    preferences: &UserPreferences,
) -> Result<ScanAnalysis, ScanError> {
    let scan = scan_label(catalog, file_name, text)?;
    let analysis = analyze_product(catalog, &scan.product, preferences);
    Ok(ScanAnalysis { scan, analysis })
}
