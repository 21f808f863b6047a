use super::AppContext;
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output;
use skinprint::core::catalog::Catalog;
use skinprint::core::models::product::Product;
use skinprint::engine::analyzer;
use tracing::{info, warn};

const AD_HOC_PRODUCT_ID: &str = "ingredient-list";

pub fn run(args: AnalyzeArgs, ctx: &AppContext) -> Result<()> {
    let product = match (args.product, args.ingredients) {
        (Some(id), _) => ctx.product(&id)?.clone(),
        (None, Some(ingredients)) => ad_hoc_product(&ctx.catalog, &ingredients),
        (None, None) => {
            return Err(CliError::Argument(
                "Provide either --product or --ingredients".to_string(),
            ));
        }
    };

    info!(product = %product.id, "Analyzing {} ingredient(s).", product.ingredients.len());
    let analysis = analyzer::analyze_product(&ctx.catalog, &product, &ctx.preferences());
    output::emit(ctx.format, &analysis, |analysis| {
        output::product_analysis_text(&ctx.catalog, analysis)
    })
}

/// Wraps a typed ingredient list in a product. Names resolve to catalog ids; anything
/// unresolved is kept as typed so the analysis can still report it.
fn ad_hoc_product(catalog: &Catalog, ingredients: &[String]) -> Product {
    let ids = ingredients
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| match catalog.resolve_ingredient(s) {
            Some(ing) => ing.id.clone(),
            None => {
                warn!("'{}' is not in the catalog; it will be treated as compatible.", s);
                s.to_string()
            }
        })
        .collect();

    Product {
        id: AD_HOC_PRODUCT_ID.to_string(),
        name: "Ingredient list".to_string(),
        brand: "Custom".to_string(),
        function: "serum".to_string(),
        ingredients: ids,
        description: String::new(),
    }
}
