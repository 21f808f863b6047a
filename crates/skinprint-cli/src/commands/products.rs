use super::AppContext;
use crate::cli::{ProductCommands, ProductsArgs};
use crate::error::Result;
use crate::output;
use skinprint::engine::analyzer;
use tracing::info;

pub fn run(args: ProductsArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        ProductCommands::Search { query } => {
            let query = query.as_deref().unwrap_or("");
            let found = ctx.catalog.search_products(query);
            info!("{} product(s) match '{}'", found.len(), query);
            output::emit(ctx.format, &found, |found| {
                if found.is_empty() {
                    return "No products found.".to_string();
                }
                found
                    .iter()
                    .map(|p| format!("{:<11} {} - {} [{}]", p.id, p.brand, p.name, p.function))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        ProductCommands::Show { product_id } => {
            let product = ctx.product(&product_id)?;
            let analysis = analyzer::analyze_product(&ctx.catalog, product, &ctx.preferences());
            output::emit(ctx.format, &analysis, |analysis| {
                let mut text = output::product_analysis_text(&ctx.catalog, analysis);
                if !analysis.product.description.is_empty() {
                    text.push_str(&format!("  {}\n", analysis.product.description));
                }
                text
            })
        }
    }
}
