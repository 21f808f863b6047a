use super::AppContext;
use crate::cli::MatrixArgs;
use crate::error::{CliError, Result};
use crate::output::{self, PushLine};
use skinprint::core::catalog::Catalog;
use skinprint::core::models::product::Product;
use skinprint::engine::compatibility::Verdict;
use skinprint::engine::matrix::CompatibilityMatrix;
use tracing::info;

pub fn run(args: MatrixArgs, ctx: &AppContext) -> Result<()> {
    let products = select_products(ctx, &args)?;
    let matrix = CompatibilityMatrix::build(&ctx.catalog, &products);
    info!(
        ingredients = matrix.ingredients.len(),
        conflicts = matrix.conflict_count(),
        "Built compatibility matrix."
    );
    output::emit(ctx.format, &matrix, |matrix| render(&ctx.catalog, matrix))
}

fn select_products(ctx: &AppContext, args: &MatrixArgs) -> Result<Vec<Product>> {
    let products = match args.routine {
        Some(time) => ctx.routine().products(time),
        None => args
            .product_ids
            .iter()
            .map(|id| ctx.product(id).cloned())
            .collect::<Result<Vec<_>>>()?,
    };
    if products.is_empty() {
        return Err(CliError::Argument("No products to compare.".to_string()));
    }
    Ok(products)
}

fn mark(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Compatible => "✓",
        Verdict::Incompatible => "✗",
        Verdict::Unknown => "?",
    }
}

fn render(catalog: &Catalog, matrix: &CompatibilityMatrix) -> String {
    let mut out = String::new();
    let width = matrix
        .ingredients
        .iter()
        .map(|id| catalog.display_name(id).chars().count())
        .max()
        .unwrap_or(0);

    let header: String = (1..=matrix.ingredients.len())
        .map(|i| format!("{:>3}", i))
        .collect();
    out.push_line(format!("{:>3}  {:<width$}{}", "#", "Ingredient", header, width = width));

    for (row, id) in matrix.ingredients.iter().enumerate() {
        let cells: String = matrix
            .ingredients
            .iter()
            .enumerate()
            .map(|(col, other)| {
                let symbol = if row == col {
                    "·"
                } else {
                    matrix.cell(id, other).map_or("?", |cell| mark(cell.verdict))
                };
                format!("{:>3}", symbol)
            })
            .collect();
        out.push_line(format!(
            "{:>3}  {:<width$}{}",
            row + 1, catalog.display_name(id), cells, width = width
        ));
    }

    let conflicts: Vec<_> = matrix.conflicts().collect();
    out.push_line(format!("\n{} conflict(s)", conflicts.len()));
    for cell in conflicts {
        out.push_line(format!(
            "  ✗ {} [{}] × {} [{}]",
            catalog.display_name(&cell.ingredient1),
            cell.products1.join(", "),
            catalog.display_name(&cell.ingredient2),
            cell.products2.join(", ")
        ));
        out.push_line(format!("    {}", cell.reason));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use skinprint::core::models::routine::{RoutineEntry, RoutineSlot, TimeOfDay};
    use tempfile::tempdir;

    #[test]
    fn products_come_from_ids_or_the_routine() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        let by_id = MatrixArgs {
            product_ids: vec!["product-2".to_string(), "product-4".to_string()],
            routine: None,
        };
        assert_eq!(select_products(&ctx, &by_id).unwrap().len(), 2);

        let from_routine = MatrixArgs {
            product_ids: vec![],
            routine: Some(TimeOfDay::Pm),
        };
        assert!(select_products(&ctx, &from_routine).is_err());

        let mut routine = ctx.routine();
        let product = ctx.product("product-5").unwrap().clone();
        routine.add(RoutineSlot::Pm, RoutineEntry::new(product, None));
        ctx.save_routine(&routine).unwrap();
        assert_eq!(select_products(&ctx, &from_routine).unwrap()[0].id, "product-5");
    }

    #[test]
    fn unknown_product_is_reported() {
        let tmp = tempdir().unwrap();
        let ctx = context(tmp.path());
        let args = MatrixArgs {
            product_ids: vec!["product-1".to_string(), "nope".to_string()],
            routine: None,
        };
        assert!(matches!(
            select_products(&ctx, &args),
            Err(CliError::NotFound { .. })
        ));
    }

    #[test]
    fn render_marks_conflicts_in_grid_and_list() {
        let catalog = Catalog::builtin();
        let products: Vec<Product> = ["product-2", "product-4"]
            .iter()
            .map(|id| catalog.product_by_id(id).unwrap().clone())
            .collect();
        let matrix = CompatibilityMatrix::build(&catalog, &products);
        let text = render(&catalog, &matrix);

        assert!(text.contains("1 conflict(s)"));
        assert!(text.contains(
            "✗ Niacinamide [The Ordinary Niacinamide 10% + Zinc 1%] × Vitamin C (L-Ascorbic Acid) [Vitamin C Brightening Serum]"
        ));
        let niacinamide_row = text.lines().nth(1).unwrap();
        assert!(niacinamide_row.ends_with("  ·  ✗  ✓"));
    }
}
