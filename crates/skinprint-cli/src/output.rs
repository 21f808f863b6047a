use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use serde::Serialize;
use skinprint::core::catalog::Catalog;
use skinprint::engine::analyzer::{
    IngredientMatch, ProductAnalysis, RoutineAnalysis, SensitivityWarning,
};

/// Prints `value` as pretty JSON, or as the text `render` produces for it.
pub fn emit<T, F>(format: OutputFormat, value: &T, render: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).map_err(|e| CliError::Other(e.into()))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let text = render(value);
            if !text.is_empty() {
                println!("{}", text.trim_end());
            }
        }
    }
    Ok(())
}

/// Line-at-a-time building of text reports.
pub trait PushLine {
    fn push_line(&mut self, line: impl AsRef<str>);
}

impl PushLine for String {
    fn push_line(&mut self, line: impl AsRef<str>) {
        self.push_str(line.as_ref());
        self.push('\n');
    }
}

/// Joins ingredient ids as catalog display names.
pub fn names(catalog: &Catalog, ids: &[String]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(|id| catalog.display_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn match_names(matches: &[IngredientMatch]) -> String {
    matches
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_preference_lines(
    out: &mut String,
    warnings: &[SensitivityWarning],
    liked: &[IngredientMatch],
    disliked: &[IngredientMatch],
) {
    for warning in warnings {
        out.push_line(format!("  ⚠ {}: {}", warning.name, warning.reason));
    }
    if !liked.is_empty() {
        out.push_line(format!("  ♥ Liked: {}", match_names(liked)));
    }
    if !disliked.is_empty() {
        out.push_line(format!("  ✗ Disliked: {}", match_names(disliked)));
    }
}

pub fn product_analysis_text(catalog: &Catalog, analysis: &ProductAnalysis) -> String {
    let mut out = String::new();
    let product = &analysis.product;
    out.push_line(format!("{} ({}) [{}]", product.name, product.brand, product.function));
    out.push_line(format!("  Ingredients: {}", names(catalog, &analysis.ingredients)));

    if analysis.conflicts.is_empty() {
        out.push_line("  ✓ No ingredient conflicts");
    }
    for conflict in &analysis.conflicts {
        out.push_line(format!("  ✗ {}", conflict.reason));
    }
    push_preference_lines(
        &mut out,
        &analysis.sensitivity_warnings,
        &analysis.liked_ingredients,
        &analysis.disliked_ingredients,
    );
    out
}

pub fn routine_analysis_text(analysis: &RoutineAnalysis) -> String {
    let mut out = String::new();
    let mut product_conflicts = 0;
    for product_analysis in &analysis.product_analyses {
        product_conflicts += product_analysis.conflicts.len();
        for conflict in &product_analysis.conflicts {
            out.push_line(format!("  ✗ {}: {}", product_analysis.product.name, conflict.reason));
        }
    }
    for conflict in &analysis.routine_conflicts {
        out.push_line(format!(
            "  ✗ {} + {}: {}",
            conflict.product1, conflict.product2, conflict.reason
        ));
    }
    push_preference_lines(
        &mut out,
        &analysis.sensitivity_warnings,
        &analysis.liked_ingredients,
        &analysis.disliked_ingredients,
    );
    if !analysis.has_issues && product_conflicts == 0 {
        out.push_line("  ✓ No conflicts or sensitivities");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinprint::core::models::preferences::UserPreferences;
    use skinprint::core::models::product::Product;
    use skinprint::engine::analyzer::{analyze_product, analyze_routine};

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

    #[test]
    fn push_line_terminates_each_line() {
        let mut out = String::new();
        out.push_line("first");
        out.push_line(format!("second {}", 2));
        assert_eq!(out, "first\nsecond 2\n");
    }

    #[test]
    fn names_uses_display_names_and_dash_for_empty() {
        let catalog = Catalog::builtin();
        let ids = vec!["vitamin-c".to_string(), "mystery".to_string()];
        assert_eq!(names(&catalog, &ids), "Vitamin C (L-Ascorbic Acid), mystery");
        assert_eq!(names(&catalog, &[]), "-");
    }

    #[test]
    fn product_text_lists_conflicts_and_sensitivities() {
        let catalog = Catalog::builtin();
        let mut prefs = UserPreferences::new();
        prefs.add_sensitivity("niacinamide");
        let analysis = analyze_product(
            &catalog,
            &product("p", "Glow", &["niacinamide", "vitamin-c"]),
            &prefs,
        );
        let text = product_analysis_text(&catalog, &analysis);
        assert!(text.starts_with("Glow (Test) [serum]"));
        assert!(text.contains("Niacinamide should not be used with Vitamin C"));
        assert!(text.contains("⚠ Niacinamide"));
        assert!(!text.contains("No ingredient conflicts"));
    }

    #[test]
    fn clean_routine_reports_no_issues() {
        let catalog = Catalog::builtin();
        let analysis = analyze_routine(
            &catalog,
            &[product("a", "A", &["hyaluronic-acid"]), product("b", "B", &["ceramides"])],
            &UserPreferences::new(),
        );
        let text = routine_analysis_text(&analysis);
        assert!(text.contains("No conflicts or sensitivities"));
    }
}
