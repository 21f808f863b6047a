use super::AppContext;
use crate::cli::{CirclesArgs, CirclesCommands};
use crate::error::{CliError, Result};
use crate::output::{self, PushLine};
use serde::Serialize;
use skinprint::core::catalog::Catalog;
use skinprint::core::models::circle::Circle;
use skinprint::core::models::product::Product;
use skinprint::workflows::circles::{self, CircleOverlap};
use skinprint::workflows::fingerprint::Fingerprint;

pub fn run(args: CirclesArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        CirclesCommands::List => {
            let ranked = circles::ranked_circles(&ctx.catalog);
            output::emit(ctx.format, &ranked, |ranked| render_list(ranked))
        }
        CirclesCommands::Show { circle_id } => {
            let circle = find(ctx, &circle_id)?;
            let detail = CircleDetail {
                circle,
                recommended: circles::recommended_products(&ctx.catalog, circle)
                    .into_iter()
                    .map(|(product, upvotes)| Recommendation { product, upvotes })
                    .collect(),
            };
            output::emit(ctx.format, &detail, |detail| render_detail(&ctx.catalog, detail))
        }
        CirclesCommands::Overlap { circle_id } => {
            let circle = find(ctx, &circle_id)?;
            let fingerprint = Fingerprint::from_preferences(&ctx.preferences());
            let overlap = circles::ingredient_overlap(&ctx.catalog, &fingerprint, circle);
            output::emit(ctx.format, &overlap, |overlap| render_overlap(circle, overlap))
        }
    }
}

fn find<'a>(ctx: &'a AppContext, circle_id: &str) -> Result<&'a Circle> {
    ctx.catalog
        .circle_by_id(circle_id)
        .ok_or_else(|| CliError::NotFound {
            kind: "circle",
            id: circle_id.to_string(),
        })
}

fn render_list(circles: &[&Circle]) -> String {
    if circles.is_empty() {
        return "No circles in the catalog.".to_string();
    }
    circles
        .iter()
        .map(|c| {
            format!(
                "{:>3}%  {:<10} {} ({} members)",
                c.match_percentage, c.id, c.name, c.member_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct Recommendation<'a> {
    product: &'a Product,
    upvotes: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct CircleDetail<'a> {
    circle: &'a Circle,
    recommended: Vec<Recommendation<'a>>,
}

fn render_detail(catalog: &Catalog, detail: &CircleDetail) -> String {
    let circle = detail.circle;
    let mut out = String::new();
    out.push_line(format!(
        "{} ({}% match, {} members)",
        circle.name, circle.match_percentage, circle.member_count
    ));
    if !circle.description.is_empty() {
        out.push_line(format!("  {}", circle.description));
    }
    out.push_line(format!("  Loves:    {}", output::names(catalog, &circle.top_liked_ingredients)));
    out.push_line(format!(
        "  Avoids:   {}",
        output::names(catalog, &circle.top_disliked_ingredients)
    ));
    if !circle.top_concerns.is_empty() {
        out.push_line(format!("  Concerns: {}", circle.top_concerns.join(", ")));
    }
    out.push_line("Recommended products:");
    for rec in &detail.recommended {
        out.push_line(format!("  ▲{:<4} {} ({})", rec.upvotes, rec.product.name, rec.product.id));
    }
    out
}

fn render_overlap(circle: &Circle, overlap: &CircleOverlap) -> String {
    let mut out = String::new();
    out.push_line(format!("You and {}", circle.name));
    if overlap.entries.is_empty() {
        out.push_line("  No shared ingredient experiences yet.");
        return out;
    }
    for entry in &overlap.entries {
        out.push_line(format!(
            "  {:>+5.1}  {:<28} you: {:<8} circle: {}",
            entry.score, entry.name, entry.user.to_string(), entry.circle
        ));
    }
    out.push_line(format!(
        "{} strong match(es), {} conflict(s)",
        overlap.strong_matches, overlap.conflicts
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use skinprint::core::models::preferences::UserPreferences;
    use tempfile::tempdir;

    #[test]
    fn list_is_ranked_by_match() {
        let catalog = Catalog::builtin();
        let text = render_list(&circles::ranked_circles(&catalog));
        let percentages: Vec<u8> = text
            .lines()
            .map(|line| line.trim_start().split('%').next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(percentages.len(), 3);
        assert!(percentages.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn unknown_circle_is_not_found() {
        let tmp = tempdir().unwrap();
        let ctx = context(tmp.path());
        assert!(matches!(
            find(&ctx, "circle-9"),
            Err(CliError::NotFound { kind: "circle", .. })
        ));
    }

    #[test]
    fn overlap_renders_scores_and_summary() {
        let catalog = Catalog::builtin();
        let circle = catalog.circle_by_id("circle-1").unwrap();
        let mut prefs = UserPreferences::new();
        prefs.add_liked("ceramides");
        let overlap =
            circles::ingredient_overlap(&catalog, &Fingerprint::from_preferences(&prefs), circle);
        let text = render_overlap(circle, &overlap);
        assert!(text.starts_with("You and Sensitive Skin Warriors"));
        assert!(text.contains(" +1.0  Ceramides"));
        assert!(text.contains("1 strong match(es)"));
    }
}
