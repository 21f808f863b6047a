use super::AppContext;
use crate::cli::{IngredientCommands, IngredientsArgs};
use crate::error::Result;
use crate::output::{self, PushLine};
use serde::Serialize;
use skinprint::core::catalog::Catalog;
use skinprint::core::models::ingredient::Ingredient;
use skinprint::core::models::preferences::UserPreferences;
use tracing::info;

pub fn run(args: IngredientsArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        IngredientCommands::Search { query } => handle_search(ctx, query.as_deref().unwrap_or("")),
        IngredientCommands::Show { ingredient } => handle_show(ctx, &ingredient),
    }
}

fn handle_search(ctx: &AppContext, query: &str) -> Result<()> {
    let found = ctx.catalog.search_ingredients(query);
    info!("{} ingredient(s) match '{}'", found.len(), query);
    output::emit(ctx.format, &found, |found| {
        if found.is_empty() {
            return "No ingredients found.".to_string();
        }
        found
            .iter()
            .map(|ing| format!("{:<16} {} ({})", ing.id, ing.name, ing.category))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct IngredientDetail<'a> {
    #[serde(flatten)]
    ingredient: &'a Ingredient,
    liked: bool,
    disliked: bool,
    sensitive: bool,
}

impl<'a> IngredientDetail<'a> {
    fn new(ingredient: &'a Ingredient, preferences: &UserPreferences) -> Self {
        Self {
            ingredient,
            liked: preferences.liked.contains(&ingredient.id),
            disliked: preferences.disliked.contains(&ingredient.id),
            sensitive: preferences.is_sensitive_to(&ingredient.id),
        }
    }
}

fn handle_show(ctx: &AppContext, identifier: &str) -> Result<()> {
    let ingredient = ctx.ingredient(identifier)?;
    let detail = IngredientDetail::new(ingredient, &ctx.preferences());
    output::emit(ctx.format, &detail, |detail| render_detail(&ctx.catalog, detail))
}

fn render_detail(catalog: &Catalog, detail: &IngredientDetail) -> String {
    let ing = detail.ingredient;
    let mut out = String::new();
    out.push_line(format!("{} ({})", ing.name, ing.id));
    out.push_line(format!("  Category:   {}", ing.category));
    out.push_line(format!("  Step:       {}", ing.function));
    if !ing.description.is_empty() {
        out.push_line(format!("  {}", ing.description));
    }
    out.push_line(format!("  Conflicts:  {}", output::names(catalog, &ing.conflicts)));
    out.push_line(format!("  Pairs with: {}", output::names(catalog, &ing.compatible_with)));
    for note in &ing.common_sensitivities {
        out.push_line(format!("  Note: {}", note));
    }

    let status: Vec<&str> = [
        (detail.liked, "liked"),
        (detail.disliked, "disliked"),
        (detail.sensitive, "sensitive"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();
    if !status.is_empty() {
        out.push_line(format!("  You: {}", status.join(", ")));
    }
    out
}
