use super::AppContext;
use crate::cli::{PrefsArgs, PrefsCommands};
use crate::error::Result;
use crate::output::{self, PushLine};
use serde::Serialize;
use skinprint::core::catalog::Catalog;
use skinprint::core::models::preferences::UserPreferences;
use skinprint::core::models::skin::{SkinProfile, SkinType};
use tracing::info;

#[derive(Debug, Clone, Copy)]
enum Change {
    Like,
    Unlike,
    Dislike,
    Undislike,
    Sensitive,
    Unsensitive,
}

impl Change {
    /// Applies the change, returning whether the preferences were modified.
    fn apply(self, prefs: &mut UserPreferences, id: &str) -> bool {
        match self {
            Change::Like => prefs.add_liked(id),
            Change::Unlike => prefs.remove_liked(id),
            Change::Dislike => prefs.add_disliked(id),
            Change::Undislike => prefs.remove_disliked(id),
            Change::Sensitive => prefs.add_sensitivity(id),
            Change::Unsensitive => prefs.remove_sensitivity(id),
        }
    }
}

pub fn run(args: PrefsArgs, ctx: &mut AppContext) -> Result<()> {
    let change = match args.command {
        PrefsCommands::Show => return show(ctx),
        PrefsCommands::SkinType { skin_type } => {
            let mut prefs = ctx.preferences();
            prefs.set_skin_type(skin_type);
            ctx.save_preferences(&prefs)?;
            info!("Skin type set to {:?}.", skin_type);
            return show(ctx);
        }
        PrefsCommands::Like { ingredient } => (Change::Like, ingredient),
        PrefsCommands::Unlike { ingredient } => (Change::Unlike, ingredient),
        PrefsCommands::Dislike { ingredient } => (Change::Dislike, ingredient),
        PrefsCommands::Undislike { ingredient } => (Change::Undislike, ingredient),
        PrefsCommands::Sensitive { ingredient } => (Change::Sensitive, ingredient),
        PrefsCommands::Unsensitive { ingredient } => (Change::Unsensitive, ingredient),
    };
    update(ctx, change.0, &change.1)?;
    show(ctx)
}

fn update(ctx: &mut AppContext, change: Change, identifier: &str) -> Result<bool> {
    let id = ctx.ingredient(identifier)?.id.clone();
    let mut prefs = ctx.preferences();
    let changed = change.apply(&mut prefs, &id);
    if changed {
        ctx.save_preferences(&prefs)?;
        info!("Preferences updated: {:?} '{}'.", change, id);
    } else {
        info!("Preferences unchanged: {:?} '{}' had no effect.", change, id);
    }
    Ok(changed)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct PreferencesView {
    #[serde(flatten)]
    preferences: UserPreferences,
    skin_profile: Option<SkinProfile>,
}

fn show(ctx: &AppContext) -> Result<()> {
    let preferences = ctx.preferences();
    let view = PreferencesView {
        skin_profile: preferences.skin_type.map(SkinType::profile),
        preferences,
    };
    output::emit(ctx.format, &view, |view| render(&ctx.catalog, view))
}

fn render(catalog: &Catalog, view: &PreferencesView) -> String {
    let prefs = &view.preferences;
    let list = |set: &std::collections::BTreeSet<String>| {
        output::names(catalog, &set.iter().cloned().collect::<Vec<_>>())
    };

    let mut out = String::new();
    out.push_line(format!("Liked:       {}", list(&prefs.liked)));
    out.push_line(format!("Disliked:    {}", list(&prefs.disliked)));
    out.push_line(format!("Sensitive:   {}", list(&prefs.sensitivities)));
    match &view.skin_profile {
        Some(profile) => {
            out.push_line(format!("Skin type:   {}", profile.skin_type));
            for line in profile.characteristics {
                out.push_line(format!("  - {}", line));
            }
            out.push_line("Recommended:");
            for line in profile.recommendations {
                out.push_line(format!("  - {}", line));
            }
        }
        None => {
            out.push_line("Skin type:   not set");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::error::CliError;
    use tempfile::tempdir;

    #[test]
    fn update_resolves_names_to_ids() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        assert!(update(&mut ctx, Change::Like, "Hyaluronic Acid").unwrap());
        assert!(!update(&mut ctx, Change::Like, "hyaluronic-acid").unwrap());
        assert!(ctx.preferences().liked.contains("hyaluronic-acid"));

        assert!(update(&mut ctx, Change::Unlike, "hyaluronic-acid").unwrap());
        assert!(ctx.preferences().liked.is_empty());
    }

    #[test]
    fn liked_and_disliked_are_independent() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        update(&mut ctx, Change::Like, "retinol").unwrap();
        update(&mut ctx, Change::Dislike, "retinol").unwrap();
        let prefs = ctx.preferences();
        assert!(prefs.liked.contains("retinol") && prefs.disliked.contains("retinol"));
    }

    #[test]
    fn unknown_ingredient_is_rejected() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        assert!(matches!(
            update(&mut ctx, Change::Sensitive, "unobtainium"),
            Err(CliError::NotFound { kind: "ingredient", .. })
        ));
    }

    #[test]
    fn render_includes_skin_profile() {
        let catalog = Catalog::builtin();
        let mut preferences = UserPreferences::new();
        preferences.add_sensitivity("aha");
        preferences.set_skin_type(Some(SkinType::Dry));
        let view = PreferencesView {
            skin_profile: preferences.skin_type.map(SkinType::profile),
            preferences,
        };
        let text = render(&catalog, &view);
        assert!(text.contains("Sensitive:   Alpha Hydroxy Acids (AHA)"));
        assert!(text.contains("Liked:       -"));
        assert!(text.contains("Skin type:   dry"));
        assert!(text.contains("Recommended:"));
    }
}
