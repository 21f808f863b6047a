use super::AppContext;
use crate::cli::OnboardArgs;
use crate::error::{CliError, Result};
use crate::output::{self, PushLine};
use skinprint::core::io::store::keys;
use skinprint::core::models::routine::TimeOfDay;
use skinprint::core::models::survey::{EffortLevel, SurveyData};
use skinprint::workflows::onboarding::{self, StarterRoutine};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run(args: OnboardArgs, ctx: &mut AppContext) -> Result<()> {
    let survey = match &args.survey {
        Some(path) => read_survey(path)?,
        None => ctx.value::<SurveyData>(keys::SURVEY_DATA).ok_or_else(|| {
            CliError::Argument(
                "No saved survey answers; pass --survey <FILE> with your answers.".to_string(),
            )
        })?,
    };

    let starter = onboarding::starter_routine(&ctx.catalog, &survey);
    if args.dry_run {
        info!("Dry run: starter routine not saved.");
    } else {
        apply(ctx, &survey, &starter)?;
    }
    output::emit(ctx.format, &starter, render)
}

fn read_survey(path: &Path) -> Result<SurveyData> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Saves the survey and starter routine, and records the skin type without touching
/// existing ingredient preferences.
fn apply(ctx: &mut AppContext, survey: &SurveyData, starter: &StarterRoutine) -> Result<()> {
    ctx.save_value(keys::SURVEY_DATA, survey)?;
    ctx.save_routine(&starter.routine)?;

    if let Some(skin_type) = starter.preferences.skin_type {
        let mut prefs = ctx.preferences();
        prefs.set_skin_type(Some(skin_type));
        ctx.save_preferences(&prefs)?;
    }
    ctx.save_value(keys::ONBOARDING_COMPLETE, &true)?;
    info!("Onboarding complete; starter routine saved.");
    Ok(())
}

fn effort_label(level: EffortLevel) -> &'static str {
    match level {
        EffortLevel::Minimal => "minimal",
        EffortLevel::Moderate => "moderate",
        EffortLevel::Comprehensive => "comprehensive",
    }
}

fn render(starter: &StarterRoutine) -> String {
    let mut out = String::new();
    out.push_line(format!(
        "Effort: {} (about {} steps)",
        effort_label(starter.effort_level), starter.suggested_size
    ));
    if let Some(skin_type) = starter.preferences.skin_type {
        out.push_line(format!("Skin type: {}", skin_type));
    }
    for time in [TimeOfDay::Am, TimeOfDay::Pm] {
        out.push_line(format!("{} routine", time));
        for (i, entry) in starter.routine.sorted_steps(time).into_iter().enumerate() {
            out.push_line(format!("  {}. {:<12} {}", i + 1, entry.function, entry.product.name));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use skinprint::core::models::skin::SkinType;
    use tempfile::tempdir;

    const SURVEY: &str = r#"{
        "skin-type": "Oily",
        "skin-concerns": ["Acne"],
        "effort-level": "1-3 steps (minimal)"
    }"#;

    #[test]
    fn onboarding_saves_routine_and_keeps_preferences() {
        let tmp = tempdir().unwrap();
        let survey_path = tmp.path().join("survey.json");
        fs::write(&survey_path, SURVEY).unwrap();

        let mut ctx = context(tmp.path());
        let mut prefs = ctx.preferences();
        prefs.add_liked("ceramides");
        ctx.save_preferences(&prefs).unwrap();

        let args = OnboardArgs {
            survey: Some(survey_path),
            dry_run: false,
        };
        run(args, &mut ctx).unwrap();

        let prefs = ctx.preferences();
        assert_eq!(prefs.skin_type, Some(SkinType::Oily));
        assert!(prefs.liked.contains("ceramides"));
        assert_eq!(ctx.routine().entries(TimeOfDay::Pm).len(), 4);
        assert_eq!(ctx.value::<bool>(keys::ONBOARDING_COMPLETE), Some(true));
        assert!(ctx.value::<SurveyData>(keys::SURVEY_DATA).is_some());
    }

    #[test]
    fn dry_run_saves_nothing() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        ctx.save_value(keys::SURVEY_DATA, &SurveyData::default()).unwrap();

        let args = OnboardArgs {
            survey: None,
            dry_run: true,
        };
        run(args, &mut ctx).unwrap();
        assert!(ctx.routine().is_empty());
    }

    #[test]
    fn missing_survey_is_an_argument_error() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        let args = OnboardArgs {
            survey: None,
            dry_run: false,
        };
        assert!(matches!(run(args, &mut ctx), Err(CliError::Argument(_))));
    }

    #[test]
    fn render_lists_steps_in_application_order() {
        let catalog = skinprint::core::catalog::Catalog::builtin();
        let survey = SurveyData {
            skin_concerns: vec!["Wrinkles".to_string()],
            ..Default::default()
        };
        let text = render(&onboarding::starter_routine(&catalog, &survey));
        assert!(text.starts_with("Effort: moderate (about 4 steps)"));
        assert!(text.contains("PM routine\n  1. cleanser"));
        assert!(text.contains("3. moisturizer"));
        assert!(text.contains("4. treatment"));
    }
}
