use crate::core::catalog::Catalog;
use crate::core::models::preferences::UserPreferences;
use crate::core::models::routine::{Routine, RoutineEntry, RoutineSlot};
use crate::core::models::survey::{EffortLevel, SurveyData};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

const CLEANSER: &str = "product-1";
const SERUM: &str = "product-3";
const MOISTURIZER: &str = "product-8";
const ACNE_TREATMENT: &str = "product-2";
const AGING_TREATMENT: &str = "product-5";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StarterRoutine {
    pub routine: Routine,
    pub effort_level: EffortLevel,
    pub suggested_size: usize,
    /// Preferences seeded from the survey: the declared skin type, nothing else.
    pub preferences: UserPreferences,
}

fn add(catalog: &Catalog, routine: &mut Routine, slot: RoutineSlot, product_id: &str, function: &str) {
    match catalog.product_by_id(product_id) {
        Some(product) => routine.add(slot, RoutineEntry::new(product.clone(), Some(function))),
        None => warn!(
            "Starter product '{}' is not in the catalog; skipping {} step.",
            product_id, function
        ),
    }
}

/// Builds a starter AM/PM routine from survey answers.
///
/// Both times get cleanser, serum and moisturizer. Acne adds a PM treatment, as do fine
/// lines or wrinkles. Products missing from the catalog are skipped.
#[instrument(skip_all, name = "onboarding_workflow")]
pub fn starter_routine(catalog: &Catalog, survey: &SurveyData) -> StarterRoutine {
    let mut routine = Routine::new();
    add(catalog, &mut routine, RoutineSlot::Both, CLEANSER, "cleanser");
    add(catalog, &mut routine, RoutineSlot::Both, SERUM, "serum");
    add(catalog, &mut routine, RoutineSlot::Both, MOISTURIZER, "moisturizer");

    if survey.has_concern("Acne") {
        add(catalog, &mut routine, RoutineSlot::Pm, ACNE_TREATMENT, "treatment");
    }
    if survey.has_concern("Fine lines") || survey.has_concern("Wrinkles") {
        add(catalog, &mut routine, RoutineSlot::Pm, AGING_TREATMENT, "treatment");
    }

    let mut preferences = UserPreferences::new();
    preferences.set_skin_type(survey.skin_type());

    let effort_level = survey.effort_level();
    info!(
        ?effort_level,
        skin_type = ?preferences.skin_type,
        "Generated starter routine."
    );
    StarterRoutine {
        routine,
        effort_level,
        suggested_size: effort_level.suggested_routine_size(),
        preferences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::routine::TimeOfDay;
    use crate::core::models::skin::SkinType;

    fn ids(routine: &Routine, time: TimeOfDay) -> Vec<String> {
        routine.entries(time).iter().map(|e| e.product.id.clone()).collect()
    }

    #[test]
    fn default_survey_gets_three_steps_each_time() {
        let catalog = Catalog::builtin();
        let starter = starter_routine(&catalog, &SurveyData::default());
        assert_eq!(ids(&starter.routine, TimeOfDay::Am), vec!["product-1", "product-3", "product-8"]);
        assert_eq!(ids(&starter.routine, TimeOfDay::Pm), vec!["product-1", "product-3", "product-8"]);
        assert_eq!(starter.suggested_size, 4);
        assert_eq!(starter.preferences.skin_type, None);
    }

    #[test]
    fn concerns_add_pm_treatments() {
        let catalog = Catalog::builtin();
        let survey = SurveyData {
            skin_type: Some("Oily".to_string()),
            skin_concerns: vec!["Acne".to_string(), "Wrinkles".to_string()],
            effort_level: Some("5+ steps (comprehensive)".to_string()),
            ..Default::default()
        };
        let starter = starter_routine(&catalog, &survey);
        assert_eq!(
            ids(&starter.routine, TimeOfDay::Pm),
            vec!["product-1", "product-3", "product-8", "product-2", "product-5"]
        );
        assert_eq!(starter.routine.entries(TimeOfDay::Pm)[3].function, "treatment");
        assert_eq!(starter.routine.entries(TimeOfDay::Am).len(), 3);
        assert_eq!(starter.suggested_size, 6);
        assert_eq!(starter.preferences.skin_type, Some(SkinType::Oily));
    }

    #[test]
    fn missing_catalog_products_are_skipped() {
        let catalog = Catalog::new(vec![], vec![], vec![]).unwrap();
        let starter = starter_routine(&catalog, &SurveyData::default());
        assert!(starter.routine.is_empty());
    }
}
