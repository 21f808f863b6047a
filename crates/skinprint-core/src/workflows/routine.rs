use crate::core::catalog::Catalog;
use crate::core::models::preferences::UserPreferences;
use crate::core::models::routine::{Routine, TimeOfDay};
use crate::engine::analyzer::{RoutineAnalysis, analyze_routine};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Analyses of the morning and evening routines. Empty slots are not analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoutineReport {
    pub am: Option<RoutineAnalysis>,
    pub pm: Option<RoutineAnalysis>,
    pub has_issues: bool,
}

impl RoutineReport {
    pub fn get(&self, time: TimeOfDay) -> Option<&RoutineAnalysis> {
        match time {
            TimeOfDay::Am => self.am.as_ref(),
            TimeOfDay::Pm => self.pm.as_ref(),
        }
    }
}

fn analyze_slot(
    catalog: &Catalog,
    routine: &Routine,
    time: TimeOfDay,
    preferences: &UserPreferences,
) -> Option<RoutineAnalysis> {
    let products = routine.products(time);
    (!products.is_empty()).then(|| analyze_routine(catalog, &products, preferences))
}

/// Runs the routine analyzer separately for each time of day. Products used in the morning
/// are never checked against products used in the evening.
#[instrument(skip_all, name = "routine_workflow")]
pub fn analyze(catalog: &Catalog, routine: &Routine, preferences: &UserPreferences) -> RoutineReport {
    let am = analyze_slot(catalog, routine, TimeOfDay::Am, preferences);
    let pm = analyze_slot(catalog, routine, TimeOfDay::Pm, preferences);
    let has_issues = [&am, &pm]
        .into_iter()
        .flatten()
        .any(|analysis| analysis.has_issues);

    info!(
        am_products = routine.entries(TimeOfDay::Am).len(),
        pm_products = routine.entries(TimeOfDay::Pm).len(),
        has_issues,
        "Routine analysis complete."
    );
    RoutineReport { am, pm, has_issues }
}
