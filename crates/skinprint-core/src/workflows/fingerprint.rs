use crate::core::models::preferences::UserPreferences;
use crate::engine::messages::MessageTemplates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, instrument};

/// Rise in confidence between consecutive snapshots that counts as a milestone.
pub const CONFIDENCE_STEP: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScoredIngredient {
    pub ingredient: String,
    /// Between 0 and 1.
    pub confidence: f64,
}

/// The user's learned ingredient fingerprint on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FingerprintSnapshot {
    pub date: NaiveDate,
    #[serde(default)]
    pub likely_works: Vec<ScoredIngredient>,
    #[serde(default)]
    pub possible_triggers: Vec<ScoredIngredient>,
    #[serde(default)]
    pub discovered: Vec<ScoredIngredient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Discovery,
    ConfidenceIncrease,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EventKind::Discovery => "discovery",
                EventKind::ConfidenceIncrease => "confidence-increase",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FingerprintEvent {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub ingredient: String,
    pub confidence: f64,
    pub message: String,
}

/// Timeline events from a history of snapshots: every discovery, and every likely-works
/// ingredient whose confidence rose by more than [`CONFIDENCE_STEP`] since the previous
/// snapshot. Events are in date order; events on the same date keep history order.
#[instrument(skip_all, name = "fingerprint_events", fields(snapshots = history.len()))]
pub fn fingerprint_events(history: &[FingerprintSnapshot]) -> Vec<FingerprintEvent> {
    let mut events = Vec::new();

    for (idx, snapshot) in history.iter().enumerate() {
        events.extend(snapshot.discovered.iter().map(|d| FingerprintEvent {
            date: snapshot.date,
            kind: EventKind::Discovery,
            ingredient: d.ingredient.clone(),
            confidence: d.confidence,
            message: MessageTemplates::discovery(&d.ingredient),
        }));

        let Some(prev) = idx.checked_sub(1).map(|p| &history[p]) else {
            continue;
        };
        for item in &snapshot.likely_works {
            let Some(prev_item) = prev
                .likely_works
                .iter()
                .find(|p| p.ingredient == item.ingredient)
            else {
                continue;
            };
            if item.confidence - prev_item.confidence > CONFIDENCE_STEP {
                events.push(FingerprintEvent {
                    date: snapshot.date,
                    kind: EventKind::ConfidenceIncrease,
                    ingredient: item.ingredient.clone(),
                    confidence: item.confidence,
                    message: MessageTemplates::confidence_increase(&item.ingredient),
                });
            }
        }
    }

    events.sort_by_key(|e| e.date);
    debug!(events = events.len(), "Derived fingerprint events.");
    events
}

/// The liked / disliked / suspect view of a user used when comparing against circles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fingerprint {
    pub liked: BTreeSet<String>,
    pub disliked: BTreeSet<String>,
    pub suspects: BTreeSet<String>,
}

impl Fingerprint {
    /// Sensitivities are treated as suspects.
    pub fn from_preferences(preferences: &UserPreferences) -> Self {
        Self {
            liked: preferences.liked.clone(),
            disliked: preferences.disliked.clone(),
            suspects: preferences.sensitivities.clone(),
        }
    }

    /// Learned likely-works and possible-trigger ingredients, combined with the user's
    /// explicit dislikes.
    pub fn from_snapshot(snapshot: &FingerprintSnapshot, preferences: &UserPreferences) -> Self {
        Self {
            liked: snapshot
                .likely_works
                .iter()
                .map(|s| s.ingredient.clone())
                .collect(),
            disliked: preferences.disliked.clone(),
            suspects: snapshot
                .possible_triggers
                .iter()
                .map(|s| s.ingredient.clone())
                .collect(),
        }
    }
}
