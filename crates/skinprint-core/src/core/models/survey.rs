use super::skin::SkinType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How many steps the user is willing to put into a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffortLevel {
    Minimal,
    Moderate,
    Comprehensive,
}

impl EffortLevel {
    /// Parses the survey's answer labels ("1-3 steps (minimal)", "5+ steps ...").
    /// Unrecognized answers, including "Not sure", yield `None`.
    pub fn from_answer(answer: &str) -> Option<Self> {
        let answer = answer.to_lowercase();
        if answer.contains("1-3") || answer.contains("minimal") {
            Some(EffortLevel::Minimal)
        } else if answer.contains("5+") || answer.contains("comprehensive") {
            Some(EffortLevel::Comprehensive)
        } else if answer.contains("3-5") || answer.contains("moderate") {
            Some(EffortLevel::Moderate)
        } else {
            None
        }
    }

    pub fn suggested_routine_size(self) -> usize {
        match self {
            EffortLevel::Minimal => 3,
            EffortLevel::Moderate => 4,
            EffortLevel::Comprehensive => 6,
        }
    }
}

/// Answers collected by the onboarding survey. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SurveyData {
    pub age_bracket: Option<String>,
    pub skin_type: Option<String>,
    pub skin_concerns: Vec<String>,
    pub effort_level: Option<String>,
    pub desired_benefits: Vec<String>,
}

impl SurveyData {
    /// The declared skin type, if it names one ("Not sure" does not).
    pub fn skin_type(&self) -> Option<SkinType> {
        self.skin_type
            .as_deref()
            .and_then(|s| SkinType::from_str(s).ok())
    }

    /// Effort level, falling back to moderate when unanswered or unsure.
    pub fn effort_level(&self) -> EffortLevel {
        self.effort_level
            .as_deref()
            .and_then(EffortLevel::from_answer)
            .unwrap_or(EffortLevel::Moderate)
    }

    pub fn has_concern(&self, concern: &str) -> bool {
        self.skin_concerns
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(concern))
    }
}
