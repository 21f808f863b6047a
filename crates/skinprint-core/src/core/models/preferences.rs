use super::skin::SkinType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The user's ingredient fingerprint: what they like, avoid and react to.
///
/// Sets are ordered so that serialized preferences and every analysis derived from them
/// are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserPreferences {
    pub liked: BTreeSet<String>,
    pub disliked: BTreeSet<String>,
    pub sensitivities: BTreeSet<String>,
    pub skin_type: Option<SkinType>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the ingredient was not already liked.
    pub fn add_liked(&mut self, ingredient_id: &str) -> bool {
        self.liked.insert(ingredient_id.to_string())
    }

    pub fn remove_liked(&mut self, ingredient_id: &str) -> bool {
        self.liked.remove(ingredient_id)
    }

    pub fn add_disliked(&mut self, ingredient_id: &str) -> bool {
        self.disliked.insert(ingredient_id.to_string())
    }

    pub fn remove_disliked(&mut self, ingredient_id: &str) -> bool {
        self.disliked.remove(ingredient_id)
    }

    pub fn add_sensitivity(&mut self, ingredient_id: &str) -> bool {
        self.sensitivities.insert(ingredient_id.to_string())
    }

    pub fn remove_sensitivity(&mut self, ingredient_id: &str) -> bool {
        self.sensitivities.remove(ingredient_id)
    }

    pub fn set_skin_type(&mut self, skin_type: Option<SkinType>) {
        self.skin_type = skin_type;
    }

    pub fn is_sensitive_to(&self, ingredient_id: &str) -> bool {
        self.sensitivities.contains(ingredient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_liked_is_idempotent() {
        let mut prefs = UserPreferences::new();
        assert!(prefs.add_liked("ceramides"));
        assert!(!prefs.add_liked("ceramides"));
        assert_eq!(prefs.liked.len(), 1);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut prefs = UserPreferences::new();
        prefs.add_sensitivity("aha");
        assert!(prefs.remove_sensitivity("aha"));
        assert!(!prefs.remove_sensitivity("aha"));
        assert!(!prefs.is_sensitive_to("aha"));
    }

    #[test]
    fn sets_are_independent() {
        let mut prefs = UserPreferences::new();
        prefs.add_liked("retinol");
        prefs.add_disliked("retinol");
        prefs.add_sensitivity("retinol");
        assert!(prefs.liked.contains("retinol"));
        assert!(prefs.disliked.contains("retinol"));
        assert!(prefs.is_sensitive_to("retinol"));
    }

    #[test]
    fn deserializes_partial_records_with_defaults() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"sensitivities": ["bha"], "skin-type": "dry"}"#).unwrap();
        assert!(prefs.liked.is_empty());
        assert!(prefs.is_sensitive_to("bha"));
        assert_eq!(prefs.skin_type, Some(SkinType::Dry));
    }
}
