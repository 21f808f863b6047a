use super::messages::MessageTemplates;
use crate::core::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a pairwise check.
///
/// `Unknown` is reported when either side does not resolve against the catalog. It is
/// treated as compatible by [`Compatibility::is_compatible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Compatible,
    Incompatible,
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Verdict::Compatible => "compatible",
                Verdict::Incompatible => "incompatible",
                Verdict::Unknown => "unknown",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Compatibility {
    pub verdict: Verdict,
    pub reason: String,
}

impl Compatibility {
    pub fn is_compatible(&self) -> bool {
        self.verdict != Verdict::Incompatible
    }
}

/// Checks whether two ingredients may be combined.
///
/// Each identifier is resolved by exact id, then case-insensitively by name or id. The
/// first ingredient's conflict list is consulted before the second's, and the reason names
/// the ingredient whose list carries the conflict first.
pub fn check_compatibility(catalog: &Catalog, ingredient1: &str, ingredient2: &str) -> Compatibility {
    let (Some(ing1), Some(ing2)) = (
        catalog.resolve_ingredient(ingredient1),
        catalog.resolve_ingredient(ingredient2),
    ) else {
        return Compatibility {
            verdict: Verdict::Unknown,
            reason: MessageTemplates::UNKNOWN_INGREDIENTS.to_string(),
        };
    };

    if ing1.conflicts_with(&ing2.id) {
        return Compatibility {
            verdict: Verdict::Incompatible,
            reason: MessageTemplates::conflict(&ing1.name, &ing2.name),
        };
    }
    if ing2.conflicts_with(&ing1.id) {
        return Compatibility {
            verdict: Verdict::Incompatible,
            reason: MessageTemplates::conflict(&ing2.name, &ing1.name),
        };
    }

    Compatibility {
        verdict: Verdict::Compatible,
        reason: MessageTemplates::COMPATIBLE.to_string(),
    }
}
