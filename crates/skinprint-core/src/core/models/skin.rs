use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinType {
    Dry,
    Oily,
    Combination,
    Normal,
    Sensitive,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid skin type: '{0}'. Expected one of dry, oily, combination, normal, sensitive.")]
pub struct ParseSkinTypeError(pub String);

impl FromStr for SkinType {
    type Err = ParseSkinTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dry" => Ok(SkinType::Dry),
            "oily" => Ok(SkinType::Oily),
            "combination" => Ok(SkinType::Combination),
            "normal" => Ok(SkinType::Normal),
            "sensitive" => Ok(SkinType::Sensitive),
            _ => Err(ParseSkinTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SkinType::Dry => "dry",
                SkinType::Oily => "oily",
                SkinType::Combination => "combination",
                SkinType::Normal => "normal",
                SkinType::Sensitive => "sensitive",
            }
        )
    }
}

/// Descriptive profile of a skin type: what it typically looks like and what tends to help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkinProfile {
    pub skin_type: SkinType,
    pub characteristics: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

impl SkinType {
    pub const ALL: [SkinType; 5] = [
        SkinType::Dry,
        SkinType::Oily,
        SkinType::Combination,
        SkinType::Normal,
        SkinType::Sensitive,
    ];

    pub fn profile(self) -> SkinProfile {
        let (characteristics, recommendations): (&[&str], &[&str]) = match self {
            SkinType::Dry => (
                &[
                    "Low sebum production",
                    "Fine lines more visible",
                    "Tight texture",
                    "Minimal pore visibility",
                ],
                &[
                    "Use hydrating ingredients like hyaluronic acid",
                    "Look for ceramide-rich products",
                    "Avoid harsh exfoliants",
                    "Consider oil-based moisturizers",
                ],
            ),
            SkinType::Oily => (
                &[
                    "Higher sebum production",
                    "Enlarged pores",
                    "Shine in the T-zone",
                    "Active sebaceous glands",
                ],
                &[
                    "Use lightweight, non-comedogenic products",
                    "Consider BHA for pore management",
                    "Look for niacinamide to regulate oil",
                    "Avoid heavy, oil-based products",
                ],
            ),
            SkinType::Combination => (
                &[
                    "Mixed sebum distribution",
                    "More active T-zone",
                    "Drier cheeks",
                    "Variable pore size across the face",
                ],
                &[
                    "Use different products for different zones",
                    "Balance hydration and oil control",
                    "Consider multi-masking approach",
                    "Look for balanced formulations",
                ],
            ),
            SkinType::Normal => (
                &[
                    "Balanced sebum production",
                    "Even skin texture",
                    "Minimal visible concerns",
                    "Well-hydrated appearance",
                ],
                &[
                    "Maintain current routine",
                    "Focus on prevention",
                    "Use gentle, balanced products",
                    "Consider antioxidant protection",
                ],
            ),
            SkinType::Sensitive => (
                &[
                    "Visible redness",
                    "Thin skin barrier",
                    "Reactive texture",
                    "Prone to inflammation",
                ],
                &[
                    "Use fragrance-free products",
                    "Avoid harsh actives initially",
                    "Look for barrier-supporting ingredients",
                    "Patch test all new products",
                ],
            ),
        };
        SkinProfile {
            skin_type: self,
            characteristics,
            recommendations,
        }
    }
}
