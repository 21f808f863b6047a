//! # Core Models Module
//!
//! Plain data types shared by every layer of Skinprint.
//!
//! ## Key Components
//!
//! - [`ingredient`] - Ingredient reference records and their categories
//! - [`product`] - Product reference records
//! - [`preferences`] - The user's ingredient fingerprint (liked, disliked, sensitive) and skin type
//! - [`skin`] - Skin types and their descriptive profiles
//! - [`routine`] - AM/PM routines built from products
//! - [`checkin`] - Daily skin check-ins
//! - [`circle`] - Community circles and their ingredient leanings
//! - [`survey`] - Onboarding survey answers
//!
//! Reference records (`Ingredient`, `Product`, `Circle`) are immutable once loaded. User
//! records (`UserPreferences`, `Routine`, `Checkin`, `SurveyData`) are owned by the caller
//! and passed explicitly into the engine and workflows.

pub mod checkin;
pub mod circle;
pub mod ingredient;
pub mod preferences;
pub mod product;
pub mod routine;
pub mod skin;
pub mod survey;
