//! # Skinprint Core Library
//!
//! Ingredient-level skincare analysis: ingredient compatibility checking, product and
//! routine analysis against a user's preferences, and the supporting workflows used by
//! front ends (routine building, label scanning, progress tracking, circles).
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Ingredient`, `Product`,
//!   `UserPreferences`, `Routine`), the reference [`Catalog`](core::catalog::Catalog), the
//!   routine step ordering table, and the local key-value store.
//!
//! - **[`engine`]: The Logic Core.** Pure functions over the catalog: the pairwise
//!   compatibility checker, the list/product/routine analyzers and the compatibility
//!   matrix. Nothing in this layer performs I/O or keeps state between calls.
//!
//! - **[`workflows`]: The Public API.** User-facing procedures that tie `core` and
//!   `engine` together, such as analyzing an AM/PM routine or turning a scanned label into
//!   a product analysis.
//!
//! ```
//! use skinprint::core::catalog::Catalog;
//! use skinprint::engine::compatibility::check_compatibility;
//!
//! let catalog = Catalog::builtin();
//! let result = check_compatibility(&catalog, "niacinamide", "vitamin-c");
//! assert!(!result.is_compatible());
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
