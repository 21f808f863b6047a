//! # Core Module
//!
//! The fundamental building blocks of Skinprint: data models, the reference catalog,
//! static lookup tables and local persistence.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Ingredients, products, preferences, routines, check-ins
//! - **Reference Data** ([`catalog`]) - The ingredient and product catalog with lookup and search
//! - **Persistence** ([`io`]) - The JSON key-value store that backs user state
//! - **Lookup Tables** ([`utils`]) - Routine step ordering
//!
//! Everything in this layer is either immutable reference data or a plain value type.
//! The only fallible operations are loading a catalog file and reading or writing the store.

pub mod catalog;
pub mod io;
pub mod models;
pub mod utils;
