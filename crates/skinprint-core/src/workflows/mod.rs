//! # Workflows Module
//!
//! High-level procedures that front ends call directly.
//!
//! ## Overview
//!
//! Each workflow combines the reference [`Catalog`](crate::core::catalog::Catalog), user
//! records passed in by the caller and the [`engine`](crate::engine) into one result
//! record. Workflows never read or write the store themselves; persisting their inputs and
//! outputs is left to the caller.
//!
//! ## Architecture
//!
//! - **Routine** ([`routine`]) - Analyzes the AM and PM routines separately
//! - **Scan** ([`scan`]) - Turns a label's file name or text into a product and its analysis
//! - **Progress** ([`progress`]) - Check-in trends and the progress summary
//! - **Fingerprint** ([`fingerprint`]) - Timeline events and the liked/disliked/suspect view
//! - **Circles** ([`circles`]) - Ingredient overlap between the user and a circle
//! - **Onboarding** ([`onboarding`]) - Starter routines from survey answers

pub mod circles;
pub mod fingerprint;
pub mod onboarding;
pub mod progress;
pub mod routine;
pub mod scan;
