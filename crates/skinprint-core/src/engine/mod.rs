//! # Engine Module
//!
//! The analysis engine: pairwise ingredient compatibility and everything built on it.
//!
//! ## Overview
//!
//! All functions in this layer are pure. They take the [`Catalog`](crate::core::catalog::Catalog)
//! and any user preferences explicitly, perform no I/O, and return identical results for
//! identical inputs. Nothing here returns an error: identifiers that do not resolve
//! against the catalog are reported as [`Verdict::Unknown`](compatibility::Verdict::Unknown)
//! and treated as compatible.
//!
//! ## Architecture
//!
//! - **Compatibility** ([`compatibility`]) - The two-direction conflict check for one pair
//! - **Analyzers** ([`analyzer`]) - Ingredient lists, single products and whole routines
//! - **Matrix** ([`matrix`]) - The pairwise table across every ingredient of a product set
//! - **Messages** ([`messages`]) - The reason strings shown to users

pub mod analyzer;
pub mod compatibility;
pub mod matrix;
pub mod messages;
