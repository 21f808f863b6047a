//! Local persistence for user state.
//!
//! User records (preferences, routine, check-ins, survey answers) are kept in a single
//! JSON document keyed by the names in [`store::keys`]. Reference data never goes
//! through this module; see [`crate::core::catalog`].

pub mod store;
