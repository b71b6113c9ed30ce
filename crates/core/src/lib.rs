//! # Calendar Core
//!
//! Domain types, error type, scheduling rules and the persistence contract
//! shared by the rest of the workspace.

pub mod errors;
pub mod models;
pub mod rules;
pub mod store;
