//! Shared test fixtures for loadout crates.
//!
//! This crate provides data builders and pure functions for testing.
//! It does NOT depend on `loadout-scoring` or `loadout-solver` to avoid
//! circular dependencies.
//!
//! - [`fixtures`] - one-line builders for units, entries and configurations
//! - [`scenarios`] - canned configurations, inventories and procurement trees
//! - [`brute`] - exhaustive assignment search for checking the optimal matcher
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! loadout-test = { workspace = true }
//! ```

pub mod brute;
pub mod fixtures;
pub mod scenarios;

pub use fixtures::{configuration, entry, subs, unit};
