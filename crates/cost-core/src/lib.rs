//! Domain layer for the CDN cost estimator.
//!
//! Holds the usage record types, the tiered pricing model, number formatting
//! and the command-line settings shared by the other crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod pricing;
pub mod settings;

pub use error::{CostError, Result};
