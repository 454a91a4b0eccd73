//! Data ingestion layer for the CDN cost estimator.
//!
//! Discovers and loads usage summary files and accumulates their counters
//! into a single set of totals for pricing.

pub mod accumulator;
pub mod reader;
