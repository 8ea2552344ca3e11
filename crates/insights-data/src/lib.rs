//! Data ingestion layer for the restaurant insights dashboard.
//!
//! Reads the delimited dataset file, normalizes the rating column, computes
//! the typed aggregates behind each chart and runs the one-shot preparation
//! pipeline.

pub mod aggregator;
pub mod cleaning;
pub mod pipeline;
pub mod reader;

pub use insights_core as core;
