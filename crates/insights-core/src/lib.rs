//! Shared building blocks for the restaurant insights dashboard.
//!
//! Holds the error taxonomy, the record table model, command-line settings,
//! the rate normalizer, descriptive statistics and number formatting used by
//! the data, chart and web layers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod rate;
pub mod settings;
pub mod stats;

pub use error::{InsightsError, Result};
