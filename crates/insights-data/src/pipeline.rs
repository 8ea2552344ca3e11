//! One-shot preparation pipeline.
//!
//! Loads the dataset, normalizes ratings and computes aggregates, returning a
//! [`DashboardData`] context that the chart and web layers consume.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use insights_core::error::Result;
use insights_core::formatting::format_seconds;
use insights_core::models::{RawTable, RecordTable};
use serde::Serialize;
use tracing::info;

use crate::aggregator::Aggregates;
use crate::cleaning::{normalize_table, RateSummary};
use crate::reader::load_table;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the prepared data.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetadata {
    /// RFC 3339 timestamp when the data was prepared.
    pub generated_at: String,
    /// Dataset path as given on the command line.
    pub source: String,
    /// Rows read from the dataset.
    pub rows_loaded: usize,
    /// Rating parse outcomes.
    pub rates: RateSummary,
    /// Wall-clock seconds spent reading the file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent normalizing and aggregating.
    pub transform_time_seconds: f64,
}

/// The prepared, immutable inputs for chart building.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub table: RecordTable,
    pub aggregates: Aggregates,
    pub metadata: PipelineMetadata,
}

// ── PipelineStep ──────────────────────────────────────────────────────────────

/// A completed pipeline step, reported to the caller's observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Loaded,
    Normalized,
    Aggregated,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the preparation pipeline against the dataset at `path`.
///
/// 1. Load the delimited file.
/// 2. Normalize the rate column.
/// 3. Compute the aggregates.
///
/// `on_step` is called after each step completes, in order.  Only loading can
/// fail; a missing column surfaces later as an absent aggregate.
pub fn prepare(path: &Path, mut on_step: impl FnMut(PipelineStep)) -> Result<DashboardData> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = Instant::now();
    let raw = load_table(path)?;
    let load_time = load_start.elapsed().as_secs_f64();
    on_step(PipelineStep::Loaded);

    Ok(prepare_loaded(raw, path, load_time, on_step))
}

/// Steps 2 and 3 of [`prepare`], for a table that is already in memory.
pub fn prepare_loaded(
    raw: RawTable,
    source: &Path,
    load_time_seconds: f64,
    mut on_step: impl FnMut(PipelineStep),
) -> DashboardData {
    let rows_loaded = raw.len();

    // ── Step 2: Normalize ─────────────────────────────────────────────────────
    let transform_start = Instant::now();
    let (table, rates) = normalize_table(raw);
    info!(
        "Normalized {} rows ({} ratings parsed, {} missing)",
        rows_loaded, rates.parsed, rates.missing
    );
    on_step(PipelineStep::Normalized);

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let aggregates = Aggregates::compute(&table);
    let transform_time = transform_start.elapsed().as_secs_f64();
    info!(
        "Aggregates computed in {}",
        format_seconds(load_time_seconds + transform_time)
    );
    on_step(PipelineStep::Aggregated);

    let metadata = PipelineMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: source.display().to_string(),
        rows_loaded,
        rates,
        load_time_seconds,
        transform_time_seconds: transform_time,
    };

    DashboardData {
        table,
        aggregates,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
