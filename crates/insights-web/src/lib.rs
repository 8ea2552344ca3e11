//! Web layer for the restaurant insights dashboard.
//!
//! Composes the prepared charts into a single tabbed HTML page, serves it with
//! [`axum`] and drives the load → render → serve lifecycle.

pub mod app;
pub mod layout;
pub mod server;

pub use app::{DashboardApp, Stage};
pub use insights_core as core;
