use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the restaurant insights dashboard.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// The dataset file is missing, unreadable, or not delimited text.
    #[error("Failed to load dataset {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    /// A single cell could not be parsed into its typed value.
    ///
    /// Only ever raised per row and recovered locally by the caller.
    #[error("Failed to parse {field} value {value:?}")]
    FieldParse { field: &'static str, value: String },

    /// The loaded table does not carry a column an operation needs.
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// A chart could not be built from the available data.
    #[error("Failed to build {chart} chart: {reason}")]
    ChartBuild { chart: &'static str, reason: String },

    /// The dashboard server could not bind its listening socket.
    #[error("Failed to start server on {addr}: {source}")]
    ServerStart {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InsightsError {
    /// Shorthand for a [`InsightsError::ChartBuild`] with a formatted reason.
    pub fn chart(chart: &'static str, reason: impl ToString) -> Self {
        Self::ChartBuild {
            chart,
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a [`InsightsError::DataLoad`] with a formatted reason.
    pub fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias used throughout the insights crates.
pub type Result<T> = std::result::Result<T, InsightsError>;
