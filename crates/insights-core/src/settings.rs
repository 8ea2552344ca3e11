use clap::Parser;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use crate::error::{InsightsError, Result};

/// Dataset path used when neither `--data-path` nor the environment provides one.
pub const DEFAULT_DATA_PATH: &str = "Zomato data .xls";

/// Page heading shown above the chart tabs.
pub const DEFAULT_TITLE: &str = "Zomato Data Analysis Dashboard";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Tabbed web dashboard of restaurant ratings, votes and order channels
#[derive(Parser, Debug, Clone)]
#[command(
    name = "restaurant-insights",
    about = "Tabbed web dashboard of restaurant ratings, votes and order channels",
    version
)]
pub struct Settings {
    /// Delimited dataset file to load
    #[arg(long, env = "RESTAURANT_INSIGHTS_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Host interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, default_value = "8050", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Dashboard page heading
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Development mode: debug logging and pipeline details in the page footer
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::apply_debug(Settings::parse_from(args))
    }

    /// `--debug` overrides log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Resolve `host:port` into the socket address the server binds.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(InsightsError::Config("host must not be empty".to_string()));
        }
        (host, self.port)
            .to_socket_addrs()
            .map_err(|e| InsightsError::Config(format!("invalid host {:?}: {}", self.host, e)))?
            .next()
            .ok_or_else(|| {
                InsightsError::Config(format!("host {:?} resolved to no address", self.host))
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
