//! Dashboard lifecycle: load, normalize, aggregate, render, serve.
//!
//! [`DashboardApp::initialize`] runs the whole data and chart pipeline
//! synchronously so that every failure surfaces before a socket is opened.

use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use insights_charts::ChartSet;
use insights_core::error::Result;
use insights_core::formatting::format_seconds;
use insights_core::settings::Settings;
use insights_data::pipeline::{prepare, DashboardData, PipelineStep};
use tokio::net::TcpListener;
use tracing::info;

use crate::layout::DashboardPage;
use crate::server;

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Lifecycle stage.  Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Uninitialized,
    Loaded,
    Normalized,
    Aggregated,
    Rendered,
    Serving,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Uninitialized => "uninitialized",
            Stage::Loaded => "loaded",
            Stage::Normalized => "normalized",
            Stage::Aggregated => "aggregated",
            Stage::Rendered => "rendered",
            Stage::Serving => "serving",
        };
        f.write_str(name)
    }
}

impl From<PipelineStep> for Stage {
    fn from(step: PipelineStep) -> Self {
        match step {
            PipelineStep::Loaded => Stage::Loaded,
            PipelineStep::Normalized => Stage::Normalized,
            PipelineStep::Aggregated => Stage::Aggregated,
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug_assert!(next > *stage, "stage cannot move from {stage} to {next}");
    info!("Stage: {} -> {}", stage, next);
    *stage = next;
}

// ── DashboardApp ──────────────────────────────────────────────────────────────

/// A fully prepared dashboard, ready to serve.
pub struct DashboardApp {
    stage: Stage,
    addr: SocketAddr,
    data: DashboardData,
    charts: ChartSet,
    page: Arc<str>,
}

impl DashboardApp {
    /// Load the dataset, build every chart and render the page.
    ///
    /// Fails on an unusable bind address, an unreadable dataset or any chart
    /// that cannot be built.
    pub fn initialize(settings: &Settings) -> Result<Self> {
        let started = Instant::now();
        let mut stage = Stage::Uninitialized;
        let addr = settings.socket_addr()?;

        let data = prepare(&settings.data_path, |step| advance(&mut stage, step.into()))?;

        let charts = ChartSet::build_all(&data)?;
        let mut page = DashboardPage::new(&settings.title, &charts);
        if settings.debug {
            page = page.with_metadata(&data.metadata);
        }
        let page: Arc<str> = Arc::from(page.render()?);
        advance(&mut stage, Stage::Rendered);

        info!(
            "Dashboard ready in {} ({} rows, {} bytes of HTML)",
            format_seconds(started.elapsed().as_secs_f64()),
            data.metadata.rows_loaded,
            page.len()
        );

        Ok(Self {
            stage,
            addr,
            data,
            charts,
            page,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Address from the settings, used by [`DashboardApp::serve`].
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    /// The rendered HTML document.
    pub fn page(&self) -> Arc<str> {
        Arc::clone(&self.page)
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let listener = server::bind(self.addr).await?;
        let page = self.enter_serving();
        server::serve(listener, page).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let page = self.enter_serving();
        server::serve_with_shutdown(listener, page, shutdown).await
    }

    fn enter_serving(mut self) -> Arc<str> {
        advance(&mut self.stage, Stage::Serving);
        self.page
    }
}
