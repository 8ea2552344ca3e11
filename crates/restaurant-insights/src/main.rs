mod bootstrap;

use anyhow::{Context, Result};
use insights_core::settings::Settings;
use insights_web::DashboardApp;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Restaurant Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Dataset: {}, Address: {}:{}",
        settings.data_path.display(),
        settings.host,
        settings.port
    );

    let app = DashboardApp::initialize(&settings).context("Failed to prepare dashboard")?;
    app.serve().await.context("Dashboard server failed")?;

    Ok(())
}
