//! Monitor command - start the auxiliary monitoring tool.

use anyhow::Result;
use panelkit_core::{ConfigStore, MonitorLauncher};

pub async fn run(no_browser: bool) -> Result<()> {
    let config = ConfigStore::new()?.load().await?;

    MonitorLauncher::from_config(&config)
        .open_browser(!no_browser)
        .launch()
        .await?;

    Ok(())
}
