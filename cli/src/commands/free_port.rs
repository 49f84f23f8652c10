//! Free-port command - probe the configured range for the panel server.

use anyhow::Result;
use panelkit_core::{ConfigStore, PortProbe, PortRange, RetryPolicy};

pub async fn run(start: Option<u16>, end: Option<u16>, unbounded: bool, json: bool) -> Result<()> {
    let config = ConfigStore::new()?.load().await?;

    let range = PortRange::new(
        start.unwrap_or(config.probe_start),
        end.unwrap_or(config.probe_end),
    )?;
    let policy = if unbounded {
        RetryPolicy::Unbounded
    } else {
        config.retry_policy()
    };

    let probe = PortProbe::new()
        .policy(policy)
        .sweep_delay(config.sweep_delay());
    let port = probe.find_available_port(range).await?;

    if json {
        println!("{}", serde_json::json!({ "port": port }));
    } else {
        println!("{port}");
    }

    Ok(())
}
