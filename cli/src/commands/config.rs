//! Config command - display current configuration.

use anyhow::Result;
use panelkit_core::ConfigStore;

pub async fn show(json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file: {}", store.config_path().display());
    println!();
    println!("Probe range:        {}..{}", config.probe_start, config.probe_end);
    println!("Max sweeps:         {}", config.max_sweeps);
    println!("Sweep delay:        {} ms", config.sweep_delay_ms);
    println!("Monitor port:       {}", config.monitor_port);
    println!("Monitor command:    {}", config.monitor_command);
    if !config.monitor_args.is_empty() {
        println!("Monitor args:       {}", config.monitor_args.join(" "));
    }
    println!("Monitor delay:      {} ms", config.monitor_startup_delay_ms);

    Ok(())
}
