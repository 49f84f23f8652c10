//! Auxiliary monitor launch: spawn-and-forget plus browser open.
//!
//! The monitoring tool owns a fixed port. If something already listens
//! there the launch is skipped with a warning, on the assumption that an
//! earlier instance is still running. The spawned process is detached and
//! never waited on.

use std::process::{Command, Stdio};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::probe::{PortChecker, TcpChecker};

/// Spawns the monitoring tool and opens it in the default browser.
pub struct MonitorLauncher {
    port: u16,
    command: String,
    args: Vec<String>,
    startup_delay: Duration,
    open_browser: bool,
}

impl MonitorLauncher {
    pub fn new(port: u16, command: impl Into<String>) -> Self {
        Self {
            port,
            command: command.into(),
            args: Vec::new(),
            startup_delay: Duration::from_secs(2),
            open_browser: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.monitor_port, &config.monitor_command)
            .args(config.monitor_args.clone())
            .startup_delay(Duration::from_millis(config.monitor_startup_delay_ms))
    }

    /// Arguments passed to the monitor command.
    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Grace period between spawning and opening the browser.
    pub fn startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }

    /// Skip the browser step, for headless hosts.
    pub fn open_browser(mut self, open: bool) -> Self {
        self.open_browser = open;
        self
    }

    /// Launch the monitor unless its port is already taken, then open the
    /// browser on it.
    ///
    /// An occupied port only skips the spawn; the browser is opened either
    /// way so the user lands on whichever instance is serving. A failed
    /// browser open is a warning, not an error.
    pub async fn launch(&self) -> Result<()> {
        let checker = TcpChecker::default();
        if checker.is_in_use(self.port).await {
            warn!(
                port = self.port,
                "monitor port already in use, skipping launch"
            );
        } else {
            self.spawn_detached()?;
            info!(command = %self.command, port = self.port, "monitor launched");
            sleep(self.startup_delay).await;
        }

        if self.open_browser {
            let url = format!("http://localhost:{}", self.port);
            if let Err(e) = open_in_browser(&url) {
                warn!(%url, error = %e, "could not open browser");
            }
        }
        Ok(())
    }

    fn spawn_detached(&self) -> Result<()> {
        Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Launch {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Open a URL with the platform's default opener.
fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    return spawn_opener("open", &[url]);

    #[cfg(target_os = "windows")]
    return spawn_opener("cmd", &["/C", "start", url]);

    #[cfg(all(unix, not(target_os = "macos")))]
    return spawn_opener("xdg-open", &[url]);
}

fn spawn_opener(program: &str, args: &[&str]) -> std::io::Result<()> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[tokio::test]
    async fn test_occupied_port_skips_spawn() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        // The command does not exist; launch still succeeds because the
        // occupied port short-circuits the spawn.
        let launcher = MonitorLauncher::new(port, "panelkit-no-such-monitor")
            .startup_delay(Duration::ZERO)
            .open_browser(false);
        launcher.launch().await.unwrap();
    }

    #[tokio::test]
    async fn test_free_port_spawn_failure_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let launcher = MonitorLauncher::new(port, "panelkit-no-such-monitor")
            .startup_delay(Duration::ZERO)
            .open_browser(false);
        let err = launcher.launch().await.unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }

    #[test]
    fn test_from_config_maps_fields() {
        let config = Config::default();
        let launcher = MonitorLauncher::from_config(&config);
        assert_eq!(launcher.port, config.monitor_port);
        assert_eq!(launcher.command, config.monitor_command);
        assert_eq!(
            launcher.startup_delay,
            Duration::from_millis(config.monitor_startup_delay_ms)
        );
    }
}
