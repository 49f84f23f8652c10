//! Panelkit Core Library
//!
//! Helper utilities behind a browser-based control panel.
//! Provides functionality to:
//! - Find the first free TCP port in a range (for binding the panel server)
//! - List files/folders in a directory to populate selection widgets
//! - Refresh widget choice lists from (root, extensions, mode) groups
//! - Move a folder to a timestamped archive location
//! - Launch an auxiliary monitoring process and open it in the browser
//!
//! # Architecture
//! - `probe`: port-range scanning with a pluggable connectivity checker
//! - `listing` / `refresh`: directory listing and choice-list production
//! - `relocate`: timestamped folder moves
//! - `monitor`: spawn-and-forget launch of the monitoring tool
//! - `config`: persisted defaults (`~/.panelkit/config.json`)

pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod monitor;
pub mod probe;
pub mod refresh;
pub mod relocate;

// Re-export commonly used types
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use listing::list_entries;
pub use models::{ChoiceSet, ChoiceUpdate, ListMode};
pub use monitor::MonitorLauncher;
pub use probe::{PortChecker, PortProbe, PortRange, RetryPolicy, TcpChecker};
pub use refresh::{RefreshRequest, RefreshService};
pub use relocate::move_folder;
