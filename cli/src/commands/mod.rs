//! CLI command implementations.

pub mod config;
pub mod free_port;
pub mod list;
pub mod monitor;
pub mod refresh;
pub mod relocate;
