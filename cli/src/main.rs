//! Panelkit CLI - helpers for the control panel
//!
//! A command-line tool for finding a free port for the panel server,
//! listing directory entries for selection widgets, refreshing widget
//! choices, archiving folders, and launching the auxiliary monitor.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "panelkit")]
#[command(author, version, about = "Helpers for the control panel")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the first free port in a range
    #[command(alias = "port")]
    FreePort {
        /// First candidate port (config default: 7860)
        #[arg(short, long)]
        start: Option<u16>,

        /// One past the last candidate port (config default: 7865)
        #[arg(short, long)]
        end: Option<u16>,

        /// Re-sweep forever instead of failing after the sweep budget
        #[arg(long)]
        unbounded: bool,
    },

    /// List files or folders under a directory
    #[command(alias = "ls")]
    List {
        /// Directory to look through
        root: PathBuf,

        /// Allowed file extensions (all files when omitted)
        #[arg(short = 'x', long = "ext")]
        extensions: Vec<String>,

        /// List subdirectories instead of files
        #[arg(short, long)]
        dirs: bool,
    },

    /// Rebuild widget choice lists from (root, extensions, mode) triplets
    Refresh {
        /// Flat argument list, three per widget: ROOT EXTENSIONS MODE
        #[arg(required = true)]
        args: Vec<String>,
    },

    /// Move a folder to a timestamped destination
    #[command(alias = "mv")]
    Move {
        /// Directory the folder currently lives in
        source_root: PathBuf,

        /// Name of the folder to move
        name: PathBuf,

        /// Directory to move it under (created if absent)
        destination_root: PathBuf,
    },

    /// Launch the auxiliary monitor and open it in the browser
    Monitor {
        /// Launch without opening the browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Show current configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::FreePort {
            start,
            end,
            unbounded,
        } => {
            commands::free_port::run(start, end, unbounded, cli.json).await?;
        }
        Commands::List {
            root,
            extensions,
            dirs,
        } => {
            commands::list::run(&root, &extensions, dirs, cli.json).await?;
        }
        Commands::Refresh { args } => {
            commands::refresh::run(&args).await?;
        }
        Commands::Move {
            source_root,
            name,
            destination_root,
        } => {
            commands::relocate::run(&source_root, &name, &destination_root, cli.json).await?;
        }
        Commands::Monitor { no_browser } => {
            commands::monitor::run(no_browser).await?;
        }
        Commands::Config => {
            commands::config::show(cli.json).await?;
        }
    }

    Ok(())
}
