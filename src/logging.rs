//! Tracing subscriber setup.
//!
//! Batch modes log to stderr. The TUI owns the terminal, so it logs to a file.

use crate::cli::Cli;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "swot-agent";

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_DIR).join("swot-agent.log"))
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Resolve where logs go: `Some(path)` for a file, `None` for stderr.
fn log_target(args: &Cli) -> Option<PathBuf> {
    match (&args.log_file, args.is_tui()) {
        (Some(p), _) => Some(p.clone()),
        (None, true) => default_log_path(),
        (None, false) => None,
    }
}

pub fn init(args: &Cli) -> Result<()> {
    match log_target(args) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create log directory {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("warn"))
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;
        }
    }
    Ok(())
}
