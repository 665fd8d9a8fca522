//! `tracing` subscriber setup.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Where log records go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// The TUI owns the screen, so it logs to a file or not at all.
    File(PathBuf),
    Stderr,
    Disabled,
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str, target: LogTarget) -> anyhow::Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {}", EnvFilter::DEFAULT_ENV))?,
        _ => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?,
    };
    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))?;
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .without_time()
                .try_init()
                .map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))?;
        }
        LogTarget::Disabled => {}
    }
    Ok(())
}
