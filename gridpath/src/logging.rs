//! Diagnostics go to a file, never to the terminal the grid is drawn on.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "GRIDPATH_LOG";

/// Install a subscriber writing to the file named by `GRIDPATH_LOG`,
/// filtered by `RUST_LOG` (default `info`). `log` records are forwarded to
/// it. Without `GRIDPATH_LOG` logging stays off.
pub fn init_logging() -> std::io::Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
