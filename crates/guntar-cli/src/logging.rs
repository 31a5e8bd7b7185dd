//! tracing subscriber setup.

use anyhow::Context;
use anyhow::Result;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn filter(verbose: bool) -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive(if verbose {
        "guntar=debug".parse()?
    } else {
        "guntar=warn".parse()?
    }))
}

/// Logs to stderr, only if verbose or `RUST_LOG` is set.
pub fn init(verbose: bool) -> Result<()> {
    if verbose || std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(filter(verbose)?)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// Logs to `path` while the terminal is in the alternate screen. Without a
/// file nothing is logged.
pub fn init_file(verbose: bool, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file '{}'", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
