//! Shared command context and output helpers
//!
//! This module contains:
//! - `Context` - engine, session and output format shared by every command
//! - `load_context` - resolve config and start a session
//! - `print_json` / `print_csv` - machine-readable output

use std::path::Path;

use anyhow::{Context as _, Result};
use oppmap_core::{export, AnalyticsConfig, AnalyticsEngine, DashboardSession, ExportFormat};
use serde::Serialize;

/// Everything a command needs to run
pub struct Context {
    pub engine: AnalyticsEngine,
    pub session: DashboardSession,
    pub format: ExportFormat,
}

impl Context {
    /// Fresh session over the full catalogue
    pub fn new(config: AnalyticsConfig, format: ExportFormat) -> Self {
        Self {
            engine: AnalyticsEngine::new(config),
            session: DashboardSession::default(),
            format,
        }
    }
}

/// Load config (explicit path, data-dir override, embedded defaults) and
/// start a session
pub fn load_context(config_path: Option<&Path>, format: ExportFormat) -> Result<Context> {
    let config = AnalyticsConfig::load(config_path).context("Failed to load analytics config")?;
    tracing::debug!(
        risk_seed = config.risk.seed,
        clusters = config.clustering.clusters,
        "Loaded analytics config"
    );
    Ok(Context::new(config, format))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", export::to_json(value)?);
    Ok(())
}

pub fn print_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let stdout = std::io::stdout();
    export::write_csv(rows, stdout.lock())?;
    Ok(())
}

/// Reject `--format csv` for outputs that are not a single table
pub fn ensure_not_csv(format: ExportFormat, what: &str) -> Result<()> {
    if format == ExportFormat::Csv {
        anyhow::bail!(
            "CSV output is not available for {}. Use --format table or --format json",
            what
        );
    }
    Ok(())
}
