//! Refresh command - simulate a data update and report how the metrics moved

use anyhow::{Context as _, Result};
use chrono::Utc;
use oppmap_core::{DashboardMetrics, DashboardSession, ExportFormat};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::{ensure_not_csv, print_json, signed, Context};

#[derive(Serialize)]
struct RefreshOutput<'a> {
    seed: Option<u64>,
    last_update: String,
    refresh_count: u32,
    /// Refreshed figures with deltas against the previous data
    metrics: &'a DashboardMetrics,
}

/// Refresh the context's session in place and return the before/after metrics
pub async fn refresh_session(ctx: &mut Context, seed: Option<u64>) -> Result<DashboardMetrics> {
    let delay = ctx.engine.config().refresh.delay();
    if !delay.is_zero() {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Simulating refresh latency");
        tokio::time::sleep(delay).await;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let refreshed: DashboardSession = ctx
        .session
        .refreshed(&mut rng, Utc::now(), &ctx.engine.config().refresh)
        .context("Failed to refresh dashboard data")?;

    let before = ctx.session.catalog();
    let after = refreshed.catalog();
    let metrics = ctx.engine.dashboard_metrics(
        &after.trends,
        &after.opportunities,
        &before.trends,
        &before.opportunities,
    );

    ctx.session = refreshed;
    Ok(metrics)
}

pub async fn cmd_refresh(ctx: &mut Context, seed: Option<u64>) -> Result<()> {
    ensure_not_csv(ctx.format, "refresh")?;

    if ctx.format == ExportFormat::Table {
        println!("🔄 Refreshing dashboard data...");
    }
    let metrics = refresh_session(ctx, seed).await?;

    if ctx.format == ExportFormat::Json {
        return print_json(&RefreshOutput {
            seed,
            last_update: ctx.session.last_update().to_string(),
            refresh_count: ctx.session.refresh_count(),
            metrics: &metrics,
        });
    }

    let t = &metrics.trends;
    let td = &metrics.trends_delta;
    let o = &metrics.opportunities;
    let od = &metrics.opportunities_delta;

    println!("   Last update: {}", ctx.session.last_update());
    if let Some(seed) = seed {
        println!("   Seed: {}", seed);
    }
    println!();
    println!("📊 Metrics after refresh");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Avg impact score:      {:>6.2} ({})",
        t.average_impact,
        signed(td.average_impact, 3)
    );
    println!(
        "   Avg investment focus:  {:>6.2} ({})",
        o.average_focus,
        signed(od.average_focus, 3)
    );
    println!(
        "   High-focus areas:      {:>6} ({:+})",
        o.high_focus_count, od.high_focus_count
    );
    println!();
    println!("✅ Refresh complete. Scores changed; market sizes and adoption did not.");

    Ok(())
}
