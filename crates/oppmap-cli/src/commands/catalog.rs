//! Catalogue browsing commands (overview, trends, opportunities, reference tables)

use anyhow::Result;
use chrono::Utc;
use oppmap_core::export::{
    self, IndustryExport, OpportunityExport, RegionExport, TrendExport, WorkforceExport,
};
use oppmap_core::{
    DashboardMetrics, DataFreshness, ExportFormat, MarketFacts, MarketSizeCategory, MaturityLevel,
    OpportunityFilter, RegionFilter, TimeHorizon, TrendFilter,
};
use serde::Serialize;

use super::{ensure_not_csv, print_csv, print_json, truncate, Context};

/// Format a delta with an explicit sign
pub fn signed(value: f64, precision: usize) -> String {
    format!("{:+.*}", precision, value)
}

#[derive(Serialize)]
struct OverviewOutput<'a> {
    market: &'a MarketFacts,
    last_update: String,
    freshness: DataFreshness,
    metrics: DashboardMetrics,
}

pub fn cmd_overview(
    ctx: &Context,
    horizon: Option<TimeHorizon>,
    min_impact: Option<f64>,
    min_focus: Option<f64>,
) -> Result<()> {
    ensure_not_csv(ctx.format, "the overview")?;

    let catalog = ctx.session.catalog();
    let trends = TrendFilter::new()
        .time_horizon(horizon)
        .min_impact(min_impact)
        .apply(&catalog.trends);
    let opportunities = OpportunityFilter::new()
        .min_focus(min_focus)
        .apply(&catalog.opportunities);
    let metrics = ctx.engine.dashboard_metrics(
        &trends,
        &opportunities,
        &catalog.trends,
        &catalog.opportunities,
    );
    let freshness = ctx.session.freshness(Utc::now());

    if ctx.format == ExportFormat::Json {
        return print_json(&OverviewOutput {
            market: &catalog.market,
            last_update: ctx.session.last_update().to_string(),
            freshness,
            metrics,
        });
    }

    let market = &catalog.market;
    println!();
    println!("🌐 AI Market Overview");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Global market 2024:   ${:.1}B",
        market.global_market_size_2024_billion
    );
    println!(
        "   Global market 2030:   ${:.1}B",
        market.global_market_size_2030_billion
    );
    println!("   CAGR 2025-2030:       {:.1}%", market.cagr_2025_2030);
    println!(
        "   Enterprise adoption:  {:.0}%",
        market.enterprise_adoption_rate
    );
    println!(
        "   AI workers (2025):    {:.0}M",
        market.ai_workers_2025_million
    );
    println!();
    println!("   Last update: {}", ctx.session.last_update());
    println!(
        "   Data vintage: {} (next update {})",
        freshness.data_vintage,
        freshness.next_update.format("%Y-%m-%d")
    );

    let t = &metrics.trends;
    let td = &metrics.trends_delta;
    let o = &metrics.opportunities;
    let od = &metrics.opportunities_delta;

    println!();
    println!("📊 Dashboard Metrics (delta vs. full catalogue)");
    println!("   ─────────────────────────────────────────────");
    println!("   Trends:                {:>8} ({:+})", t.count, td.count);
    println!(
        "   Avg impact score:      {:>8.1} ({})",
        t.average_impact,
        signed(td.average_impact, 1)
    );
    println!(
        "   Total market size:     {:>7.1}B ({}B)",
        t.total_market_size_billion,
        signed(td.total_market_size_billion, 1)
    );
    println!(
        "   Avg adoption:          {:>7.1}% ({})",
        t.average_adoption,
        signed(td.average_adoption, 1)
    );
    println!("   Opportunities:         {:>8} ({:+})", o.count, od.count);
    println!(
        "   Avg investment focus:  {:>8.1} ({})",
        o.average_focus,
        signed(od.average_focus, 1)
    );
    println!(
        "   High-focus areas:      {:>8} ({:+})",
        o.high_focus_count, od.high_focus_count
    );

    Ok(())
}

pub fn cmd_trends(
    ctx: &Context,
    horizon: Option<TimeHorizon>,
    min_impact: Option<f64>,
) -> Result<()> {
    let trends = TrendFilter::new()
        .time_horizon(horizon)
        .min_impact(min_impact)
        .apply(&ctx.session.catalog().trends);

    match ctx.format {
        ExportFormat::Json => return print_json(&trends),
        ExportFormat::Csv => return print_csv(&export::rows::<_, TrendExport>(&trends)),
        ExportFormat::Table => {}
    }

    println!();
    println!("🚀 AI Trends ({})", trends.len());
    println!("   ─────────────────────────────────────────────────────────────────────────");
    if trends.is_empty() {
        println!("   No trends match the selected filters.");
        return Ok(());
    }

    println!(
        "   {:36} │ {:>6} │ {:>9} │ {:>8} │ {}",
        "Trend", "Impact", "Market $B", "Adoption", "Horizon"
    );
    println!("   ─────────────────────────────────────┼────────┼───────────┼──────────┼──────────");
    for t in &trends {
        println!(
            "   {:36} │ {:>6.1} │ {:>9.1} │ {:>7.0}% │ {}",
            truncate(&t.name, 36),
            t.impact_score,
            t.market_size_billion,
            t.adoption_rate,
            t.time_horizon.as_str()
        );
    }

    Ok(())
}

pub fn cmd_opportunities(
    ctx: &Context,
    min_focus: Option<f64>,
    market_size: Option<MarketSizeCategory>,
    maturity: Option<MaturityLevel>,
) -> Result<()> {
    let opportunities = OpportunityFilter::new()
        .min_focus(min_focus)
        .market_size(market_size)
        .maturity(maturity)
        .apply(&ctx.session.catalog().opportunities);

    match ctx.format {
        ExportFormat::Json => return print_json(&opportunities),
        ExportFormat::Csv => {
            return print_csv(&export::rows::<_, OpportunityExport>(&opportunities))
        }
        ExportFormat::Table => {}
    }

    println!();
    println!("💡 Investment Opportunities ({})", opportunities.len());
    println!("   ─────────────────────────────────────────────────────────────────────────");
    if opportunities.is_empty() {
        println!("   No opportunities match the selected filters.");
        return Ok(());
    }

    println!(
        "   {:34} │ {:>15} │ {:>6} │ {:>5} │ {}",
        "Area", "Market Size", "CAGR", "Focus", "Maturity"
    );
    println!("   ───────────────────────────────────┼─────────────────┼────────┼───────┼──────────");
    for o in &opportunities {
        println!(
            "   {:34} │ {:>15} │ {:>5.1}% │ {:>5.1} │ {}",
            truncate(&o.area, 34),
            o.market_size_label(),
            o.growth_rate_cagr,
            o.investment_focus_score,
            o.maturity_level
        );
    }

    Ok(())
}

pub fn cmd_regions(ctx: &Context, regions: &[String]) -> Result<()> {
    let rows = RegionFilter::new()
        .regions(regions)
        .apply(&ctx.session.catalog().regions);

    match ctx.format {
        ExportFormat::Json => return print_json(&rows),
        ExportFormat::Csv => return print_csv(&export::rows::<_, RegionExport>(&rows)),
        ExportFormat::Table => {}
    }

    println!();
    println!("🗺️  Regional Market Distribution");
    println!("   ─────────────────────────────────────────────────────────────────────────");
    if rows.is_empty() {
        println!("   No regions match the selected filters.");
        return Ok(());
    }

    println!(
        "   {:22} │ {:>6} │ {:>6} │ {:>9} │ {}",
        "Region", "Share", "Growth", "Invest $B", "Focus Areas"
    );
    println!("   ───────────────────────┼────────┼────────┼───────────┼──────────────────");
    for r in &rows {
        println!(
            "   {:22} │ {:>5.1}% │ {:>5.1}% │ {:>9.1} │ {}",
            truncate(&r.region, 22),
            r.market_share_percent,
            r.growth_rate,
            r.investment_billion,
            truncate(&r.key_focus_areas.join(", "), 40)
        );
    }

    Ok(())
}

pub fn cmd_industries(ctx: &Context) -> Result<()> {
    let rows = &ctx.session.catalog().industries;

    match ctx.format {
        ExportFormat::Json => return print_json(rows),
        ExportFormat::Csv => return print_csv(&export::rows::<_, IndustryExport>(rows)),
        ExportFormat::Table => {}
    }

    println!();
    println!("🏭 Industry AI Adoption");
    println!("   ─────────────────────────────────────────────────────────────────────────");
    println!(
        "   {:24} │ {:>8} │ {:>5} │ {:>8} │ {}",
        "Industry", "Adoption", "ROI", "Priority", "Primary Use Cases"
    );
    println!("   ─────────────────────────┼──────────┼───────┼──────────┼──────────────────");
    for i in rows {
        println!(
            "   {:24} │ {:>7.0}% │ {:>4.0}% │ {:>8.1} │ {}",
            truncate(&i.industry, 24),
            i.adoption_rate,
            i.roi_percentage,
            i.investment_priority,
            truncate(&i.primary_use_cases.join(", "), 40)
        );
    }

    Ok(())
}

pub fn cmd_workforce(ctx: &Context) -> Result<()> {
    let rows = &ctx.session.catalog().workforce;

    match ctx.format {
        ExportFormat::Json => return print_json(rows),
        ExportFormat::Csv => return print_csv(&export::rows::<_, WorkforceExport>(rows)),
        ExportFormat::Table => {}
    }

    println!();
    println!("👥 Workforce Impact");
    println!("   ─────────────────────────────────────────────────────────────────────────");
    println!(
        "   {:26} │ {:>9} │ {:>14} │ {:>10}",
        "Job Category", "Exposure", "Transformation", "Reskilling"
    );
    println!("   ───────────────────────────┼───────────┼────────────────┼────────────");
    for w in rows {
        println!(
            "   {:26} │ {:>9} │ {:>13.0}% │ {:>10.1}",
            truncate(&w.job_category, 26),
            w.ai_exposure_level.label(),
            w.job_transformation,
            w.reskilling_priority
        );
    }

    Ok(())
}
