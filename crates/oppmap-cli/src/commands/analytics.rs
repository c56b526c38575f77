//! Analytics commands (scores, correlations, clusters, portfolio, forecast, insights)

use anyhow::Result;
use chrono::Utc;
use oppmap_core::catalog::{default_growth_window, market_growth_series};
use oppmap_core::export::{
    self, AllocationExport, ClusterExport, CorrelationExport, ScoredOpportunityExport,
};
use oppmap_core::{
    AnalyticsEngine, ClusterLabeling, Dataset, ExportFormat, ForecastBundle, OpportunityFilter,
    RiskTolerance, TimeHorizon, TrendFilter,
};
use serde::Serialize;

use super::{ensure_not_csv, print_csv, print_json, truncate, Context};

pub fn cmd_scores(ctx: &Context, min_focus: Option<f64>) -> Result<()> {
    let opportunities = OpportunityFilter::new()
        .min_focus(min_focus)
        .apply(&ctx.session.catalog().opportunities);
    let mut scored = ctx.engine.score_opportunities(&opportunities);
    scored.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));

    match ctx.format {
        ExportFormat::Json => return print_json(&scored),
        ExportFormat::Csv => {
            return print_csv(&export::rows::<_, ScoredOpportunityExport>(&scored))
        }
        ExportFormat::Table => {}
    }

    println!();
    println!("🎯 Opportunity & Risk Scores");
    println!("   ─────────────────────────────────────────────────────────────────────────");
    if scored.is_empty() {
        println!("   No opportunities match the selected filters.");
        return Ok(());
    }

    println!(
        "   {:34} │ {:>5} │ {:>6} │ {:>6} │ {:>5}",
        "Area", "Score", "CAGR", "Risk", "Level"
    );
    println!("   ───────────────────────────────────┼───────┼────────┼────────┼───────");
    for s in &scored {
        println!(
            "   {:34} │ {:>5.1} │ {:>5.1}% │ {:>6.3} │ {:>6}",
            truncate(&s.opportunity.area, 34),
            s.opportunity_score,
            s.opportunity.growth_rate_cagr,
            s.risk_score,
            s.risk_level.label()
        );
    }

    Ok(())
}

pub fn cmd_correlations(ctx: &Context, dataset: Dataset) -> Result<()> {
    let report = ctx
        .engine
        .correlate_dataset(ctx.session.catalog(), dataset)?;

    match ctx.format {
        ExportFormat::Json => return print_json(&report),
        ExportFormat::Csv => {
            return print_csv(&export::rows::<_, CorrelationExport>(
                &report.significant_pairs,
            ))
        }
        ExportFormat::Table => {}
    }

    let columns = &report.matrix.columns;
    println!();
    println!("🔗 Correlations: {}", dataset);
    println!("   ─────────────────────────────────────────────────────────────────────────");

    let header: Vec<String> = columns.iter().map(|c| format!("{:>10}", truncate(c, 10))).collect();
    println!("   {:24} │ {}", "", header.join(" "));
    for (name, row) in columns.iter().zip(&report.matrix.values) {
        let cells: Vec<String> = row
            .iter()
            .map(|v| match v {
                Some(r) => format!("{:>10.3}", r),
                None => format!("{:>10}", "-"),
            })
            .collect();
        println!("   {:24} │ {}", truncate(name, 24), cells.join(" "));
    }

    println!();
    if report.significant_pairs.is_empty() {
        println!("   No significant correlations (|r| > 0.3).");
        return Ok(());
    }
    println!("   Significant pairs:");
    for pair in &report.significant_pairs {
        println!(
            "   {:>7.3}  {} ↔ {} ({})",
            pair.correlation, pair.factor_1, pair.factor_2, pair.strength
        );
    }

    Ok(())
}

pub fn cmd_clusters(
    ctx: &Context,
    horizon: Option<TimeHorizon>,
    min_impact: Option<f64>,
    ranked: bool,
) -> Result<()> {
    let trends = TrendFilter::new()
        .time_horizon(horizon)
        .min_impact(min_impact)
        .apply(&ctx.session.catalog().trends);

    let report = if ranked {
        let mut config = ctx.engine.config().clone();
        config.clustering.labeling = ClusterLabeling::RankedByImpact;
        AnalyticsEngine::new(config).cluster_trends(&trends)?
    } else {
        ctx.engine.cluster_trends(&trends)?
    };

    match ctx.format {
        ExportFormat::Json => return print_json(&report),
        ExportFormat::Csv => {
            return print_csv(&export::rows::<_, ClusterExport>(&report.assignments))
        }
        ExportFormat::Table => {}
    }

    let features: Vec<&str> = report.features.iter().map(|f| f.as_str()).collect();
    println!();
    println!(
        "🧩 Trend Clusters ({} trends, {} labeling)",
        report.assignments.len(),
        report.labeling.as_str()
    );
    println!("   Features: {}", features.join(", "));
    println!(
        "   Inertia: {:.3} after {} iterations",
        report.inertia, report.iterations
    );
    println!("   ─────────────────────────────────────────────────────────────────────────");

    for profile in &report.profiles {
        let means: Vec<String> = profile
            .feature_means
            .iter()
            .map(|m| format!("{:.1}", m))
            .collect();
        println!();
        println!(
            "   [{}] {} ({} trends, means: {})",
            profile.cluster_id,
            profile.cluster_name,
            profile.size,
            means.join(" / ")
        );
        for a in report
            .assignments
            .iter()
            .filter(|a| a.cluster_id == profile.cluster_id)
        {
            println!("       • {}", a.trend);
        }
    }

    Ok(())
}

pub fn cmd_portfolio(
    ctx: &Context,
    tolerance: RiskTolerance,
    capital: Option<f64>,
    min_focus: Option<f64>,
) -> Result<()> {
    let capital = capital.unwrap_or(ctx.engine.config().portfolio.default_capital);
    let opportunities = OpportunityFilter::new()
        .min_focus(min_focus)
        .apply(&ctx.session.catalog().opportunities);
    let summary = ctx
        .engine
        .portfolio_summary(&opportunities, tolerance, capital)?;

    match ctx.format {
        ExportFormat::Json => return print_json(&summary),
        ExportFormat::Csv => {
            return print_csv(&export::rows::<_, AllocationExport>(&summary.entries))
        }
        ExportFormat::Table => {}
    }

    println!();
    println!("💼 Portfolio Recommendation");
    println!(
        "   Tolerance: {} (max {:.0}% per position)",
        tolerance,
        tolerance.max_allocation() * 100.0
    );
    println!("   Capital: ${:.2}", capital);
    println!("   ─────────────────────────────────────────────────────────────────────────");

    if summary.entries.is_empty() {
        println!("   No opportunities fit this risk tolerance.");
        return Ok(());
    }

    println!(
        "   {:34} │ {:>14} │ {:>6} │ {:>6} │ {:>6}",
        "Opportunity", "Allocation", "%", "Return", "Risk"
    );
    println!("   ───────────────────────────────────┼────────────────┼────────┼────────┼────────");
    for e in &summary.entries {
        println!(
            "   {:34} │ {:>14.2} │ {:>5.1}% │ {:>5.1}% │ {:>6}",
            truncate(&e.opportunity_area, 34),
            e.allocation_usd,
            e.allocation_percent,
            e.expected_return,
            e.risk_level.label()
        );
    }
    println!();
    println!("   Allocated: ${:.2}", summary.total_allocated);
    println!("   Uninvested: ${:.2}", summary.uninvested);
    println!(
        "   Weighted expected return: {:.1}%",
        summary.weighted_expected_return
    );

    Ok(())
}

/// One forecast period
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRow {
    /// 1-based offset past the last observation
    pub period: usize,
    /// Calendar year when forecasting the market size series
    pub year: Option<i32>,
    pub prediction: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Label predictions with periods and, when `first_year` is known, calendar
/// years (`None` past the end of the year range)
pub fn forecast_rows(bundle: &ForecastBundle, first_year: Option<i32>) -> Vec<ForecastRow> {
    bundle
        .predictions
        .iter()
        .zip(&bundle.lower)
        .zip(&bundle.upper)
        .enumerate()
        .map(|(i, ((&prediction, &lower), &upper))| ForecastRow {
            period: i + 1,
            year: first_year.and_then(|y| i32::try_from(i).ok().and_then(|i| y.checked_add(i))),
            prediction,
            lower,
            upper,
        })
        .collect()
}

#[derive(Serialize)]
struct ForecastOutput<'a> {
    series: &'a [f64],
    forecast: &'a ForecastBundle,
    periods: Vec<ForecastRow>,
}

pub fn cmd_forecast(ctx: &Context, series: Option<Vec<f64>>, horizon: Option<usize>) -> Result<()> {
    let horizon = horizon.unwrap_or(ctx.engine.config().forecast.default_horizon);

    let (values, first_year, label) = match series {
        Some(values) => (values, None, "custom series".to_string()),
        None => {
            let (from, to) = default_growth_window(Utc::now());
            let points = market_growth_series(&ctx.session.catalog().market, from, to);
            let values = points.iter().map(|p| p.value).collect::<Vec<f64>>();
            (
                values,
                Some(to + 1),
                format!("global AI market size {}-{} ($B)", from, to),
            )
        }
    };

    let bundle = ctx.engine.forecast(&values, horizon)?;
    let rows = forecast_rows(&bundle, first_year);

    match ctx.format {
        ExportFormat::Json => {
            return print_json(&ForecastOutput {
                series: &values,
                forecast: &bundle,
                periods: rows,
            })
        }
        ExportFormat::Csv => return print_csv(&rows),
        ExportFormat::Table => {}
    }

    println!();
    println!("🔮 Forecast: {}", label);
    println!(
        "   {} observations, {} periods ahead",
        values.len(),
        horizon
    );
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Fit: y = {:.3} + {:.3}·t   R² = {:.3}   r = {:.3} ({})",
        bundle.intercept,
        bundle.slope,
        bundle.r_squared,
        bundle.r,
        bundle.trend_strength.as_str()
    );
    println!(
        "   Band: ±{:.3} (residual std error {:.3})",
        bundle.band_half_width, bundle.residual_std_error
    );
    println!();
    println!(
        "   {:>6} │ {:>12} │ {:>12} │ {:>12}",
        "Period", "Lower", "Prediction", "Upper"
    );
    println!("   ───────┼──────────────┼──────────────┼──────────────");
    for row in &rows {
        let period = match row.year {
            Some(year) => year.to_string(),
            None => format!("+{}", row.period),
        };
        println!(
            "   {:>6} │ {:>12.2} │ {:>12.2} │ {:>12.2}",
            period, row.lower, row.prediction, row.upper
        );
    }

    Ok(())
}

pub fn cmd_insights(ctx: &Context) -> Result<()> {
    ensure_not_csv(ctx.format, "insights")?;

    let catalog = ctx.session.catalog();
    let insights = ctx
        .engine
        .market_insights(&catalog.trends, &catalog.opportunities);

    if ctx.format == ExportFormat::Json {
        return print_json(&insights);
    }

    let overview = &insights.market_overview;
    let recs = &insights.investment_recommendations;
    let risk = &insights.risk_analysis;

    println!();
    println!("🧠 Market Insights");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Opportunities tracked:     {}",
        overview.total_opportunities
    );
    println!(
        "   High-growth (>30% CAGR):   {}",
        overview.high_growth_opportunities
    );
    println!("   Emerging trends:           {}", overview.emerging_trends);
    println!(
        "   Market leaders:            {}",
        overview.market_leaders.join(", ")
    );

    println!();
    println!("   Top opportunities by investment focus:");
    for r in &recs.top_opportunities {
        println!("     {:>5.1}  {}", r.value, r.area);
    }
    println!("   Fastest growing:");
    for r in &recs.fastest_growing {
        println!("     {:>5.1}% {}", r.value, r.area);
    }
    if !recs.emerging_markets.is_empty() {
        println!("   Emerging markets: {}", recs.emerging_markets.join(", "));
    }

    println!();
    println!("⚖️  Risk Analysis");
    println!("   Low risk, high return:  {}", risk.low_risk_high_return);
    println!("   High risk, high return: {}", risk.high_risk_high_return);
    println!("   Stable investments:     {}", risk.stable_investments);

    println!();
    println!("📌 Strategic Recommendations");
    for (i, rec) in insights.strategic_recommendations.iter().enumerate() {
        println!("   {}. {}", i + 1, rec);
    }

    Ok(())
}
