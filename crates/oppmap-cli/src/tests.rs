//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;
use oppmap_core::{
    AnalyticsConfig, Dataset, ExportFormat, LastUpdate, MarketSizeCategory, RiskTolerance,
    TimeHorizon,
};

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate, Context};

fn setup_context(format: ExportFormat) -> Context {
    Context::new(AnalyticsConfig::default(), format)
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "oppmap",
        "--format",
        "json",
        "-v",
        "trends",
        "--horizon",
        "emerging",
        "--min-impact",
        "8.5",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.format, ExportFormat::Json);
    match cli.command {
        Commands::Trends {
            horizon,
            min_impact,
        } => {
            assert_eq!(horizon, Some(TimeHorizon::Emerging));
            assert_eq!(min_impact, Some(8.5));
        }
        _ => panic!("expected trends command"),
    }
}

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["oppmap", "portfolio"]).unwrap();
    assert_eq!(cli.format, ExportFormat::Table);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Portfolio {
            tolerance,
            capital,
            min_focus,
        } => {
            assert_eq!(tolerance, RiskTolerance::Medium);
            assert!(capital.is_none());
            assert!(min_focus.is_none());
        }
        _ => panic!("expected portfolio command"),
    }
}

#[test]
fn test_parse_forecast_series() {
    let cli = Cli::try_parse_from(["oppmap", "forecast", "--series", "1,2.5,4", "--horizon", "3"])
        .unwrap();
    match cli.command {
        Commands::Forecast { series, horizon } => {
            assert_eq!(series, Some(vec![1.0, 2.5, 4.0]));
            assert_eq!(horizon, Some(3));
        }
        _ => panic!("expected forecast command"),
    }
}

#[test]
fn test_parse_rejects_unknown_values() {
    assert!(Cli::try_parse_from(["oppmap", "--format", "xml", "trends"]).is_err());
    assert!(Cli::try_parse_from(["oppmap", "portfolio", "--tolerance", "reckless"]).is_err());
    assert!(Cli::try_parse_from(["oppmap", "correlations", "--dataset", "stocks"]).is_err());
}

#[test]
fn test_parse_opportunity_filters() {
    let cli = Cli::try_parse_from([
        "oppmap",
        "opportunities",
        "--market-size",
        "large",
        "--maturity",
        "early-growth",
    ])
    .unwrap();
    match cli.command {
        Commands::Opportunities {
            market_size,
            maturity,
            ..
        } => {
            assert_eq!(market_size, Some(MarketSizeCategory::Large));
            assert!(maturity.is_some());
        }
        _ => panic!("expected opportunities command"),
    }
}

// ========== Context Tests ==========

#[test]
fn test_load_context_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[risk]\nseed = 7\n\n[portfolio]\nmax_positions = 3").unwrap();

    let ctx = commands::load_context(Some(file.path()), ExportFormat::Json).unwrap();
    assert_eq!(ctx.engine.config().risk.seed, 7);
    assert_eq!(ctx.engine.config().portfolio.max_positions, 3);
    assert_eq!(ctx.format, ExportFormat::Json);
}

#[test]
fn test_load_context_rejects_bad_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[clustering]\nclusters = 9").unwrap();

    assert!(commands::load_context(Some(file.path()), ExportFormat::Table).is_err());
}

// ========== Catalogue Command Tests ==========

#[test]
fn test_cmd_overview_all_formats() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_overview(&ctx, Some(TimeHorizon::Future), None, Some(8.0)).is_ok());

    let ctx = setup_context(ExportFormat::Json);
    assert!(commands::cmd_overview(&ctx, None, None, None).is_ok());

    let ctx = setup_context(ExportFormat::Csv);
    assert!(commands::cmd_overview(&ctx, None, None, None).is_err());
}

#[test]
fn test_cmd_trends() {
    for format in [ExportFormat::Table, ExportFormat::Json, ExportFormat::Csv] {
        let ctx = setup_context(format);
        assert!(commands::cmd_trends(&ctx, Some(TimeHorizon::Dominant), Some(8.0)).is_ok());
    }
}

#[test]
fn test_cmd_trends_empty_view() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_trends(&ctx, None, Some(11.0)).is_ok());
}

#[test]
fn test_cmd_opportunities() {
    let ctx = setup_context(ExportFormat::Csv);
    assert!(commands::cmd_opportunities(&ctx, Some(8.0), None, None).is_ok());

    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_opportunities(&ctx, None, Some(MarketSizeCategory::Medium), None).is_ok());
}

#[test]
fn test_cmd_reference_tables() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_regions(&ctx, &["North America".to_string()]).is_ok());
    assert!(commands::cmd_regions(&ctx, &[]).is_ok());
    assert!(commands::cmd_industries(&ctx).is_ok());
    assert!(commands::cmd_workforce(&ctx).is_ok());
}

// ========== Analytics Command Tests ==========

#[test]
fn test_cmd_scores() {
    for format in [ExportFormat::Table, ExportFormat::Json, ExportFormat::Csv] {
        let ctx = setup_context(format);
        assert!(commands::cmd_scores(&ctx, None).is_ok());
    }
}

#[test]
fn test_cmd_correlations_every_dataset() {
    let ctx = setup_context(ExportFormat::Table);
    for dataset in [
        Dataset::Trends,
        Dataset::Opportunities,
        Dataset::Scores,
        Dataset::Regions,
        Dataset::Industries,
        Dataset::Workforce,
    ] {
        assert!(commands::cmd_correlations(&ctx, dataset).is_ok());
    }
}

#[test]
fn test_cmd_clusters() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_clusters(&ctx, None, None, false).is_ok());
    assert!(commands::cmd_clusters(&ctx, None, None, true).is_ok());
}

#[test]
fn test_cmd_clusters_too_few_trends() {
    let ctx = setup_context(ExportFormat::Table);
    // No trend scores a perfect 10
    let result = commands::cmd_clusters(&ctx, None, Some(10.0), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_portfolio() {
    let ctx = setup_context(ExportFormat::Table);
    for tolerance in [RiskTolerance::Low, RiskTolerance::Medium, RiskTolerance::High] {
        assert!(commands::cmd_portfolio(&ctx, tolerance, Some(250_000.0), None).is_ok());
    }
}

#[test]
fn test_cmd_portfolio_invalid_capital() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_portfolio(&ctx, RiskTolerance::High, Some(0.0), None).is_err());
}

#[test]
fn test_cmd_forecast() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_forecast(&ctx, None, None).is_ok());
    assert!(commands::cmd_forecast(&ctx, Some(vec![3.0, 5.0, 4.0, 8.0]), Some(2)).is_ok());

    let ctx = setup_context(ExportFormat::Csv);
    assert!(commands::cmd_forecast(&ctx, Some(vec![1.0, 2.0]), Some(1)).is_ok());
}

#[test]
fn test_cmd_forecast_rejects_short_series() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_forecast(&ctx, Some(vec![1.0]), None).is_err());
    assert!(commands::cmd_forecast(&ctx, Some(vec![1.0, 2.0]), Some(0)).is_err());
}

#[test]
fn test_forecast_rows_label_years() {
    let ctx = setup_context(ExportFormat::Table);
    let bundle = ctx.engine.forecast(&[1.0, 2.0, 3.0], 3).unwrap();

    let rows = commands::forecast_rows(&bundle, Some(2026));
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].period, 1);
    assert_eq!(rows[0].year, Some(2026));
    assert_eq!(rows[2].year, Some(2028));
    assert!((rows[0].prediction - 4.0).abs() < 1e-9);

    let rows = commands::forecast_rows(&bundle, None);
    assert!(rows.iter().all(|r| r.year.is_none()));
}

#[test]
fn test_forecast_rows_year_overflow() {
    let ctx = setup_context(ExportFormat::Table);
    let bundle = ctx.engine.forecast(&[1.0, 2.0], 2).unwrap();

    let rows = commands::forecast_rows(&bundle, Some(i32::MAX));
    assert_eq!(rows[0].year, Some(i32::MAX));
    assert_eq!(rows[1].year, None);
}

#[test]
fn test_cmd_forecast_rejects_oversized_horizon() {
    let ctx = setup_context(ExportFormat::Table);
    let max = ctx.engine.config().forecast.max_horizon;
    assert!(commands::cmd_forecast(&ctx, Some(vec![1.0, 2.0]), Some(max + 1)).is_err());
    assert!(commands::cmd_forecast(&ctx, Some(vec![1.0, 2.0]), Some(usize::MAX)).is_err());
}

#[test]
fn test_cmd_insights() {
    let ctx = setup_context(ExportFormat::Table);
    assert!(commands::cmd_insights(&ctx).is_ok());

    let ctx = setup_context(ExportFormat::Csv);
    assert!(commands::cmd_insights(&ctx).is_err());
}

// ========== Refresh Command Tests ==========

#[tokio::test]
async fn test_refresh_session_replaces_data() {
    let mut ctx = setup_context(ExportFormat::Table);
    let before = ctx.session.catalog().clone();

    let metrics = commands::refresh_session(&mut ctx, Some(42)).await.unwrap();

    assert_eq!(ctx.session.refresh_count(), 1);
    assert!(matches!(ctx.session.last_update(), LastUpdate::Refreshed(_)));
    assert_ne!(ctx.session.catalog().trends, before.trends);
    assert_eq!(metrics.trends_delta.count, 0);
    assert_eq!(metrics.trends_delta.total_market_size_billion, 0.0);
}

#[tokio::test]
async fn test_refresh_is_reproducible_with_seed() {
    let mut a = setup_context(ExportFormat::Table);
    let mut b = setup_context(ExportFormat::Table);

    commands::refresh_session(&mut a, Some(5)).await.unwrap();
    commands::refresh_session(&mut b, Some(5)).await.unwrap();

    assert_eq!(a.session.catalog(), b.session.catalog());
}

#[tokio::test]
async fn test_cmd_refresh_formats() {
    let mut ctx = setup_context(ExportFormat::Json);
    assert!(commands::cmd_refresh(&mut ctx, Some(1)).await.is_ok());

    let mut ctx = setup_context(ExportFormat::Csv);
    assert!(commands::cmd_refresh(&mut ctx, None).await.is_err());
    assert_eq!(ctx.session.refresh_count(), 0);
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is a long string", 10), "this is...");
    assert_eq!(truncate("Künstliche Intelligenz", 8), "Künst...");
}

#[test]
fn test_signed() {
    assert_eq!(commands::signed(1.26, 1), "+1.3");
    assert_eq!(commands::signed(-0.5, 2), "-0.50");
    assert_eq!(commands::signed(0.0, 1), "+0.0");
}
