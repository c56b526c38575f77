//! Analytics handlers
//!
//! Every endpoint computes over the current session's catalogue; nothing is cached.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use oppmap_core::catalog::{default_growth_window, market_growth_series};
use oppmap_core::{
    AnalyticsEngine, ClusterLabeling, ClusterReport, CorrelationReport, Dataset, ForecastBundle,
    MarketInsights, OpportunityFilter, PortfolioSummary, RiskTolerance, ScoredOpportunity,
};

use super::{parse_opt, TrendQuery};
use crate::{AppError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ScoreQuery {
    pub min_focus: Option<f64>,
}

/// GET /api/analytics/scores - Opportunity and risk scores, highest score first
pub async fn get_scores(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScoreQuery>,
) -> Json<Vec<ScoredOpportunity>> {
    let session = state.session.read().await;
    let opportunities = OpportunityFilter::new()
        .min_focus(params.min_focus)
        .apply(&session.catalog().opportunities);

    let mut scored = state.engine.score_opportunities(&opportunities);
    scored.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));
    Json(scored)
}

#[derive(Debug, Default, Deserialize)]
pub struct CorrelationQuery {
    /// trends (default), opportunities, scores, regions, industries, workforce
    pub dataset: Option<String>,
}

/// GET /api/analytics/correlations?dataset=
pub async fn get_correlations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CorrelationQuery>,
) -> Result<Json<CorrelationReport>, AppError> {
    let dataset = parse_opt::<Dataset>(params.dataset.as_deref())?.unwrap_or_default();
    let session = state.session.read().await;
    let report = state.engine.correlate_dataset(session.catalog(), dataset)?;
    Ok(Json(report))
}

#[derive(Debug, Default, Deserialize)]
pub struct ClusterQuery {
    pub horizon: Option<String>,
    pub min_impact: Option<f64>,
    /// positional or ranked_by_impact (defaults to the configured labeling)
    pub labeling: Option<String>,
}

/// GET /api/analytics/clusters
pub async fn get_clusters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClusterQuery>,
) -> Result<Json<ClusterReport>, AppError> {
    let labeling = parse_opt::<ClusterLabeling>(params.labeling.as_deref())?;
    let filter = TrendQuery {
        horizon: params.horizon,
        min_impact: params.min_impact,
    }
    .filter()?;

    let session = state.session.read().await;
    let trends = filter.apply(&session.catalog().trends);

    let report = match labeling {
        Some(labeling) if labeling != state.engine.config().clustering.labeling => {
            let mut config = state.engine.config().clone();
            config.clustering.labeling = labeling;
            AnalyticsEngine::new(config).cluster_trends(&trends)?
        }
        _ => state.engine.cluster_trends(&trends)?,
    };
    Ok(Json(report))
}

#[derive(Debug, Default, Deserialize)]
pub struct PortfolioQuery {
    /// low, medium (default) or high
    pub tolerance: Option<String>,
    /// USD to allocate (defaults to the configured amount)
    pub capital: Option<f64>,
    pub min_focus: Option<f64>,
}

/// GET /api/analytics/portfolio?tolerance=&capital=
pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PortfolioQuery>,
) -> Result<Json<PortfolioSummary>, AppError> {
    let tolerance = parse_opt::<RiskTolerance>(params.tolerance.as_deref())?.unwrap_or_default();
    let capital = params
        .capital
        .unwrap_or(state.engine.config().portfolio.default_capital);

    let session = state.session.read().await;
    let opportunities = OpportunityFilter::new()
        .min_focus(params.min_focus)
        .apply(&session.catalog().opportunities);

    let summary = state
        .engine
        .portfolio_summary(&opportunities, tolerance, capital)?;
    Ok(Json(summary))
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    /// Observed values the line was fitted to
    pub series: Vec<f64>,
    /// Calendar year of the first prediction (market size series only)
    pub first_year: Option<i32>,
    pub forecast: ForecastBundle,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketForecastQuery {
    pub horizon: Option<usize>,
}

/// GET /api/analytics/forecast?horizon= - Forecast of the global market size
pub async fn get_market_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarketForecastQuery>,
) -> Result<Json<ForecastResponse>, AppError> {
    let horizon = params
        .horizon
        .unwrap_or(state.engine.config().forecast.default_horizon);
    let (from, to) = default_growth_window(Utc::now());

    let series: Vec<f64> = {
        let session = state.session.read().await;
        market_growth_series(&session.catalog().market, from, to)
            .iter()
            .map(|p| p.value)
            .collect()
    };

    let forecast = state.engine.forecast(&series, horizon)?;
    Ok(Json(ForecastResponse {
        series,
        first_year: Some(to + 1),
        forecast,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub series: Vec<f64>,
    pub horizon: Option<usize>,
}

/// POST /api/analytics/forecast - Forecast an explicit series
pub async fn post_forecast(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, AppError> {
    let horizon = body
        .horizon
        .unwrap_or(state.engine.config().forecast.default_horizon);
    let forecast = state.engine.forecast(&body.series, horizon)?;
    Ok(Json(ForecastResponse {
        series: body.series,
        first_year: None,
        forecast,
    }))
}

/// GET /api/analytics/insights
pub async fn get_insights(State(state): State<Arc<AppState>>) -> Json<MarketInsights> {
    let session = state.session.read().await;
    let catalog = session.catalog();
    Json(
        state
            .engine
            .market_insights(&catalog.trends, &catalog.opportunities),
    )
}
