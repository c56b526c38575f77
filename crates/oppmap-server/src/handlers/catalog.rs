//! Catalogue handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use oppmap_core::{
    DashboardMetrics, DataFreshness, IndustryAdoption, MarketFacts, MarketSizeCategory,
    MaturityLevel, OpportunityFilter, OpportunityRecord, RegionFilter, RegionalMarket,
    TimeHorizon, TrendFilter, TrendRecord, WorkforceImpact,
};

use super::parse_opt;
use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Trend view filters
#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    /// dominant, emerging or future
    pub horizon: Option<String>,
    pub min_impact: Option<f64>,
}

impl TrendQuery {
    pub fn filter(&self) -> Result<TrendFilter, AppError> {
        Ok(TrendFilter::new()
            .time_horizon(parse_opt::<TimeHorizon>(self.horizon.as_deref())?)
            .min_impact(self.min_impact))
    }
}

/// Opportunity view filters
#[derive(Debug, Default, Deserialize)]
pub struct OpportunityQuery {
    pub min_focus: Option<f64>,
    /// large or medium
    pub market_size: Option<String>,
    /// emerging, early_growth, critical_need or mature
    pub maturity: Option<String>,
}

impl OpportunityQuery {
    pub fn filter(&self) -> Result<OpportunityFilter, AppError> {
        Ok(OpportunityFilter::new()
            .min_focus(self.min_focus)
            .market_size(parse_opt::<MarketSizeCategory>(self.market_size.as_deref())?)
            .maturity(parse_opt::<MaturityLevel>(self.maturity.as_deref())?))
    }
}

/// Overview filters (trend and opportunity views together)
#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    pub horizon: Option<String>,
    pub min_impact: Option<f64>,
    pub min_focus: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub market: MarketFacts,
    pub last_update: String,
    pub freshness: DataFreshness,
    /// Figures for the filtered view with deltas against the full catalogue
    pub metrics: DashboardMetrics,
}

/// GET /api/overview - Headline figures and dashboard metrics
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OverviewQuery>,
) -> Result<Json<OverviewResponse>, AppError> {
    let trend_filter = TrendQuery {
        horizon: params.horizon,
        min_impact: params.min_impact,
    }
    .filter()?;
    let opportunity_filter = OpportunityFilter::new().min_focus(params.min_focus);

    let session = state.session.read().await;
    let catalog = session.catalog();
    let trends = trend_filter.apply(&catalog.trends);
    let opportunities = opportunity_filter.apply(&catalog.opportunities);

    Ok(Json(OverviewResponse {
        market: catalog.market,
        last_update: session.last_update().to_string(),
        freshness: session.freshness(Utc::now()),
        metrics: state.engine.dashboard_metrics(
            &trends,
            &opportunities,
            &catalog.trends,
            &catalog.opportunities,
        ),
    }))
}

/// GET /api/trends
pub async fn list_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendQuery>,
) -> Result<Json<Vec<TrendRecord>>, AppError> {
    let filter = params.filter()?;
    let session = state.session.read().await;
    Ok(Json(filter.apply(&session.catalog().trends)))
}

/// GET /api/opportunities
pub async fn list_opportunities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OpportunityQuery>,
) -> Result<Json<Vec<OpportunityRecord>>, AppError> {
    let filter = params.filter()?;
    let session = state.session.read().await;
    Ok(Json(filter.apply(&session.catalog().opportunities)))
}

#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    /// Comma-separated region names (all when absent)
    pub regions: Option<String>,
}

/// GET /api/regions
pub async fn list_regions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RegionQuery>,
) -> Json<Vec<RegionalMarket>> {
    let filter = match params.regions.as_deref() {
        Some(names) => RegionFilter::new().regions(names.split(',')),
        None => RegionFilter::new(),
    };
    let session = state.session.read().await;
    Json(filter.apply(&session.catalog().regions))
}

/// GET /api/industries
pub async fn list_industries(State(state): State<Arc<AppState>>) -> Json<Vec<IndustryAdoption>> {
    let session = state.session.read().await;
    Json(session.catalog().industries.clone())
}

/// GET /api/workforce
pub async fn list_workforce(State(state): State<Arc<AppState>>) -> Json<Vec<WorkforceImpact>> {
    let session = state.session.read().await;
    Json(session.catalog().workforce.clone())
}
