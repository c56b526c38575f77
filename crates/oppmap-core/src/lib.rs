//! Opportunity Map Core Library
//!
//! Shared functionality for the AI opportunity map dashboard:
//! - Research catalogue (trends, opportunities, regional/industry/workforce tables)
//! - Filter builders for dashboard views
//! - Analytics engine (scoring, risk, correlation, clustering, forecasting,
//!   portfolio allocation, insights)
//! - Dashboard session with simulated refresh
//! - CSV/JSON export
//! - TOML configuration with embedded defaults

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod session;

pub use analytics::{
    AnalyticsEngine, ClusterLabeling, ClusterReport, CorrelationReport, CorrelationStrength,
    DashboardMetrics, Dataset, ForecastBundle, MarketInsights, PortfolioSummary, TrendFeature,
    TrendStrength,
};
pub use catalog::Catalog;
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use filter::{OpportunityFilter, RegionFilter, TrendFilter};
pub use models::*;
pub use session::{DashboardSession, LastUpdate};
