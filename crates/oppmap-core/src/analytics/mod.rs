//! Analytics - scoring, risk, correlation, clustering, forecasting,
//! portfolio allocation and insights
//!
//! Every function here is a pure computation over the records it is given.
//! Filtering happens before, rendering after.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oppmap_core::{catalog::Catalog, AnalyticsEngine, RiskTolerance};
//!
//! let catalog = Catalog::comprehensive();
//! let engine = AnalyticsEngine::default();
//! let plan = engine.generate_portfolio_recommendations(
//!     &catalog.opportunities,
//!     RiskTolerance::Medium,
//!     1_000_000.0,
//! )?;
//! ```

pub mod clustering;
pub mod correlation;
pub mod engine;
pub mod forecast;
pub mod insights;
pub mod portfolio;
pub mod risk;
pub mod scoring;

pub use clustering::{
    ClusterLabeling, ClusterProfile, ClusterReport, TrendFeature, CLUSTER_NAMES, DEFAULT_FEATURES,
};
pub use correlation::{CorrelationMatrix, CorrelationPair, CorrelationReport, CorrelationStrength};
pub use engine::{AnalyticsEngine, Dataset};
pub use forecast::{ForecastBundle, TrendStrength};
pub use insights::{
    DashboardMetrics, InvestmentRecommendations, MarketInsights, MarketOverview,
    OpportunityDelta, OpportunitySummary, RankedOpportunity, RiskAnalysis, TrendDelta,
    TrendSummary,
};
pub use portfolio::PortfolioSummary;
pub use risk::RiskAssessment;
pub use scoring::opportunity_score;
