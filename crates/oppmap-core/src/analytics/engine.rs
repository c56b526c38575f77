//! Analytics engine - runs every analysis with one configuration

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::models::{
    AllocationEntry, NumericRecord, OpportunityRecord, RiskTolerance, ScoredOpportunity,
    TrendRecord,
};

use super::clustering::{self, ClusterReport, TrendFeature, DEFAULT_FEATURES};
use super::correlation::{self, CorrelationReport};
use super::forecast::{self, ForecastBundle};
use super::insights::{self, DashboardMetrics, MarketInsights};
use super::portfolio::{self, PortfolioSummary};
use super::risk;
use super::scoring;

/// Catalogue table selectable for correlation analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    #[default]
    Trends,
    Opportunities,
    /// Opportunities with their opportunity and risk scores
    Scores,
    Regions,
    Industries,
    Workforce,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trends => "trends",
            Self::Opportunities => "opportunities",
            Self::Scores => "scores",
            Self::Regions => "regions",
            Self::Industries => "industries",
            Self::Workforce => "workforce",
        }
    }
}

impl std::str::FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trends" => Ok(Self::Trends),
            "opportunities" => Ok(Self::Opportunities),
            "scores" => Ok(Self::Scores),
            "regions" => Ok(Self::Regions),
            "industries" => Ok(Self::Industries),
            "workforce" => Ok(Self::Workforce),
            _ => Err(format!(
                "Unknown dataset: {}. Available: trends, opportunities, scores, regions, industries, workforce",
                s
            )),
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless facade over the analytics functions.
///
/// Randomness never leaks between calls: every risk batch gets its own
/// generator seeded from `config.risk.seed`.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Score opportunities and tag their risk.
    ///
    /// Risk draws depend on row order and batch size.
    pub fn score_opportunities(&self, opportunities: &[OpportunityRecord]) -> Vec<ScoredOpportunity> {
        let mut rng = StdRng::seed_from_u64(self.config.risk.seed);
        let assessments = risk::score_batch(opportunities, &mut rng, &self.config.risk);
        let adoption = self.config.portfolio.assumed_adoption_rate;

        opportunities
            .iter()
            .zip(assessments)
            .map(|(o, a)| ScoredOpportunity {
                opportunity_score: scoring::opportunity_score(
                    o.market_size_lower_bound_billion,
                    o.growth_rate_cagr,
                    adoption,
                    o.investment_focus_score,
                ),
                risk_score: a.score,
                risk_level: a.level,
                risk_factors: a.factors,
                opportunity: o.clone(),
            })
            .collect()
    }

    /// Opportunity score of a trend from its own adoption rate.
    ///
    /// Trends carry no growth rate, so the published market CAGR stands in.
    pub fn trend_score(&self, trend: &TrendRecord, market_cagr: f64) -> f64 {
        scoring::opportunity_score(
            trend.market_size_billion,
            market_cagr,
            trend.adoption_rate,
            trend.impact_score,
        )
    }

    pub fn correlate<T: NumericRecord>(&self, records: &[T]) -> Result<CorrelationReport> {
        correlation::correlate(records)
    }

    /// Correlate one catalogue table
    pub fn correlate_dataset(&self, catalog: &Catalog, dataset: Dataset) -> Result<CorrelationReport> {
        match dataset {
            Dataset::Trends => self.correlate(&catalog.trends),
            Dataset::Opportunities => self.correlate(&catalog.opportunities),
            Dataset::Scores => self.correlate(&self.score_opportunities(&catalog.opportunities)),
            Dataset::Regions => self.correlate(&catalog.regions),
            Dataset::Industries => self.correlate(&catalog.industries),
            Dataset::Workforce => self.correlate(&catalog.workforce),
        }
    }

    /// Cluster on the default features (impact, market size, adoption)
    pub fn cluster_trends(&self, trends: &[TrendRecord]) -> Result<ClusterReport> {
        self.cluster_trends_on(trends, &DEFAULT_FEATURES)
    }

    pub fn cluster_trends_on(
        &self,
        trends: &[TrendRecord],
        features: &[TrendFeature],
    ) -> Result<ClusterReport> {
        clustering::cluster(trends, features, &self.config.clustering)
    }

    /// Forecast `series`; horizons above `forecast.max_horizon` are rejected
    pub fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastBundle> {
        let max_horizon = self.config.forecast.max_horizon;
        if horizon > max_horizon {
            return Err(Error::InvalidInput(format!(
                "forecast horizon must be at most {}, got {}",
                max_horizon, horizon
            )));
        }
        forecast::forecast(series, horizon, self.config.forecast.z_score)
    }

    /// Allocate capital across already scored opportunities
    pub fn allocate(
        &self,
        scored: &[ScoredOpportunity],
        tolerance: RiskTolerance,
        capital: f64,
    ) -> Result<Vec<AllocationEntry>> {
        portfolio::allocate(scored, tolerance, capital, self.config.portfolio.max_positions)
    }

    /// Score, risk-tag and allocate in one step
    pub fn generate_portfolio_recommendations(
        &self,
        opportunities: &[OpportunityRecord],
        tolerance: RiskTolerance,
        capital: f64,
    ) -> Result<Vec<AllocationEntry>> {
        let scored = self.score_opportunities(opportunities);
        self.allocate(&scored, tolerance, capital)
    }

    /// Recommendations plus allocation totals
    pub fn portfolio_summary(
        &self,
        opportunities: &[OpportunityRecord],
        tolerance: RiskTolerance,
        capital: f64,
    ) -> Result<PortfolioSummary> {
        let entries = self.generate_portfolio_recommendations(opportunities, tolerance, capital)?;
        Ok(PortfolioSummary::new(tolerance, capital, entries))
    }

    pub fn market_insights(
        &self,
        trends: &[TrendRecord],
        opportunities: &[OpportunityRecord],
    ) -> MarketInsights {
        insights::generate_market_insights(trends, opportunities, &self.config.insights)
    }

    pub fn dashboard_metrics(
        &self,
        view_trends: &[TrendRecord],
        view_opportunities: &[OpportunityRecord],
        all_trends: &[TrendRecord],
        all_opportunities: &[OpportunityRecord],
    ) -> DashboardMetrics {
        DashboardMetrics::compute(
            view_trends,
            view_opportunities,
            all_trends,
            all_opportunities,
            &self.config.insights,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::RiskLevel;

    #[test]
    fn test_scoring_is_reproducible() {
        let engine = AnalyticsEngine::default();
        let opportunities = catalog::opportunities();

        let first = engine.score_opportunities(&opportunities);
        let second = engine.score_opportunities(&opportunities);
        assert_eq!(first, second);
        assert_eq!(first.len(), opportunities.len());

        for s in &first {
            assert!((0.0..=100.0).contains(&s.opportunity_score));
            assert!((0.0..=1.0).contains(&s.risk_score));
            assert_eq!(s.risk_level, RiskLevel::from_score(s.risk_score));
        }
    }

    #[test]
    fn test_seed_comes_from_config() {
        let opportunities = catalog::opportunities();
        let a = AnalyticsEngine::default().score_opportunities(&opportunities);

        let mut config = AnalyticsConfig::default();
        config.risk.seed = 1234;
        let b = AnalyticsEngine::new(config).score_opportunities(&opportunities);

        let a_scores: Vec<f64> = a.iter().map(|s| s.risk_score).collect();
        let b_scores: Vec<f64> = b.iter().map(|s| s.risk_score).collect();
        assert_ne!(a_scores, b_scores);
    }

    #[test]
    fn test_opportunity_score_uses_assumed_adoption() {
        let engine = AnalyticsEngine::default();
        let opportunities = catalog::opportunities();
        let scored = engine.score_opportunities(&opportunities);

        let first = &opportunities[0];
        let expected = scoring::opportunity_score(
            first.market_size_lower_bound_billion,
            first.growth_rate_cagr,
            50.0,
            first.investment_focus_score,
        );
        assert_eq!(scored[0].opportunity_score, expected);
    }

    #[test]
    fn test_low_tolerance_recommendations() {
        let engine = AnalyticsEngine::default();
        let entries = engine
            .generate_portfolio_recommendations(
                &catalog::opportunities(),
                RiskTolerance::Low,
                1_000_000.0,
            )
            .unwrap();

        assert!(entries.len() <= 8);
        for e in &entries {
            assert_eq!(e.risk_level, RiskLevel::Low);
            assert!(e.allocation_percent <= 25.0);
        }
    }

    #[test]
    fn test_trend_score_in_range() {
        let engine = AnalyticsEngine::default();
        let market = catalog::market_facts();
        for trend in catalog::trends() {
            let score = engine.trend_score(&trend, market.cagr_2025_2030);
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn test_correlate_every_dataset() {
        let engine = AnalyticsEngine::default();
        let catalog = Catalog::comprehensive();
        for dataset in [
            Dataset::Trends,
            Dataset::Opportunities,
            Dataset::Scores,
            Dataset::Regions,
            Dataset::Industries,
            Dataset::Workforce,
        ] {
            let report = engine.correlate_dataset(&catalog, dataset).unwrap();
            assert!(report.matrix.columns.len() >= 2, "{}", dataset);
        }
        assert_eq!("Scores".parse::<Dataset>(), Ok(Dataset::Scores));
        assert!("stocks".parse::<Dataset>().is_err());
    }

    #[test]
    fn test_forecast_uses_configured_z() {
        let mut config = AnalyticsConfig::default();
        config.forecast.z_score = 1.0;
        let engine = AnalyticsEngine::new(config);

        let bundle = engine.forecast(&[1.0, 3.0, 2.0, 5.0, 4.0], 2).unwrap();
        let expected = bundle.residual_std_error * (1.0 + 1.0 / 5.0f64).sqrt();
        assert!((bundle.band_half_width - expected).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_respects_max_horizon() {
        let mut config = AnalyticsConfig::default();
        config.forecast.max_horizon = 24;
        let engine = AnalyticsEngine::new(config);
        let series = [1.0, 2.0, 4.0];

        assert_eq!(engine.forecast(&series, 24).unwrap().predictions.len(), 24);
        assert!(engine.forecast(&series, 25).unwrap_err().is_invalid_input());
        assert!(engine
            .forecast(&series, usize::MAX)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_oversized_position_limit_is_capped() {
        let mut config = AnalyticsConfig::default();
        config.portfolio.max_positions = 15;
        let entries = AnalyticsEngine::new(config)
            .generate_portfolio_recommendations(
                &catalog::opportunities(),
                RiskTolerance::High,
                1_000_000.0,
            )
            .unwrap();
        assert_eq!(entries.len(), portfolio::MAX_POSITIONS);
    }
}
