//! Market insights and dashboard metrics
//!
//! Top-N lists, threshold counts and the fixed narrative shown next to the
//! charts. Ties in a top-N list keep catalogue order.

use serde::{Deserialize, Serialize};

use crate::config::InsightsConfig;
use crate::models::{MaturityLevel, OpportunityRecord, TimeHorizon, TrendRecord};

/// Pairs considered low risk with a high return
pub const LOW_RISK_HIGH_RETURN: &str =
    "AI-Powered Software Development, Enterprise AI Integration Services";
/// Pairs considered high risk with a high return
pub const HIGH_RISK_HIGH_RETURN: &str = "Agentic AI Platforms, Multimodal AI Development Tools";
pub const STABLE_INVESTMENTS: &str = "AI in Financial Services, AI-Enhanced Cybersecurity";

pub const STRATEGIC_RECOMMENDATIONS: [&str; 5] = [
    "Focus on agentic AI platforms for maximum growth potential",
    "Invest in AI governance services due to regulatory requirements",
    "Consider multimodal AI for competitive differentiation",
    "Prioritize workforce reskilling to address talent gaps",
    "Develop sustainable AI infrastructure for long-term viability",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_opportunities: usize,
    /// Opportunities with CAGR above the high-growth threshold
    pub high_growth_opportunities: usize,
    /// Trends on the emerging horizon
    pub emerging_trends: usize,
    /// Highest-impact trend names
    pub market_leaders: Vec<String>,
}

/// An opportunity area with the metric it was ranked by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOpportunity {
    pub area: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRecommendations {
    /// Ranked by investment focus score
    pub top_opportunities: Vec<RankedOpportunity>,
    /// Ranked by CAGR
    pub fastest_growing: Vec<RankedOpportunity>,
    /// Areas at the Emerging maturity level
    pub emerging_markets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub low_risk_high_return: String,
    pub high_risk_high_return: String,
    pub stable_investments: String,
}

impl Default for RiskAnalysis {
    fn default() -> Self {
        Self {
            low_risk_high_return: LOW_RISK_HIGH_RETURN.to_string(),
            high_risk_high_return: HIGH_RISK_HIGH_RETURN.to_string(),
            stable_investments: STABLE_INVESTMENTS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub market_overview: MarketOverview,
    pub investment_recommendations: InvestmentRecommendations,
    pub risk_analysis: RiskAnalysis,
    pub strategic_recommendations: Vec<String>,
}

/// Indices of the `n` largest values, stable on ties
fn top_indices(values: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order.truncate(n);
    order
}

fn rank_opportunities(
    opportunities: &[OpportunityRecord],
    n: usize,
    metric: impl Fn(&OpportunityRecord) -> f64,
) -> Vec<RankedOpportunity> {
    let values: Vec<f64> = opportunities.iter().map(&metric).collect();
    top_indices(&values, n)
        .into_iter()
        .map(|i| RankedOpportunity {
            area: opportunities[i].area.clone(),
            value: values[i],
        })
        .collect()
}

/// Summarize a trend and opportunity view
pub fn generate_market_insights(
    trends: &[TrendRecord],
    opportunities: &[OpportunityRecord],
    config: &InsightsConfig,
) -> MarketInsights {
    let impacts: Vec<f64> = trends.iter().map(|t| t.impact_score).collect();
    let market_leaders = top_indices(&impacts, config.top_impact)
        .into_iter()
        .map(|i| trends[i].name.clone())
        .collect();

    let market_overview = MarketOverview {
        total_opportunities: opportunities.len(),
        high_growth_opportunities: opportunities
            .iter()
            .filter(|o| o.growth_rate_cagr > config.high_growth_threshold)
            .count(),
        emerging_trends: trends
            .iter()
            .filter(|t| t.time_horizon == TimeHorizon::Emerging)
            .count(),
        market_leaders,
    };

    let investment_recommendations = InvestmentRecommendations {
        top_opportunities: rank_opportunities(opportunities, config.top_focus, |o| {
            o.investment_focus_score
        }),
        fastest_growing: rank_opportunities(opportunities, config.top_growth, |o| {
            o.growth_rate_cagr
        }),
        emerging_markets: opportunities
            .iter()
            .filter(|o| o.maturity_level == MaturityLevel::Emerging)
            .map(|o| o.area.clone())
            .collect(),
    };

    tracing::debug!(
        trends = trends.len(),
        opportunities = opportunities.len(),
        high_growth = market_overview.high_growth_opportunities,
        "Generated market insights"
    );

    MarketInsights {
        market_overview,
        investment_recommendations,
        risk_analysis: RiskAnalysis::default(),
        strategic_recommendations: STRATEGIC_RECOMMENDATIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Headline metrics for a trend view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub count: usize,
    pub average_impact: f64,
    pub total_market_size_billion: f64,
    pub average_adoption: f64,
}

impl TrendSummary {
    pub fn from_trends(trends: &[TrendRecord]) -> Self {
        Self {
            count: trends.len(),
            average_impact: mean(trends.iter().map(|t| t.impact_score)),
            total_market_size_billion: trends.iter().map(|t| t.market_size_billion).sum(),
            average_adoption: mean(trends.iter().map(|t| t.adoption_rate)),
        }
    }

    /// Differences against a baseline (usually the full catalogue)
    pub fn delta(&self, baseline: &TrendSummary) -> TrendDelta {
        TrendDelta {
            count: self.count as i64 - baseline.count as i64,
            average_impact: self.average_impact - baseline.average_impact,
            total_market_size_billion: self.total_market_size_billion
                - baseline.total_market_size_billion,
            average_adoption: self.average_adoption - baseline.average_adoption,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub count: i64,
    pub average_impact: f64,
    pub total_market_size_billion: f64,
    pub average_adoption: f64,
}

/// Headline metrics for an opportunity view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySummary {
    pub count: usize,
    pub average_focus: f64,
    /// Opportunities with focus at or above the high-focus threshold
    pub high_focus_count: usize,
}

impl OpportunitySummary {
    pub fn from_opportunities(opportunities: &[OpportunityRecord], high_focus_threshold: f64) -> Self {
        Self {
            count: opportunities.len(),
            average_focus: mean(opportunities.iter().map(|o| o.investment_focus_score)),
            high_focus_count: opportunities
                .iter()
                .filter(|o| o.investment_focus_score >= high_focus_threshold)
                .count(),
        }
    }

    pub fn delta(&self, baseline: &OpportunitySummary) -> OpportunityDelta {
        OpportunityDelta {
            count: self.count as i64 - baseline.count as i64,
            average_focus: self.average_focus - baseline.average_focus,
            high_focus_count: self.high_focus_count as i64 - baseline.high_focus_count as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityDelta {
    pub count: i64,
    pub average_focus: f64,
    pub high_focus_count: i64,
}

/// Metrics for a filtered view next to the full catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub trends: TrendSummary,
    pub trends_delta: TrendDelta,
    pub opportunities: OpportunitySummary,
    pub opportunities_delta: OpportunityDelta,
}

impl DashboardMetrics {
    pub fn compute(
        view_trends: &[TrendRecord],
        view_opportunities: &[OpportunityRecord],
        all_trends: &[TrendRecord],
        all_opportunities: &[OpportunityRecord],
        config: &InsightsConfig,
    ) -> Self {
        let trends = TrendSummary::from_trends(view_trends);
        let opportunities =
            OpportunitySummary::from_opportunities(view_opportunities, config.high_focus_threshold);
        let trends_delta = trends.delta(&TrendSummary::from_trends(all_trends));
        let opportunities_delta = opportunities.delta(&OpportunitySummary::from_opportunities(
            all_opportunities,
            config.high_focus_threshold,
        ));

        Self {
            trends,
            trends_delta,
            opportunities,
            opportunities_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_insights_over_catalogue() {
        let trends = catalog::trends();
        let opportunities = catalog::opportunities();
        let insights = generate_market_insights(&trends, &opportunities, &InsightsConfig::default());

        let overview = &insights.market_overview;
        assert_eq!(overview.total_opportunities, 15);
        assert_eq!(
            overview.high_growth_opportunities,
            opportunities
                .iter()
                .filter(|o| o.growth_rate_cagr > 30.0)
                .count()
        );
        assert_eq!(
            overview.market_leaders,
            vec![
                "Agentic AI Enterprise Deployment",
                "Enterprise AI Agents & Automation",
                "Multimodal AI Integration",
            ]
        );

        let recs = &insights.investment_recommendations;
        assert_eq!(recs.top_opportunities.len(), 5);
        assert_eq!(recs.top_opportunities[0].area, "Agentic AI Platforms & Solutions");
        assert_eq!(recs.fastest_growing.len(), 3);
        assert_eq!(recs.fastest_growing[0].area, "Edge AI Computing Solutions");
        assert!(recs
            .emerging_markets
            .contains(&"AI Governance & Compliance Services".to_string()));

        assert_eq!(insights.strategic_recommendations.len(), 5);
        assert_eq!(insights.risk_analysis.stable_investments, STABLE_INVESTMENTS);
    }

    #[test]
    fn test_ties_keep_catalogue_order() {
        assert_eq!(top_indices(&[5.0, 9.0, 5.0, 9.0], 3), vec![1, 3, 0]);
    }

    #[test]
    fn test_insights_on_empty_view() {
        let insights = generate_market_insights(&[], &[], &InsightsConfig::default());
        assert_eq!(insights.market_overview.total_opportunities, 0);
        assert!(insights.market_overview.market_leaders.is_empty());
        assert!(insights.investment_recommendations.top_opportunities.is_empty());
        assert_eq!(insights.strategic_recommendations.len(), 5);
    }

    #[test]
    fn test_summaries_and_deltas() {
        let trends = catalog::trends();
        let opportunities = catalog::opportunities();
        let view: Vec<_> = trends.iter().filter(|t| t.impact_score >= 9.0).cloned().collect();

        let metrics = DashboardMetrics::compute(
            &view,
            &opportunities,
            &trends,
            &opportunities,
            &InsightsConfig::default(),
        );

        assert_eq!(metrics.trends.count, view.len());
        assert_eq!(metrics.trends_delta.count, view.len() as i64 - 20);
        assert!(metrics.trends_delta.average_impact > 0.0);
        assert_eq!(metrics.opportunities_delta.count, 0);
        assert!(metrics.opportunities_delta.average_focus.abs() < 1e-12);
        assert_eq!(
            metrics.opportunities.high_focus_count,
            opportunities
                .iter()
                .filter(|o| o.investment_focus_score >= 8.0)
                .count()
        );
    }

    #[test]
    fn test_empty_summaries_are_zero() {
        assert_eq!(TrendSummary::from_trends(&[]), TrendSummary::default());
        assert_eq!(
            OpportunitySummary::from_opportunities(&[], 8.0),
            OpportunitySummary::default()
        );
    }
}
