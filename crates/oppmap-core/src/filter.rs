//! Filter builders for catalogue views
//!
//! Each filter is a small builder; `apply` returns the matching rows in
//! catalogue order. No matches is an empty vector, never an error.

use crate::models::{
    MarketSizeCategory, MaturityLevel, OpportunityRecord, RegionalMarket, TimeHorizon, TrendRecord,
};

/// Builder for trend views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendFilter {
    pub time_horizon: Option<TimeHorizon>,
    pub min_impact: Option<f64>,
}

impl TrendFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set time horizon filter (None = all horizons)
    pub fn time_horizon(mut self, horizon: Option<TimeHorizon>) -> Self {
        self.time_horizon = horizon;
        self
    }

    /// Set minimum impact score (inclusive)
    pub fn min_impact(mut self, score: Option<f64>) -> Self {
        self.min_impact = score;
        self
    }

    pub fn matches(&self, trend: &TrendRecord) -> bool {
        if let Some(horizon) = self.time_horizon {
            if trend.time_horizon != horizon {
                return false;
            }
        }
        if let Some(min) = self.min_impact {
            if trend.impact_score < min {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, trends: &[TrendRecord]) -> Vec<TrendRecord> {
        trends.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Builder for opportunity views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityFilter {
    pub min_focus: Option<f64>,
    pub market_size: Option<MarketSizeCategory>,
    pub maturity: Option<MaturityLevel>,
}

impl OpportunityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum investment focus score (inclusive)
    pub fn min_focus(mut self, score: Option<f64>) -> Self {
        self.min_focus = score;
        self
    }

    pub fn market_size(mut self, category: Option<MarketSizeCategory>) -> Self {
        self.market_size = category;
        self
    }

    pub fn maturity(mut self, level: Option<MaturityLevel>) -> Self {
        self.maturity = level;
        self
    }

    pub fn matches(&self, opportunity: &OpportunityRecord) -> bool {
        if let Some(min) = self.min_focus {
            if opportunity.investment_focus_score < min {
                return false;
            }
        }
        if let Some(category) = self.market_size {
            if opportunity.market_size_category != category {
                return false;
            }
        }
        if let Some(level) = self.maturity {
            if opportunity.maturity_level != level {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, opportunities: &[OpportunityRecord]) -> Vec<OpportunityRecord> {
        opportunities
            .iter()
            .filter(|o| self.matches(o))
            .cloned()
            .collect()
    }
}

/// Region selection (case-insensitive names, empty = all regions)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionFilter {
    regions: Vec<String>,
}

impl RegionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.regions = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        self
    }

    pub fn matches(&self, region: &RegionalMarket) -> bool {
        self.regions.is_empty() || self.regions.contains(&region.region.to_lowercase())
    }

    pub fn apply(&self, regions: &[RegionalMarket]) -> Vec<RegionalMarket> {
        regions.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
