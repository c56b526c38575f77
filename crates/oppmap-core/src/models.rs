//! Domain models for the opportunity map

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lower bin edges for risk levels: [0, 0.3) Low, [0.3, 0.6) Medium, [0.6, 1.0] High
pub const RISK_BIN_EDGES: [f64; 4] = [0.0, 0.3, 0.6, 1.0];

/// Normalize a label for lenient matching ("Early Growth" == "early_growth")
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// How soon a trend is expected to matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    Dominant,
    Emerging,
    Future,
}

impl TimeHorizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dominant => "dominant",
            Self::Emerging => "emerging",
            Self::Future => "future",
        }
    }

    /// Display label used by the research tables
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dominant => "Currently Dominant (2025-2026)",
            Self::Emerging => "Emerging & Growing (2025-2027)",
            Self::Future => "Future Outlook (2027-2030)",
        }
    }

    pub fn all() -> &'static [TimeHorizon] {
        &[Self::Dominant, Self::Emerging, Self::Future]
    }
}

impl std::str::FromStr for TimeHorizon {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "dominant" || lower.starts_with("currently dominant") {
            Ok(Self::Dominant)
        } else if lower.starts_with("emerging") {
            Ok(Self::Emerging)
        } else if lower.starts_with("future") {
            Ok(Self::Future)
        } else {
            Err(format!("Unknown time horizon: {}", s))
        }
    }
}

impl std::fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle stage of a market opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Emerging,
    EarlyGrowth,
    CriticalNeed,
    Mature,
}

impl MaturityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emerging => "emerging",
            Self::EarlyGrowth => "early_growth",
            Self::CriticalNeed => "critical_need",
            Self::Mature => "mature",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Emerging => "Emerging",
            Self::EarlyGrowth => "Early Growth",
            Self::CriticalNeed => "Critical Need",
            Self::Mature => "Mature",
        }
    }

    /// Technology maturity scalar used by the risk model (higher = more mature)
    pub fn tech_maturity(&self) -> f64 {
        match self {
            Self::Emerging => 0.3,
            Self::EarlyGrowth => 0.6,
            Self::CriticalNeed | Self::Mature => 0.8,
        }
    }
}

impl std::str::FromStr for MaturityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "emerging" => Ok(Self::Emerging),
            "earlygrowth" => Ok(Self::EarlyGrowth),
            "criticalneed" => Ok(Self::CriticalNeed),
            "mature" => Ok(Self::Mature),
            _ => Err(format!("Unknown maturity level: {}", s)),
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Qualitative market size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSizeCategory {
    Large,
    Medium,
}

impl MarketSizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Medium => "medium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Large => "Large",
            Self::Medium => "Medium",
        }
    }
}

impl std::str::FromStr for MarketSizeCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("large") {
            Ok(Self::Large)
        } else if lower.starts_with("medium") {
            Ok(Self::Medium)
        } else {
            Err(format!("Unknown market size category: {}", s))
        }
    }
}

impl std::fmt::Display for MarketSizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Risk bucket derived from a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Bin a risk score with left-closed edges.
    ///
    /// Scores below 0 fall into Low and scores above 1 (or NaN) into High.
    pub fn from_score(score: f64) -> Self {
        if score.is_nan() || score >= RISK_BIN_EDGES[2] {
            Self::High
        } else if score >= RISK_BIN_EDGES[1] {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Investor risk tolerance used by the portfolio allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Whether an opportunity at `level` is eligible under this tolerance
    pub fn admits(&self, level: RiskLevel) -> bool {
        match self {
            Self::Low => level == RiskLevel::Low,
            Self::Medium => level != RiskLevel::High,
            Self::High => true,
        }
    }

    /// Per-position weight ceiling
    pub fn max_allocation(&self) -> f64 {
        match self {
            Self::Low => 0.25,
            Self::Medium => 0.35,
            Self::High => 0.50,
        }
    }
}

impl std::str::FromStr for RiskTolerance {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!(
                "Unknown risk tolerance: {}. Available: low, medium, high",
                s
            )),
        }
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How exposed a job category is to AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ExposureLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl std::str::FromStr for ExposureLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "veryhigh" => Ok(Self::VeryHigh),
            _ => Err(format!("Unknown exposure level: {}", s)),
        }
    }
}

impl std::fmt::Display for ExposureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An AI industry trend (immutable catalogue entry, identified by name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub name: String,
    /// Impact potential, 0-10
    pub impact_score: f64,
    pub time_horizon: TimeHorizon,
    pub market_size_billion: f64,
    /// Current adoption, 0-100 percent
    pub adoption_rate: f64,
    pub description: String,
    pub key_players: Vec<String>,
}

/// An investment opportunity area (identified by `area`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub area: String,
    pub market_size_category: MarketSizeCategory,
    /// Numeric lower bound of the 2025 market size estimate
    pub market_size_lower_bound_billion: f64,
    /// Compound annual growth rate in percent (may exceed 100)
    pub growth_rate_cagr: f64,
    /// Investment priority, 0-10
    pub investment_focus_score: f64,
    pub maturity_level: MaturityLevel,
    /// Names of related `TrendRecord`s
    pub related_trends: Vec<String>,
    pub key_challenges: Vec<String>,
    pub success_factors: Vec<String>,
}

impl OpportunityRecord {
    /// Display label, e.g. "Large ($285B+)"
    pub fn market_size_label(&self) -> String {
        format!(
            "{} (${:.0}B+)",
            self.market_size_category.label(),
            self.market_size_lower_bound_billion
        )
    }
}

/// The five weighted sub-factors behind a risk score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub volatility: f64,
    pub regulatory: f64,
    /// Maturity scalar of the opportunity (contributes `1 - tech_maturity`)
    pub tech_maturity: f64,
    pub competition: f64,
    pub adoption_uncertainty: f64,
}

/// An opportunity with derived scores (recomputed on demand, never stored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOpportunity {
    #[serde(flatten)]
    pub opportunity: OpportunityRecord,
    /// Composite 0-100 score
    pub opportunity_score: f64,
    /// Composite 0-1 score
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: RiskFactors,
}

/// Cluster membership of one trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub trend: String,
    pub cluster_id: usize,
    pub cluster_name: String,
}

/// One line of a portfolio recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub opportunity_area: String,
    pub allocation_usd: f64,
    /// Percent of total capital (0-100, capped per tolerance)
    pub allocation_percent: f64,
    /// Expected return, taken as the opportunity's CAGR
    pub expected_return: f64,
    pub risk_level: RiskLevel,
    pub opportunity_score: f64,
}

/// Regional AI market distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalMarket {
    pub region: String,
    pub market_share_percent: f64,
    pub growth_rate: f64,
    pub investment_billion: f64,
    pub key_focus_areas: Vec<String>,
}

/// Industry-level AI adoption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryAdoption {
    pub industry: String,
    pub adoption_rate: f64,
    pub roi_percentage: f64,
    pub primary_use_cases: Vec<String>,
    pub investment_priority: f64,
}

/// AI impact on a job category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkforceImpact {
    pub job_category: String,
    pub ai_exposure_level: ExposureLevel,
    pub job_transformation: f64,
    pub skill_demand_change: Vec<String>,
    pub reskilling_priority: f64,
}

/// Headline market figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketFacts {
    pub global_market_size_2024_billion: f64,
    pub global_market_size_2030_billion: f64,
    pub cagr_2025_2030: f64,
    /// Percent of companies claiming AI as a top priority
    pub enterprise_adoption_rate: f64,
    /// Millions of people working in AI
    pub ai_workers_2025_million: f64,
    pub wearable_ai_market_2025_billion: f64,
}

/// Research citations behind the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchSources {
    pub primary_sources: Vec<String>,
    pub market_research: Vec<String>,
    pub industry_reports: Vec<String>,
    pub last_updated: String,
    pub methodology: String,
}

/// Data freshness metadata shown alongside the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFreshness {
    pub last_update: DateTime<Utc>,
    pub data_vintage: String,
    pub next_update: DateTime<Utc>,
    pub confidence_level: String,
    pub sample_size: String,
}

/// A record with named numeric columns (for correlation analysis)
pub trait NumericRecord {
    fn numeric_columns() -> &'static [&'static str];

    /// Values in the same order as `numeric_columns()`
    fn numeric_values(&self) -> Vec<f64>;
}

impl NumericRecord for TrendRecord {
    fn numeric_columns() -> &'static [&'static str] {
        &["impact_score", "market_size_billion", "adoption_rate"]
    }

    fn numeric_values(&self) -> Vec<f64> {
        vec![self.impact_score, self.market_size_billion, self.adoption_rate]
    }
}

impl NumericRecord for OpportunityRecord {
    fn numeric_columns() -> &'static [&'static str] {
        &[
            "market_size_lower_bound_billion",
            "growth_rate_cagr",
            "investment_focus_score",
        ]
    }

    fn numeric_values(&self) -> Vec<f64> {
        vec![
            self.market_size_lower_bound_billion,
            self.growth_rate_cagr,
            self.investment_focus_score,
        ]
    }
}

impl NumericRecord for ScoredOpportunity {
    fn numeric_columns() -> &'static [&'static str] {
        &[
            "market_size_lower_bound_billion",
            "growth_rate_cagr",
            "investment_focus_score",
            "opportunity_score",
            "risk_score",
        ]
    }

    fn numeric_values(&self) -> Vec<f64> {
        let mut values = self.opportunity.numeric_values();
        values.push(self.opportunity_score);
        values.push(self.risk_score);
        values
    }
}

impl NumericRecord for RegionalMarket {
    fn numeric_columns() -> &'static [&'static str] {
        &["market_share_percent", "growth_rate", "investment_billion"]
    }

    fn numeric_values(&self) -> Vec<f64> {
        vec![
            self.market_share_percent,
            self.growth_rate,
            self.investment_billion,
        ]
    }
}

impl NumericRecord for IndustryAdoption {
    fn numeric_columns() -> &'static [&'static str] {
        &["adoption_rate", "roi_percentage", "investment_priority"]
    }

    fn numeric_values(&self) -> Vec<f64> {
        vec![
            self.adoption_rate,
            self.roi_percentage,
            self.investment_priority,
        ]
    }
}

impl NumericRecord for WorkforceImpact {
    fn numeric_columns() -> &'static [&'static str] {
        &["job_transformation", "reskilling_priority"]
    }

    fn numeric_values(&self) -> Vec<f64> {
        vec![self.job_transformation, self.reskilling_priority]
    }
}
