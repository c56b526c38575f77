//! Tabular export of catalogue views and analytics results
//!
//! Supports:
//! - CSV via flat row types (list fields joined with "; ")
//! - JSON of any serializable result

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analytics::{ClusterProfile, CorrelationPair};
use crate::error::{Error, Result};
use crate::models::{
    AllocationEntry, ClusterAssignment, IndustryAdoption, OpportunityRecord, RegionalMarket,
    ScoredOpportunity, TrendRecord, WorkforceImpact,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!(
                "Unknown export format: {}. Available: table, json, csv",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn join(items: &[String]) -> String {
    items.join("; ")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendExport {
    pub trend: String,
    pub impact_score: f64,
    pub time_horizon: String,
    pub market_size_billion: f64,
    pub adoption_rate: f64,
    pub key_players: String,
    pub description: String,
}

impl From<&TrendRecord> for TrendExport {
    fn from(t: &TrendRecord) -> Self {
        Self {
            trend: t.name.clone(),
            impact_score: t.impact_score,
            time_horizon: t.time_horizon.label().to_string(),
            market_size_billion: t.market_size_billion,
            adoption_rate: t.adoption_rate,
            key_players: join(&t.key_players),
            description: t.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityExport {
    pub opportunity_area: String,
    pub market_size: String,
    pub market_size_lower_bound_billion: f64,
    pub growth_rate_cagr: f64,
    pub investment_focus_score: f64,
    pub maturity_level: String,
    pub related_trends: String,
    pub key_challenges: String,
    pub success_factors: String,
}

impl From<&OpportunityRecord> for OpportunityExport {
    fn from(o: &OpportunityRecord) -> Self {
        Self {
            opportunity_area: o.area.clone(),
            market_size: o.market_size_label(),
            market_size_lower_bound_billion: o.market_size_lower_bound_billion,
            growth_rate_cagr: o.growth_rate_cagr,
            investment_focus_score: o.investment_focus_score,
            maturity_level: o.maturity_level.label().to_string(),
            related_trends: join(&o.related_trends),
            key_challenges: join(&o.key_challenges),
            success_factors: join(&o.success_factors),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredOpportunityExport {
    pub opportunity_area: String,
    pub market_size: String,
    pub growth_rate_cagr: f64,
    pub investment_focus_score: f64,
    pub maturity_level: String,
    pub opportunity_score: f64,
    pub risk_score: f64,
    pub risk_level: String,
    pub volatility: f64,
    pub regulatory: f64,
    pub tech_maturity: f64,
    pub competition: f64,
    pub adoption_uncertainty: f64,
}

impl From<&ScoredOpportunity> for ScoredOpportunityExport {
    fn from(s: &ScoredOpportunity) -> Self {
        let o = &s.opportunity;
        Self {
            opportunity_area: o.area.clone(),
            market_size: o.market_size_label(),
            growth_rate_cagr: o.growth_rate_cagr,
            investment_focus_score: o.investment_focus_score,
            maturity_level: o.maturity_level.label().to_string(),
            opportunity_score: s.opportunity_score,
            risk_score: s.risk_score,
            risk_level: s.risk_level.label().to_string(),
            volatility: s.risk_factors.volatility,
            regulatory: s.risk_factors.regulatory,
            tech_maturity: s.risk_factors.tech_maturity,
            competition: s.risk_factors.competition,
            adoption_uncertainty: s.risk_factors.adoption_uncertainty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationExport {
    pub opportunity: String,
    pub allocation_usd: f64,
    pub allocation_percent: f64,
    pub expected_return: f64,
    pub risk_level: String,
    pub opportunity_score: f64,
}

impl From<&AllocationEntry> for AllocationExport {
    fn from(e: &AllocationEntry) -> Self {
        Self {
            opportunity: e.opportunity_area.clone(),
            allocation_usd: e.allocation_usd,
            allocation_percent: e.allocation_percent,
            expected_return: e.expected_return,
            risk_level: e.risk_level.label().to_string(),
            opportunity_score: e.opportunity_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterExport {
    pub trend: String,
    pub cluster: usize,
    pub cluster_name: String,
}

impl From<&ClusterAssignment> for ClusterExport {
    fn from(a: &ClusterAssignment) -> Self {
        Self {
            trend: a.trend.clone(),
            cluster: a.cluster_id,
            cluster_name: a.cluster_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterProfileExport {
    pub cluster: usize,
    pub cluster_name: String,
    pub size: usize,
    /// Feature means joined with "; "
    pub feature_means: String,
}

impl From<&ClusterProfile> for ClusterProfileExport {
    fn from(p: &ClusterProfile) -> Self {
        Self {
            cluster: p.cluster_id,
            cluster_name: p.cluster_name.clone(),
            size: p.size,
            feature_means: p
                .feature_means
                .iter()
                .map(|m| format!("{:.2}", m))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationExport {
    pub factor_1: String,
    pub factor_2: String,
    pub correlation: f64,
    pub strength: String,
}

impl From<&CorrelationPair> for CorrelationExport {
    fn from(p: &CorrelationPair) -> Self {
        Self {
            factor_1: p.factor_1.clone(),
            factor_2: p.factor_2.clone(),
            correlation: p.correlation,
            strength: p.strength.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionExport {
    pub region: String,
    pub market_share_percent: f64,
    pub growth_rate: f64,
    pub investment_billion: f64,
    pub key_focus_areas: String,
}

impl From<&RegionalMarket> for RegionExport {
    fn from(r: &RegionalMarket) -> Self {
        Self {
            region: r.region.clone(),
            market_share_percent: r.market_share_percent,
            growth_rate: r.growth_rate,
            investment_billion: r.investment_billion,
            key_focus_areas: join(&r.key_focus_areas),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryExport {
    pub industry: String,
    pub adoption_rate: f64,
    pub roi_percentage: f64,
    pub investment_priority: f64,
    pub primary_use_cases: String,
}

impl From<&IndustryAdoption> for IndustryExport {
    fn from(i: &IndustryAdoption) -> Self {
        Self {
            industry: i.industry.clone(),
            adoption_rate: i.adoption_rate,
            roi_percentage: i.roi_percentage,
            investment_priority: i.investment_priority,
            primary_use_cases: join(&i.primary_use_cases),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkforceExport {
    pub job_category: String,
    pub ai_exposure_level: String,
    pub job_transformation: f64,
    pub reskilling_priority: f64,
    pub skill_demand_change: String,
}

impl From<&WorkforceImpact> for WorkforceExport {
    fn from(w: &WorkforceImpact) -> Self {
        Self {
            job_category: w.job_category.clone(),
            ai_exposure_level: w.ai_exposure_level.label().to_string(),
            job_transformation: w.job_transformation,
            reskilling_priority: w.reskilling_priority,
            skill_demand_change: join(&w.skill_demand_change),
        }
    }
}

/// Convert a slice of records into export rows
pub fn rows<'a, T, R>(records: &'a [T]) -> Vec<R>
where
    R: From<&'a T>,
{
    records.iter().map(R::from).collect()
}

/// Write rows as CSV with a header line
pub fn write_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render rows as a CSV string
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::InvalidInput(format!("CSV output is not UTF-8: {}", e)))
}

/// Pretty-printed JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::default(), ExportFormat::Table);
    }

    #[test]
    fn test_opportunity_csv() {
        let opportunities = catalog::opportunities();
        let export: Vec<OpportunityExport> = rows(&opportunities);
        let csv = to_csv(&export).unwrap();

        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("opportunity_area,market_size,"));
        assert_eq!(lines.count(), opportunities.len());
        assert!(csv.contains("\"Large ($285B+)\"") || csv.contains("Large ($285B+)"));
    }

    #[test]
    fn test_csv_quotes_commas() {
        let trends = catalog::trends();
        let export: Vec<TrendExport> = rows(&trends[..1]);
        let csv = to_csv(&export).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let parsed: Vec<TrendExport> = reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].trend, trends[0].name);
        assert_eq!(parsed[0].description, trends[0].description);
        assert_eq!(parsed[0].key_players, "OpenAI; Microsoft; Google; Anthropic");
    }

    #[test]
    fn test_empty_rows_write_nothing() {
        let csv = to_csv::<AllocationExport>(&[]).unwrap();
        assert!(csv.is_empty());
    }

    #[test]
    fn test_json_export() {
        let trends = catalog::trends();
        let json = to_json(&trends[..2]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["time_horizon"], "dominant");
    }
}
