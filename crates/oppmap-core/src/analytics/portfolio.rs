//! Portfolio allocation
//!
//! Filter by risk tolerance, rank by opportunity score, keep the top
//! positions and weight each by its share of the total score of the
//! filtered set, capped per tolerance. Capped weight is not redistributed;
//! whatever is left over stays uninvested.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{AllocationEntry, RiskTolerance, ScoredOpportunity};

/// Most positions an allocation may hold
pub const MAX_POSITIONS: usize = 8;

/// Allocate `capital` across at most `max_positions` opportunities
/// (never more than [`MAX_POSITIONS`])
pub fn allocate(
    scored: &[ScoredOpportunity],
    tolerance: RiskTolerance,
    capital: f64,
    max_positions: usize,
) -> Result<Vec<AllocationEntry>> {
    if !(capital.is_finite() && capital > 0.0) {
        return Err(Error::InvalidInput(format!(
            "capital must be a positive amount, got {}",
            capital
        )));
    }

    let mut eligible: Vec<&ScoredOpportunity> = scored
        .iter()
        .filter(|s| tolerance.admits(s.risk_level))
        .collect();

    if eligible.is_empty() {
        tracing::debug!(tolerance = tolerance.as_str(), "No opportunities within risk tolerance");
        return Ok(Vec::new());
    }

    // Stable, so equal scores keep input order
    eligible.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));

    let total_score: f64 = eligible
        .iter()
        .map(|s| s.opportunity_score.max(0.0))
        .sum();
    if total_score <= 0.0 {
        tracing::warn!(
            eligible = eligible.len(),
            "Total opportunity score is zero, allocating nothing"
        );
    }

    let ceiling = tolerance.max_allocation();
    let entries: Vec<AllocationEntry> = eligible
        .iter()
        .take(max_positions.min(MAX_POSITIONS))
        .map(|s| {
            let weight = if total_score > 0.0 {
                (s.opportunity_score.max(0.0) / total_score).min(ceiling)
            } else {
                0.0
            };
            AllocationEntry {
                opportunity_area: s.opportunity.area.clone(),
                allocation_usd: capital * weight,
                allocation_percent: weight * 100.0,
                expected_return: s.opportunity.growth_rate_cagr,
                risk_level: s.risk_level,
                opportunity_score: s.opportunity_score,
            }
        })
        .collect();

    tracing::debug!(
        tolerance = tolerance.as_str(),
        eligible = eligible.len(),
        positions = entries.len(),
        "Allocated portfolio"
    );

    Ok(entries)
}

/// Allocation totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub tolerance: RiskTolerance,
    pub capital: f64,
    pub entries: Vec<AllocationEntry>,
    pub total_allocated: f64,
    pub uninvested: f64,
    /// Allocation-weighted mean of expected returns (0 when nothing is allocated)
    pub weighted_expected_return: f64,
}

impl PortfolioSummary {
    pub fn new(tolerance: RiskTolerance, capital: f64, entries: Vec<AllocationEntry>) -> Self {
        let total_allocated: f64 = entries.iter().map(|e| e.allocation_usd).sum();
        let weighted_expected_return = if total_allocated > 0.0 {
            entries
                .iter()
                .map(|e| e.allocation_usd * e.expected_return)
                .sum::<f64>()
                / total_allocated
        } else {
            0.0
        };

        Self {
            tolerance,
            capital,
            entries,
            total_allocated,
            uninvested: (capital - total_allocated).max(0.0),
            weighted_expected_return,
        }
    }
}
