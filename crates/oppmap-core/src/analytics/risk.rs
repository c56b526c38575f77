//! Investment risk scoring
//!
//! Five weighted sub-factors per opportunity. Volatility, competition and
//! (for non-governance areas) regulatory risk are simulated draws, so the
//! caller supplies the generator. Draw order per row is volatility,
//! regulatory, competition; reseeding the generator before a batch
//! reproduces the batch exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::models::{OpportunityRecord, RiskFactors, RiskLevel};

pub const VOLATILITY_WEIGHT: f64 = 0.25;
pub const REGULATORY_WEIGHT: f64 = 0.20;
pub const TECH_MATURITY_WEIGHT: f64 = 0.20;
pub const COMPETITION_WEIGHT: f64 = 0.15;
pub const ADOPTION_UNCERTAINTY_WEIGHT: f64 = 0.20;

/// Regulatory sub-factor for governance-related areas
pub const GOVERNANCE_REGULATORY_RISK: f64 = 0.8;

const VOLATILITY_RANGE: (f64, f64) = (0.2, 0.8);
const REGULATORY_RANGE: (f64, f64) = (0.1, 0.6);
const COMPETITION_RANGE: (f64, f64) = (0.3, 0.9);

/// Risk outcome for one opportunity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub level: RiskLevel,
    pub factors: RiskFactors,
}

impl RiskFactors {
    /// Weighted sum of the sub-factors (maturity contributes inverted)
    pub fn weighted_score(&self) -> f64 {
        self.volatility * VOLATILITY_WEIGHT
            + self.regulatory * REGULATORY_WEIGHT
            + (1.0 - self.tech_maturity) * TECH_MATURITY_WEIGHT
            + self.competition * COMPETITION_WEIGHT
            + self.adoption_uncertainty * ADOPTION_UNCERTAINTY_WEIGHT
    }
}

/// Whether the area mentions one of the governance keywords (case-insensitive)
pub fn is_governance_area(area: &str, keywords: &[String]) -> bool {
    let area = area.to_lowercase();
    keywords
        .iter()
        .any(|k| !k.is_empty() && area.contains(&k.to_lowercase()))
}

/// Score one opportunity, consuming draws from `rng`
pub fn assess<R: Rng + ?Sized>(
    opportunity: &OpportunityRecord,
    rng: &mut R,
    config: &RiskConfig,
) -> RiskAssessment {
    let volatility = rng.gen_range(VOLATILITY_RANGE.0..VOLATILITY_RANGE.1);
    let regulatory = if is_governance_area(&opportunity.area, &config.governance_keywords) {
        GOVERNANCE_REGULATORY_RISK
    } else {
        rng.gen_range(REGULATORY_RANGE.0..REGULATORY_RANGE.1)
    };
    let competition = rng.gen_range(COMPETITION_RANGE.0..COMPETITION_RANGE.1);
    let focus = opportunity.investment_focus_score;
    let adoption_uncertainty = if focus.is_finite() {
        (1.0 - focus / 10.0).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let factors = RiskFactors {
        volatility,
        regulatory,
        tech_maturity: opportunity.maturity_level.tech_maturity(),
        competition,
        adoption_uncertainty,
    };
    let score = factors.weighted_score().clamp(0.0, 1.0);

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        factors,
    }
}

/// Score a batch in input order
pub fn score_batch<R: Rng + ?Sized>(
    opportunities: &[OpportunityRecord],
    rng: &mut R,
    config: &RiskConfig,
) -> Vec<RiskAssessment> {
    let assessments: Vec<RiskAssessment> = opportunities
        .iter()
        .map(|o| assess(o, rng, config))
        .collect();

    tracing::debug!(
        count = assessments.len(),
        high = assessments
            .iter()
            .filter(|a| a.level == RiskLevel::High)
            .count(),
        "Scored risk batch"
    );

    assessments
}
