//! Dashboard session
//!
//! The dataset a dashboard is currently showing plus when it was last
//! updated. A session is a value: refreshing builds a new session and the
//! presentation layer swaps it in.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use crate::catalog::{self, Catalog};
use crate::config::RefreshConfig;
use crate::error::{Error, Result};
use crate::models::DataFreshness;

/// Bounds applied to perturbed impact and focus scores
pub const SCORE_CLIP: (f64, f64) = (1.0, 10.0);

/// When the session's data last changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastUpdate {
    InitialLoad,
    Refreshed(DateTime<Utc>),
}

impl std::fmt::Display for LastUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitialLoad => write!(f, "Initial Load"),
            Self::Refreshed(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSession {
    catalog: Catalog,
    last_update: LastUpdate,
    refresh_count: u32,
}

impl DashboardSession {
    /// Start a session on a freshly loaded catalogue
    pub fn load(catalog: Catalog) -> Self {
        Self {
            catalog,
            last_update: LastUpdate::InitialLoad,
            refresh_count: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn last_update(&self) -> LastUpdate {
        self.last_update
    }

    pub fn refresh_count(&self) -> u32 {
        self.refresh_count
    }

    /// Freshness metadata; initial loads report `now`
    pub fn freshness(&self, now: DateTime<Utc>) -> DataFreshness {
        match self.last_update {
            LastUpdate::InitialLoad => catalog::data_freshness(now),
            LastUpdate::Refreshed(at) => catalog::data_freshness(at),
        }
    }

    /// Simulated data refresh.
    ///
    /// Every trend impact score is scaled by `1 + z * impact_jitter` and
    /// every investment focus score by `1 + z * focus_jitter`, with `z` a
    /// standard normal draw, then clipped to [1, 10]. Trends are drawn first,
    /// in catalogue order, then opportunities. Nothing else changes.
    pub fn refreshed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        now: DateTime<Utc>,
        config: &RefreshConfig,
    ) -> Result<Self> {
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| Error::InvalidInput(format!("Invalid refresh distribution: {}", e)))?;
        let mut jitter = |value: f64, scale: f64| {
            let z: f64 = rng.sample(&normal);
            (value * (1.0 + z * scale)).clamp(SCORE_CLIP.0, SCORE_CLIP.1)
        };

        let mut catalog = self.catalog.clone();
        for trend in catalog.trends.iter_mut() {
            trend.impact_score = jitter(trend.impact_score, config.impact_jitter);
        }
        for opportunity in catalog.opportunities.iter_mut() {
            opportunity.investment_focus_score =
                jitter(opportunity.investment_focus_score, config.focus_jitter);
        }

        tracing::info!(
            trends = catalog.trends.len(),
            opportunities = catalog.opportunities.len(),
            refresh = self.refresh_count + 1,
            "Refreshed dashboard data"
        );

        Ok(Self {
            catalog,
            last_update: LastUpdate::Refreshed(now),
            refresh_count: self.refresh_count + 1,
        })
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::load(Catalog::comprehensive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_initial_load() {
        let session = DashboardSession::default();
        assert_eq!(session.last_update(), LastUpdate::InitialLoad);
        assert_eq!(session.last_update().to_string(), "Initial Load");
        assert_eq!(session.refresh_count(), 0);
        assert_eq!(session.catalog().trends.len(), 20);
    }

    #[test]
    fn test_refresh_perturbs_only_scores() {
        let session = DashboardSession::default();
        let mut rng = StdRng::seed_from_u64(42);
        let refreshed = session
            .refreshed(&mut rng, at(), &RefreshConfig::default())
            .unwrap();

        assert_eq!(refreshed.last_update(), LastUpdate::Refreshed(at()));
        assert_eq!(refreshed.last_update().to_string(), "2025-06-15 12:30:00");
        assert_eq!(refreshed.refresh_count(), 1);

        let before = session.catalog();
        let after = refreshed.catalog();
        assert_ne!(before.trends, after.trends);
        for (b, a) in before.trends.iter().zip(&after.trends) {
            assert_eq!(b.name, a.name);
            assert_eq!(b.market_size_billion, a.market_size_billion);
            assert_eq!(b.adoption_rate, a.adoption_rate);
            assert!((1.0..=10.0).contains(&a.impact_score));
            // 2% jitter stays well inside 20%
            assert!((a.impact_score - b.impact_score).abs() < b.impact_score * 0.2);
        }
        for (b, a) in before.opportunities.iter().zip(&after.opportunities) {
            assert_eq!(b.area, a.area);
            assert_eq!(b.growth_rate_cagr, a.growth_rate_cagr);
            assert!((1.0..=10.0).contains(&a.investment_focus_score));
        }
        assert_eq!(before.regions, after.regions);

        // original session is untouched
        assert_eq!(session.last_update(), LastUpdate::InitialLoad);
    }

    #[test]
    fn test_refresh_reproducible_for_seed() {
        let session = DashboardSession::default();
        let config = RefreshConfig::default();
        let a = session
            .refreshed(&mut StdRng::seed_from_u64(9), at(), &config)
            .unwrap();
        let b = session
            .refreshed(&mut StdRng::seed_from_u64(9), at(), &config)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_jitter_keeps_scores() {
        let session = DashboardSession::default();
        let config = RefreshConfig {
            impact_jitter: 0.0,
            focus_jitter: 0.0,
            delay_ms: 0,
        };
        let refreshed = session
            .refreshed(&mut StdRng::seed_from_u64(1), at(), &config)
            .unwrap();
        assert_eq!(refreshed.catalog(), session.catalog());
    }

    #[test]
    fn test_scores_clip_to_bounds() {
        let mut catalog = Catalog::comprehensive();
        catalog.trends[0].impact_score = 10.0;
        let session = DashboardSession::load(catalog);
        let config = RefreshConfig {
            impact_jitter: 5.0,
            focus_jitter: 5.0,
            delay_ms: 0,
        };
        let refreshed = session
            .refreshed(&mut StdRng::seed_from_u64(3), at(), &config)
            .unwrap();
        for t in &refreshed.catalog().trends {
            assert!((1.0..=10.0).contains(&t.impact_score));
        }
    }

    #[test]
    fn test_freshness_follows_last_update() {
        let session = DashboardSession::default()
            .refreshed(&mut StdRng::seed_from_u64(1), at(), &RefreshConfig::default())
            .unwrap();
        let freshness = session.freshness(Utc::now());
        assert_eq!(freshness.last_update, at());
    }
}
