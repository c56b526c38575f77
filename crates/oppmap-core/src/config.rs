//! Analytics configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/oppmap/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Every key is optional. Missing keys keep the compiled defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analytics::clustering::{ClusterLabeling, CLUSTER_NAMES};
use crate::analytics::forecast::MAX_HORIZON;
use crate::analytics::portfolio::MAX_POSITIONS;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Risk simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Seed for the per-batch generator
    pub seed: u64,
    /// Keywords (case-insensitive) that mark an area as governance-related
    pub governance_keywords: Vec<String>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            governance_keywords: vec!["governance".to_string()],
        }
    }
}

/// k-means settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    pub clusters: usize,
    /// Number of k-means++ restarts; the lowest-inertia fit wins
    pub n_init: usize,
    pub max_iter: usize,
    /// Convergence threshold on total squared centroid movement
    pub tolerance: f64,
    pub seed: u64,
    pub labeling: ClusterLabeling,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            clusters: CLUSTER_NAMES.len(),
            n_init: 10,
            max_iter: 300,
            tolerance: 1e-4,
            seed: 42,
            labeling: ClusterLabeling::Positional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub max_positions: usize,
    /// Opportunities carry no adoption data; this value is used when scoring them
    pub assumed_adoption_rate: f64,
    pub default_capital: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            max_positions: MAX_POSITIONS,
            assumed_adoption_rate: 50.0,
            default_capital: 1_000_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub default_horizon: usize,
    /// Longest horizon a caller may request
    pub max_horizon: usize,
    /// Multiplier applied to the standard error for the confidence band
    pub z_score: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon: 12,
            max_horizon: 240,
            z_score: 1.96,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsConfig {
    pub high_growth_threshold: f64,
    pub high_focus_threshold: f64,
    pub top_impact: usize,
    pub top_focus: usize,
    pub top_growth: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            high_growth_threshold: 30.0,
            high_focus_threshold: 8.0,
            top_impact: 3,
            top_focus: 5,
            top_growth: 3,
        }
    }
}

/// Simulated data refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Relative standard deviation applied to trend impact scores
    pub impact_jitter: f64,
    /// Relative standard deviation applied to investment focus scores
    pub focus_jitter: f64,
    /// Cosmetic delay, only honoured by presentation layers
    pub delay_ms: u64,
}

impl RefreshConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            impact_jitter: 0.02,
            focus_jitter: 0.03,
            delay_ms: 0,
        }
    }
}

/// Full analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub risk: RiskConfig,
    pub clustering: ClusteringConfig,
    pub portfolio: PortfolioConfig,
    pub forecast: ForecastConfig,
    pub insights: InsightsConfig,
    pub refresh: RefreshConfig,
}

impl AnalyticsConfig {
    /// Load config, preferring `path` (if it exists), then the data-dir
    /// override, then the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) if path.exists() => read_config(path)?,
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                DEFAULT_CONFIG.to_string()
            }
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => read_config(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// The embedded defaults
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let clusters = self.clustering.clusters;
        if clusters == 0 || clusters > CLUSTER_NAMES.len() {
            return Err(Error::Config(format!(
                "clustering.clusters must be between 1 and {}, got {}",
                CLUSTER_NAMES.len(),
                clusters
            )));
        }
        if self.clustering.n_init == 0 || self.clustering.max_iter == 0 {
            return Err(Error::Config(
                "clustering.n_init and clustering.max_iter must be positive".to_string(),
            ));
        }
        if !(self.clustering.tolerance.is_finite() && self.clustering.tolerance >= 0.0) {
            return Err(Error::Config(format!(
                "clustering.tolerance must be finite and non-negative, got {}",
                self.clustering.tolerance
            )));
        }
        let positions = self.portfolio.max_positions;
        if positions == 0 || positions > MAX_POSITIONS {
            return Err(Error::Config(format!(
                "portfolio.max_positions must be between 1 and {}, got {}",
                MAX_POSITIONS, positions
            )));
        }
        let adoption = self.portfolio.assumed_adoption_rate;
        if !(adoption.is_finite() && (0.0..=100.0).contains(&adoption)) {
            return Err(Error::Config(format!(
                "portfolio.assumed_adoption_rate must be within 0..=100, got {}",
                adoption
            )));
        }
        if !(self.portfolio.default_capital.is_finite() && self.portfolio.default_capital > 0.0) {
            return Err(Error::Config(
                "portfolio.default_capital must be a positive amount".to_string(),
            ));
        }
        let forecast = &self.forecast;
        if forecast.max_horizon == 0 || forecast.max_horizon > MAX_HORIZON {
            return Err(Error::Config(format!(
                "forecast.max_horizon must be between 1 and {}, got {}",
                MAX_HORIZON, forecast.max_horizon
            )));
        }
        if forecast.default_horizon == 0 || forecast.default_horizon > forecast.max_horizon {
            return Err(Error::Config(format!(
                "forecast.default_horizon must be between 1 and {}, got {}",
                forecast.max_horizon, forecast.default_horizon
            )));
        }
        if !(forecast.z_score.is_finite() && forecast.z_score >= 0.0) {
            return Err(Error::Config(format!(
                "forecast.z_score must be finite and non-negative, got {}",
                forecast.z_score
            )));
        }
        let jitters = [self.refresh.impact_jitter, self.refresh.focus_jitter];
        if jitters.iter().any(|j| !(j.is_finite() && *j >= 0.0)) {
            return Err(Error::Config(
                "refresh jitter must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("oppmap").join("config").join("analytics.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    risk: Option<RawRisk>,
    clustering: Option<RawClustering>,
    portfolio: Option<RawPortfolio>,
    forecast: Option<RawForecast>,
    insights: Option<RawInsights>,
    refresh: Option<RawRefresh>,
}

#[derive(Debug, Deserialize)]
struct RawRisk {
    seed: Option<u64>,
    governance_keywords: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawClustering {
    clusters: Option<usize>,
    n_init: Option<usize>,
    max_iter: Option<usize>,
    tolerance: Option<f64>,
    seed: Option<u64>,
    labeling: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPortfolio {
    max_positions: Option<usize>,
    assumed_adoption_rate: Option<f64>,
    default_capital: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    default_horizon: Option<usize>,
    max_horizon: Option<usize>,
    z_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    high_growth_threshold: Option<f64>,
    high_focus_threshold: Option<f64>,
    top_impact: Option<usize>,
    top_focus: Option<usize>,
    top_growth: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawRefresh {
    impact_jitter: Option<f64>,
    focus_jitter: Option<f64>,
    delay_ms: Option<u64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(risk) = raw.risk {
        if let Some(seed) = risk.seed {
            config.risk.seed = seed;
        }
        if let Some(keywords) = risk.governance_keywords {
            config.risk.governance_keywords = keywords;
        }
    }

    if let Some(clustering) = raw.clustering {
        let c = &mut config.clustering;
        c.clusters = clustering.clusters.unwrap_or(c.clusters);
        c.n_init = clustering.n_init.unwrap_or(c.n_init);
        c.max_iter = clustering.max_iter.unwrap_or(c.max_iter);
        c.tolerance = clustering.tolerance.unwrap_or(c.tolerance);
        c.seed = clustering.seed.unwrap_or(c.seed);
        if let Some(labeling) = clustering.labeling {
            c.labeling = labeling.parse().map_err(Error::Config)?;
        }
    }

    if let Some(portfolio) = raw.portfolio {
        let p = &mut config.portfolio;
        p.max_positions = portfolio.max_positions.unwrap_or(p.max_positions);
        p.assumed_adoption_rate = portfolio
            .assumed_adoption_rate
            .unwrap_or(p.assumed_adoption_rate);
        p.default_capital = portfolio.default_capital.unwrap_or(p.default_capital);
    }

    if let Some(forecast) = raw.forecast {
        let f = &mut config.forecast;
        f.default_horizon = forecast.default_horizon.unwrap_or(f.default_horizon);
        f.max_horizon = forecast.max_horizon.unwrap_or(f.max_horizon);
        f.z_score = forecast.z_score.unwrap_or(f.z_score);
    }

    if let Some(insights) = raw.insights {
        let i = &mut config.insights;
        i.high_growth_threshold = insights
            .high_growth_threshold
            .unwrap_or(i.high_growth_threshold);
        i.high_focus_threshold = insights
            .high_focus_threshold
            .unwrap_or(i.high_focus_threshold);
        i.top_impact = insights.top_impact.unwrap_or(i.top_impact);
        i.top_focus = insights.top_focus.unwrap_or(i.top_focus);
        i.top_growth = insights.top_growth.unwrap_or(i.top_growth);
    }

    if let Some(refresh) = raw.refresh {
        let r = &mut config.refresh;
        r.impact_jitter = refresh.impact_jitter.unwrap_or(r.impact_jitter);
        r.focus_jitter = refresh.focus_jitter.unwrap_or(r.focus_jitter);
        r.delay_ms = refresh.delay_ms.unwrap_or(r.delay_ms);
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
[clustering]
labeling = "ranked_by_impact"
n_init = 3

[portfolio]
max_positions = 5
"#,
        )
        .unwrap();

        assert_eq!(config.clustering.labeling, ClusterLabeling::RankedByImpact);
        assert_eq!(config.clustering.n_init, 3);
        assert_eq!(config.clustering.clusters, 4);
        assert_eq!(config.portfolio.max_positions, 5);
        assert_eq!(config.risk.seed, 42);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_config("[clustering]\nclusters = 7").is_err());
        assert!(parse_config("[clustering]\nclusters = 0").is_err());
        assert!(parse_config("[portfolio]\nmax_positions = 0").is_err());
        assert!(parse_config("[portfolio]\ndefault_capital = -5.0").is_err());
        assert!(parse_config("[clustering]\nlabeling = \"alphabetical\"").is_err());
        assert!(parse_config("not toml [").is_err());
    }

    #[test]
    fn test_position_ceiling() {
        let config = parse_config("[portfolio]\nmax_positions = 8").unwrap();
        assert_eq!(config.portfolio.max_positions, MAX_POSITIONS);

        let err = parse_config("[portfolio]\nmax_positions = 15").unwrap_err();
        assert!(err.to_string().contains("max_positions"));

        let mut config = AnalyticsConfig::default();
        config.portfolio.max_positions = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_numeric_keys_validated() {
        assert!(parse_config("[forecast]\nz_score = -1.0").is_err());
        assert!(parse_config("[forecast]\nz_score = nan").is_err());
        assert!(parse_config("[forecast]\nz_score = inf").is_err());
        assert!(parse_config("[forecast]\nz_score = 0.0").is_ok());
        assert!(parse_config("[portfolio]\nassumed_adoption_rate = 101.0").is_err());
        assert!(parse_config("[portfolio]\nassumed_adoption_rate = -0.5").is_err());
        assert!(parse_config("[portfolio]\nassumed_adoption_rate = nan").is_err());
        assert!(parse_config("[clustering]\ntolerance = -1e-4").is_err());
        assert!(parse_config("[clustering]\ntolerance = nan").is_err());
        assert!(parse_config("[refresh]\nfocus_jitter = nan").is_err());
    }

    #[test]
    fn test_horizon_limits() {
        let config = parse_config("[forecast]\nmax_horizon = 50\ndefault_horizon = 50").unwrap();
        assert_eq!(config.forecast.max_horizon, 50);

        assert!(parse_config("[forecast]\nmax_horizon = 0").is_err());
        assert!(parse_config("[forecast]\nmax_horizon = 1001").is_err());
        assert!(parse_config("[forecast]\nmax_horizon = 10\ndefault_horizon = 12").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[risk]\nseed = 7\n\n[refresh]\ndelay_ms = 1500").unwrap();

        let config = AnalyticsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.risk.seed, 7);
        assert_eq!(config.refresh.delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_load_missing_path_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalyticsConfig::load(Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }
}
