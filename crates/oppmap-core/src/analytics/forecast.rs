//! Linear-trend forecasting
//!
//! Ordinary least squares against index positions 0..n-1, extrapolated
//! `horizon` steps. The confidence band has the same half-width at every
//! future point: `z * residual_std_error * sqrt(1 + 1/n)`. It does not
//! widen with distance from the data.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default band multiplier (95% under a normal approximation)
pub const DEFAULT_Z_SCORE: f64 = 1.96;

/// Hard ceiling on forecast steps; `forecast.max_horizon` may only lower it
pub const MAX_HORIZON: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

impl TrendStrength {
    /// Strong above |r| 0.8, Moderate above 0.5
    pub fn from_r(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude > 0.8 {
            Self::Strong
        } else if magnitude > 0.5 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl std::str::FromStr for TrendStrength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weak" => Ok(Self::Weak),
            "moderate" => Ok(Self::Moderate),
            "strong" => Ok(Self::Strong),
            _ => Err(format!("Unknown trend strength: {}", s)),
        }
    }
}

impl std::fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weak => write!(f, "Weak"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Strong => write!(f, "Strong"),
        }
    }
}

/// Point forecasts with a uniform confidence band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub predictions: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub r_squared: f64,
    pub r: f64,
    pub trend_strength: TrendStrength,
    pub slope: f64,
    pub intercept: f64,
    /// sqrt(SSR / (n - 2)); zero for two points
    pub residual_std_error: f64,
    pub band_half_width: f64,
}

/// Fit a line to `series` and extrapolate `horizon` points
pub fn forecast(series: &[f64], horizon: usize, z_score: f64) -> Result<ForecastBundle> {
    let n = series.len();
    if n < 2 {
        return Err(Error::InvalidInput(format!(
            "forecasting needs at least 2 points, got {}",
            n
        )));
    }
    if horizon == 0 {
        return Err(Error::InvalidInput(
            "forecast horizon must be positive".to_string(),
        ));
    }
    if horizon > MAX_HORIZON {
        return Err(Error::InvalidInput(format!(
            "forecast horizon must be at most {}, got {}",
            MAX_HORIZON, horizon
        )));
    }
    if !(z_score.is_finite() && z_score >= 0.0) {
        return Err(Error::InvalidInput(format!(
            "band multiplier must be finite and non-negative, got {}",
            z_score
        )));
    }
    let end = n.checked_add(horizon).ok_or_else(|| {
        Error::InvalidInput(format!("forecast horizon {} is out of range", horizon))
    })?;
    if let Some(bad) = series.iter().find(|v| !v.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "series contains a non-finite value: {}",
            bad
        )));
    }

    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = series.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (i, y) in series.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r = if syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    let residual_std_error = if n > 2 {
        let ssr: f64 = series
            .iter()
            .enumerate()
            .map(|(i, y)| (y - (intercept + slope * i as f64)).powi(2))
            .sum();
        (ssr / (nf - 2.0)).sqrt()
    } else {
        0.0
    };
    let band_half_width = z_score * residual_std_error * (1.0 + 1.0 / nf).sqrt();

    let predictions: Vec<f64> = (n..end)
        .map(|x| intercept + slope * x as f64)
        .collect();
    let upper = predictions.iter().map(|p| p + band_half_width).collect();
    let lower = predictions.iter().map(|p| p - band_half_width).collect();

    let trend_strength = TrendStrength::from_r(r);
    tracing::debug!(
        points = n,
        horizon,
        slope,
        r_squared = r * r,
        strength = trend_strength.as_str(),
        "Fitted linear forecast"
    );

    Ok(ForecastBundle {
        predictions,
        upper,
        lower,
        r_squared: r * r,
        r,
        trend_strength,
        slope,
        intercept,
        residual_std_error,
        band_half_width,
    })
}
