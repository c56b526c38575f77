//! Pairwise Pearson correlation over named numeric columns

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::NumericRecord;

/// |r| above this is reported as a significant pair
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.3;
/// |r| above this is Strong rather than Moderate
pub const STRONG_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Moderate,
    Strong,
}

impl CorrelationStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }

    /// Classify a coefficient; None when it is not significant
    pub fn classify(r: f64) -> Option<Self> {
        let magnitude = r.abs();
        if magnitude > STRONG_THRESHOLD {
            Some(Self::Strong)
        } else if magnitude > SIGNIFICANCE_THRESHOLD {
            Some(Self::Moderate)
        } else {
            None
        }
    }
}

impl std::str::FromStr for CorrelationStrength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "moderate" => Ok(Self::Moderate),
            "strong" => Ok(Self::Strong),
            _ => Err(format!("Unknown correlation strength: {}", s)),
        }
    }
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Moderate => write!(f, "Moderate"),
            Self::Strong => write!(f, "Strong"),
        }
    }
}

/// Symmetric correlation matrix. `None` marks an undefined coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub factor_1: String,
    pub factor_2: String,
    pub correlation: f64,
    pub strength: CorrelationStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    pub significant_pairs: Vec<CorrelationPair>,
}

/// Pearson r over the pairs where both values are finite.
///
/// None for fewer than two such pairs or a constant column.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Correlate every numeric column of `records`
pub fn correlate<T: NumericRecord>(records: &[T]) -> Result<CorrelationReport> {
    let rows: Vec<Vec<f64>> = records.iter().map(|r| r.numeric_values()).collect();
    correlate_columns(T::numeric_columns(), &rows)
}

/// Correlate raw rows whose values line up with `columns`
pub fn correlate_columns(columns: &[&str], rows: &[Vec<f64>]) -> Result<CorrelationReport> {
    if columns.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "correlation needs at least 2 numeric columns, got {}",
            columns.len()
        )));
    }
    if rows.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "correlation needs at least 2 rows, got {}",
            rows.len()
        )));
    }
    if let Some(row) = rows.iter().find(|r| r.len() != columns.len()) {
        return Err(Error::InvalidInput(format!(
            "row has {} values for {} columns",
            row.len(),
            columns.len()
        )));
    }

    let series: Vec<Vec<f64>> = (0..columns.len())
        .map(|c| rows.iter().map(|r| r[c]).collect())
        .collect();

    let k = columns.len();
    let mut values = vec![vec![None; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = if i == j {
                pearson(&series[i], &series[i]).map(|_| 1.0)
            } else {
                pearson(&series[i], &series[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    let mut significant_pairs = Vec::new();
    for i in 0..k {
        for j in (i + 1)..k {
            if let Some(r) = values[i][j] {
                if let Some(strength) = CorrelationStrength::classify(r) {
                    significant_pairs.push(CorrelationPair {
                        factor_1: columns[i].to_string(),
                        factor_2: columns[j].to_string(),
                        correlation: r,
                        strength,
                    });
                }
            }
        }
    }

    tracing::debug!(
        columns = k,
        rows = rows.len(),
        significant = significant_pairs.len(),
        "Computed correlation matrix"
    );

    Ok(CorrelationReport {
        matrix: CorrelationMatrix {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            values,
        },
        significant_pairs,
    })
}
