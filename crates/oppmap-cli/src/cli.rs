//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oppmap_core::{
    Dataset, ExportFormat, MarketSizeCategory, MaturityLevel, RiskTolerance, TimeHorizon,
};

/// oppmap - Explore AI industry trends and investment opportunities
#[derive(Parser)]
#[command(name = "oppmap")]
#[command(about = "AI opportunity map: trends, scoring, clustering and portfolios", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analytics config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: table, json, csv
    #[arg(long, default_value = "table", global = true)]
    pub format: ExportFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Headline market figures and dashboard metrics for a filtered view
    Overview {
        /// Time horizon: dominant, emerging, future
        #[arg(long)]
        horizon: Option<TimeHorizon>,

        /// Minimum trend impact score (0-10)
        #[arg(long)]
        min_impact: Option<f64>,

        /// Minimum investment focus score (0-10)
        #[arg(long)]
        min_focus: Option<f64>,
    },

    /// List AI industry trends
    Trends {
        /// Time horizon: dominant, emerging, future
        #[arg(long)]
        horizon: Option<TimeHorizon>,

        /// Minimum impact score (0-10)
        #[arg(long)]
        min_impact: Option<f64>,
    },

    /// List investment opportunity areas
    Opportunities {
        /// Minimum investment focus score (0-10)
        #[arg(long)]
        min_focus: Option<f64>,

        /// Market size category: large, medium
        #[arg(long)]
        market_size: Option<MarketSizeCategory>,

        /// Maturity level: emerging, early-growth, critical-need, mature
        #[arg(long)]
        maturity: Option<MaturityLevel>,
    },

    /// Regional market distribution
    Regions {
        /// Regions to show (repeatable, default all)
        #[arg(long = "region")]
        regions: Vec<String>,
    },

    /// Industry AI adoption
    Industries,

    /// AI impact on job categories
    Workforce,

    /// Opportunity and risk scores
    Scores {
        /// Minimum investment focus score (0-10)
        #[arg(long)]
        min_focus: Option<f64>,
    },

    /// Pairwise correlations between numeric columns
    Correlations {
        /// Dataset: trends, opportunities, scores, regions, industries, workforce
        #[arg(short, long, default_value = "trends")]
        dataset: Dataset,
    },

    /// Cluster trends by impact, market size and adoption
    Clusters {
        /// Time horizon: dominant, emerging, future
        #[arg(long)]
        horizon: Option<TimeHorizon>,

        /// Minimum impact score (0-10)
        #[arg(long)]
        min_impact: Option<f64>,

        /// Name clusters by mean impact instead of k-means index
        #[arg(long)]
        ranked: bool,
    },

    /// Recommend a capital allocation
    Portfolio {
        /// Risk tolerance: low, medium, high
        #[arg(short, long, default_value = "medium")]
        tolerance: RiskTolerance,

        /// Capital to allocate in USD (defaults to the configured amount)
        #[arg(short, long)]
        capital: Option<f64>,

        /// Minimum investment focus score (0-10)
        #[arg(long)]
        min_focus: Option<f64>,
    },

    /// Linear-trend forecast (defaults to the global market size series)
    Forecast {
        /// Comma-separated series values
        #[arg(long, value_delimiter = ',')]
        series: Option<Vec<f64>>,

        /// Number of periods to forecast (defaults to the configured horizon)
        #[arg(long)]
        horizon: Option<usize>,
    },

    /// Market insights and strategic recommendations
    Insights,

    /// Simulate a data refresh and show how the metrics moved
    Refresh {
        /// Seed for the perturbation (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
