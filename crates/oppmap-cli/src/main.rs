//! oppmap CLI - AI industry trends and investment opportunity map
//!
//! Usage:
//!   oppmap overview                      Headline figures and dashboard metrics
//!   oppmap trends --horizon emerging     Browse trends
//!   oppmap portfolio --tolerance low     Recommend an allocation
//!   oppmap serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let mut ctx = commands::load_context(cli.config.as_deref(), cli.format)?;

    match cli.command {
        Commands::Overview {
            horizon,
            min_impact,
            min_focus,
        } => commands::cmd_overview(&ctx, horizon, min_impact, min_focus),
        Commands::Trends {
            horizon,
            min_impact,
        } => commands::cmd_trends(&ctx, horizon, min_impact),
        Commands::Opportunities {
            min_focus,
            market_size,
            maturity,
        } => commands::cmd_opportunities(&ctx, min_focus, market_size, maturity),
        Commands::Regions { regions } => commands::cmd_regions(&ctx, &regions),
        Commands::Industries => commands::cmd_industries(&ctx),
        Commands::Workforce => commands::cmd_workforce(&ctx),
        Commands::Scores { min_focus } => commands::cmd_scores(&ctx, min_focus),
        Commands::Correlations { dataset } => commands::cmd_correlations(&ctx, dataset),
        Commands::Clusters {
            horizon,
            min_impact,
            ranked,
        } => commands::cmd_clusters(&ctx, horizon, min_impact, ranked),
        Commands::Portfolio {
            tolerance,
            capital,
            min_focus,
        } => commands::cmd_portfolio(&ctx, tolerance, capital, min_focus),
        Commands::Forecast { series, horizon } => commands::cmd_forecast(&ctx, series, horizon),
        Commands::Insights => commands::cmd_insights(&ctx),
        Commands::Refresh { seed } => commands::cmd_refresh(&mut ctx, seed).await,
        Commands::Serve { port, host } => commands::cmd_serve(ctx, &host, port).await,
    }
}
