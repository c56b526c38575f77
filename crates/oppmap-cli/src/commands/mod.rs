//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared context (engine, session, output format) and output helpers
//! - `catalog` - Overview and catalogue tables (trends, opportunities, regions, industries, workforce)
//! - `analytics` - Scores, correlations, clusters, portfolio, forecast, insights
//! - `session` - Simulated data refresh
//! - `serve` - Web server command

pub mod analytics;
pub mod catalog;
pub mod core;
pub mod serve;
pub mod session;

// Re-export command functions for main.rs
pub use analytics::*;
pub use catalog::*;
pub use core::*;
pub use serve::*;
pub use session::*;

/// Truncate a string to at most `max` characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
