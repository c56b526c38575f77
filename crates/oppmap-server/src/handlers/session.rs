//! Session handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use oppmap_core::{DashboardMetrics, DataFreshness};

use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// "Initial Load" or the refresh timestamp
    pub last_update: String,
    pub refreshed: bool,
    pub refresh_count: u32,
    pub freshness: DataFreshness,
}

/// GET /api/session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session.read().await;
    Json(SessionResponse {
        last_update: session.last_update().to_string(),
        refreshed: session.refresh_count() > 0,
        refresh_count: session.refresh_count(),
        freshness: session.freshness(Utc::now()),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    /// Seed for a reproducible perturbation (random if omitted)
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub session: SessionResponse,
    /// Refreshed figures with deltas against the previous data
    pub metrics: DashboardMetrics,
}

/// POST /api/session/refresh - Perturb scores and swap in the new session
///
/// The body is optional; `{"seed": 42}` makes the refresh reproducible.
pub async fn refresh_session(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RefreshRequest>>,
) -> Result<Json<RefreshResponse>, AppError> {
    let request = body.map(|Json(b)| b).unwrap_or_default();

    let delay = state.engine.config().refresh.delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Utc::now();

    let mut session = state.session.write().await;
    let refreshed = session.refreshed(&mut rng, now, &state.engine.config().refresh)?;

    let metrics = {
        let before = session.catalog();
        let after = refreshed.catalog();
        state.engine.dashboard_metrics(
            &after.trends,
            &after.opportunities,
            &before.trends,
            &before.opportunities,
        )
    };
    *session = refreshed;

    Ok(Json(RefreshResponse {
        session: SessionResponse {
            last_update: session.last_update().to_string(),
            refreshed: true,
            refresh_count: session.refresh_count(),
            freshness: session.freshness(now),
        },
        metrics,
    }))
}
