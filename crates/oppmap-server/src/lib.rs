//! Opportunity Map Web Server
//!
//! Axum-based JSON API behind the browser dashboard.
//!
//! - Catalogue tables with the same filters as the CLI
//! - Analytics endpoints (scores, correlations, clusters, portfolio, forecast, insights)
//! - One shared dashboard session; `POST /api/session/refresh` swaps it
//! - Sanitized error responses (bad input is a 400, everything else a generic 500)

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use oppmap_core::{AnalyticsEngine, DashboardSession};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub engine: AnalyticsEngine,
    /// Data the dashboard currently shows; replaced wholesale on refresh
    pub session: RwLock<DashboardSession>,
}

impl AppState {
    pub fn new(engine: AnalyticsEngine, session: DashboardSession) -> Self {
        Self {
            engine,
            session: RwLock::new(session),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AnalyticsEngine::default(), DashboardSession::default())
    }
}

/// Create the application router
pub fn create_router(state: AppState, config: ServerConfig) -> Router {
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Catalogue
        .route("/overview", get(handlers::get_overview))
        .route("/trends", get(handlers::list_trends))
        .route("/opportunities", get(handlers::list_opportunities))
        .route("/regions", get(handlers::list_regions))
        .route("/industries", get(handlers::list_industries))
        .route("/workforce", get(handlers::list_workforce))
        // Analytics
        .route("/analytics/scores", get(handlers::get_scores))
        .route("/analytics/correlations", get(handlers::get_correlations))
        .route("/analytics/clusters", get(handlers::get_clusters))
        .route("/analytics/portfolio", get(handlers::get_portfolio))
        .route(
            "/analytics/forecast",
            get(handlers::get_market_forecast).post(handlers::post_forecast),
        )
        .route("/analytics/insights", get(handlers::get_insights))
        // Session
        .route("/session", get(handlers::get_session))
        .route("/session/refresh", post(handlers::refresh_session));

    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server with the default configuration
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(state, host, port, ServerConfig::default()).await
}

pub async fn serve_with_config(
    state: AppState,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(state, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Application error type
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Invalid input is reported to the caller as a 400
        if let Some(core_err) = err.downcast_ref::<oppmap_core::Error>() {
            if core_err.is_invalid_input() {
                return Self::bad_request(&core_err.to_string());
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred".to_string(),
            internal: Some(err),
        }
    }
}
