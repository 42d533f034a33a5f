//! ProPlan activity provider library logic.

pub mod analytics;
pub mod api;
pub mod api_observe;
pub mod config;
pub mod facade;
pub mod repository;
pub mod serialize;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use facade::ServiceFacade;
use proplan_events::{AnalyticsRequestCounter, DecisionLog, DeployRegistry};
use repository::{ActivityRepository, RepositoryError, StaticRepository};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The facade, with its observer registry.
    ///
    /// One lock serializes every facade call, including the full event
    /// delivery round. Uses `std::sync::Mutex`: no handler holds it across
    /// an `.await`.
    pub facade: Arc<Mutex<ServiceFacade>>,
    /// Latest deployment per activity.
    pub deploy_registry: Arc<DeployRegistry>,
    /// Analytics requests per activity.
    pub request_counter: Arc<AnalyticsRequestCounter>,
    /// Textual trail per activity.
    pub decision_log: Arc<DecisionLog>,
}

impl AppState {
    /// Wires a facade over `repo` with the three built-in observers
    /// attached, in this order: deploy registry, request counter, decision
    /// log.
    pub fn new(repo: Arc<dyn ActivityRepository>) -> Self {
        let deploy_registry = Arc::new(DeployRegistry::new());
        let request_counter = Arc::new(AnalyticsRequestCounter::new());
        let decision_log = Arc::new(DecisionLog::new());

        let mut facade = ServiceFacade::new(repo);
        facade.attach(deploy_registry.clone());
        facade.attach(request_counter.clone());
        facade.attach(decision_log.clone());

        Self {
            facade: Arc::new(Mutex::new(facade)),
            deploy_registry,
            request_counter,
            decision_log,
        }
    }
}

/// Builds the application state from configuration.
///
/// # Errors
///
/// Returns `RepositoryError` if a configured data file exists but cannot be
/// read or parsed.
pub fn build_state(config: &config::Config) -> Result<AppState, RepositoryError> {
    let repo = StaticRepository::from_config(&config.provider)?;
    Ok(AppState::new(Arc::new(repo)))
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config-proplan", get(api::config_page_handler))
        .route("/json-params-proplan", get(api::json_params_handler))
        .route("/deploy-proplan", get(api::deploy_handler))
        .route("/analytics-list-proplan", get(api::analytics_list_handler))
        .route("/analytics-proplan", post(api::analytics_handler))
        .route(
            "/analytics/{activityId}/{studentId}/decision-log",
            get(api_observe::decision_log_handler),
        )
        .route(
            "/api/activities/{activityId}/summary",
            get(api_observe::activity_summary_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
