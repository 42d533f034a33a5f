//! Inven!RA endpoint handlers.
//!
//! Handlers only parse the request, call the facade and shape the HTTP
//! response.

use crate::facade::{FacadeError, ServiceFacade};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use proplan_types::{ActivityParam, AnalyticsContract, StudentAnalytics};
use serde::Deserialize;
use std::sync::{Arc, MutexGuard};
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<FacadeError> for ApiError {
    fn from(e: FacadeError) -> Self {
        match e {
            FacadeError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            other => {
                tracing::error!("facade operation failed: {}", other);
                ApiError::InternalServerError(other.to_string())
            }
        }
    }
}

pub(crate) fn lock_facade(state: &AppState) -> Result<MutexGuard<'_, ServiceFacade>, ApiError> {
    state
        .facade
        .lock()
        .map_err(|_| ApiError::InternalServerError("facade lock poisoned".to_string()))
}

/// Query string of `GET /deploy-proplan`.
#[derive(Debug, Deserialize)]
pub struct DeployQuery {
    /// Inven!RA activity instance identifier.
    #[serde(rename = "activityID")]
    pub activity_id: Option<String>,
}

/// Body of `POST /analytics-proplan`.
///
/// `activityID` is kept as raw JSON so a non-string value is reported as a
/// bad request instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsRequest {
    #[serde(rename = "activityID")]
    pub activity_id: Option<serde_json::Value>,
}

/// Handler for `GET /config-proplan`.
pub async fn config_page_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let page = lock_facade(&state)?.get_config_page()?;
    Ok(Html(page))
}

/// Handler for `GET /json-params-proplan`.
pub async fn json_params_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<ActivityParam>>, ApiError> {
    let params = lock_facade(&state)?.get_json_params()?;
    Ok(Json(params))
}

/// Handler for `GET /deploy-proplan?activityID=<id>`.
///
/// Responds with the launch URL as plain text.
pub async fn deploy_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<DeployQuery>,
) -> Response {
    let activity_id = query.activity_id.unwrap_or_default();

    let result = match lock_facade(&state) {
        Ok(facade) => facade.deploy_activity(&activity_id),
        Err(e) => return e.into_response(),
    };

    match result {
        Ok(access_url) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            access_url,
        )
            .into_response(),
        Err(FacadeError::InvalidRequest(_)) => (
            StatusCode::BAD_REQUEST,
            "Missing 'activityID' parameter.",
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Handler for `GET /analytics-list-proplan`.
pub async fn analytics_list_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<AnalyticsContract>, ApiError> {
    let contract = lock_facade(&state)?.get_analytics_contract()?;
    Ok(Json(contract))
}

/// Handler for `POST /analytics-proplan`.
///
/// A body that is not a JSON object is treated as an empty request. The
/// body is parsed whatever its `Content-Type`.
pub async fn analytics_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<StudentAnalytics>>, ApiError> {
    let request: AnalyticsRequest = serde_json::from_slice(&body).unwrap_or_default();
    let activity_id = request
        .activity_id
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    let records = lock_facade(&state)?.get_analytics(activity_id)?;
    Ok(Json(records))
}
