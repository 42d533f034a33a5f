//! Read-only views over the observer projections.
//!
//! Provides:
//! - `GET /analytics/{activityId}/{studentId}/decision-log`: the decision
//!   log advertised by the `decision_log_url` analytics
//! - `GET /api/activities/{activityId}/summary`: everything the observers
//!   know about one activity
//!
//! These handlers read observer state directly and never take the facade
//! lock.

use crate::api::ApiError;
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use proplan_events::{DeployRecord, ObserverError};
use proplan_types::ActivityId;
use serde::Serialize;
use std::sync::Arc;

/// Response body for the decision log.
#[derive(Debug, Serialize)]
pub struct DecisionLogResponse {
    #[serde(rename = "activityID")]
    pub activity_id: ActivityId,
    #[serde(rename = "inveniraStdID")]
    pub student_id: String,
    /// Entries in the order their events were delivered.
    pub entries: Vec<String>,
}

/// Response body for the activity summary.
#[derive(Debug, Serialize)]
pub struct ActivitySummary {
    #[serde(rename = "activityID")]
    pub activity_id: ActivityId,
    /// Latest deployment, if the activity was deployed.
    pub deployment: Option<DeployRecord>,
    #[serde(rename = "analyticsRequests")]
    pub analytics_requests: u64,
    #[serde(rename = "decisionLog")]
    pub decision_log: Vec<String>,
}

fn parse_path_id(raw: &str) -> Result<ActivityId, ApiError> {
    ActivityId::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn observer_error(e: ObserverError) -> ApiError {
    tracing::error!("failed to read observer state: {}", e);
    ApiError::InternalServerError(e.to_string())
}

/// Handler for `GET /analytics/{activityId}/{studentId}/decision-log`.
pub async fn decision_log_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((activity_id, student_id)): Path<(String, String)>,
) -> Result<Json<DecisionLogResponse>, ApiError> {
    let activity_id = parse_path_id(&activity_id)?;
    let entries = state
        .decision_log
        .entries(&activity_id)
        .map_err(observer_error)?;

    Ok(Json(DecisionLogResponse {
        activity_id,
        student_id,
        entries,
    }))
}

/// Handler for `GET /api/activities/{activityId}/summary`.
///
/// Returns 404 if no event was ever raised for the activity.
pub async fn activity_summary_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(activity_id): Path<String>,
) -> Result<Json<ActivitySummary>, ApiError> {
    let activity_id = parse_path_id(&activity_id)?;

    let deployment = state
        .deploy_registry
        .get(&activity_id)
        .map_err(observer_error)?;
    let analytics_requests = state
        .request_counter
        .count(&activity_id)
        .map_err(observer_error)?;
    let decision_log = state
        .decision_log
        .entries(&activity_id)
        .map_err(observer_error)?;

    if deployment.is_none() && decision_log.is_empty() {
        return Err(ApiError::NotFound(format!("activity {activity_id}")));
    }

    Ok(Json(ActivitySummary {
        activity_id,
        deployment,
        analytics_requests,
        decision_log,
    }))
}
