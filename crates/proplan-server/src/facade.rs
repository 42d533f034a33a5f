//! Orchestration between the repository and the event core.
//!
//! HTTP handlers call the [`ServiceFacade`] and nothing else. Each operation
//! validates its input, asks the repository for the result and raises the
//! matching domain event.
//!
//! Event timing differs per operation:
//! - `AnalyticsRequested` is published *before* the repository read, so a
//!   request is counted even if building the analytics later fails.
//! - `ActivityDeployed` is published only *after* the repository confirms
//!   the deploy, so a failed deploy never shows up in any projection.

use std::sync::Arc;

use proplan_events::{DomainEvent, EventPublisher, Observer, ObserverError};
use proplan_types::{ActivityId, ActivityParam, AnalyticsContract, StudentAnalytics};
use thiserror::Error;

use crate::repository::{ActivityRepository, RepositoryError};
use crate::serialize;

/// Errors returned by facade operations.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// A required identifier is missing or malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An observer failed while the event was being delivered.
    #[error(transparent)]
    Observer(#[from] ObserverError),

    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn parse_activity_id(raw: &str) -> Result<ActivityId, FacadeError> {
    ActivityId::parse(raw)
        .map_err(|_| FacadeError::InvalidRequest("missing or invalid 'activityID'".to_string()))
}

/// Single entry point for activity operations.
pub struct ServiceFacade {
    repo: Arc<dyn ActivityRepository>,
    publisher: EventPublisher,
}

impl ServiceFacade {
    /// Creates a facade with an empty observer registry.
    pub fn new(repo: Arc<dyn ActivityRepository>) -> Self {
        Self {
            repo,
            publisher: EventPublisher::new(),
        }
    }

    /// Registers an observer for every event this facade raises.
    pub fn attach(&mut self, observer: Arc<dyn Observer>) -> bool {
        self.publisher.attach(observer)
    }

    /// Unregisters an observer. No-op if it is not attached.
    pub fn detach<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> bool {
        self.publisher.detach(observer)
    }

    pub fn publisher(&self) -> &EventPublisher {
        &self.publisher
    }

    /// Returns analytics for `activity_id`.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for an empty id; otherwise observer or repository
    /// errors. A repository error still leaves the request counted.
    pub fn get_analytics(
        &self,
        activity_id: &str,
    ) -> Result<Vec<StudentAnalytics>, FacadeError> {
        let activity_id = parse_activity_id(activity_id)?;

        self.publisher
            .notify(&DomainEvent::analytics_requested(activity_id.clone()))?;

        let records = self.repo.get_analytics(&activity_id)?;
        Ok(serialize::normalize_analytics(records))
    }

    /// Deploys `activity_id` and returns its launch URL.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for an empty id; otherwise repository or observer
    /// errors. No event is published when the repository fails.
    pub fn deploy_activity(&self, activity_id: &str) -> Result<String, FacadeError> {
        let activity_id = parse_activity_id(activity_id)?;

        let access_url = self.repo.deploy_activity(&activity_id)?;
        tracing::info!(activity_id = %activity_id, access_url = %access_url, "activity deployed");

        self.publisher
            .notify(&DomainEvent::activity_deployed(activity_id, access_url.clone()))?;
        Ok(access_url)
    }

    pub fn get_json_params(&self) -> Result<Vec<ActivityParam>, FacadeError> {
        Ok(self.repo.get_json_params()?)
    }

    pub fn get_config_page(&self) -> Result<String, FacadeError> {
        Ok(self.repo.get_config_page()?)
    }

    pub fn get_analytics_contract(&self) -> Result<AnalyticsContract, FacadeError> {
        let contract = self.repo.get_analytics_contract()?;
        Ok(serialize::normalize_contract(contract))
    }
}
