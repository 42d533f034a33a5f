//! Built-in observers and their projections.
//!
//! The three observers are independent: none reads another's state, so the
//! order in which they are attached never changes what any one of them ends
//! up holding.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use proplan_types::ActivityId;
use serde::Serialize;

use crate::error::ObserverError;
use crate::event::{DomainEvent, EventPayload};
use crate::publisher::Observer;

fn read<'a, T>(
    lock: &'a RwLock<T>,
    observer: &'static str,
) -> Result<RwLockReadGuard<'a, T>, ObserverError> {
    lock.read()
        .map_err(|_| ObserverError::StatePoisoned { observer })
}

fn write<'a, T>(
    lock: &'a RwLock<T>,
    observer: &'static str,
) -> Result<RwLockWriteGuard<'a, T>, ObserverError> {
    lock.write()
        .map_err(|_| ObserverError::StatePoisoned { observer })
}

// ── Deploy registry ──────────────────────────────────────────────────

/// The latest known deployment of an activity instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployRecord {
    /// Launch URL returned by the deploy.
    pub access_url: String,
    /// When the deploy event was raised.
    pub occurred_at: DateTime<Utc>,
}

/// Records where each activity instance was deployed. Last write wins.
#[derive(Debug, Default)]
pub struct DeployRegistry {
    deployments: RwLock<HashMap<ActivityId, DeployRecord>>,
}

impl DeployRegistry {
    const NAME: &'static str = "deploy_registry";

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the latest deployment of `activity_id`, if any.
    pub fn get(&self, activity_id: &ActivityId) -> Result<Option<DeployRecord>, ObserverError> {
        Ok(read(&self.deployments, Self::NAME)?.get(activity_id).cloned())
    }

    /// Returns a snapshot of all deployments.
    pub fn deployments(&self) -> Result<HashMap<ActivityId, DeployRecord>, ObserverError> {
        Ok(read(&self.deployments, Self::NAME)?.clone())
    }
}

impl Observer for DeployRegistry {
    fn update(&self, event: &DomainEvent) -> Result<(), ObserverError> {
        let EventPayload::ActivityDeployed { access_url } = event.payload() else {
            return Ok(());
        };

        write(&self.deployments, Self::NAME)?.insert(
            event.activity_id().clone(),
            DeployRecord {
                access_url: access_url.clone(),
                occurred_at: event.occurred_at(),
            },
        );
        Ok(())
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

// ── Analytics request counter ────────────────────────────────────────

/// Counts analytics requests per activity instance.
#[derive(Debug, Default)]
pub struct AnalyticsRequestCounter {
    counters: RwLock<HashMap<ActivityId, u64>>,
}

impl AnalyticsRequestCounter {
    const NAME: &'static str = "analytics_request_counter";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of analytics requests seen for `activity_id` (0 if none).
    pub fn count(&self, activity_id: &ActivityId) -> Result<u64, ObserverError> {
        Ok(read(&self.counters, Self::NAME)?
            .get(activity_id)
            .copied()
            .unwrap_or(0))
    }

    /// Returns a snapshot of all counters.
    pub fn counters(&self) -> Result<HashMap<ActivityId, u64>, ObserverError> {
        Ok(read(&self.counters, Self::NAME)?.clone())
    }
}

impl Observer for AnalyticsRequestCounter {
    fn update(&self, event: &DomainEvent) -> Result<(), ObserverError> {
        let EventPayload::AnalyticsRequested {} = event.payload() else {
            return Ok(());
        };

        *write(&self.counters, Self::NAME)?
            .entry(event.activity_id().clone())
            .or_insert(0) += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

// ── Decision log ─────────────────────────────────────────────────────

/// Append-only textual trail of what happened to each activity instance.
///
/// Entries back the `decision_log_url` qualitative analytics.
#[derive(Debug, Default)]
pub struct DecisionLog {
    logs: RwLock<HashMap<ActivityId, Vec<String>>>,
}

impl DecisionLog {
    const NAME: &'static str = "decision_log";

    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for `activity_id` in delivery order (empty if none).
    pub fn entries(&self, activity_id: &ActivityId) -> Result<Vec<String>, ObserverError> {
        Ok(read(&self.logs, Self::NAME)?
            .get(activity_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Returns a snapshot of all logs.
    pub fn logs(&self) -> Result<HashMap<ActivityId, Vec<String>>, ObserverError> {
        Ok(read(&self.logs, Self::NAME)?.clone())
    }

    fn describe(payload: &EventPayload) -> String {
        match payload {
            EventPayload::ActivityDeployed { access_url } => {
                format!("[DEPLOY] access_url={access_url}")
            }
            EventPayload::AnalyticsRequested {} => "[ANALYTICS] pedido recebido".to_string(),
        }
    }
}

impl Observer for DecisionLog {
    fn update(&self, event: &DomainEvent) -> Result<(), ObserverError> {
        let entry = Self::describe(event.payload());
        write(&self.logs, Self::NAME)?
            .entry(event.activity_id().clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
