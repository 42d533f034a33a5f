//! Event kind, payload, and record types.

use chrono::{DateTime, Utc};
use proplan_types::ActivityId;
use serde::{Deserialize, Serialize};

/// Kinds of domain events raised by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An activity instance was deployed and has an access URL.
    ActivityDeployed,
    /// Analytics were requested for an activity instance.
    AnalyticsRequested,
}

impl EventKind {
    /// Returns the canonical string label for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActivityDeployed => "ActivityDeployed",
            Self::AnalyticsRequested => "AnalyticsRequested",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payloads, one variant per [`EventKind`].
///
/// Each variant carries exactly the fields its kind needs. New kinds get a
/// new variant rather than sharing an existing shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum EventPayload {
    /// A deploy completed.
    ActivityDeployed {
        /// The launch URL handed back to Inven!RA.
        access_url: String,
    },

    /// An analytics read was accepted.
    AnalyticsRequested {},
}

impl EventPayload {
    /// Returns the kind this payload belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ActivityDeployed { .. } => EventKind::ActivityDeployed,
            Self::AnalyticsRequested {} => EventKind::AnalyticsRequested,
        }
    }
}

/// An immutable record of something that happened to an activity instance.
///
/// Fields are private; once built, an event can only be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    activity_id: ActivityId,
    payload: EventPayload,
    occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    /// Creates an event stamped with the current UTC time.
    pub fn new(activity_id: ActivityId, payload: EventPayload) -> Self {
        Self::at(activity_id, payload, Utc::now())
    }

    /// Creates an event with an explicit timestamp.
    pub fn at(activity_id: ActivityId, payload: EventPayload, occurred_at: DateTime<Utc>) -> Self {
        Self {
            activity_id,
            payload,
            occurred_at,
        }
    }

    /// Shorthand for an [`EventKind::ActivityDeployed`] event.
    pub fn activity_deployed(activity_id: ActivityId, access_url: impl Into<String>) -> Self {
        Self::new(
            activity_id,
            EventPayload::ActivityDeployed {
                access_url: access_url.into(),
            },
        )
    }

    /// Shorthand for an [`EventKind::AnalyticsRequested`] event.
    pub fn analytics_requested(activity_id: ActivityId) -> Self {
        Self::new(activity_id, EventPayload::AnalyticsRequested {})
    }

    pub fn name(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn activity_id(&self) -> &ActivityId {
        &self.activity_id
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
