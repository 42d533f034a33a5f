//! Domain-event notification core for the ProPlan activity provider.
//!
//! An operation that changes or reads an activity instance raises a
//! [`DomainEvent`]; the [`EventPublisher`] hands it, synchronously and in
//! attachment order, to every registered [`Observer`]. Each observer keeps
//! its own derived in-memory projection of the event stream.
//!
//! # Event kinds
//!
//! | Kind | Payload | Raised by |
//! |------|---------|-----------|
//! | `ActivityDeployed` | `access_url` | a successful deploy |
//! | `AnalyticsRequested` | none | every accepted analytics read |
//!
//! # Built-in observers
//!
//! | Observer | Projection |
//! |----------|------------|
//! | [`DeployRegistry`] | activity → latest deployment (last write wins) |
//! | [`AnalyticsRequestCounter`] | activity → number of analytics requests |
//! | [`DecisionLog`] | activity → append-only textual trail |
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use proplan_events::{DeployRegistry, DomainEvent, EventPublisher};
//!
//! let registry = Arc::new(DeployRegistry::new());
//! let mut publisher = EventPublisher::new();
//! publisher.attach(registry.clone());
//!
//! publisher.notify(&DomainEvent::activity_deployed(id, "https://x/A1"))?;
//! ```
//!
//! State is process-local and is lost when the process exits.

mod error;
mod event;
mod observers;
mod publisher;

pub use error::ObserverError;
pub use event::{DomainEvent, EventKind, EventPayload};
pub use observers::{AnalyticsRequestCounter, DecisionLog, DeployRecord, DeployRegistry};
pub use publisher::{EventPublisher, Observer};
