//! Observer registration and in-order event delivery.

use std::sync::Arc;

use crate::error::ObserverError;
use crate::event::DomainEvent;

/// A component that derives its own state from domain events.
///
/// Implementations keep their state behind interior locks and ignore event
/// kinds they do not care about.
pub trait Observer: Send + Sync {
    /// Applies `event` to the observer's state.
    ///
    /// # Errors
    ///
    /// Returns an [`ObserverError`] if the event cannot be applied. State
    /// changes already made by other observers are not rolled back.
    fn update(&self, event: &DomainEvent) -> Result<(), ObserverError>;

    /// Name used in log fields.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Ordered registry of observers, keyed by instance identity.
///
/// Two handles are the same observer only if they point at the same
/// allocation; structurally equal observers are distinct entries.
#[derive(Default)]
pub struct EventPublisher {
    observers: Vec<Arc<dyn Observer>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `observer` at the end of the delivery order.
    ///
    /// Returns `false` and changes nothing if this instance is already
    /// attached.
    pub fn attach(&mut self, observer: Arc<dyn Observer>) -> bool {
        if self.is_attached(&observer) {
            return false;
        }
        tracing::debug!(observer = observer.name(), "observer attached");
        self.observers.push(observer);
        true
    }

    /// Removes `observer` if it is attached. Returns whether it was.
    pub fn detach<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> bool {
        let before = self.observers.len();
        self.observers
            .retain(|existing| !std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(observer)));
        let removed = self.observers.len() != before;
        if removed {
            tracing::debug!(observer = observer.name(), "observer detached");
        }
        removed
    }

    /// Returns `true` if this exact instance is attached.
    pub fn is_attached<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> bool {
        self.observers
            .iter()
            .any(|existing| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(observer)))
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers `event` to every attached observer, in attachment order.
    ///
    /// Delivery is synchronous. The recipient list is fixed when the call
    /// starts. The first observer error ends the round: it is returned to
    /// the caller unchanged and later observers do not see the event.
    ///
    /// # Errors
    ///
    /// Returns the [`ObserverError`] of the first failing observer.
    pub fn notify(&self, event: &DomainEvent) -> Result<(), ObserverError> {
        let recipients = self.observers.clone();

        for observer in &recipients {
            tracing::debug!(
                observer = observer.name(),
                event = %event.name(),
                activity_id = %event.activity_id(),
                "delivering event"
            );
            if let Err(e) = observer.update(event) {
                tracing::warn!(
                    observer = observer.name(),
                    event = %event.name(),
                    activity_id = %event.activity_id(),
                    "observer failed, remaining observers skipped: {}",
                    e
                );
                return Err(e);
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|o| o.name()))
            .finish()
    }
}
