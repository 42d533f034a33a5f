//! Error types for the event core.

/// Errors raised by an [`Observer`](crate::Observer) while handling an event.
///
/// The publisher returns the first such error unmodified and stops the
/// delivery round at that observer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The observer's state lock was poisoned by a panic in another thread.
    #[error("observer {observer} state lock poisoned")]
    StatePoisoned {
        /// Name of the observer whose state is unavailable.
        observer: &'static str,
    },

    /// The observer refused to apply the event.
    #[error("observer {observer} rejected event: {reason}")]
    Rejected {
        /// Name of the rejecting observer.
        observer: String,
        /// Human-readable reason.
        reason: String,
    },
}
