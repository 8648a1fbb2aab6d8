//! Event publishing port — state-changed notifications to the host.

use cmdlight_domain::event::Event;

/// Delivers state pushes to whoever hosts the lights.
///
/// Delivery is best-effort and must not block: the reconciler publishes
/// while holding a light's state lock.
pub trait EventPublisher: Send + Sync {
    /// Publish an event.
    fn publish(&self, event: Event);
}
