//! Domain event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Trait for receiving domain events.
///
/// The engine emits events through this trait after a mutation has landed;
/// the host decides what they become (a push notification on a milestone, a
/// progress-screen refresh, an audit record).
///
/// `emit()` must be fast and non-blocking: no network calls, no store
/// writes. Delivery is best-effort and a sink failure never affects the
/// domain operation that produced the event.
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    fn emit(&self, event: DomainEvent);

    /// Emit multiple domain events. The default forwards to `emit()` one by
    /// one; implementations with a cheaper batch path may override.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards every event; for hosts that don't consume them and for tests.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Test sink that collects emitted events for assertions.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestones::Milestone;

    #[test]
    fn test_noop_sink_does_not_panic() {
        let sink = NoOpDomainEventSink;
        sink.emit(DomainEvent::goal_completed("goal-1"));
        sink.emit_batch(vec![
            DomainEvent::milestone_reached("goal-1", Milestone::Quarter),
            DomainEvent::milestone_reached("goal-1", Milestone::Half),
        ]);
    }

    #[test]
    fn test_mock_sink_collects_events() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DomainEvent::goal_completed("goal-1"));
        assert_eq!(sink.len(), 1);

        sink.emit_batch(vec![
            DomainEvent::milestone_reached("goal-2", Milestone::Quarter),
            DomainEvent::rule_fired("rule-1", "goal-2", 50.0),
        ]);
        assert_eq!(sink.len(), 3);

        sink.clear();
        assert!(sink.is_empty());
    }
}
