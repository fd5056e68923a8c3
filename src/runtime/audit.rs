//! Transition audit hooks.
//!
//! Every completed (or refused) navigation transition produces one record so
//! callers can co-trigger effects, such as particle bursts, at the same points
//! without the controller knowing about them.

use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use serde_json::Value;

/// Points in the navigation lifecycle that produce an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStage {
    RoomOpened,
    RoomsClosed,
    ModalOpened,
    ModalClosed,
    /// A room or modal id did not resolve; nothing changed.
    TargetMissing,
    /// Deferred scroll/focus work ran.
    DeferredApplied,
    /// Deferred work was dropped because a newer transition superseded it.
    DeferredDiscarded,
}

#[derive(Debug, Clone)]
pub struct TransitionEvent {
    pub timestamp: SystemTime,
    pub stage: TransitionStage,
    pub generation: u64,
    pub details: Vec<(String, Value)>,
}

pub struct TransitionEventBuilder {
    event: TransitionEvent,
}

impl TransitionEventBuilder {
    pub fn new(stage: TransitionStage, generation: u64) -> Self {
        Self {
            event: TransitionEvent {
                timestamp: SystemTime::now(),
                stage,
                generation,
                details: Vec::new(),
            },
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.details.push((key.into(), value.into()));
        self
    }

    pub fn finish(self) -> TransitionEvent {
        self.event
    }
}

pub trait TransitionAudit: Send + Sync {
    fn record(&self, event: TransitionEvent);
}

#[derive(Debug, Default)]
pub struct NullTransitionAudit;

impl TransitionAudit for NullTransitionAudit {
    fn record(&self, _event: TransitionEvent) {}
}

/// Buffers records in memory; clones share the buffer.
#[derive(Debug, Default, Clone)]
pub struct BufferedTransitionAudit {
    events: Arc<Mutex<Vec<TransitionEvent>>>,
}

impl BufferedTransitionAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransitionEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<TransitionStage> {
        self.events().into_iter().map(|event| event.stage).collect()
    }
}

impl TransitionAudit for BufferedTransitionAudit {
    fn record(&self, event: TransitionEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_details() {
        let event = TransitionEventBuilder::new(TransitionStage::RoomOpened, 4)
            .detail("room", "lab-room")
            .detail("layer", 2)
            .finish();
        assert_eq!(event.generation, 4);
        assert_eq!(event.details[0], ("room".to_string(), json!("lab-room")));
        assert_eq!(event.details[1].1, json!(2));
    }

    #[test]
    fn buffered_audit_keeps_order() {
        let audit = BufferedTransitionAudit::new();
        audit.record(TransitionEventBuilder::new(TransitionStage::ModalOpened, 1).finish());
        audit.record(TransitionEventBuilder::new(TransitionStage::ModalClosed, 2).finish());
        assert_eq!(
            audit.stages(),
            vec![TransitionStage::ModalOpened, TransitionStage::ModalClosed]
        );
    }
}
