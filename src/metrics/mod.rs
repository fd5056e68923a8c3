use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Running counters for one navigation session.
#[derive(Debug, Default, Clone)]
pub struct NavigationMetrics {
    events: u64,
    rooms_opened: u64,
    modals_opened: u64,
    closes: u64,
    missing_targets: u64,
    stale_deferred: u64,
    trap_wraps: u64,
}

impl NavigationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_room_opened(&mut self) {
        self.rooms_opened = self.rooms_opened.saturating_add(1);
    }

    pub fn record_modal_opened(&mut self) {
        self.modals_opened = self.modals_opened.saturating_add(1);
    }

    pub fn record_close(&mut self) {
        self.closes = self.closes.saturating_add(1);
    }

    pub fn record_missing_target(&mut self) {
        self.missing_targets = self.missing_targets.saturating_add(1);
    }

    pub fn record_stale_deferred(&mut self, count: usize) {
        if count > 0 {
            self.stale_deferred = self.stale_deferred.saturating_add(count as u64);
        }
    }

    pub fn record_trap_wrap(&mut self) {
        self.trap_wraps = self.trap_wraps.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            events: self.events,
            rooms_opened: self.rooms_opened,
            modals_opened: self.modals_opened,
            closes: self.closes,
            missing_targets: self.missing_targets,
            stale_deferred: self.stale_deferred,
            trap_wraps: self.trap_wraps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub events: u64,
    pub rooms_opened: u64,
    pub modals_opened: u64,
    pub closes: u64,
    pub missing_targets: u64,
    pub stale_deferred: u64,
    pub trap_wraps: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "navigation_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("events".to_string(), json!(self.events));
        map.insert("rooms_opened".to_string(), json!(self.rooms_opened));
        map.insert("modals_opened".to_string(), json!(self.modals_opened));
        map.insert("closes".to_string(), json!(self.closes));
        map.insert("missing_targets".to_string(), json!(self.missing_targets));
        map.insert("stale_deferred".to_string(), json!(self.stale_deferred));
        map.insert("trap_wraps".to_string(), json!(self.trap_wraps));
        map
    }
}
