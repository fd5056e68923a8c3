use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use crate::config::NavigationConfig;
use crate::error::Result;
use crate::layers::LayerController;
use crate::logging::{FileSink, LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::NavigationMetrics;
use crate::registry::ContentRegistry;
use crate::view::ViewBinding;

pub mod audit;
pub mod focus;
pub mod router;

use router::{NavEvent, route};

const LOG_TARGET: &str = "layer_nav::runtime";
const METRICS_TARGET: &str = "layer_nav::runtime.metrics";

/// Control the propagation of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    /// The default action (focus traversal, activation) must not run.
    Consumed,
}

/// One page session: the controller plus the logging and metrics around it.
///
/// Time only moves through [`NavEvent::Tick`], so scripted sessions are
/// deterministic.
pub struct NavigationRuntime<V: ViewBinding> {
    controller: LayerController<V>,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<NavigationMetrics>>>,
    metrics_interval: Duration,
    uptime: Duration,
    last_metrics_emit: Duration,
}

impl<V: ViewBinding> NavigationRuntime<V> {
    pub fn new(controller: LayerController<V>) -> Self {
        let metrics_interval = controller.config().metrics_interval();
        Self {
            controller,
            logger: None,
            metrics: None,
            metrics_interval,
            uptime: Duration::ZERO,
            last_metrics_emit: Duration::ZERO,
        }
    }

    pub fn from_parts(view: V, registry: Arc<ContentRegistry>, config: NavigationConfig) -> Self {
        Self::new(LayerController::new(view, registry, config))
    }

    /// Attach a logger to the runtime and its controller. The configured
    /// `log_level` becomes the logger's minimum level.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        let logger = logger.with_min_level(self.controller.config().log_level);
        self.controller = self.controller.with_logger(logger.clone());
        self.logger = Some(logger);
        self
    }

    /// Log JSON lines to `path`, truncating once the file passes `max_bytes`.
    pub fn with_log_file(self, path: impl AsRef<Path>, max_bytes: u64) -> Result<Self> {
        let sink = FileSink::new(path, max_bytes)?;
        Ok(self.with_logger(Logger::new(sink)))
    }

    pub fn with_metrics(mut self, metrics: Arc<Mutex<NavigationMetrics>>) -> Self {
        self.controller = self.controller.with_metrics(Arc::clone(&metrics));
        self.metrics = Some(metrics);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(self) -> Self {
        if self.metrics.is_some() {
            return self;
        }
        self.with_metrics(Arc::new(Mutex::new(NavigationMetrics::new())))
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<NavigationMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub fn controller(&self) -> &LayerController<V> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LayerController<V> {
        &mut self.controller
    }

    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    pub fn dispatch(&mut self, event: NavEvent) -> EventFlow {
        if let NavEvent::Tick { elapsed } = &event {
            self.uptime += *elapsed;
        }
        let flow = route(&mut self.controller, &event);

        self.record_event_metric();
        self.log_runtime_event(
            LogLevel::Debug,
            "event_dispatched",
            [
                json_kv("event", json!(event.describe())),
                json_kv("consumed", json!(flow == EventFlow::Consumed)),
                json_kv("layer", json!(self.controller.layer())),
            ],
        );
        self.maybe_emit_metrics();
        flow
    }

    /// Replay `events` in order and return how many were consumed.
    pub fn run_scripted<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = NavEvent>,
    {
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("rooms", json!(self.controller.registry().room_ids().count())),
                json_kv("modals", json!(self.controller.registry().modal_ids().count())),
            ],
        );

        let mut consumed = 0usize;
        for event in events {
            if self.dispatch(event) == EventFlow::Consumed {
                consumed += 1;
            }
        }

        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [
                json_kv("uptime_ms", json!(self.uptime.as_millis() as u64)),
                json_kv("consumed", json!(consumed)),
            ],
        );
        consumed
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record_event_metric(&mut self) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_event();
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.metrics.is_none() || self.metrics_interval == Duration::ZERO {
            return;
        }
        if self.uptime.saturating_sub(self.last_metrics_emit) < self.metrics_interval {
            return;
        }
        self.last_metrics_emit = self.uptime;

        if let (Some(logger), Some(metrics)) = (self.logger.as_ref(), self.metrics.as_ref()) {
            if let Ok(guard) = metrics.lock() {
                let snapshot_event = guard.snapshot(self.uptime).to_log_event(METRICS_TARGET);
                let _ = logger.log_event(snapshot_event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    use crate::layers::Layer;
    use crate::logging::MemorySink;
    use crate::runtime::router::Trigger;
    use crate::view::MemoryView;

    fn runtime(config: NavigationConfig) -> NavigationRuntime<MemoryView> {
        let mut view = MemoryView::with_sections(config.sections.iter().cloned());
        view.add_room("ai-core-room");
        view.add_room("processor-room");
        let registry = Arc::new(ContentRegistry::bundled().unwrap());
        NavigationRuntime::from_parts(view, registry, config)
    }

    fn tick(ms: u64) -> NavEvent {
        NavEvent::Tick {
            elapsed: Duration::from_millis(ms),
        }
    }

    #[test]
    fn scripted_session_walks_all_layers() {
        let mut rt = runtime(NavigationConfig::default());
        let consumed = rt.run_scripted([
            NavEvent::Click(Trigger::room("ai-core")),
            tick(100),
            NavEvent::Click(Trigger::modal("decision-tree")),
            tick(100),
            NavEvent::key(KeyCode::Esc),
            NavEvent::key(KeyCode::Esc),
            NavEvent::key(KeyCode::Esc),
        ]);

        assert_eq!(consumed, 4);
        assert_eq!(rt.controller().layer(), Layer::Base);
        assert_eq!(rt.uptime(), Duration::from_millis(200));
        assert_eq!(rt.controller().view().scrolled(), ["ai-core-room".to_string()]);
    }

    #[test]
    fn dispatch_logs_at_configured_level() {
        let config = NavigationConfig {
            log_level: LogLevel::Debug,
            ..NavigationConfig::default()
        };
        let sink = MemorySink::default();
        let mut rt = runtime(config).with_logger(Logger::new(sink.clone()));
        rt.dispatch(NavEvent::Click(Trigger::room("ai-core")));

        let dispatched = sink
            .entries()
            .into_iter()
            .find(|event| event.message == "event_dispatched")
            .unwrap();
        assert_eq!(dispatched.target, LOG_TARGET);
        assert_eq!(dispatched.fields.get("event"), Some(&json!("click")));
        assert_eq!(dispatched.fields.get("layer"), Some(&json!("room")));
        assert!(sink.messages().contains(&"room_opened".to_string()));
    }

    #[test]
    fn info_level_hides_dispatch_noise() {
        let sink = MemorySink::default();
        let mut rt = runtime(NavigationConfig::default()).with_logger(Logger::new(sink.clone()));
        rt.dispatch(NavEvent::key(KeyCode::Esc));
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn metrics_snapshot_follows_tick_time() {
        let config = NavigationConfig {
            metrics_interval_ms: 1_000,
            ..NavigationConfig::default()
        };
        let sink = MemorySink::default();
        let mut rt = runtime(config)
            .with_logger(Logger::new(sink.clone()))
            .enable_metrics();

        rt.dispatch(NavEvent::Click(Trigger::room("ai-core")));
        rt.dispatch(tick(600));
        assert!(sink.entries_at(LogLevel::Info).iter().all(|e| e.target != METRICS_TARGET));

        rt.dispatch(tick(600));
        let snapshots: Vec<_> = sink
            .entries()
            .into_iter()
            .filter(|e| e.target == METRICS_TARGET)
            .collect();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].fields.get("events"), Some(&json!(3)));
        assert_eq!(snapshots[0].fields.get("rooms_opened"), Some(&json!(1)));
        assert_eq!(snapshots[0].fields.get("uptime_ms"), Some(&json!(1200)));
    }

    #[test]
    fn log_file_receives_session_events() {
        let path = std::env::temp_dir().join(format!(
            "layer_nav_session_{}.log",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let mut rt = runtime(NavigationConfig::default())
            .with_log_file(&path, 0)
            .unwrap();
        rt.run_scripted([NavEvent::Click(Trigger::room("ai-core"))]);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"message\":\"runtime_started\""));
        assert!(contents.contains("\"message\":\"room_opened\""));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unopenable_log_file_is_a_logging_error() {
        let dir = std::env::temp_dir();
        let err = runtime(NavigationConfig::default())
            .with_log_file(&dir, 0)
            .err()
            .unwrap();
        assert!(matches!(err, crate::error::NavError::Logging(_)));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = NavigationConfig {
            metrics_interval_ms: 0,
            ..NavigationConfig::default()
        };
        let sink = MemorySink::default();
        let mut rt = runtime(config)
            .with_logger(Logger::new(sink.clone()))
            .enable_metrics();
        rt.dispatch(tick(10_000));
        assert!(sink.entries().iter().all(|e| e.target != METRICS_TARGET));

        let handle = rt.metrics_handle().unwrap();
        assert_eq!(handle.lock().unwrap().snapshot(Duration::ZERO).events, 1);
    }
}
