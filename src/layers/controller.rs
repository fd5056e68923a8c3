use std::sync::{Arc, Mutex};
use std::time::Duration;

use blake3::Hash;
use serde_json::Value;

use crate::audio::{AudioCue, AudioCueSink, NullAudioSink};
use crate::breadcrumb::{BreadcrumbTracker, fit, section_key};
use crate::config::{ModalReturn, NavigationConfig};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::NavigationMetrics;
use crate::registry::ContentRegistry;
use crate::runtime::EventFlow;
use crate::runtime::audit::{
    NullTransitionAudit, TransitionAudit, TransitionEventBuilder, TransitionStage,
};
use crate::runtime::focus::{FocusGuard, FocusHost, TabOutcome};
use crate::view::ViewBinding;
use crate::width::plain_text;

use super::scheduler::{DeferredAction, Scheduler};
use super::state::{Layer, NavigationState, Room};

const LOG_TARGET: &str = "layer_nav::controller";

/// Which close an Escape press (or dimmer click) performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    Modal,
    Rooms,
}

/// Owns the navigation state and drives every transition.
pub struct LayerController<V: ViewBinding> {
    view: V,
    registry: Arc<ContentRegistry>,
    config: NavigationConfig,
    state: NavigationState,
    focus: FocusGuard,
    breadcrumbs: BreadcrumbTracker,
    scheduler: Scheduler,
    applied_modal: Option<Hash>,
    audio: Arc<dyn AudioCueSink>,
    audit: Arc<dyn TransitionAudit>,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<NavigationMetrics>>>,
}

impl<V: ViewBinding> LayerController<V> {
    pub fn new(view: V, registry: Arc<ContentRegistry>, config: NavigationConfig) -> Self {
        Self {
            view,
            registry,
            config,
            state: NavigationState::new(),
            focus: FocusGuard::new(),
            breadcrumbs: BreadcrumbTracker::new(),
            scheduler: Scheduler::new(),
            applied_modal: None,
            audio: Arc::new(NullAudioSink),
            audit: Arc::new(NullTransitionAudit),
            logger: None,
            metrics: None,
        }
    }

    pub fn with_audio<S>(mut self, sink: S) -> Self
    where
        S: AudioCueSink + 'static,
    {
        self.audio = Arc::new(sink);
        self
    }

    pub fn with_audit<A>(mut self, audit: A) -> Self
    where
        A: TransitionAudit + 'static,
    {
        self.audit = Arc::new(audit);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Mutex<NavigationMetrics>>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn layer(&self) -> Layer {
        self.state.layer
    }

    pub fn active_room(&self) -> Option<&Room> {
        self.state.active_room.as_ref()
    }

    pub fn active_modal(&self) -> Option<&str> {
        self.state.active_modal.as_deref()
    }

    pub fn breadcrumb(&self) -> &str {
        &self.state.breadcrumb
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn has_pending_focus(&self) -> bool {
        self.focus.pending().is_some()
    }

    pub fn trap_installed(&self) -> bool {
        self.focus.active_trap().is_some()
    }

    pub fn pending_deferred(&self) -> usize {
        self.scheduler.pending()
    }

    /// Show a room overlay. Unknown rooms leave everything untouched.
    pub fn open_room(&mut self, room_id: &str, section_label: &str, component_label: &str) -> bool {
        if !self.view.has_room(room_id) {
            self.note_missing("room", room_id);
            return false;
        }

        self.focus.capture(&self.view);
        self.teardown();

        let room = Room {
            id: room_id.to_string(),
            section_label: plain_text(section_label),
            component_label: plain_text(component_label),
        };
        let key = section_key(&room.section_label);
        if !self.knows_section(&key) {
            self.log(
                LogLevel::Warn,
                "section_unknown",
                [json_str("room", room_id), json_str("section", key.as_str())],
            );
        }

        self.view.set_room_active(room_id, true);
        self.view.set_deep_indicator(&key, true);
        self.view.dim_sections_except(&key);

        self.state.layer = Layer::Room;
        self.state.active_modal = None;
        self.state.breadcrumb = self
            .breadcrumbs
            .room_path(&room.section_label, &room.component_label);
        self.state.active_room = Some(room);
        self.sync_breadcrumb();

        let generation = self.state.bump();
        self.scheduler.schedule(
            self.config.settle_delay(),
            generation,
            DeferredAction::RevealRoom {
                room_id: room_id.to_string(),
            },
        );

        self.cue(AudioCue::Open);
        self.record_metric(NavigationMetrics::record_room_opened);
        self.audit.record(
            TransitionEventBuilder::new(TransitionStage::RoomOpened, generation)
                .detail("room", room_id)
                .detail("section", key.as_str())
                .finish(),
        );
        self.log(
            LogLevel::Info,
            "room_opened",
            [
                json_str("room", room_id),
                json_str("breadcrumb", self.state.breadcrumb.as_str()),
                json_kv("generation", generation),
            ],
        );
        true
    }

    /// Drop back to the base page. Calling this at `Base` only repeats the
    /// view resets and restores any pending focus.
    pub fn close_all_rooms(&mut self) -> bool {
        let was_active = self.state.layer != Layer::Base;
        let closed_room = self.state.active_room.take().map(|room| room.id);

        self.teardown();
        self.state.reset_to_base();
        self.view.set_breadcrumb(None);
        let restored = self.focus.restore(&mut self.view);

        if !was_active {
            return false;
        }

        let generation = self.state.bump();
        self.cue(AudioCue::Close);
        self.record_metric(NavigationMetrics::record_close);
        let room_value = closed_room.map(Value::from).unwrap_or(Value::Null);
        self.audit.record(
            TransitionEventBuilder::new(TransitionStage::RoomsClosed, generation)
                .detail("room", room_value.clone())
                .detail("focus_restored", restored)
                .finish(),
        );
        self.log(
            LogLevel::Info,
            "rooms_closed",
            [
                json_kv("room", room_value),
                json_kv("focus_restored", restored),
                json_kv("generation", generation),
            ],
        );
        true
    }

    /// Show a modal on top of whatever is active. Unknown ids are ignored.
    pub fn open_modal(&mut self, modal_id: &str) -> bool {
        let registry = Arc::clone(&self.registry);
        let Some(entry) = registry.lookup_modal(modal_id) else {
            self.note_missing("modal", modal_id);
            return false;
        };

        self.focus.capture(&self.view);

        let digest = entry.digest();
        if self.applied_modal != Some(digest) {
            self.view.set_modal_content(&entry.title, &entry.body);
            self.applied_modal = Some(digest);
        }
        self.view.set_modal_active(true);
        self.view.set_dimmer_active(true);

        self.state.layer = Layer::Modal;
        self.state.active_modal = Some(entry.id.clone());
        self.state.breadcrumb = self
            .breadcrumbs
            .extend_with_modal(&self.state.breadcrumb, &entry.title);
        self.sync_breadcrumb();

        let mut trapped = 0usize;
        if self.config.focus_trap_enabled {
            if let Some(container) = self.view.modal_container() {
                trapped = self.focus.trap(container, &self.view).order().len();
            }
        }

        let generation = self.state.bump();
        self.scheduler.schedule(
            self.config.settle_delay(),
            generation,
            DeferredAction::FocusModalClose,
        );

        self.cue(AudioCue::Modal);
        self.record_metric(NavigationMetrics::record_modal_opened);
        self.audit.record(
            TransitionEventBuilder::new(TransitionStage::ModalOpened, generation)
                .detail("modal", modal_id)
                .detail("trapped", trapped)
                .finish(),
        );
        self.log(
            LogLevel::Info,
            "modal_opened",
            [
                json_str("modal", modal_id),
                json_str("breadcrumb", self.state.breadcrumb.as_str()),
                json_kv("trapped", trapped),
                json_kv("generation", generation),
            ],
        );
        true
    }

    /// Close the modal. With the default [`ModalReturn::Room`] the layer goes
    /// to `Room` even if no room was open underneath.
    pub fn close_modal(&mut self) -> bool {
        let Some(modal_id) = self.state.active_modal.take() else {
            return false;
        };

        self.view.set_modal_active(false);
        self.view.set_dimmer_active(false);
        self.focus.release_trap();

        self.state.layer = match (self.config.modal_return, self.state.active_room.is_some()) {
            (ModalReturn::Derived, false) => Layer::Base,
            _ => Layer::Room,
        };
        if let Some(room) = self.state.active_room.as_ref() {
            self.state.breadcrumb = self
                .breadcrumbs
                .room_path(&room.section_label, &room.component_label);
        } else if self.state.layer == Layer::Base {
            self.state.breadcrumb.clear();
        }
        self.sync_breadcrumb();
        let restored = self.focus.restore(&mut self.view);

        let generation = self.state.bump();
        self.cue(AudioCue::Close);
        self.record_metric(NavigationMetrics::record_close);
        self.audit.record(
            TransitionEventBuilder::new(TransitionStage::ModalClosed, generation)
                .detail("modal", modal_id.as_str())
                .detail("layer", self.state.layer.depth())
                .finish(),
        );
        if self.state.layer == Layer::Room && self.state.active_room.is_none() {
            self.log(
                LogLevel::Debug,
                "modal_closed_without_room",
                [json_str("modal", modal_id.as_str())],
            );
        }
        self.log(
            LogLevel::Info,
            "modal_closed",
            [
                json_str("modal", modal_id),
                json_kv("focus_restored", restored),
                json_kv("generation", generation),
            ],
        );
        true
    }

    /// Escape key and dimmer clicks: close the innermost layer.
    pub fn escape(&mut self) -> Option<Dismissal> {
        match self.state.layer {
            Layer::Modal => {
                self.close_modal();
                Some(Dismissal::Modal)
            }
            Layer::Room => {
                self.close_all_rooms();
                Some(Dismissal::Rooms)
            }
            Layer::Base => None,
        }
    }

    pub fn handle_tab(&mut self, backwards: bool) -> EventFlow {
        let outcome = self.focus.handle_tab(backwards, &mut self.view);
        if let TabOutcome::Wrapped(_) = outcome {
            self.record_metric(NavigationMetrics::record_trap_wrap);
        }
        outcome.flow()
    }

    /// Advance the deferred clock and run whatever came due. Returns how many
    /// tasks were applied; superseded ones are discarded.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let mut applied = 0usize;
        let mut stale = 0usize;

        for task in self.scheduler.advance(elapsed) {
            if task.generation != self.state.generation {
                stale += 1;
                self.audit.record(
                    TransitionEventBuilder::new(TransitionStage::DeferredDiscarded, task.generation)
                        .detail("current", self.state.generation)
                        .finish(),
                );
                continue;
            }
            self.apply_deferred(&task.action);
            applied += 1;
            self.audit.record(
                TransitionEventBuilder::new(TransitionStage::DeferredApplied, task.generation)
                    .finish(),
            );
        }

        if stale > 0 {
            self.record_metric(|m| m.record_stale_deferred(stale));
            self.log(
                LogLevel::Debug,
                "deferred_discarded",
                [json_kv("count", stale)],
            );
        }
        applied
    }

    fn apply_deferred(&mut self, action: &DeferredAction) {
        match action {
            DeferredAction::RevealRoom { room_id } => {
                self.view.scroll_into_view(room_id);
                if let Some(close) = self.view.room_close_control(room_id) {
                    self.view.focus(close);
                }
            }
            DeferredAction::FocusModalClose => {
                if let Some(close) = self.view.modal_close_control() {
                    self.view.focus(close);
                }
            }
        }
    }

    /// Reset every overlay without touching focus or emitting cues.
    fn teardown(&mut self) {
        if self.state.layer == Layer::Modal {
            self.view.set_modal_active(false);
            self.view.set_dimmer_active(false);
        }
        self.focus.release_trap();
        self.view.deactivate_all_rooms();
        self.view.clear_deep_indicators();
        self.view.clear_dimming();
    }

    fn sync_breadcrumb(&mut self) {
        if self.state.active_room.is_none() {
            self.view.set_breadcrumb(None);
            return;
        }
        match self.config.breadcrumb_max_width {
            Some(width) => {
                let shown = fit(&self.state.breadcrumb, width);
                self.view.set_breadcrumb(Some(&shown));
            }
            None => self.view.set_breadcrumb(Some(&self.state.breadcrumb)),
        }
    }

    /// An empty section list accepts any key.
    fn knows_section(&self, key: &str) -> bool {
        self.config.sections.is_empty() || self.config.sections.iter().any(|s| s == key)
    }

    fn note_missing(&mut self, kind: &str, id: &str) {
        self.record_metric(NavigationMetrics::record_missing_target);
        self.audit.record(
            TransitionEventBuilder::new(TransitionStage::TargetMissing, self.state.generation)
                .detail("kind", kind)
                .detail("id", id)
                .finish(),
        );
        self.log(
            LogLevel::Debug,
            "target_missing",
            [json_str("kind", kind), json_str("id", id)],
        );
    }

    fn cue(&self, cue: AudioCue) {
        if self.config.audio_enabled {
            self.audio.cue(cue);
        }
    }

    fn record_metric(&self, record: impl FnOnce(&mut NavigationMetrics)) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log_event(event_with_fields(level, LOG_TARGET, message, fields));
        }
    }
}
