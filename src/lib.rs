//! Layered overlay navigation for a single-page content session.
//!
//! The page has three stacked layers: the base page, a room overlay and a
//! modal dialog. [`LayerController`] owns the only copy of the navigation
//! state and runs every transition; [`NavigationRuntime`] feeds it input
//! events and virtual time. Views plug in through [`ViewBinding`].

pub mod audio;
pub mod breadcrumb;
pub mod config;
pub mod error;
pub mod layers;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod runtime;
pub mod view;
pub mod width;

pub use audio::{AudioCue, AudioCueSink, NullAudioSink, RecordingAudioSink};
pub use breadcrumb::{BreadcrumbTracker, DELIMITER, SEPARATOR};
pub use config::{ModalReturn, NavigationConfig};
pub use error::{NavError, Result};
pub use layers::{
    DeferredAction, DeferredTask, Dismissal, Layer, LayerController, NavigationState, Room,
    Scheduler,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, NavigationMetrics};
pub use registry::{ContentRegistry, ModalEntry, ModalId, RoomEntry, RoomId};
pub use runtime::audit::{
    BufferedTransitionAudit, NullTransitionAudit, TransitionAudit, TransitionEvent,
    TransitionEventBuilder, TransitionStage,
};
pub use runtime::focus::{FocusGuard, FocusHost, FocusTrap, TabOutcome};
pub use runtime::router::{NavEvent, Trigger, normalize_room_id, route};
pub use runtime::{EventFlow, NavigationRuntime};
pub use view::{ElementHandle, MemoryView, ViewBinding};
pub use width::{display_width, plain_text};
