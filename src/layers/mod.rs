//! Three-layer navigation: base page, room overlay, modal overlay.
//!
//! [`LayerController`] owns the [`NavigationState`] and is the only thing that
//! mutates it. Deferred scroll/focus work is tagged with the state generation
//! at scheduling time and dropped if a newer transition happened first.

mod controller;
mod scheduler;
mod state;

pub use controller::{Dismissal, LayerController};
pub use scheduler::{DeferredAction, DeferredTask, Scheduler};
pub use state::{Layer, NavigationState, Room};
