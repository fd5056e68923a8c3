//! View binding seam.
//!
//! The navigation core never inspects markup. Everything it needs from the
//! page goes through [`ViewBinding`], addressed by room ids, section keys and
//! opaque [`ElementHandle`]s.

mod memory;

pub use memory::MemoryView;

use crate::runtime::focus::FocusHost;

/// Opaque reference to an interactive element owned by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(u64);

impl ElementHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

pub trait ViewBinding: FocusHost + Send {
    fn has_room(&self, room_id: &str) -> bool;
    fn set_room_active(&mut self, room_id: &str, active: bool);
    fn deactivate_all_rooms(&mut self);

    fn set_deep_indicator(&mut self, section_key: &str, active: bool);
    fn clear_deep_indicators(&mut self);
    fn dim_sections_except(&mut self, section_key: &str);
    fn clear_dimming(&mut self);

    /// Show `path` in the breadcrumb bar, or hide the bar with `None`.
    fn set_breadcrumb(&mut self, path: Option<&str>);

    fn set_modal_content(&mut self, title: &str, body: &str);
    fn set_modal_active(&mut self, active: bool);
    fn set_dimmer_active(&mut self, active: bool);

    fn scroll_into_view(&mut self, room_id: &str);
    fn room_close_control(&self, room_id: &str) -> Option<ElementHandle>;
    fn modal_close_control(&self) -> Option<ElementHandle>;
    fn modal_container(&self) -> Option<ElementHandle>;
}
