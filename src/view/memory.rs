use std::collections::{BTreeMap, HashMap, HashSet};

use crate::registry::RoomId;
use crate::runtime::focus::FocusHost;

use super::{ElementHandle, ViewBinding};

#[derive(Debug, Clone)]
struct RoomNode {
    container: ElementHandle,
    close: ElementHandle,
    active: bool,
}

#[derive(Debug, Clone, Default)]
struct SectionNode {
    dimmed: bool,
    indicator: bool,
}

#[derive(Debug, Clone)]
struct ModalNode {
    container: ElementHandle,
    close: ElementHandle,
    title: String,
    body: String,
    active: bool,
}

/// In-memory page model implementing [`ViewBinding`].
///
/// Elements are plain handles; a container's focusable descendants are kept
/// in insertion order. Detached elements refuse focus.
#[derive(Debug)]
pub struct MemoryView {
    next_handle: u64,
    rooms: BTreeMap<RoomId, RoomNode>,
    sections: BTreeMap<String, SectionNode>,
    modal: ModalNode,
    dimmer_active: bool,
    breadcrumb: Option<String>,
    focused: Option<ElementHandle>,
    focusables: HashMap<ElementHandle, Vec<ElementHandle>>,
    detached: HashSet<ElementHandle>,
    scrolled: Vec<RoomId>,
    modal_content_writes: usize,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryView {
    pub fn new() -> Self {
        let container = ElementHandle::from_raw(1);
        let close = ElementHandle::from_raw(2);
        let mut focusables = HashMap::new();
        focusables.insert(container, vec![close]);
        Self {
            next_handle: 3,
            rooms: BTreeMap::new(),
            sections: BTreeMap::new(),
            modal: ModalNode {
                container,
                close,
                title: String::new(),
                body: String::new(),
                active: false,
            },
            dimmer_active: false,
            breadcrumb: None,
            focused: None,
            focusables,
            detached: HashSet::new(),
            scrolled: Vec::new(),
            modal_content_writes: 0,
        }
    }

    pub fn with_sections<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut view = Self::new();
        for key in sections {
            view.add_section(key);
        }
        view
    }

    fn allocate(&mut self) -> ElementHandle {
        let handle = ElementHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        handle
    }

    pub fn add_section(&mut self, key: impl Into<String>) {
        self.sections.entry(key.into()).or_default();
    }

    /// Add a room overlay and return its close control.
    pub fn add_room(&mut self, room_id: impl Into<String>) -> ElementHandle {
        let container = self.allocate();
        let close = self.allocate();
        self.focusables.insert(container, vec![close]);
        self.rooms.insert(
            room_id.into(),
            RoomNode {
                container,
                close,
                active: false,
            },
        );
        close
    }

    /// Add a free-standing element, e.g. a trigger card on the base page.
    pub fn add_element(&mut self) -> ElementHandle {
        self.allocate()
    }

    /// Add a focusable element as the last descendant of `container`.
    pub fn add_focusable(&mut self, container: ElementHandle) -> ElementHandle {
        let handle = self.allocate();
        self.focusables.entry(container).or_default().push(handle);
        handle
    }

    pub fn room_container(&self, room_id: &str) -> Option<ElementHandle> {
        self.rooms.get(room_id).map(|room| room.container)
    }

    pub fn detach(&mut self, element: ElementHandle) {
        self.detached.insert(element);
        if self.focused == Some(element) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<ElementHandle> {
        self.focused
    }

    pub fn is_room_active(&self, room_id: &str) -> bool {
        self.rooms.get(room_id).is_some_and(|room| room.active)
    }

    pub fn active_rooms(&self) -> Vec<&str> {
        self.rooms
            .iter()
            .filter(|(_, room)| room.active)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn is_dimmed(&self, section_key: &str) -> bool {
        self.sections.get(section_key).is_some_and(|s| s.dimmed)
    }

    pub fn indicator_active(&self, section_key: &str) -> bool {
        self.sections.get(section_key).is_some_and(|s| s.indicator)
    }

    pub fn breadcrumb(&self) -> Option<&str> {
        self.breadcrumb.as_deref()
    }

    pub fn modal_active(&self) -> bool {
        self.modal.active
    }

    pub fn dimmer_active(&self) -> bool {
        self.dimmer_active
    }

    pub fn modal_title(&self) -> &str {
        &self.modal.title
    }

    pub fn modal_body(&self) -> &str {
        &self.modal.body
    }

    pub fn modal_content_writes(&self) -> usize {
        self.modal_content_writes
    }

    pub fn scrolled(&self) -> &[RoomId] {
        &self.scrolled
    }
}

impl FocusHost for MemoryView {
    fn active_element(&self) -> Option<ElementHandle> {
        self.focused
    }

    fn focus(&mut self, element: ElementHandle) -> bool {
        if self.detached.contains(&element) {
            return false;
        }
        self.focused = Some(element);
        true
    }

    fn focusables(&self, container: ElementHandle) -> Vec<ElementHandle> {
        self.focusables
            .get(&container)
            .map(|list| {
                list.iter()
                    .copied()
                    .filter(|el| !self.detached.contains(el))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ViewBinding for MemoryView {
    fn has_room(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    fn set_room_active(&mut self, room_id: &str, active: bool) {
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.active = active;
        }
    }

    fn deactivate_all_rooms(&mut self) {
        for room in self.rooms.values_mut() {
            room.active = false;
        }
    }

    fn set_deep_indicator(&mut self, section_key: &str, active: bool) {
        if let Some(section) = self.sections.get_mut(section_key) {
            section.indicator = active;
        }
    }

    fn clear_deep_indicators(&mut self) {
        for section in self.sections.values_mut() {
            section.indicator = false;
        }
    }

    fn dim_sections_except(&mut self, section_key: &str) {
        for (key, section) in self.sections.iter_mut() {
            section.dimmed = key != section_key;
        }
    }

    fn clear_dimming(&mut self) {
        for section in self.sections.values_mut() {
            section.dimmed = false;
        }
    }

    fn set_breadcrumb(&mut self, path: Option<&str>) {
        self.breadcrumb = path.map(str::to_string);
    }

    fn set_modal_content(&mut self, title: &str, body: &str) {
        self.modal.title = title.to_string();
        self.modal.body = body.to_string();
        self.modal_content_writes += 1;
    }

    fn set_modal_active(&mut self, active: bool) {
        self.modal.active = active;
    }

    fn set_dimmer_active(&mut self, active: bool) {
        self.dimmer_active = active;
    }

    fn scroll_into_view(&mut self, room_id: &str) {
        self.scrolled.push(room_id.to_string());
    }

    fn room_close_control(&self, room_id: &str) -> Option<ElementHandle> {
        self.rooms.get(room_id).map(|room| room.close)
    }

    fn modal_close_control(&self) -> Option<ElementHandle> {
        Some(self.modal.close)
    }

    fn modal_container(&self) -> Option<ElementHandle> {
        Some(self.modal.container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimming_spares_only_the_active_section() {
        let mut view = MemoryView::with_sections(["system", "ai-core", "lab"]);
        view.dim_sections_except("ai-core");
        assert!(view.is_dimmed("system"));
        assert!(!view.is_dimmed("ai-core"));
        assert!(view.is_dimmed("lab"));
        view.clear_dimming();
        assert!(!view.is_dimmed("lab"));
    }

    #[test]
    fn detached_elements_refuse_focus() {
        let mut view = MemoryView::new();
        let el = view.add_element();
        assert!(view.focus(el));
        view.detach(el);
        assert_eq!(view.focused(), None);
        assert!(!view.focus(el));
    }

    #[test]
    fn modal_container_lists_close_control_first() {
        let mut view = MemoryView::new();
        let container = view.modal_container().unwrap();
        let extra = view.add_focusable(container);
        let close = view.modal_close_control().unwrap();
        assert_eq!(view.focusables(container), vec![close, extra]);
    }

    #[test]
    fn rooms_toggle_independently() {
        let mut view = MemoryView::new();
        view.add_room("a-room");
        view.add_room("b-room");
        view.set_room_active("a-room", true);
        assert_eq!(view.active_rooms(), vec!["a-room"]);
        view.deactivate_all_rooms();
        assert!(view.active_rooms().is_empty());
    }
}
