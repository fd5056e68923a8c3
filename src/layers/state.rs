use serde::Serialize;

use crate::registry::{ModalId, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Base = 1,
    Room = 2,
    Modal = 3,
}

impl Layer {
    pub fn depth(self) -> u8 {
        self as u8
    }
}

/// The room currently shown, with the labels it was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub section_label: String,
    pub component_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub(super) layer: Layer,
    pub(super) active_room: Option<Room>,
    pub(super) active_modal: Option<ModalId>,
    pub(super) breadcrumb: String,
    pub(super) generation: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            layer: Layer::Base,
            active_room: None,
            active_modal: None,
            breadcrumb: String::new(),
            generation: 0,
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn active_room(&self) -> Option<&Room> {
        self.active_room.as_ref()
    }

    pub fn active_modal(&self) -> Option<&str> {
        self.active_modal.as_deref()
    }

    pub fn breadcrumb(&self) -> &str {
        &self.breadcrumb
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Layer invariants: a modal implies `Modal`, a room implies `Room` or
    /// deeper, and `Base` has neither.
    pub fn is_consistent(&self) -> bool {
        let modal_ok = self.active_modal.is_none() || self.layer == Layer::Modal;
        let room_ok = self.active_room.is_none() || self.layer >= Layer::Room;
        let base_ok = self.layer != Layer::Base
            || (self.active_room.is_none() && self.active_modal.is_none());
        modal_ok && room_ok && base_ok
    }

    pub(super) fn reset_to_base(&mut self) {
        self.layer = Layer::Base;
        self.active_room = None;
        self.active_modal = None;
        self.breadcrumb.clear();
    }

    pub(super) fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_base() {
        let state = NavigationState::new();
        assert_eq!(state.layer(), Layer::Base);
        assert_eq!(state.layer().depth(), 1);
        assert!(state.breadcrumb().is_empty());
        assert!(state.is_consistent());
    }

    #[test]
    fn modal_outside_modal_layer_is_inconsistent() {
        let mut state = NavigationState::new();
        state.active_modal = Some("decision-tree".into());
        assert!(!state.is_consistent());
        state.layer = Layer::Modal;
        assert!(state.is_consistent());
    }

    #[test]
    fn reset_clears_everything_but_generation() {
        let mut state = NavigationState::new();
        state.layer = Layer::Room;
        state.active_room = Some(Room {
            id: "lab-room".into(),
            section_label: "LAB".into(),
            component_label: "PHASE".into(),
        });
        state.breadcrumb = "LAB ⟡ PHASE".into();
        state.bump();
        state.reset_to_base();
        assert_eq!(state, NavigationState { generation: 1, ..NavigationState::new() });
    }
}
