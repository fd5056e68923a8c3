//! Maps input events onto a single controller call each.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::layers::LayerController;
use crate::view::ViewBinding;

use super::EventFlow;

const ROOM_SUFFIX: &str = "-room";

/// Something the user can activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A component card. Labels left as `None` come from the registry.
    Room {
        room_id: String,
        labels: Option<(String, String)>,
    },
    Modal {
        modal_id: String,
    },
    CloseRoom,
    CloseModal,
    Dimmer,
}

impl Trigger {
    pub fn room(room_id: impl Into<String>) -> Self {
        Trigger::Room {
            room_id: room_id.into(),
            labels: None,
        }
    }

    pub fn room_with_labels(
        room_id: impl Into<String>,
        section_label: impl Into<String>,
        component_label: impl Into<String>,
    ) -> Self {
        Trigger::Room {
            room_id: room_id.into(),
            labels: Some((section_label.into(), component_label.into())),
        }
    }

    pub fn modal(modal_id: impl Into<String>) -> Self {
        Trigger::Modal {
            modal_id: modal_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum NavEvent {
    Click(Trigger),
    /// A key press, with the trigger that had focus when it was pressed.
    Key {
        key: KeyEvent,
        target: Option<Trigger>,
    },
    Tick {
        elapsed: Duration,
    },
}

impl NavEvent {
    pub fn key(code: KeyCode) -> Self {
        NavEvent::Key {
            key: KeyEvent::new(code, KeyModifiers::NONE),
            target: None,
        }
    }

    pub fn key_on(code: KeyCode, target: Trigger) -> Self {
        NavEvent::Key {
            key: KeyEvent::new(code, KeyModifiers::NONE),
            target: Some(target),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            NavEvent::Click(_) => "click",
            NavEvent::Key { .. } => "key",
            NavEvent::Tick { .. } => "tick",
        }
    }
}

/// `lab` and `lab-room` both name the room `lab-room`.
pub fn normalize_room_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with(ROOM_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{ROOM_SUFFIX}")
    }
}

pub fn route<V: ViewBinding>(controller: &mut LayerController<V>, event: &NavEvent) -> EventFlow {
    match event {
        NavEvent::Click(trigger) => activate(controller, trigger),
        NavEvent::Key { key, target } => route_key(controller, key, target.as_ref()),
        NavEvent::Tick { elapsed } => {
            controller.advance(*elapsed);
            EventFlow::Continue
        }
    }
}

fn route_key<V: ViewBinding>(
    controller: &mut LayerController<V>,
    key: &KeyEvent,
    target: Option<&Trigger>,
) -> EventFlow {
    if key.kind != KeyEventKind::Press {
        return EventFlow::Continue;
    }

    match key.code {
        KeyCode::Esc => match controller.escape() {
            Some(_) => EventFlow::Consumed,
            None => EventFlow::Continue,
        },
        KeyCode::Tab => {
            let backwards = key.modifiers.contains(KeyModifiers::SHIFT);
            controller.handle_tab(backwards)
        }
        KeyCode::BackTab => controller.handle_tab(true),
        KeyCode::Enter | KeyCode::Char(' ') => match target {
            Some(trigger) => activate(controller, trigger),
            None => EventFlow::Continue,
        },
        _ => EventFlow::Continue,
    }
}

fn activate<V: ViewBinding>(controller: &mut LayerController<V>, trigger: &Trigger) -> EventFlow {
    let handled = match trigger {
        Trigger::Room { room_id, labels } => {
            let room_id = normalize_room_id(room_id);
            let (section, component) = match labels {
                Some((section, component)) => (section.clone(), component.clone()),
                None => controller
                    .registry()
                    .lookup_room(&room_id)
                    .map(|entry| (entry.section_label.clone(), entry.component_label.clone()))
                    .unwrap_or_default(),
            };
            controller.open_room(&room_id, &section, &component)
        }
        Trigger::Modal { modal_id } => controller.open_modal(modal_id),
        Trigger::CloseRoom => controller.close_all_rooms(),
        Trigger::CloseModal => controller.close_modal(),
        Trigger::Dimmer => controller.escape().is_some(),
    };
    if handled {
        EventFlow::Consumed
    } else {
        EventFlow::Continue
    }
}
