use std::collections::HashMap;
use std::fs;
use std::path::Path;

use blake3::Hash;
use serde::Deserialize;

use crate::error::{NavError, Result};

pub type RoomId = String;
pub type ModalId = String;

const BUNDLED_CATALOG: &str = include_str!("../../content/catalog.json");

/// Section/component labels recorded for a room overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomEntry {
    pub id: RoomId,
    pub section_label: String,
    pub component_label: String,
}

/// Detail content shown in the modal overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModalEntry {
    pub id: ModalId,
    pub title: String,
    pub body: String,
}

impl ModalEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Content hash over title and body.
    pub fn digest(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.title.as_bytes());
        hasher.update(&[0]);
        hasher.update(self.body.as_bytes());
        hasher.finalize()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogDocument {
    rooms: Vec<RoomEntry>,
    modals: Vec<ModalEntry>,
}

#[derive(Debug, Default, Clone)]
pub struct ContentRegistry {
    rooms: HashMap<RoomId, RoomEntry>,
    modals: HashMap<ModalId, ModalEntry>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog shipped with the crate, covering the stock page content.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        let mut registry = Self::new();
        for room in document.rooms {
            registry.insert_room(room)?;
        }
        for modal in document.modals {
            registry.insert_modal(modal)?;
        }
        Ok(registry)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn with_room(
        mut self,
        id: impl Into<String>,
        section_label: impl Into<String>,
        component_label: impl Into<String>,
    ) -> Result<Self> {
        self.insert_room(RoomEntry {
            id: id.into(),
            section_label: section_label.into(),
            component_label: component_label.into(),
        })?;
        Ok(self)
    }

    pub fn with_modal(
        mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        self.insert_modal(ModalEntry::new(id, title, body))?;
        Ok(self)
    }

    fn insert_room(&mut self, room: RoomEntry) -> Result<()> {
        if self.rooms.contains_key(&room.id) {
            return Err(NavError::DuplicateRoom(room.id));
        }
        self.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    fn insert_modal(&mut self, modal: ModalEntry) -> Result<()> {
        if self.modals.contains_key(&modal.id) {
            return Err(NavError::DuplicateModal(modal.id));
        }
        self.modals.insert(modal.id.clone(), modal);
        Ok(())
    }

    pub fn lookup_modal(&self, id: &str) -> Option<&ModalEntry> {
        self.modals.get(id)
    }

    pub fn lookup_room(&self, id: &str) -> Option<&RoomEntry> {
        self.rooms.get(id)
    }

    pub fn room_ids(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    pub fn modal_ids(&self) -> impl Iterator<Item = &str> {
        self.modals.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rooms.len() + self.modals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.modals.is_empty()
    }
}
