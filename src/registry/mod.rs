//! Read-only content tables for rooms and modals.
//!
//! The registry is built once per session and handed to the controller behind
//! an `Arc`; nothing in the navigation core mutates it.

mod core;

pub use self::core::{ContentRegistry, ModalEntry, ModalId, RoomEntry, RoomId};
