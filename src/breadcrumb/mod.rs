//! Breadcrumb composition.
//!
//! Room paths read `SECTION ⟡ COMPONENT`; opening a modal appends the part of
//! its title after the first delimiter.

mod core;

pub use self::core::{BreadcrumbTracker, DELIMITER, SEPARATOR, fit, section_key, title_fragment};
