//! Error taxonomy for fallible setup paths (config, content catalog).
//!
//! Navigation transitions never return errors; see `layers` for how missing
//! targets and malformed titles are absorbed.

mod types;

pub use types::{NavError, Result};
