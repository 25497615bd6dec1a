//! System-level modules
//!
//! - Logging initialisation
//! - Platform helpers (clipboard fallback program detection)

pub mod logging;
pub mod platform;
