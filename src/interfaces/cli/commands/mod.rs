//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod health;
mod links;
mod stats;

pub use config_gen::*;
pub use health::*;
pub use links::*;
pub use stats::*;
