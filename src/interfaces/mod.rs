//! User-facing interfaces built on the client core.

pub mod cli;
