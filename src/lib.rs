//! TinyLink - client core for a URL shortening service
//!
//! This library talks to a remote link API and keeps a local registry of the
//! links created from this machine.
//!
//! # Features
//! - **clipboard**: system clipboard through arboard (default). Without it,
//!   copying goes through an external program such as `pbcopy` or `xclip`.
//!
//! # Architecture
//! - `client`: remote link API (create, fetch, list, delete, health)
//! - `registry`: local ordered list of created links, persisted as one document
//! - `storage`: document stores backing the registry
//! - `enricher`: live click data for registry rows
//! - `analytics`: synthetic daily/weekly/hourly series and dashboard summary
//! - `view`: Loading/Loaded/Empty/Error state machine for fetching views
//! - `display`, `clipboard`: rendering and sharing helpers
//! - `interfaces`: command-line front end
//! - `config`, `system`: configuration, logging and platform utilities

pub mod analytics;
pub mod cli;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod enricher;
pub mod errors;
pub mod interfaces;
pub mod models;
pub mod registry;
pub mod storage;
pub mod system;
pub mod view;
