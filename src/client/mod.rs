//! Remote link store client
//!
//! Thin typed wrapper over the link API. This layer never touches local
//! state; the registry and enricher decide what to do with its results.
//!
//! # Error mapping
//!
//! - transport failure → `TinyLinkError::Unreachable`
//! - 404 on fetch/delete → `TinyLinkError::NotFound`
//! - other non-success → `TinyLinkError::Server` carrying `error_msg` verbatim

mod http;

pub use http::HttpLinkApi;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{CreatedLink, HealthReport, LinkRecord};

/// Message shown for any transport-level failure.
pub const UNREACHABLE_MESSAGE: &str = "Server not reachable";

#[async_trait]
pub trait LinkApi: Send + Sync {
    /// Base URL short links are built from.
    fn base_url(&self) -> &str;

    /// `POST /api/links`; succeeds only on 201. Only the new id is read back.
    async fn create(&self, long_url: &str, short_code: &str) -> Result<CreatedLink>;

    /// `GET /api/links/{code}`
    async fn fetch_by_code(&self, code: &str) -> Result<LinkRecord>;

    /// `GET /api/links`
    async fn fetch_all(&self) -> Result<Vec<LinkRecord>>;

    /// `DELETE /api/links/{code}`
    async fn delete_by_code(&self, code: &str) -> Result<()>;

    /// `GET /healthz` with measured round trip.
    async fn health(&self) -> Result<HealthReport>;
}
