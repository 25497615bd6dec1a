//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use tokio::sync::Notify;

use tinylink::client::LinkApi;
use tinylink::errors::{Result, TinyLinkError};
use tinylink::models::{CreatedLink, HealthReport, LinkRecord};
use tinylink::storage::DocumentStore;

pub const BASE_URL: &str = "http://localhost:3000";

/// In-process stand-in for the link API.
///
/// Behaves like the real server (ids from 1, 404 for unknown codes, duplicate
/// codes rejected) and counts every call.
pub struct InMemoryLinkApi {
    base_url: String,
    links: Mutex<Vec<LinkRecord>>,
    next_id: AtomicU64,
    fail_with: Mutex<Option<TinyLinkError>>,
    create_gate: Mutex<Option<Arc<Notify>>>,
    pub creates: AtomicUsize,
    pub fetches: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl InMemoryLinkApi {
    pub fn new() -> Arc<Self> {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Arc<Self> {
        Arc::new(Self {
            base_url: base_url.to_string(),
            links: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail_with: Mutex::new(None),
            create_gate: Mutex::new(None),
            creates: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        })
    }

    /// Every following call fails with `err` until [`InMemoryLinkApi::recover`].
    pub fn fail_with(&self, err: TinyLinkError) {
        *self.fail_with.lock() = Some(err);
    }

    pub fn recover(&self) {
        *self.fail_with.lock() = None;
    }

    /// Creates wait on the returned notify before answering.
    pub fn hold_creates(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.create_gate.lock() = Some(notify.clone());
        notify
    }

    /// Server-side click for `code`.
    pub fn click(&self, code: &str, times: u64) {
        let mut links = self.links.lock();
        if let Some(link) = links.iter_mut().find(|l| l.short_code == code) {
            link.clicks += times;
            link.last_clicked_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap());
        }
    }

    /// Remove `code` behind the client's back.
    pub fn forget(&self, code: &str) {
        self.links.lock().retain(|l| l.short_code != code);
    }

    /// Overwrite a record (e.g. to simulate a click counter reset).
    pub fn set_clicks(&self, code: &str, clicks: u64) {
        if let Some(link) = self.links.lock().iter_mut().find(|l| l.short_code == code) {
            link.clicks = clicks;
        }
    }

    pub fn server_codes(&self) -> Vec<String> {
        self.links
            .lock()
            .iter()
            .map(|l| l.short_code.clone())
            .collect()
    }

    fn check(&self) -> Result<()> {
        match self.fail_with.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LinkApi for InMemoryLinkApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create(&self, long_url: &str, short_code: &str) -> Result<CreatedLink> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let gate = self.create_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check()?;

        let mut links = self.links.lock();
        if links.iter().any(|l| l.short_code == short_code) {
            return Err(TinyLinkError::server("Short code already exists"));
        }
        let record = LinkRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst).into(),
            short_code: short_code.to_string(),
            long_url: long_url.to_string(),
            clicks: 0,
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap(),
            last_clicked_at: None,
        };
        let id = record.id.clone();
        links.push(record);
        Ok(CreatedLink { id })
    }

    async fn fetch_by_code(&self, code: &str) -> Result<LinkRecord> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.links
            .lock()
            .iter()
            .find(|l| l.short_code == code)
            .cloned()
            .ok_or_else(|| TinyLinkError::not_found("URL not found"))
    }

    async fn fetch_all(&self) -> Result<Vec<LinkRecord>> {
        self.check()?;
        Ok(self.links.lock().clone())
    }

    async fn delete_by_code(&self, code: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut links = self.links.lock();
        let before = links.len();
        links.retain(|l| l.short_code != code);
        if links.len() == before {
            return Err(TinyLinkError::not_found("Short code not found"));
        }
        Ok(())
    }

    async fn health(&self) -> Result<HealthReport> {
        self.check()?;
        Ok(HealthReport {
            version: "1.0".to_string(),
            latency: Duration::from_millis(1),
            checked_at: Utc::now(),
        })
    }
}

/// Store whose writes always fail; reads find nothing.
pub struct ReadOnlyStore;

impl DocumentStore for ReadOnlyStore {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(TinyLinkError::storage("quota exceeded"))
    }

    fn name(&self) -> &'static str {
        "read-only"
    }
}
