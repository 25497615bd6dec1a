//! Local link registry
//!
//! Ordered, client-owned list of links this client created. The list only
//! changes after the server confirms a create or delete, and every change
//! rewrites the whole persisted document.
//!
//! ```text
//! create/delete → validate → in-flight marker → LinkApi → mutate → persist
//! ```
//!
//! Persistence failures are logged and swallowed: the in-memory list stays
//! authoritative for the rest of the session.

use std::sync::Arc;

use dashmap::DashSet;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::client::LinkApi;
use crate::errors::{Result, TinyLinkError};
use crate::models::{LinkId, RegistryEntry, build_short_url, filter_by_term};
use crate::storage::DocumentStore;

pub const EMPTY_DESTINATION: &str = "Destination link cannot be empty";
pub const BAD_CODE_LENGTH: &str = "Short code must be 6-8 characters";
pub const BAD_CODE_CHARS: &str = "Short code must contain only letters and numbers";

const MIN_CODE_LEN: usize = 6;
const MAX_CODE_LEN: usize = 8;

/// Check create input before any network traffic.
pub fn validate_create(long_url: &str, short_code: &str) -> Result<()> {
    if long_url.trim().is_empty() {
        return Err(TinyLinkError::validation(EMPTY_DESTINATION));
    }

    let len = short_code.chars().count();
    if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
        return Err(TinyLinkError::validation(BAD_CODE_LENGTH));
    }

    if !short_code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TinyLinkError::validation(BAD_CODE_CHARS));
    }

    Ok(())
}

/// Interactive confirmation supplied by the calling view.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub fn delete_prompt(entry: &RegistryEntry) -> String {
    format!(
        "Are you sure you want to delete this short URL?\n\n\
         Short: {}\nOriginal: {}\n\nThis action cannot be undone.",
        entry.short_url, entry.long_url
    )
}

/// Marks one entity as busy until dropped.
///
/// Dropping the owning future (a discarded result) also releases it.
struct InFlightGuard<'a> {
    set: &'a DashSet<String>,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}

pub struct LinkRegistry {
    api: Arc<dyn LinkApi>,
    store: Arc<dyn DocumentStore>,
    key: String,
    entries: Mutex<Vec<RegistryEntry>>,
    in_flight: DashSet<String>,
}

impl LinkRegistry {
    /// Empty registry; call [`LinkRegistry::load_from_durable_storage`] to hydrate.
    pub fn new(
        api: Arc<dyn LinkApi>,
        store: Arc<dyn DocumentStore>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            key: key.into(),
            entries: Mutex::new(Vec::new()),
            in_flight: DashSet::new(),
        }
    }

    /// Construct and load the persisted document in one step.
    pub fn open(
        api: Arc<dyn LinkApi>,
        store: Arc<dyn DocumentStore>,
        key: impl Into<String>,
    ) -> Self {
        let registry = Self::new(api, store, key);
        registry.load_from_durable_storage();
        registry
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    fn begin(&self, key: String) -> Result<InFlightGuard<'_>> {
        if !self.in_flight.insert(key.clone()) {
            debug!("Rejected duplicate in-flight operation {}", key);
            return Err(TinyLinkError::in_flight(format!(
                "An operation on {} is already in progress",
                key.split_once(':').map(|(_, k)| k).unwrap_or(&key)
            )));
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            key,
        })
    }

    pub fn is_in_flight_create(&self, short_code: &str) -> bool {
        self.in_flight.contains(&format!("create:{}", short_code))
    }

    pub fn is_in_flight_delete(&self, id: &LinkId) -> bool {
        self.in_flight.contains(&format!("delete:{}", id))
    }

    /// Create a link on the server and record it locally.
    ///
    /// Server rejections come back as `TinyLinkError::Server` with the
    /// server's `error_msg` untouched; nothing is recorded in that case.
    pub async fn create(&self, long_url: &str, short_code: &str) -> Result<RegistryEntry> {
        validate_create(long_url, short_code)?;
        let _guard = self.begin(format!("create:{}", short_code))?;

        let created = self.api.create(long_url, short_code).await?;

        let entry = RegistryEntry {
            id: created.id,
            short_code: short_code.to_string(),
            long_url: long_url.to_string(),
            short_url: build_short_url(self.api.base_url(), short_code),
        };

        {
            let mut entries = self.entries.lock();
            entries.push(entry.clone());
            self.persist_locked(&entries);
        }

        info!("Created short link {} -> {}", entry.short_code, entry.long_url);
        Ok(entry)
    }

    /// Delete a link after the caller confirms it.
    ///
    /// Unknown ids fail with `NotFound` without touching the network; a
    /// declined confirmation fails with `Cancelled`. The local entry is only
    /// removed once the server acknowledges the delete.
    pub async fn delete(&self, id: &LinkId, confirm: &dyn Confirm) -> Result<RegistryEntry> {
        let entry = self.get(id).ok_or_else(|| {
            TinyLinkError::not_found(format!("No link with id {} in the registry", id))
        })?;
        let _guard = self.begin(format!("delete:{}", id))?;

        if !confirm.confirm(&delete_prompt(&entry)) {
            debug!("Deletion of {} declined", entry.short_code);
            return Err(TinyLinkError::cancelled("Deletion cancelled"));
        }

        if let Err(e) = self.api.delete_by_code(&entry.short_code).await {
            warn!("Failed to delete {}: {}", entry.short_code, e);
            return Err(e);
        }

        {
            let mut entries = self.entries.lock();
            entries.retain(|e| !e.id.same_as(id));
            self.persist_locked(&entries);
        }

        info!("Deleted short link {}", entry.short_code);
        Ok(entry)
    }

    /// Entries whose code or destination contains `term`, in creation order.
    pub fn list(&self, term: &str) -> Vec<RegistryEntry> {
        filter_by_term(&self.entries.lock(), term)
    }

    pub fn get(&self, id: &LinkId) -> Option<RegistryEntry> {
        self.entries
            .lock()
            .iter()
            .find(|e| e.id.same_as(id))
            .cloned()
    }

    pub fn find_by_code(&self, short_code: &str) -> Option<RegistryEntry> {
        self.entries
            .lock()
            .iter()
            .find(|e| e.short_code == short_code)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Replace the in-memory list with the persisted document.
    ///
    /// Returns `false`, leaving the current list untouched, when the document
    /// is absent, unreadable or malformed.
    pub fn load_from_durable_storage(&self) -> bool {
        let doc = match self.store.read(&self.key) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                debug!("No persisted registry under {}", self.key);
                return false;
            }
            Err(e) => {
                warn!("Error loading registry from {}: {}", self.store.name(), e);
                return false;
            }
        };

        match serde_json::from_str::<Vec<RegistryEntry>>(&doc) {
            Ok(loaded) => {
                info!("Loaded {} links from {} storage", loaded.len(), self.store.name());
                *self.entries.lock() = loaded;
                true
            }
            Err(e) => {
                warn!("Ignoring malformed registry document {}: {}", self.key, e);
                false
            }
        }
    }

    /// Write the whole list. Failures are logged, never raised.
    pub fn persist_to_durable_storage(&self) -> bool {
        let entries = self.entries.lock();
        self.persist_locked(&entries)
    }

    // Called with the entries lock held so concurrent writers persist in order.
    fn persist_locked(&self, entries: &[RegistryEntry]) -> bool {
        let doc = match serde_json::to_string(entries) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Error serializing registry: {}", e);
                return false;
            }
        };
        match self.store.write(&self.key, &doc) {
            Ok(()) => true,
            Err(e) => {
                warn!("Error saving registry to {}: {}", self.store.name(), e);
                false
            }
        }
    }
}
