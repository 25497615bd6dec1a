//! Link record enricher
//!
//! Pulls the live record for a short code so a registry row can show its
//! click count and timestamps. A 404 is an expected outcome here (the server
//! may have dropped a code the registry still remembers) and comes back as
//! `Ok(None)`.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::client::LinkApi;
use crate::errors::{Result, TinyLinkError};
use crate::models::{LinkRecord, RegistryEntry};

pub struct LinkEnricher {
    api: Arc<dyn LinkApi>,
    /// Last record seen per short code, for display between fetches.
    last_known: DashMap<String, LinkRecord>,
}

impl LinkEnricher {
    pub fn new(api: Arc<dyn LinkApi>) -> Self {
        Self {
            api,
            last_known: DashMap::new(),
        }
    }

    /// One fetch, no retry.
    pub async fn enrich(&self, short_code: &str) -> Result<Option<LinkRecord>> {
        match self.api.fetch_by_code(short_code).await {
            Ok(record) => {
                self.remember(short_code, &record);
                Ok(Some(record))
            }
            Err(TinyLinkError::NotFound(_)) => {
                debug!("Short code {} no longer exists on the server", short_code);
                self.last_known.remove(short_code);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Enrich each entry in order, one fetch per entry.
    ///
    /// Per-entry failures are kept alongside the entry instead of aborting
    /// the whole batch.
    pub async fn enrich_all(
        &self,
        entries: &[RegistryEntry],
    ) -> Vec<(RegistryEntry, Result<Option<LinkRecord>>)> {
        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            let result = self.enrich(&entry.short_code).await;
            out.push((entry.clone(), result));
        }
        out
    }

    pub fn last_known(&self, short_code: &str) -> Option<LinkRecord> {
        self.last_known.get(short_code).map(|r| r.value().clone())
    }

    fn remember(&self, short_code: &str, record: &LinkRecord) {
        if let Some(previous) = self.last_known.get(short_code) {
            if record.clicks < previous.clicks {
                warn!(
                    "Click count for {} went backwards ({} -> {})",
                    short_code, previous.clicks, record.clicks
                );
            }
            if let (Some(new), Some(old)) = (record.last_clicked_at, previous.last_clicked_at)
                && new < old
            {
                warn!("last_clicked_at for {} went backwards", short_code);
            }
        }
        // 服务端是权威数据，即使回退也照单全收
        self.last_known
            .insert(short_code.to_string(), record.clone());
    }
}
