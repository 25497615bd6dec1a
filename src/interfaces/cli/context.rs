//! Wiring of the client core for one CLI invocation.

use std::sync::Arc;

use crate::client::{HttpLinkApi, LinkApi};
use crate::config::StaticConfig;
use crate::enricher::LinkEnricher;
use crate::registry::LinkRegistry;
use crate::storage::{DocumentStore, StorageFactory};

pub struct CliContext {
    pub config: Arc<StaticConfig>,
    pub api: Arc<dyn LinkApi>,
    pub registry: LinkRegistry,
    pub enricher: LinkEnricher,
}

impl CliContext {
    /// HTTP client plus file-backed registry, loaded from disk.
    pub fn from_config(config: Arc<StaticConfig>, api_url: Option<String>) -> Self {
        let mut api_config = config.api.clone();
        if let Some(url) = api_url {
            api_config.base_url = url;
        }
        let api: Arc<dyn LinkApi> = Arc::new(HttpLinkApi::from_config(&api_config));
        let store = StorageFactory::create(&config.storage);
        Self::with_parts(config, api, store)
    }

    pub fn with_parts(
        config: Arc<StaticConfig>,
        api: Arc<dyn LinkApi>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        let registry = LinkRegistry::open(api.clone(), store, config.storage.registry_key.clone());
        let enricher = LinkEnricher::new(api.clone());
        Self {
            config,
            api,
            registry,
            enricher,
        }
    }
}
