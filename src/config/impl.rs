use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to loading from the environment if `init_config()` was never
/// called, so library users are not forced into a startup ritual.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load())).clone()
}

/// Initialize the global configuration
///
/// Loads configuration from "tinylink.toml" in the current directory, then
/// applies `TL__*` environment overrides.
///
/// # Examples
/// ```no_run
/// use tinylink::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load()));
}

/// Initialize the global configuration with an explicit value.
///
/// Returns `false` if a configuration was already installed.
pub fn init_config_with(config: StaticConfig) -> bool {
    CONFIG.set(Arc::new(config)).is_ok()
}
