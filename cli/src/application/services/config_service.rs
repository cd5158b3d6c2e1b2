//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::WolConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<WolConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &WolConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist one `key = value` pair, returning the new config.
///
/// # Errors
///
/// Returns an error for an unknown key, an invalid value, or a store failure.
/// Nothing is written unless validation passes.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<WolConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
