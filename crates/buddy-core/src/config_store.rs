//! Persisted assistant settings.

use std::rc::Rc;

use buddy_types::{
    Result,
    config::{AssistantConfig, CONFIG_KEY},
};
use crate::ports::KeyValueStore;

pub struct ConfigStore {
    storage: Rc<dyn KeyValueStore>,
}

impl ConfigStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Saved settings, or defaults when none are stored or they don't parse
    pub fn load(&self) -> AssistantConfig {
        match self.storage.get(CONFIG_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<AssistantConfig>(&raw) {
                Ok(config) => {
                    log::info!("Config restored from {}", self.storage.backend_name());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable config: {}", e);
                    AssistantConfig::default()
                }
            },
            Ok(None) => AssistantConfig::default(),
            Err(e) => {
                log::warn!("Could not read config: {}", e);
                AssistantConfig::default()
            }
        }
    }

    pub fn save(&self, config: &AssistantConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;
        self.storage.set(CONFIG_KEY, &json)
    }

    /// Forget saved settings. Returns the defaults now in effect.
    pub fn reset(&self) -> Result<AssistantConfig> {
        self.storage.remove(CONFIG_KEY)?;
        log::info!("Config reset to defaults");
        Ok(AssistantConfig::default())
    }
}
