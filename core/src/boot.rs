//! Boot: populate the registry before the engine exists.
//!
//! RULE: Boot runs to completion before GameEngine::new(). The engine
//! refuses to construct from a registry that has not been booted.
//! Catalog and config errors surface here and abort the session.

use crate::{
    catalog::EventCatalog,
    config::GameConfig,
    error::SimResult,
    event::EventDefinition,
    registry::ServiceRegistry,
};

/// The contract every boot loader must fulfill.
pub trait BootLoader {
    /// Stable name for logging.
    fn name(&self) -> &'static str;

    /// Install config and event catalog into the registry.
    fn boot(&self, registry: &mut ServiceRegistry) -> SimResult<()>;
}

/// Loads `game_config.json` and `events/event_catalog.json` from disk.
pub struct DataDirBoot {
    data_dir: String,
}

impl DataDirBoot {
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self { data_dir: data_dir.into() }
    }
}

impl BootLoader for DataDirBoot {
    fn name(&self) -> &'static str {
        "data_dir"
    }

    fn boot(&self, registry: &mut ServiceRegistry) -> SimResult<()> {
        let config = GameConfig::load(&self.data_dir)?;
        let catalog = EventCatalog::load(&self.data_dir, &config)?;
        log::info!(
            "boot[{}]: {} meters, {} events from {}",
            self.name(),
            config.meters.len(),
            catalog.len(),
            self.data_dir
        );
        registry.install_config(config);
        registry.install_catalog(catalog);
        Ok(())
    }
}

/// Installs an in-memory config and definitions. Used by tests and demos.
pub struct StaticBoot {
    config: GameConfig,
    events: Vec<EventDefinition>,
}

impl StaticBoot {
    pub fn new(config: GameConfig, events: Vec<EventDefinition>) -> Self {
        Self { config, events }
    }
}

impl BootLoader for StaticBoot {
    fn name(&self) -> &'static str {
        "static"
    }

    fn boot(&self, registry: &mut ServiceRegistry) -> SimResult<()> {
        self.config.validate()?;
        let catalog = EventCatalog::new(self.events.clone(), &self.config)?;
        log::debug!("boot[{}]: {} events", self.name(), catalog.len());
        registry.install_config(self.config.clone());
        registry.install_catalog(catalog);
        Ok(())
    }
}
