//! Service registry: the single composed context object.
//!
//! RULE: No process-wide globals. The composition root builds one
//! ServiceRegistry, Boot fills it, and the engine takes ownership of it.
//! Only Boot writes to the registry; after that only the engine mutates
//! anything (the RNG and its own GameState).

use crate::{
    catalog::EventCatalog,
    config::GameConfig,
    error::{SimError, SimResult},
    rng::XorShiftRng,
};

/// Opaque handle to the host's drawing surface. The core never draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSurface {
    pub name: String,
}

impl RenderSurface {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Surface for headless runs and tests.
    pub fn headless() -> Self {
        Self::new("headless")
    }
}

/// Opaque scene-graph root handed to the engine at construction and
/// passed through to the UI adapter. Not part of the game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRoot {
    pub name:              String,
    pub sortable_children: bool,
}

impl SceneRoot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:              name.into(),
            sortable_children: true,
        }
    }
}

pub struct ServiceRegistry {
    pub(crate) rng:     XorShiftRng,
    pub(crate) surface: RenderSurface,
    pub(crate) config:  Option<GameConfig>,
    pub(crate) catalog: Option<EventCatalog>,
}

impl ServiceRegistry {
    pub fn new(rng: XorShiftRng, surface: RenderSurface) -> Self {
        Self {
            rng,
            surface,
            config: None,
            catalog: None,
        }
    }

    /// Registry with an explicit seed and a headless surface.
    pub fn seeded(seed: u32) -> Self {
        Self::new(XorShiftRng::new(seed), RenderSurface::headless())
    }

    pub fn rng(&self) -> &XorShiftRng {
        &self.rng
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn install_config(&mut self, config: GameConfig) {
        self.config = Some(config);
    }

    pub fn install_catalog(&mut self, catalog: EventCatalog) {
        self.catalog = Some(catalog);
    }

    pub fn config(&self) -> SimResult<&GameConfig> {
        self.config.as_ref().ok_or(SimError::NotBooted { missing: "config" })
    }

    pub fn catalog(&self) -> SimResult<&EventCatalog> {
        self.catalog.as_ref().ok_or(SimError::NotBooted { missing: "event catalog" })
    }

    pub fn is_booted(&self) -> bool {
        self.config.is_some() && self.catalog.is_some()
    }
}
