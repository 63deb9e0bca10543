//! The event catalog supplied by Boot.
//!
//! Construction validates every definition; a catalog that exists is a
//! catalog the engine can run without partial-application risk.

use crate::{
    config::GameConfig,
    error::{SimError, SimResult},
    event::EventDefinition,
    state::GameState,
};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
struct EventCatalogFile {
    events: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<EventDefinition>,
}

impl EventCatalog {
    /// Validate and wrap definitions. Declaration order is kept; it is
    /// the tie-break order for selection.
    pub fn new(events: Vec<EventDefinition>, config: &GameConfig) -> SimResult<Self> {
        {
            let mut seen = HashSet::new();
            for event in &events {
                event.validate(config)?;
                if !seen.insert(event.id.as_str()) {
                    return Err(SimError::invalid_event(&event.id, "duplicate id"));
                }
            }
        }
        if events.is_empty() {
            log::warn!("event catalog is empty: every trigger will be a quiet phase");
        }
        Ok(Self { events })
    }

    /// Parse `{ "events": [...] }`. Each entry is decoded on its own so a
    /// malformed definition is reported under its id.
    pub fn from_json(json: &str, config: &GameConfig) -> SimResult<Self> {
        let file: EventCatalogFile = serde_json::from_str(json)?;
        let mut events = Vec::with_capacity(file.events.len());
        for raw in file.events {
            let id = raw
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("<unknown>")
                .to_string();
            let event: EventDefinition = serde_json::from_value(raw)
                .map_err(|e| SimError::invalid_event(&id, e.to_string()))?;
            events.push(event);
        }
        Self::new(events, config)
    }

    /// Load `events/event_catalog.json` from the data directory.
    pub fn load(data_dir: &str, config: &GameConfig) -> SimResult<Self> {
        let path = format!("{data_dir}/events/event_catalog.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let catalog = Self::from_json(&content, config)?;
        log::info!("loaded {} event definitions from {path}", catalog.len());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&EventDefinition> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Eligible definitions in declaration order.
    pub fn eligible<'a>(&'a self, state: &GameState) -> Vec<&'a EventDefinition> {
        self.events.iter().filter(|e| e.is_eligible(state)).collect()
    }
}
