//! Game state owned by the engine: clock, meters and a bounded history.

use crate::{
    clock::GameClock,
    config::GameConfig,
    meter::MeterSet,
    types::EventId,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// `None` when the phase passed without an event.
    pub event_id: Option<EventId>,
    /// Clock after the outcome was applied.
    pub clock:    GameClock,
}

/// Most recent outcomes, oldest first. Holds at most `limit` entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct History {
    limit:   usize,
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            entries: VecDeque::with_capacity(limit),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Event of the most recent entry, if that entry had one.
    pub fn last_event(&self) -> Option<&str> {
        self.entries.back().and_then(|e| e.event_id.as_deref())
    }

    /// Whether `event_id` appears among the last `n` entries.
    pub fn recent_contains(&self, event_id: &str, n: usize) -> bool {
        self.entries
            .iter()
            .rev()
            .take(n)
            .any(|e| e.event_id.as_deref() == Some(event_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub clock:   GameClock,
    pub meters:  MeterSet,
    pub history: History,
}

impl GameState {
    /// Day 1 morning, meters at their defaults, empty history.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            clock:   GameClock::new(),
            meters:  MeterSet::from_config(&config.meters),
            history: History::new(config.history_limit),
        }
    }
}
