//! Event definitions and the outcomes they produce.
//!
//! RULE: Definitions are immutable once the catalog is loaded.
//! Everything that can be wrong with a definition is rejected by
//! `validate()` at load time, never at trigger time.

use crate::{
    clock::{GameClock, Phase},
    config::GameConfig,
    error::{SimError, SimResult},
    meter::MeterChange,
    state::GameState,
    types::{EventId, MeterName},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound for a selection weight. Weights must be in (0, MAX_WEIGHT].
pub const MAX_WEIGHT: f64 = 1_000.0;

/// Upper bound for `advance_phases`: one week of phases.
pub const MAX_ADVANCE_PHASES: u32 = 28;

/// Eligibility predicate. A definition is eligible when all its
/// conditions hold against the current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Current phase is one of `phases`.
    Phases { phases: Vec<Phase> },
    MinDay { day: u32 },
    MaxDay { day: u32 },
    MeterAtLeast { meter: MeterName, value: f64 },
    MeterBelow { meter: MeterName, value: f64 },
    /// The most recent history entry is not this event.
    NotRepeated,
    /// None of the last `entries` history entries is this event.
    Cooldown { entries: usize },
}

impl Condition {
    pub fn holds(&self, event_id: &str, state: &GameState) -> bool {
        match self {
            Self::Phases { phases } => phases.contains(&state.clock.phase),
            Self::MinDay { day } => state.clock.day >= *day,
            Self::MaxDay { day } => state.clock.day <= *day,
            Self::MeterAtLeast { meter, value } => {
                state.meters.get(meter).is_some_and(|v| v >= *value)
            }
            Self::MeterBelow { meter, value } => {
                state.meters.get(meter).is_some_and(|v| v < *value)
            }
            Self::NotRepeated => state.history.last_event() != Some(event_id),
            Self::Cooldown { entries } => !state.history.recent_contains(event_id, *entries),
        }
    }

    fn meter(&self) -> Option<&str> {
        match self {
            Self::MeterAtLeast { meter, .. } | Self::MeterBelow { meter, .. } => Some(meter.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventEffect {
    /// Added to each named meter, then clamped.
    #[serde(default)]
    pub deltas: BTreeMap<MeterName, f64>,
    /// Phases to advance. `None` means one phase.
    #[serde(default)]
    pub advance_phases: Option<u32>,
}

impl EventEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delta(mut self, meter: impl Into<MeterName>, value: f64) -> Self {
        self.deltas.insert(meter.into(), value);
        self
    }

    pub fn advance(mut self, phases: u32) -> Self {
        self.advance_phases = Some(phases);
        self
    }

    pub fn phases_to_advance(&self) -> u32 {
        self.advance_phases.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDefinition {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    /// Narrative variants; one is picked when the event fires.
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub effect: EventEffect,
}

fn default_weight() -> f64 {
    1.0
}

impl EventDefinition {
    pub fn new(id: impl Into<EventId>, weight: f64, effect: EventEffect) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            lines: Vec::new(),
            weight,
            conditions: Vec::new(),
            effect,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn is_eligible(&self, state: &GameState) -> bool {
        self.conditions.iter().all(|c| c.holds(&self.id, state))
    }

    /// Load-time validation against the meters the game defines.
    pub fn validate(&self, config: &GameConfig) -> SimResult<()> {
        if self.id.trim().is_empty() {
            return Err(SimError::invalid_event("<empty>", "id must not be empty"));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 || self.weight > MAX_WEIGHT {
            return Err(SimError::invalid_event(
                &self.id,
                format!("weight {} outside (0, {MAX_WEIGHT}]", self.weight),
            ));
        }
        for (meter, delta) in &self.effect.deltas {
            if !config.has_meter(meter) {
                return Err(SimError::invalid_event(
                    &self.id,
                    format!("effect targets unknown meter '{meter}'"),
                ));
            }
            if !delta.is_finite() {
                return Err(SimError::invalid_event(
                    &self.id,
                    format!("delta for '{meter}' is not finite"),
                ));
            }
        }
        if let Some(phases) = self.effect.advance_phases {
            if !(1..=MAX_ADVANCE_PHASES).contains(&phases) {
                return Err(SimError::invalid_event(
                    &self.id,
                    format!("advance_phases {phases} outside [1, {MAX_ADVANCE_PHASES}]"),
                ));
            }
        }
        for condition in &self.conditions {
            if let Some(meter) = condition.meter() {
                if !config.has_meter(meter) {
                    return Err(SimError::invalid_event(
                        &self.id,
                        format!("condition reads unknown meter '{meter}'"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// What a single trigger did. Returned to the caller and journaled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    Applied {
        event_id: EventId,
        title:    String,
        line:     Option<String>,
        changes:  Vec<MeterChange>,
        clock:    GameClock,
        new_day:  bool,
    },
    /// No eligible event; time still moved on by one phase.
    NothingHappened {
        clock:   GameClock,
        new_day: bool,
    },
}

impl EventOutcome {
    pub fn clock(&self) -> GameClock {
        match self {
            Self::Applied { clock, .. } | Self::NothingHappened { clock, .. } => *clock,
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::Applied { event_id, .. } => Some(event_id.as_str()),
            Self::NothingHappened { .. } => None,
        }
    }

    /// User-facing one-liner.
    pub fn headline(&self) -> String {
        match self {
            Self::Applied { event_id, title, line, .. } => {
                let name = if title.is_empty() { event_id } else { title };
                match line {
                    Some(line) => format!("{name}: {line}"),
                    None => name.clone(),
                }
            }
            Self::NothingHappened { .. } => "Hiçbir şey olmadı.".to_string(),
        }
    }
}
