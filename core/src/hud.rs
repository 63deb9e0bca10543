//! HUD projection: the read-only view the UI adapter renders.

use crate::{event::EventOutcome, state::GameState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HudMeter {
    pub name:    String,
    pub label:   String,
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HudProjection {
    /// "3. Gün"
    pub day_label:         String,
    /// "Akşam"
    pub phase_label:       String,
    /// "3. Gün - Akşam", the day pill.
    pub clock_label:       String,
    pub meter_percentages: BTreeMap<String, u8>,
    /// Meters in configured order, for bar rendering.
    pub meters:            Vec<HudMeter>,
    /// Headline of the last outcome, if any trigger has run.
    pub headline:          Option<String>,
}

impl HudProjection {
    pub fn from_state(state: &GameState, last_outcome: Option<&EventOutcome>) -> Self {
        let meters: Vec<HudMeter> = state
            .meters
            .iter()
            .map(|m| HudMeter {
                name:    m.name.clone(),
                label:   m.label.clone(),
                percent: m.percent(),
            })
            .collect();
        Self {
            day_label:         state.clock.day_label(),
            phase_label:       state.clock.phase.label().to_string(),
            clock_label:       state.clock.to_string(),
            meter_percentages: meters.iter().map(|m| (m.name.clone(), m.percent)).collect(),
            meters,
            headline:          last_outcome.map(EventOutcome::headline),
        }
    }
}
