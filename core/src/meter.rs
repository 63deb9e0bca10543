//! Bounded meters (reputation and friends).
//!
//! Every meter lives in [METER_MIN, METER_MAX] and is clamped after
//! every update. A meter is always initialised from its configured
//! default, so no meter is ever read undefined.

use crate::{
    config::MeterConfig,
    types::{MeterName, METER_MAX, METER_MIN},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meter {
    pub name:  MeterName,
    pub label: String,
    value:     f64,
}

impl Meter {
    pub fn new(name: impl Into<MeterName>, label: impl Into<String>, value: f64) -> Self {
        Self {
            name:  name.into(),
            label: label.into(),
            value: clamp(value),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Add `delta` and clamp. Returns the change actually applied.
    pub fn apply(&mut self, delta: f64) -> f64 {
        let before = self.value;
        self.value = clamp(before + delta);
        self.value - before
    }

    /// Rounded percentage for display.
    pub fn percent(&self) -> u8 {
        self.value.round() as u8
    }
}

/// One applied delta, as reported back to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeterChange {
    pub meter:     MeterName,
    pub requested: f64,
    pub applied:   f64,
    pub value:     f64,
}

/// All meters of a session, in configured order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeterSet {
    meters: Vec<Meter>,
}

impl MeterSet {
    pub fn from_config(configs: &[MeterConfig]) -> Self {
        Self {
            meters: configs
                .iter()
                .map(|c| Meter::new(c.name.clone(), c.label.clone(), c.default))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.meters.iter().find(|m| m.name == name).map(Meter::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Meter> {
        self.meters.iter()
    }

    pub fn len(&self) -> usize {
        self.meters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }

    /// Apply a delta to the named meter. `None` if no such meter exists.
    pub fn apply(&mut self, name: &str, delta: f64) -> Option<MeterChange> {
        let meter = self.meters.iter_mut().find(|m| m.name == name)?;
        let applied = meter.apply(delta);
        Some(MeterChange {
            meter: meter.name.clone(),
            requested: delta,
            applied,
            value: meter.value(),
        })
    }
}

fn clamp(value: f64) -> f64 {
    if value.is_nan() {
        return METER_MIN;
    }
    value.clamp(METER_MIN, METER_MAX)
}
