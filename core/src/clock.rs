//! Game clock: owns the day counter and the phase within the day.

use crate::types::Day;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Morning, Phase::Afternoon, Phase::Evening, Phase::Night];

    /// The following phase and whether the day rolled over.
    pub fn next(self) -> (Phase, bool) {
        match self {
            Self::Morning   => (Self::Afternoon, false),
            Self::Afternoon => (Self::Evening,   false),
            Self::Evening   => (Self::Night,     false),
            Self::Night     => (Self::Morning,   true),
        }
    }

    /// Stable key, matches the serde name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Morning   => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening   => "evening",
            Self::Night     => "night",
        }
    }

    /// HUD label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Morning   => "Sabah",
            Self::Afternoon => "Öğle",
            Self::Evening   => "Akşam",
            Self::Night     => "Gece",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameClock {
    pub day:   Day,
    pub phase: Phase,
}

impl GameClock {
    /// Day 1, morning.
    pub fn new() -> Self {
        Self { day: 1, phase: Phase::Morning }
    }

    /// Advance one phase. Returns true if a new day began.
    pub fn advance(&mut self) -> bool {
        let (phase, rolled) = self.phase.next();
        self.phase = phase;
        if rolled {
            self.day = self.day.saturating_add(1);
        }
        rolled
    }

    /// Advance `phases` phases. Returns the number of new days begun.
    pub fn advance_by(&mut self, phases: u32) -> u32 {
        let index = self.phase as u64 + u64::from(phases);
        let new_days = u32::try_from(index / 4).unwrap_or(u32::MAX);
        self.phase = Phase::ALL[(index % 4) as usize];
        self.day = self.day.saturating_add(new_days);
        new_days
    }

    /// "1. Gün"
    pub fn day_label(&self) -> String {
        format!("{}. Gün", self.day)
    }

    /// Total phases elapsed since day 1 morning. Strictly increasing.
    pub fn ordinal(&self) -> u64 {
        u64::from(self.day.saturating_sub(1)) * 4 + self.phase as u64
    }
}

impl Default for GameClock {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.day_label(), self.phase)
    }
}
