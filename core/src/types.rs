//! Shared primitive types used across the entire game.

/// An in-game day. Day 1 is the first day of a session.
pub type Day = u32;

/// Stable identifier of an event definition in the catalog.
pub type EventId = String;

/// Stable identifier of a meter ("reputation", ...).
pub type MeterName = String;

/// The canonical session identifier used by the journal.
pub type SessionId = String;

/// Lower bound of every meter.
pub const METER_MIN: f64 = 0.0;

/// Upper bound of every meter.
pub const METER_MAX: f64 = 100.0;
