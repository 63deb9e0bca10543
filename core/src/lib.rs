//! Apartman Hayatı: the procedural event/state engine.
//!
//! Boot fills a ServiceRegistry, the GameEngine takes ownership of it,
//! and every "next event" action runs one synchronous trigger.

pub mod boot;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod hud;
pub mod journal;
pub mod meter;
pub mod registry;
pub mod rng;
pub mod state;
pub mod types;

pub use engine::GameEngine;
pub use error::{SimError, SimResult};
