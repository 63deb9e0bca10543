//! The event engine: the heart of Apartman Hayatı.
//!
//! ONE TRIGGER (fixed order, never reordered):
//!   1. Filter the catalog to eligible events (declaration order).
//!   2. Weighted draw: roll = rng.range(0, total_weight), first event whose
//!      cumulative weight exceeds the roll wins.
//!   3. Apply meter deltas, clamped to [0, 100].
//!   4. Advance the clock (event-specific amount, default one phase).
//!   5. Pick a narrative line, if the event has any.
//!   6. Append to history, then journal.
//!
//! No eligible event is not an error for the caller: the phase passes
//! quietly and a NothingHappened outcome is returned.
//!
//! RULES:
//!   - All randomness flows through the registry's XorShiftRng.
//!   - A trigger runs to completion before anything can observe state.
//!   - Only the engine mutates GameState.

use crate::{
    catalog::EventCatalog,
    clock::GameClock,
    error::{SimError, SimResult},
    event::{EventDefinition, EventOutcome},
    hud::HudProjection,
    journal::{JournalEntry, SessionJournal},
    registry::{SceneRoot, ServiceRegistry},
    rng::XorShiftRng,
    state::{GameState, HistoryEntry},
    types::SessionId,
};

/// A single applied change below this is logged as a warning.
const LARGE_DROP: f64 = -10.0;

pub struct GameEngine {
    registry:     ServiceRegistry,
    scene_root:   SceneRoot,
    state:        Option<GameState>,
    last_outcome: Option<EventOutcome>,
    journal:      Option<(SessionId, SessionJournal)>,
}

impl GameEngine {
    /// Construct from a booted registry. Fails with NotBooted otherwise.
    pub fn new(registry: ServiceRegistry, scene_root: SceneRoot) -> SimResult<Self> {
        registry.config()?;
        registry.catalog()?;
        Ok(Self {
            registry,
            scene_root,
            state: None,
            last_outcome: None,
            journal: None,
        })
    }

    /// Journal every outcome of this session from now on.
    pub fn attach_journal(&mut self, session_id: impl Into<SessionId>, journal: SessionJournal) {
        self.journal = Some((session_id.into(), journal));
    }

    /// Day 1 morning, meters at defaults, empty history.
    /// A second call fails with AlreadyStarted.
    pub fn start(&mut self) -> SimResult<()> {
        if self.state.is_some() {
            return Err(SimError::AlreadyStarted);
        }
        let config = self.registry.config()?;
        let state = GameState::new(config);
        log::info!(
            "game started: {} with {} meters, {} events, rng seed {}",
            state.clock,
            state.meters.len(),
            self.registry.catalog()?.len(),
            self.registry.rng.seed()
        );
        self.state = Some(state);
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    /// Select and apply one event. This is the "Sonraki Olay" action.
    pub fn trigger_random_event(&mut self) -> SimResult<EventOutcome> {
        let state = self.state.as_mut().ok_or(SimError::NotStarted)?;
        let catalog = self.registry.catalog.as_ref().ok_or(SimError::NotBooted {
            missing: "event catalog",
        })?;
        let rng = &mut self.registry.rng;

        let outcome = match select_event(catalog, state, rng) {
            Ok(event) => apply_event(event, state, rng),
            Err(SimError::NoEligibleEvent { day }) => {
                log::warn!("day={day} {}: no eligible event, phase passes quietly", state.clock.phase);
                quiet_phase(state)
            }
            Err(e) => return Err(e),
        };

        self.finish(outcome)
    }

    /// Let one phase pass without any event.
    pub fn advance_phase(&mut self) -> SimResult<EventOutcome> {
        let state = self.state.as_mut().ok_or(SimError::NotStarted)?;
        let outcome = quiet_phase(state);
        self.finish(outcome)
    }

    /// Trigger `n` events in a row. Used for testing and batch runs.
    pub fn run_triggers(&mut self, n: u32) -> SimResult<Vec<EventOutcome>> {
        (0..n).map(|_| self.trigger_random_event()).collect()
    }

    /// Read-only snapshot for the UI adapter.
    pub fn hud_projection(&self) -> SimResult<HudProjection> {
        let state = self.state()?;
        Ok(HudProjection::from_state(state, self.last_outcome.as_ref()))
    }

    pub fn state(&self) -> SimResult<&GameState> {
        self.state.as_ref().ok_or(SimError::NotStarted)
    }

    pub fn clock(&self) -> SimResult<GameClock> {
        Ok(self.state()?.clock)
    }

    /// Current value of a meter; `None` if the game defines no such meter.
    pub fn meter(&self, name: &str) -> SimResult<Option<f64>> {
        Ok(self.state()?.meters.get(name))
    }

    pub fn last_outcome(&self) -> Option<&EventOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn scene_root(&self) -> &SceneRoot {
        &self.scene_root
    }

    pub fn journal(&self) -> Option<&SessionJournal> {
        self.journal.as_ref().map(|(_, j)| j)
    }

    fn finish(&mut self, outcome: EventOutcome) -> SimResult<EventOutcome> {
        let state = self.state.as_mut().ok_or(SimError::NotStarted)?;
        state.history.push(HistoryEntry {
            event_id: outcome.event_id().map(str::to_string),
            clock:    outcome.clock(),
        });

        // The trigger is already applied; a journal failure must not
        // turn it into an error for the UI.
        if let Err(e) = self.record(&outcome) {
            log::error!("journal write failed at {}: {e}", outcome.clock());
        }

        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    fn record(&self, outcome: &EventOutcome) -> SimResult<()> {
        let Some((session_id, journal)) = &self.journal else {
            return Ok(());
        };
        let clock = outcome.clock();
        let entry = JournalEntry {
            id:         None,
            session_id: session_id.clone(),
            day:        clock.day,
            phase:      clock.phase.key().to_string(),
            event_id:   outcome.event_id().map(str::to_string),
            payload:    serde_json::to_string(outcome)?,
        };
        journal.append(&entry)
    }
}

/// Weighted draw over the eligible events. Declaration order breaks ties.
fn select_event<'a>(
    catalog: &'a EventCatalog,
    state:   &GameState,
    rng:     &mut XorShiftRng,
) -> SimResult<&'a EventDefinition> {
    let eligible = catalog.eligible(state);
    let Some(last) = eligible.last().copied() else {
        return Err(SimError::NoEligibleEvent { day: state.clock.day });
    };

    let total: f64 = eligible.iter().map(|e| e.weight).sum();
    let roll = rng.range(0.0, total);
    let mut cumulative = 0.0;
    for event in &eligible {
        cumulative += event.weight;
        if roll < cumulative {
            return Ok(*event);
        }
    }
    // Float rounding can leave roll == total.
    Ok(last)
}

fn apply_event(
    event: &EventDefinition,
    state: &mut GameState,
    rng:   &mut XorShiftRng,
) -> EventOutcome {
    let changes: Vec<_> = event
        .effect
        .deltas
        .iter()
        .filter_map(|(meter, delta)| state.meters.apply(meter, *delta))
        .collect();

    let new_day = state.clock.advance_by(event.effect.phases_to_advance()) > 0;

    // Guarded: never pick from an empty set.
    let line = if event.lines.is_empty() {
        None
    } else {
        rng.pick(&event.lines).ok().cloned()
    };

    for change in &changes {
        if change.applied <= LARGE_DROP {
            log::warn!(
                "{} {}: {} {:.1} -> {:.1} ({:+.1})",
                state.clock,
                event.id,
                change.meter,
                change.value - change.applied,
                change.value,
                change.applied
            );
        }
    }
    log::debug!("{} applied '{}' ({} meter changes)", state.clock, event.id, changes.len());

    EventOutcome::Applied {
        event_id: event.id.clone(),
        title:    event.title.clone(),
        line,
        changes,
        clock:    state.clock,
        new_day,
    }
}

fn quiet_phase(state: &mut GameState) -> EventOutcome {
    let new_day = state.clock.advance();
    EventOutcome::NothingHappened {
        clock: state.clock,
        new_day,
    }
}
