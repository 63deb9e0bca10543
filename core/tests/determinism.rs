//! Same seed, same catalog, same actions: identical sessions.
//!
//! The end-to-end scenario pins the exact selection algorithm. If it
//! fails, the weighted draw or the RNG transform changed.

use apartman_core::{
    boot::{BootLoader, StaticBoot},
    clock::Phase,
    config::GameConfig,
    event::{EventDefinition, EventEffect},
    journal::SessionJournal,
    registry::{SceneRoot, ServiceRegistry},
    GameEngine,
};

fn scenario_catalog() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new("event_a", 1.0, EventEffect::new().delta("reputation", -10.0)),
        EventDefinition::new(
            "event_b",
            1.0,
            EventEffect::new().delta("reputation", 5.0).advance(2),
        ),
    ]
}

fn build_engine(seed: u32, events: Vec<EventDefinition>) -> GameEngine {
    let mut registry = ServiceRegistry::seeded(seed);
    StaticBoot::new(GameConfig::default_test(), events)
        .boot(&mut registry)
        .expect("boot");
    let mut engine = GameEngine::new(registry, SceneRoot::new("world")).expect("engine");
    engine.start().expect("start");
    engine
}

fn build_journaled(seed: u32, session_id: &str) -> GameEngine {
    let journal = SessionJournal::in_memory().expect("in-memory journal");
    journal.migrate().expect("migration");
    journal.insert_session(session_id, seed, "0.1.0-test").expect("insert session");
    let mut engine = build_engine(seed, scenario_catalog());
    engine.attach_journal(session_id, journal);
    engine
}

/// Independent xorshift32 replay, normalised by 2^32.
fn replay_draws(seed: u32, n: usize) -> Vec<f64> {
    let mut x = seed;
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            f64::from(x) / 4_294_967_296.0
        })
        .collect()
}

#[test]
fn seed_42_scenario_matches_replayed_transform() {
    let mut engine = build_engine(42, scenario_catalog());
    engine.run_triggers(3).unwrap();

    // Replay: roll = 2 * draw; roll < 1 picks event_a, else event_b.
    let mut day = 1u32;
    let mut phase_index = 0u32;
    let mut reputation = 60.0f64;
    for draw in replay_draws(42, 3) {
        let (delta, advance) = if 2.0 * draw < 1.0 { (-10.0, 1) } else { (5.0, 2) };
        reputation = (reputation + delta).clamp(0.0, 100.0);
        phase_index += advance;
        day += phase_index / 4;
        phase_index %= 4;
    }

    let clock = engine.clock().unwrap();
    assert_eq!(clock.day, day);
    assert_eq!(clock.phase as u32, phase_index);
    assert_eq!(engine.meter("reputation").unwrap(), Some(reputation));

    // Locked values: a, b, a.
    assert_eq!(clock.day, 2);
    assert_eq!(clock.phase, Phase::Morning);
    assert_eq!(engine.meter("reputation").unwrap(), Some(45.0));
    let fired: Vec<_> = engine
        .state()
        .unwrap()
        .history
        .iter()
        .map(|e| e.event_id.clone().unwrap())
        .collect();
    assert_eq!(fired, vec!["event_a", "event_b", "event_a"]);
}

#[test]
fn same_seed_produces_identical_journals() {
    const SEED: u32 = 0xDEAD_BEEF;
    let mut engine_a = build_journaled(SEED, "det-a");
    let mut engine_b = build_journaled(SEED, "det-b");

    engine_a.run_triggers(200).expect("engine_a run");
    engine_b.run_triggers(200).expect("engine_b run");

    let log_a: Vec<String> = engine_a
        .journal()
        .unwrap()
        .entries("det-a")
        .unwrap()
        .into_iter()
        .map(|e| e.payload)
        .collect();
    let log_b: Vec<String> = engine_b
        .journal()
        .unwrap()
        .entries("det-b")
        .unwrap()
        .into_iter()
        .map(|e| e.payload)
        .collect();

    assert_eq!(log_a.len(), 200);
    assert_eq!(log_a.len(), log_b.len());
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "Journal diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }
}

#[test]
fn different_seeds_produce_different_sessions() {
    let mut engine_a = build_engine(42, scenario_catalog());
    let mut engine_b = build_engine(99, scenario_catalog());

    let a = engine_a.run_triggers(40).unwrap();
    let b = engine_b.run_triggers(40).unwrap();

    let any_different = a.iter().zip(b.iter()).any(|(x, y)| x.event_id() != y.event_id());
    assert!(any_different, "Different seeds produced identical sessions — seed is not being used");
}

#[test]
fn journal_groups_entries_by_day() {
    let mut engine = build_journaled(42, "det-days");
    engine.run_triggers(3).unwrap();

    let journal = engine.journal().unwrap();
    assert_eq!(journal.entry_count("det-days").unwrap(), 3);
    // event_a -> day 1 afternoon, event_b -> day 1 night, event_a -> day 2 morning
    let day_one = journal.entries_for_day("det-days", 1).unwrap();
    let day_two = journal.entries_for_day("det-days", 2).unwrap();
    assert_eq!(day_one.len(), 2);
    assert_eq!(day_one[1].phase, "night");
    assert_eq!(day_two.len(), 1);
    assert_eq!(day_two[0].event_id.as_deref(), Some("event_a"));
    assert_eq!(
        journal.event_counts("det-days").unwrap(),
        vec![("event_a".to_string(), 2), ("event_b".to_string(), 1)]
    );
}
