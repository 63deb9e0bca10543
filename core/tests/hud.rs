//! HUD projection: what the UI adapter sees after each trigger.

use apartman_core::{
    boot::{BootLoader, StaticBoot},
    config::{GameConfig, MeterConfig},
    event::{EventDefinition, EventEffect},
    registry::{SceneRoot, ServiceRegistry},
    GameEngine,
};

fn build(events: Vec<EventDefinition>) -> GameEngine {
    let mut config = GameConfig::default_test();
    config.meters.push(MeterConfig {
        name:    "mood".into(),
        label:   "Keyif".into(),
        default: 70.4,
    });
    let mut registry = ServiceRegistry::seeded(42);
    StaticBoot::new(config, events).boot(&mut registry).expect("boot");
    let mut engine = GameEngine::new(registry, SceneRoot::new("world")).expect("engine");
    engine.start().expect("start");
    engine
}

#[test]
fn initial_projection_matches_opening_hud() {
    let engine = build(vec![]);
    let hud = engine.hud_projection().unwrap();
    assert_eq!(hud.day_label, "1. Gün");
    assert_eq!(hud.phase_label, "Sabah");
    assert_eq!(hud.clock_label, "1. Gün - Sabah");
    assert_eq!(hud.meter_percentages.get("reputation"), Some(&60));
    assert_eq!(hud.meter_percentages.get("mood"), Some(&70));
    let labels: Vec<_> = hud.meters.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["İtibar", "Keyif"]);
    assert!(hud.headline.is_none());
}

#[test]
fn projection_follows_each_trigger() {
    let events = vec![EventDefinition::new(
        "compliment",
        1.0,
        EventEffect::new().delta("reputation", 55.0),
    )
    .with_title("İltifat")];
    let mut engine = build(events);

    engine.trigger_random_event().unwrap();
    let hud = engine.hud_projection().unwrap();
    assert_eq!(hud.clock_label, "1. Gün - Öğle");
    assert_eq!(hud.meter_percentages["reputation"], 100);
    assert_eq!(hud.headline.as_deref(), Some("İltifat"));
}

#[test]
fn projection_is_read_only() {
    let mut engine = build(vec![EventDefinition::new("x", 1.0, EventEffect::new())]);
    engine.trigger_random_event().unwrap();
    let before = engine.state().unwrap().clone();
    let first = engine.hud_projection().unwrap();
    let second = engine.hud_projection().unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.state().unwrap(), &before);
}

#[test]
fn projection_serializes_for_the_ui() {
    let engine = build(vec![]);
    let json = serde_json::to_value(engine.hud_projection().unwrap()).unwrap();
    assert_eq!(json["day_label"], "1. Gün");
    assert_eq!(json["meter_percentages"]["reputation"], 60);
}
