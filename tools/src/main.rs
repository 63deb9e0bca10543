//! apartman-runner: composition root and text front-end for Apartman Hayatı.
//!
//! Usage:
//!   apartman-runner --seed 42 --triggers 20 --data-dir ./data
//!   apartman-runner --seed 42 --db session.db
//!   apartman-runner --ipc-mode

mod text_hud;

use anyhow::Result;
use apartman_core::{
    boot::{BootLoader, DataDirBoot},
    event::EventOutcome,
    hud::HudProjection,
    journal::SessionJournal,
    registry::{RenderSurface, SceneRoot, ServiceRegistry},
    rng::XorShiftRng,
    GameEngine,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    /// The single user intent: "Sonraki Olay".
    Next,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    hud:     HudProjection,
    outcome: Option<&'a EventOutcome>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    // Time-based default lives here only; the core always takes a seed.
    let seed = parse_arg(&args, "--seed", chrono::Utc::now().timestamp_millis() as u32);
    let triggers = parse_arg(&args, "--triggers", 12u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    if !ipc_mode {
        println!("Apartman Hayatı — runner");
        println!("  seed:      {seed}");
        println!("  triggers:  {triggers}");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let journal = if db == ":memory:" {
        SessionJournal::in_memory()?
    } else {
        SessionJournal::open(db)?
    };
    journal.migrate()?;

    let session_id = format!("session-{}", uuid::Uuid::new_v4());
    journal.insert_session(&session_id, seed, env!("CARGO_PKG_VERSION"))?;

    let mut registry = ServiceRegistry::new(XorShiftRng::new(seed), RenderSurface::new("terminal"));
    DataDirBoot::new(data_dir).boot(&mut registry)?;

    let mut engine = GameEngine::new(registry, SceneRoot::new("world"))?;
    engine.attach_journal(session_id.clone(), journal);
    engine.start()?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        run_batch(&mut engine, triggers)?;
        print_summary(&engine, &session_id)?;
    }

    Ok(())
}

fn run_batch(engine: &mut GameEngine, triggers: u32) -> Result<()> {
    println!("{}", text_hud::render(&engine.hud_projection()?));
    for _ in 0..triggers {
        let outcome = engine.trigger_random_event()?;
        println!("  > {}", outcome.headline());
        println!("{}", text_hud::render(&engine.hud_projection()?));
    }
    Ok(())
}

fn run_ipc_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Next => {
                if let Err(e) = engine.trigger_random_event() {
                    log::warn!("trigger failed: {e}");
                    writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                    stdout.flush()?;
                    continue;
                }
                writeln!(stdout, "{}", serde_json::to_string(&ui_state(engine)?)?)?;
            }
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&ui_state(engine)?)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn ui_state(engine: &GameEngine) -> Result<UiState<'_>> {
    Ok(UiState {
        hud:     engine.hud_projection()?,
        outcome: engine.last_outcome(),
    })
}

fn print_summary(engine: &GameEngine, session_id: &str) -> Result<()> {
    let state = engine.state()?;

    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  session_id:     {session_id}");
    println!("  final clock:    {}", state.clock);
    for meter in state.meters.iter() {
        println!("  {:<15} {:.1}", format!("{}:", meter.label), meter.value());
    }

    if let Some(journal) = engine.journal() {
        println!("  journaled:      {}", journal.entry_count(session_id)?);
        println!();
        println!("=== EVENTS ===");
        let counts = journal.event_counts(session_id)?;
        if counts.is_empty() {
            println!("  (nothing happened)");
        }
        for (event_id, n) in counts {
            println!("  {event_id:<24} {n}");
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
