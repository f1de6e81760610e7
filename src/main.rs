//! Xiaoji's Adventure entry point
//!
//! Headless native runner: drives the simulation with the autopilot or a
//! seeded key-masher and logs what happens. Rendering lives elsewhere.
//!
//! Usage: `xiaoji-adventure [settings.json]` (verbosity via `RUST_LOG`)

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use xiaoji_adventure::sim::{GameEvent, GamePhase};
use xiaoji_adventure::{FrameDriver, Key, Settings};

/// Frames between changes of the mashed keys
const MASH_INTERVAL: u32 = 12;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Xiaoji's Adventure (headless) starting...");

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => Settings::default(),
    };
    log::debug!("{settings:?}");

    let mut driver = FrameDriver::default();
    let mut rng = settings.random_input_seed.map(Pcg32::seed_from_u64);
    driver.set_autopilot(settings.autopilot && rng.is_none());

    let dt = settings.effective_frame_interval();
    let mut time = 0.0f64;
    let mut deaths = 0u32;
    let mut wins = 0u32;

    for frame in 0..settings.frames {
        if let Some(rng) = rng.as_mut() {
            if frame % MASH_INTERVAL == 0 {
                mash_keys(&mut driver, rng);
            }
        }

        time += dt as f64;
        let report = driver.update(dt, time);

        for event in &report.events {
            match event {
                GameEvent::Died { cause } => {
                    deaths += 1;
                    log::info!("Frame {frame}: died ({cause:?})");
                }
                GameEvent::Won => {
                    wins += 1;
                    log::info!("Frame {frame}: reached the flag");
                }
                GameEvent::DialogueOpened { npc } => {
                    if let Some(npc) = driver.state().world.npcs.get(*npc) {
                        log::info!("{}: {}", npc.name, npc.dialogue.display_text());
                    }
                }
                _ => {}
            }
        }

        if settings.show_fps && frame % 60 == 59 {
            log::info!("fps: {}", driver.fps());
        }

        if report.phase.is_terminal() {
            if settings.auto_reset {
                driver.reset();
            } else {
                break;
            }
        }
    }

    let state = driver.state();
    let outcome = match state.phase {
        GamePhase::Running => "still running",
        GamePhase::Won => "won",
        GamePhase::Dead => "dead",
    };
    println!(
        "{outcome} after {} ticks at x={:.0} (camera {:.0}); wins={wins} deaths={deaths}",
        state.time_ticks,
        state.player.bounds.x(),
        state.camera.offset
    );

    if settings.dump_view {
        match serde_json::to_string_pretty(&driver.view(settings.reduced_motion)) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not serialize view: {e}"),
        }
    }
}

/// Pick a fresh random key combination
fn mash_keys(driver: &mut FrameDriver, rng: &mut Pcg32) {
    for key in [Key::Left, Key::Right, Key::Up, Key::Space] {
        // Bias toward running right so soak runs cover the whole level
        let p = if key == Key::Right { 0.7 } else { 0.25 };
        if rng.random_bool(p) {
            driver.press(key);
        } else {
            driver.release(key);
        }
    }
}
