//! Headless demo run
//!
//! Drives a full session at a fixed 120 Hz without a frontend: starts from
//! the menu, strafes in a loop, auto-picks the first upgrade card whenever
//! one is offered, and prints a summary when the run ends or the time cap
//! is reached. Handy for profiling and for eyeballing balance changes in
//! the log output.

use void_survivors::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

const TICK_RATE: f32 = 120.0;
const MAX_SECONDS: f32 = 300.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = 0xC0FFEE;
    let mut state = GameState::new(seed);
    log::info!("headless run, seed {seed}");

    let dt = 1.0 / TICK_RATE;
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, dt);

    let mut ticks = 0u64;
    while state.elapsed < MAX_SECONDS {
        // Circle the arena center so spawns approach from every side
        let heading = ticks as f32 / TICK_RATE;
        let input = TickInput {
            up: heading.sin() > 0.0,
            down: heading.sin() < 0.0,
            left: heading.cos() < 0.0,
            right: heading.cos() > 0.0,
            select_upgrade: (state.phase == GamePhase::UpgradeSelection).then_some(0),
            ..Default::default()
        };

        for event in tick(&mut state, &input, dt) {
            if let GameEvent::LevelUp { level } = event {
                log::debug!("picked first card at level {level}");
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
        ticks += 1;
    }

    println!("--- run summary (seed {seed}) ---");
    println!("survived      {:>8.1}s", state.elapsed);
    println!("level         {:>8}", state.experience.level);
    println!("total exp     {:>8}", state.experience.total_exp);
    println!("kills         {:>8}", state.kills);
    println!("spawned       {:>8}", state.spawner.zombies_spawned);
    println!(
        "outcome       {:>8}",
        if state.phase == GamePhase::GameOver {
            "died"
        } else {
            "survived"
        }
    );
}
